//! Builder configuration.

use crate::error::{Error, Result};
use hqlkit_proto::PaginationLimits;
use serde::{Deserialize, Serialize};

/// Random bytes per placeholder suffix when not configured.
pub const DEFAULT_PLACEHOLDER_SUFFIX_BYTES: usize = 8;

/// Knobs shared by all query builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Eagerly fetch every to-one relationship of the queried entity
    /// (`LEFT JOIN FETCH`) in fetch queries.
    pub merge_to_one_joins: bool,

    /// Random bytes (hex encoded) appended to placeholder names. Builders
    /// clamp this to `MIN_SUFFIX_BYTES..=MAX_SUFFIX_BYTES`.
    pub placeholder_suffix_bytes: usize,

    /// Page size bounds checked when a fetch query is paginated.
    pub pagination: PaginationLimits,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            merge_to_one_joins: false,
            placeholder_suffix_bytes: DEFAULT_PLACEHOLDER_SUFFIX_BYTES,
            pagination: PaginationLimits::default(),
        }
    }
}

impl BuilderConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable eager to-one fetch joins.
    pub fn with_merge_to_one_joins(mut self, merge: bool) -> Self {
        self.merge_to_one_joins = merge;
        self
    }

    /// Set the number of random bytes in placeholder suffixes.
    pub fn with_placeholder_suffix_bytes(mut self, bytes: usize) -> Self {
        self.placeholder_suffix_bytes = bytes;
        self
    }

    /// Set the page size bounds.
    pub fn with_pagination_limits(mut self, limits: PaginationLimits) -> Self {
        self.pagination = limits;
        self
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }
}
