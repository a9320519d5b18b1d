//! Pagination parameters.

use crate::error::Error;
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Default number of rows per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 500;

/// Largest page a client may request.
pub const MAX_PAGE_LIMIT: u32 = 10_000;

/// Page size bounds applied to client requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerdeSerialize, SerdeDeserialize)]
#[serde(default)]
pub struct PaginationLimits {
    /// Page size used when the client does not ask for one.
    pub default_limit: u32,
    /// Largest accepted page size.
    pub max_limit: u32,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

/// Offset/limit pagination.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct Pagination {
    /// Number of rows to skip.
    pub offset: u32,
    /// Maximum number of rows to return (always > 0).
    pub limit: u32,
    /// Whether the caller also wants the total row count.
    pub generate_totals: bool,
}

impl Pagination {
    /// Pagination from an explicit offset and limit.
    pub fn offset(offset: u32, limit: u32) -> Result<Self, Error> {
        if limit == 0 {
            return Err(Error::InvalidPagination("limit must be positive".into()));
        }
        Ok(Self {
            offset,
            limit,
            generate_totals: false,
        })
    }

    /// Pagination from a 1-based page number and a page size.
    pub fn page(number: u32, size: u32) -> Result<Self, Error> {
        if number == 0 {
            return Err(Error::InvalidPagination("page number starts at 1".into()));
        }
        if size == 0 {
            return Err(Error::InvalidPagination("page size must be positive".into()));
        }
        let offset = (number - 1).checked_mul(size).ok_or_else(|| {
            Error::InvalidPagination(format!("page {number} of size {size} is out of range"))
        })?;
        Self::offset(offset, size)
    }

    /// The first page of the default size.
    pub fn default_page(limits: &PaginationLimits) -> Self {
        Self {
            offset: 0,
            limit: limits.default_limit.max(1),
            generate_totals: false,
        }
    }

    /// Also request the total row count.
    pub fn with_totals(mut self) -> Self {
        self.generate_totals = true;
        self
    }

    /// Check the page size against the configured bounds.
    pub fn validate(&self, limits: &PaginationLimits) -> Result<(), Error> {
        if self.limit == 0 {
            return Err(Error::InvalidPagination("limit must be positive".into()));
        }
        if self.limit > limits.max_limit {
            return Err(Error::InvalidPagination(format!(
                "limit {} exceeds maximum of {}",
                self.limit, limits.max_limit
            )));
        }
        Ok(())
    }
}
