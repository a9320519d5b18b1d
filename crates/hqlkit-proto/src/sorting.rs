//! Sort rules.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Keyword emitted in ORDER BY clauses.
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A single sort key: a dotted field path relative to the queried entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    /// Dotted path, e.g. `publisher.name`.
    pub path: String,
    /// Direction.
    pub order: SortOrder,
}

/// Ordered sort keys; earlier keys take precedence.
///
/// Keys are unique: adding a path that is already present keeps the original
/// direction and position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sorting {
    rules: Vec<SortRule>,
}

impl Sorting {
    /// An empty (unsorted) sorting.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Parse a comma separated rule list such as `-title,publisher.name`.
    ///
    /// A leading `-` sorts descending, a leading `+` or no sign ascending.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let mut sorting = Self::unsorted();
        for raw in input.split(',') {
            let raw = raw.trim();
            let (order, path) = match raw.strip_prefix('-') {
                Some(rest) => (SortOrder::Desc, rest),
                None => (SortOrder::Asc, raw.strip_prefix('+').unwrap_or(raw)),
            };
            if path.is_empty() || path.split('.').any(str::is_empty) {
                return Err(Error::InvalidSortRule(format!("'{raw}' in '{input}'")));
            }
            sorting = sorting.then(path, order);
        }
        Ok(sorting)
    }

    /// Append an ascending key.
    pub fn asc(self, path: impl Into<String>) -> Self {
        self.then(path, SortOrder::Asc)
    }

    /// Append a descending key.
    pub fn desc(self, path: impl Into<String>) -> Self {
        self.then(path, SortOrder::Desc)
    }

    /// Append a key with an explicit direction.
    pub fn then(mut self, path: impl Into<String>, order: SortOrder) -> Self {
        let path = path.into();
        if !self.rules.iter().any(|r| r.path == path) {
            self.rules.push(SortRule { path, order });
        }
        self
    }

    /// Rules in precedence order.
    pub fn rules(&self) -> &[SortRule] {
        &self.rules
    }

    /// Whether no key is present.
    pub fn is_unsorted(&self) -> bool {
        self.rules.is_empty()
    }
}
