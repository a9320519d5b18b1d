//! Join alias registry.
//!
//! Maps each distinct relationship path prefix (field names from the root) to
//! the alias of the join that reaches it. A prefix is joined at most once per
//! query no matter how many predicates or sort keys traverse it.

use std::collections::{HashMap, HashSet};
use tracing::trace;

/// One `LEFT JOIN` produced while resolving paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinClause {
    /// Field names from the root up to and including the joined relationship.
    pub prefix: Vec<String>,
    /// Alias the relationship is navigated from.
    pub parent_alias: String,
    /// Relationship field.
    pub field: String,
    /// Alias given to the joined entity.
    pub alias: String,
}

impl JoinClause {
    /// Query text for this join, padded with a space on either side.
    pub fn fragment(&self) -> String {
        format!(" LEFT JOIN {}.{} {} ", self.parent_alias, self.field, self.alias)
    }
}

/// Builder-local registry of generated join aliases.
#[derive(Debug, Clone)]
pub struct JoinRegistry {
    root_alias: String,
    joins: Vec<JoinClause>,
    by_prefix: HashMap<Vec<String>, usize>,
    aliases: HashSet<String>,
}

impl JoinRegistry {
    /// Create an empty registry for a query rooted at `root_alias`.
    pub fn new(root_alias: impl Into<String>) -> Self {
        let root_alias = root_alias.into();
        let mut aliases = HashSet::new();
        aliases.insert(root_alias.clone());
        Self {
            root_alias,
            joins: Vec::new(),
            by_prefix: HashMap::new(),
            aliases,
        }
    }

    /// Alias of the query root.
    pub fn root_alias(&self) -> &str {
        &self.root_alias
    }

    /// Alias reached by a path prefix. The empty prefix is the root.
    pub fn alias_for(&self, prefix: &[String]) -> Option<&str> {
        if prefix.is_empty() {
            return Some(&self.root_alias);
        }
        self.by_prefix
            .get(prefix)
            .map(|&index| self.joins[index].alias.as_str())
    }

    /// Join `prefix` from `parent_alias`, or reuse the existing join for it.
    ///
    /// The alias is `<origin_alias>_<field>`, where `origin_alias` is the type
    /// alias of the entity owning the relationship. A second prefix that would
    /// produce the same alias gets a numeric suffix. Returns the clause and
    /// whether it was newly registered, or `None` for the empty prefix, which
    /// names the root and is never joined.
    pub fn register(
        &mut self,
        prefix: &[String],
        parent_alias: &str,
        origin_alias: &str,
    ) -> Option<(&JoinClause, bool)> {
        let field = prefix.last()?.clone();
        if let Some(&index) = self.by_prefix.get(prefix) {
            return Some((&self.joins[index], false));
        }

        let candidate = format!("{origin_alias}_{field}");
        let mut alias = candidate.clone();
        let mut n = 2;
        while self.aliases.contains(&alias) {
            alias = format!("{candidate}_{n}");
            n += 1;
        }

        trace!(alias = %alias, path = %prefix.join("."), "registered join");
        self.aliases.insert(alias.clone());
        self.by_prefix.insert(prefix.to_vec(), self.joins.len());
        self.joins.push(JoinClause {
            prefix: prefix.to_vec(),
            parent_alias: parent_alias.to_string(),
            field,
            alias,
        });
        let index = self.joins.len() - 1;
        Some((&self.joins[index], true))
    }

    /// All joins in registration order.
    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    /// Number of registered joins.
    pub fn len(&self) -> usize {
        self.joins.len()
    }

    /// Whether no join has been registered.
    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }
}
