//! Shared builder contract and per-build state.

use super::alias::JoinRegistry;
use super::filter::compile_filter;
use super::params::Parameters;
use super::path::{PathResolver, ResolvedPath};
use super::sort::compile_sorting;
use crate::catalog::Catalog;
use crate::config::BuilderConfig;
use crate::error::Result;
use hqlkit_proto::{FilterExpression, Pagination, Path, QueryArtifact, Sorting, Value};

/// Fluent configuration shared by every query builder.
///
/// Builders are single-use: the `with_possible_*` methods consume and return
/// the builder, and [`build`](QueryBuilder::build) consumes it for good.
pub trait QueryBuilder: Sized {
    /// Handle produced by the session for the finished query.
    type Query;

    /// Restrict results with a filter expression, if one is given.
    fn with_possible_filter_expression(self, filter: Option<FilterExpression>) -> Self;

    /// Order results, if a sorting is given. Fails on variants that cannot
    /// be sorted.
    fn with_possible_sorting(self, sorting: Option<Sorting>) -> Result<Self>;

    /// Page results, if a pagination is given.
    fn with_possible_pagination(self, pagination: Option<Pagination>) -> Self;

    /// Produce the finished query.
    fn build(self) -> Result<Self::Query>;
}

/// Mutable state of a single `build()`: joins, placeholders and bindings.
#[derive(Debug)]
pub(crate) struct QueryContext<'a> {
    resolver: PathResolver<'a>,
    registry: JoinRegistry,
    params: Parameters,
    join_groups: Vec<String>,
}

impl<'a> QueryContext<'a> {
    pub(crate) fn new(catalog: &'a Catalog, root_type: &str, config: &BuilderConfig) -> Result<Self> {
        let resolver = PathResolver::new(catalog, root_type)?;
        let registry = JoinRegistry::new(resolver.root_alias());
        Ok(Self {
            resolver,
            registry,
            params: Parameters::new(config.placeholder_suffix_bytes),
            join_groups: Vec::new(),
        })
    }

    pub(crate) fn root_type(&self) -> &str {
        self.resolver.root_type()
    }

    pub(crate) fn root_alias(&self) -> &str {
        self.resolver.root_alias()
    }

    /// Resolve a path and remember the joins it introduced.
    pub(crate) fn resolve(&mut self, path: &Path) -> Result<ResolvedPath> {
        let resolved = self.resolver.resolve(&mut self.registry, path)?;
        self.join_groups.push(resolved.joins.clone());
        Ok(resolved)
    }

    pub(crate) fn resolve_dotted(&mut self, dotted: &str) -> Result<ResolvedPath> {
        let resolved = self.resolver.resolve_dotted(&mut self.registry, dotted)?;
        self.join_groups.push(resolved.joins.clone());
        Ok(resolved)
    }

    pub(crate) fn bind(&mut self, stem: &str, values: Vec<Value>) -> String {
        self.params.bind(stem, values)
    }

    /// Compiled boolean expression for a filter.
    pub(crate) fn filter_expression(&mut self, filter: &FilterExpression) -> Result<String> {
        compile_filter(self, filter)
    }

    /// `WHERE` clause for an optional filter; empty when there is none.
    pub(crate) fn where_clause(&mut self, filter: Option<&FilterExpression>) -> Result<String> {
        match filter {
            Some(filter) => Ok(format!("WHERE {}", self.filter_expression(filter)?)),
            None => Ok(String::new()),
        }
    }

    /// `ORDER BY` clause for an optional sorting; empty when unsorted.
    pub(crate) fn order_clause(&mut self, sorting: Option<&Sorting>) -> Result<String> {
        match sorting {
            Some(sorting) => compile_sorting(self, sorting),
            None => Ok(String::new()),
        }
    }

    /// Join fragments, one group per resolved path, in resolution order.
    pub(crate) fn joins(&self) -> String {
        self.join_groups.join(" ")
    }

    /// `LEFT JOIN FETCH` fragments for every to-one relationship of the root.
    ///
    /// A relationship already joined by a filter or sort path is skipped, so
    /// the root never navigates the same association twice.
    pub(crate) fn to_one_fetch_joins(&self) -> Result<String> {
        let root = self.resolver.catalog().lookup_entity(self.root_type())?;
        Ok(root
            .to_one_relationships()
            .filter(|r| self.registry.alias_for(std::slice::from_ref(&r.name)).is_none())
            .map(|r| format!(" LEFT JOIN FETCH {}.{} ", self.root_alias(), r.name))
            .collect())
    }

    /// Seal the text and the bindings collected so far.
    pub(crate) fn finish(self, text: String) -> QueryArtifact {
        QueryArtifact::new(text, self.params.into_bindings())
    }
}
