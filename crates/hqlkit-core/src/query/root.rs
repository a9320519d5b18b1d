//! Builders for queries over a whole entity collection.

use super::builder::{QueryBuilder, QueryContext};
use crate::catalog::Catalog;
use crate::config::BuilderConfig;
use crate::error::{Error, Result};
use crate::session::{QueryHandle, Session};
use hqlkit_proto::{FilterExpression, Pagination, Sorting};
use tracing::{debug, trace};

/// Fetches the distinct rows of a root entity collection.
///
/// Produces `SELECT DISTINCT <alias>  FROM <name> AS <alias> <joins> <where>
/// <order>`. Pagination is applied to the session's query handle rather than
/// written into the text.
#[derive(Debug)]
pub struct RootCollectionFetchQueryBuilder<'a, S: Session> {
    entity: String,
    catalog: &'a Catalog,
    session: &'a S,
    config: BuilderConfig,
    filter: Option<FilterExpression>,
    sorting: Option<Sorting>,
    pagination: Option<Pagination>,
}

impl<'a, S: Session> RootCollectionFetchQueryBuilder<'a, S> {
    /// Create a builder for `entity` (canonical or proxy name).
    pub fn new(entity: impl Into<String>, catalog: &'a Catalog, session: &'a S) -> Self {
        Self {
            entity: entity.into(),
            catalog,
            session,
            config: BuilderConfig::default(),
            filter: None,
            sorting: None,
            pagination: None,
        }
    }

    /// Use a non-default configuration.
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }
}

impl<'a, S: Session> QueryBuilder for RootCollectionFetchQueryBuilder<'a, S> {
    type Query = S::Query;

    fn with_possible_filter_expression(mut self, filter: Option<FilterExpression>) -> Self {
        self.filter = filter;
        self
    }

    fn with_possible_sorting(mut self, sorting: Option<Sorting>) -> Result<Self> {
        self.sorting = sorting;
        Ok(self)
    }

    fn with_possible_pagination(mut self, pagination: Option<Pagination>) -> Self {
        self.pagination = pagination;
        self
    }

    fn build(self) -> Result<S::Query> {
        if let Some(pagination) = &self.pagination {
            pagination.validate(&self.config.pagination)?;
        }

        let mut ctx = QueryContext::new(self.catalog, &self.entity, &self.config)?;
        let where_clause = ctx.where_clause(self.filter.as_ref())?;
        let order_clause = ctx.order_clause(self.sorting.as_ref())?;
        let mut joins = ctx.joins();
        if self.config.merge_to_one_joins {
            joins.push_str(&ctx.to_one_fetch_joins()?);
        }

        let alias = ctx.root_alias().to_string();
        let text = format!(
            "SELECT DISTINCT {alias}  FROM {name} AS {alias} {joins} {where_clause} {order_clause}",
            name = ctx.root_type(),
        );
        debug!(entity = %ctx.root_type(), query = %text, "built root collection fetch query");

        let mut query = self.session.wrap_query(ctx.finish(text));
        if let Some(pagination) = self.pagination {
            trace!(
                offset = pagination.offset,
                limit = pagination.limit,
                "applying pagination"
            );
            query.set_first_result(pagination.offset);
            query.set_max_results(pagination.limit);
        }
        Ok(query)
    }
}

/// Counts the distinct rows of a root entity collection.
///
/// Produces `SELECT COUNT(DISTINCT <alias>)  FROM <name> AS <alias> <joins>
/// <where>`. Sorting a count is rejected; pagination is accepted and ignored.
#[derive(Debug)]
pub struct RootCollectionPageTotalsQueryBuilder<'a, S: Session> {
    entity: String,
    catalog: &'a Catalog,
    session: &'a S,
    config: BuilderConfig,
    filter: Option<FilterExpression>,
}

impl<'a, S: Session> RootCollectionPageTotalsQueryBuilder<'a, S> {
    /// Create a builder for `entity` (canonical or proxy name).
    pub fn new(entity: impl Into<String>, catalog: &'a Catalog, session: &'a S) -> Self {
        Self {
            entity: entity.into(),
            catalog,
            session,
            config: BuilderConfig::default(),
            filter: None,
        }
    }

    /// Use a non-default configuration.
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }
}

impl<'a, S: Session> QueryBuilder for RootCollectionPageTotalsQueryBuilder<'a, S> {
    type Query = S::Query;

    fn with_possible_filter_expression(mut self, filter: Option<FilterExpression>) -> Self {
        self.filter = filter;
        self
    }

    fn with_possible_sorting(self, _sorting: Option<Sorting>) -> Result<Self> {
        Err(Error::UnsupportedOperation(
            "sorting is not supported on a page totals query".into(),
        ))
    }

    fn with_possible_pagination(self, pagination: Option<Pagination>) -> Self {
        if pagination.is_some() {
            trace!(entity = %self.entity, "ignoring pagination on page totals query");
        }
        self
    }

    fn build(self) -> Result<S::Query> {
        let mut ctx = QueryContext::new(self.catalog, &self.entity, &self.config)?;
        let where_clause = ctx.where_clause(self.filter.as_ref())?;
        let joins = ctx.joins();

        let alias = ctx.root_alias().to_string();
        let text = format!(
            "SELECT COUNT(DISTINCT {alias})  FROM {name} AS {alias} {joins} {where_clause}",
            name = ctx.root_type(),
        );
        debug!(entity = %ctx.root_type(), query = %text, "built root collection totals query");

        Ok(self.session.wrap_query(ctx.finish(text)))
    }
}
