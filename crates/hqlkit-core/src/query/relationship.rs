//! Builders for queries over the collection behind one entity's relationship.
//!
//! The parent entity is selected by identifier through an implicit equality
//! predicate; filter and sort paths are rooted at the relationship's target
//! type.

use super::builder::{QueryBuilder, QueryContext};
use crate::catalog::{type_alias, Catalog};
use crate::config::BuilderConfig;
use crate::error::{Error, Result};
use crate::session::{QueryHandle, Session};
use hqlkit_proto::{FilterExpression, Pagination, Sorting, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A named relationship of one parent entity instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRef {
    /// Parent entity type (canonical or proxy name).
    pub parent_type: String,
    /// Identifier of the parent instance.
    pub parent_id: Value,
    /// Relationship field on the parent type.
    pub relationship: String,
}

impl RelationshipRef {
    /// Create a relationship reference.
    pub fn new(
        parent_type: impl Into<String>,
        parent_id: impl Into<Value>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            parent_type: parent_type.into(),
            parent_id: parent_id.into(),
            relationship: relationship.into(),
        }
    }
}

/// Clauses common to both relationship variants.
struct RelationshipQuery<'a> {
    ctx: QueryContext<'a>,
    from_clause: String,
    where_clause: String,
}

impl<'a> RelationshipQuery<'a> {
    fn prepare(
        catalog: &'a Catalog,
        config: &BuilderConfig,
        relationship: &RelationshipRef,
        filter: Option<&FilterExpression>,
    ) -> Result<Self> {
        let parent = catalog.canonical_name(&relationship.parent_type)?;
        let resolved = catalog.resolve_relationship(&parent, &relationship.relationship)?;
        let id_field = catalog.identity_field(&parent)?;
        let parent_alias = format!("{}__fetch", type_alias(&parent));

        let mut ctx = QueryContext::new(catalog, &resolved.target, config)?;
        let child_alias = ctx.root_alias().to_string();
        let from_clause = format!(
            "FROM {parent} AS {parent_alias} JOIN {parent_alias}.{} {child_alias}",
            relationship.relationship
        );

        let id_param = ctx.bind(&id_field, vec![relationship.parent_id.clone()]);
        let mut where_clause = format!("WHERE {parent_alias}.{id_field} = :{id_param}");
        if let Some(filter) = filter {
            let compiled = ctx.filter_expression(filter)?;
            where_clause.push_str(&format!(" AND ({compiled})"));
        }

        Ok(Self {
            ctx,
            from_clause,
            where_clause,
        })
    }
}

/// Fetches the distinct members of a relationship collection.
#[derive(Debug)]
pub struct RelationshipCollectionFetchQueryBuilder<'a, S: Session> {
    relationship: RelationshipRef,
    catalog: &'a Catalog,
    session: &'a S,
    config: BuilderConfig,
    filter: Option<FilterExpression>,
    sorting: Option<Sorting>,
    pagination: Option<Pagination>,
}

impl<'a, S: Session> RelationshipCollectionFetchQueryBuilder<'a, S> {
    /// Create a builder for the members of `relationship`.
    pub fn new(relationship: RelationshipRef, catalog: &'a Catalog, session: &'a S) -> Self {
        Self {
            relationship,
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

impl<'a, S: Session> QueryBuilder for RelationshipCollectionFetchQueryBuilder<'a, S> {
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

        let RelationshipQuery {
            mut ctx,
            from_clause,
            where_clause,
        } = RelationshipQuery::prepare(
            self.catalog,
            &self.config,
            &self.relationship,
            self.filter.as_ref(),
        )?;
        let order_clause = ctx.order_clause(self.sorting.as_ref())?;
        let mut joins = ctx.joins();
        if self.config.merge_to_one_joins {
            joins.push_str(&ctx.to_one_fetch_joins()?);
        }

        let text = format!(
            "SELECT DISTINCT {child}  {from_clause} {joins} {where_clause} {order_clause}",
            child = ctx.root_alias(),
        );
        debug!(
            parent = %self.relationship.parent_type,
            relationship = %self.relationship.relationship,
            query = %text,
            "built relationship collection fetch query"
        );

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

/// Counts the distinct members of a relationship collection.
///
/// Mirrors [`RootCollectionPageTotalsQueryBuilder`](super::RootCollectionPageTotalsQueryBuilder):
/// sorting fails, pagination is ignored.
#[derive(Debug)]
pub struct RelationshipCollectionPageTotalsQueryBuilder<'a, S: Session> {
    relationship: RelationshipRef,
    catalog: &'a Catalog,
    session: &'a S,
    config: BuilderConfig,
    filter: Option<FilterExpression>,
}

impl<'a, S: Session> RelationshipCollectionPageTotalsQueryBuilder<'a, S> {
    /// Create a builder counting the members of `relationship`.
    pub fn new(relationship: RelationshipRef, catalog: &'a Catalog, session: &'a S) -> Self {
        Self {
            relationship,
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

impl<'a, S: Session> QueryBuilder for RelationshipCollectionPageTotalsQueryBuilder<'a, S> {
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
            trace!(
                relationship = %self.relationship.relationship,
                "ignoring pagination on page totals query"
            );
        }
        self
    }

    fn build(self) -> Result<S::Query> {
        let RelationshipQuery {
            ctx,
            from_clause,
            where_clause,
        } = RelationshipQuery::prepare(
            self.catalog,
            &self.config,
            &self.relationship,
            self.filter.as_ref(),
        )?;
        let joins = ctx.joins();

        let text = format!(
            "SELECT COUNT(DISTINCT {child})  {from_clause} {joins} {where_clause}",
            child = ctx.root_alias(),
        );
        debug!(
            parent = %self.relationship.parent_type,
            relationship = %self.relationship.relationship,
            query = %text,
            "built relationship collection totals query"
        );

        Ok(self.session.wrap_query(ctx.finish(text)))
    }
}
