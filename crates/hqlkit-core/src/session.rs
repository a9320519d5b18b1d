//! Session boundary.
//!
//! Builders never execute anything. They hand the finished artifact to a
//! [`Session`], which wraps it in an engine-specific query handle, and apply
//! pagination to that handle.

use hqlkit_proto::QueryArtifact;

/// A persistence session able to wrap query text for later execution.
pub trait Session {
    /// Query handle returned by [`wrap_query`](Session::wrap_query).
    type Query: QueryHandle;

    /// Wrap a finished artifact. Must not execute it.
    fn wrap_query(&self, artifact: QueryArtifact) -> Self::Query;
}

/// An executable query produced by a [`Session`].
pub trait QueryHandle {
    /// The artifact the handle was created from.
    fn artifact(&self) -> &QueryArtifact;

    /// Number of rows to skip.
    fn set_first_result(&mut self, offset: u32);

    /// Maximum number of rows to return.
    fn set_max_results(&mut self, limit: u32);
}

/// Session used when no persistence engine is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSession;

impl DetachedSession {
    /// Create a detached session.
    pub fn new() -> Self {
        Self
    }
}

impl Session for DetachedSession {
    type Query = PreparedQuery;

    fn wrap_query(&self, artifact: QueryArtifact) -> PreparedQuery {
        PreparedQuery::new(artifact)
    }
}

/// A query artifact together with its row window.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    artifact: QueryArtifact,
    first_result: Option<u32>,
    max_results: Option<u32>,
}

impl PreparedQuery {
    /// Wrap an artifact with no row window.
    pub fn new(artifact: QueryArtifact) -> Self {
        Self {
            artifact,
            first_result: None,
            max_results: None,
        }
    }

    /// Query text.
    pub fn text(&self) -> &str {
        self.artifact.text()
    }

    /// Rows to skip, if set.
    pub fn first_result(&self) -> Option<u32> {
        self.first_result
    }

    /// Row limit, if set.
    pub fn max_results(&self) -> Option<u32> {
        self.max_results
    }

    /// Unwrap the artifact.
    pub fn into_artifact(self) -> QueryArtifact {
        self.artifact
    }
}

impl QueryHandle for PreparedQuery {
    fn artifact(&self) -> &QueryArtifact {
        &self.artifact
    }

    fn set_first_result(&mut self, offset: u32) {
        self.first_result = Some(offset);
    }

    fn set_max_results(&mut self, limit: u32) {
        self.max_results = Some(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hqlkit_proto::{ParameterBinding, Value};

    #[test]
    fn test_detached_session() {
        let artifact = QueryArtifact::new(
            "SELECT DISTINCT example_Book  FROM example.Book AS example_Book   ",
            vec![ParameterBinding {
                name: "id_00".into(),
                values: vec![Value::Int64(1)],
            }],
        );
        let mut query = DetachedSession::new().wrap_query(artifact.clone());
        assert_eq!(query.first_result(), None);
        assert_eq!(query.max_results(), None);

        query.set_first_result(20);
        query.set_max_results(10);
        assert_eq!(query.first_result(), Some(20));
        assert_eq!(query.max_results(), Some(10));
        assert_eq!(query.artifact(), &artifact);
        assert_eq!(query.into_artifact(), artifact);
    }
}
