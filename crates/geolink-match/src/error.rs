//! Error types for matching and linkage.

use thiserror::Error;

/// Errors from [`NearestMatcher`](crate::NearestMatcher).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// There is nothing to match against.
    #[error("reference set is empty; cannot match {query_count} query record(s)")]
    EmptyReferenceSet { query_count: usize },

    /// The run was cancelled through its [`CancelToken`](crate::CancelToken).
    #[error("matching cancelled after {completed} of {total} query record(s)")]
    Cancelled { completed: usize, total: usize },
}

/// Errors from [`build_linkage`](crate::build_linkage).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// A match points at an id that is not in the reference set.
    #[error("match for query '{query_id}' references unknown record '{matched_id}'")]
    DanglingMatch {
        query_id: String,
        matched_id: String,
    },

    /// A match was produced for an id that is not in the query set.
    #[error("match references unknown query record '{query_id}'")]
    UnknownQuery { query_id: String },

    /// A query record was matched more than once.
    #[error("query record '{query_id}' has more than one match")]
    DuplicateMatch { query_id: String },

    /// A query record has no match.
    #[error("query record '{query_id}' has no match")]
    MissingMatch { query_id: String },
}

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;
