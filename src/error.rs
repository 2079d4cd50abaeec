//! Error types for the catalog core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while searching or reading the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Every search criterion was empty; no query is issued.
    #[error("No search terms provided. Please enter some search terms.")]
    NoCriteriaProvided,

    /// The backing store could not be opened.
    #[error("Catalog store unavailable at {}: {source}", path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement against the store failed.
    #[error("Catalog query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The request did not finish within the configured bound.
    #[error("Catalog query timed out after {0}s")]
    Timeout(u64),

    /// The blocking worker running the request panicked or was cancelled.
    #[error("Catalog worker failed: {0}")]
    Worker(String),

    /// Object identifiers are positive integers.
    #[error("Invalid object id: {0}")]
    InvalidObjectId(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_criteria_message() {
        let err = CatalogError::NoCriteriaProvided;
        assert_eq!(
            err.to_string(),
            "No search terms provided. Please enter some search terms."
        );
    }

    #[test]
    fn test_query_error_from_rusqlite() {
        let err: CatalogError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, CatalogError::Query(_)));
        assert!(err.to_string().starts_with("Catalog query failed"));
    }
}
