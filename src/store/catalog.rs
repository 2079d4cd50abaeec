//! Catalog handle.
//!
//! A `Catalog` only remembers where the database lives. Every request opens
//! its own read-only connection and drops it when the request ends, so
//! concurrent searches never share state beyond the immutable file.

use crate::error::{CatalogError, Result};
use crate::models::{DetailBundle, ObjectSummary, SearchCriteria};
use crate::query::{build_predicates, fetch_detail, search_objects};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Read-only catalog backed by an SQLite file.
#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
}

impl Catalog {
    /// Create a handle for the database at `path`. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing database.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh read-only connection for one request.
    pub fn connect(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(|source| CatalogError::StoreUnavailable {
            path: self.path.clone(),
            source,
        })
    }

    /// Liveness check: the file opens and the `objects` table is readable.
    pub fn check_connection(&self) -> Result<()> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT count(*) FROM objects", [], |row| row.get(0))?;
        debug!("Catalog at {} holds {} objects", self.path.display(), count);
        Ok(())
    }

    /// Search the aggregation view.
    ///
    /// Fails with [`CatalogError::NoCriteriaProvided`] before touching the
    /// store when every criterion is empty.
    pub fn search(&self, criteria: &SearchCriteria, limit: usize) -> Result<Vec<ObjectSummary>> {
        let predicates = build_predicates(criteria)?;
        let conn = self.connect()?;
        search_objects(&conn, &predicates, limit)
    }

    /// Assemble the detail bundle for one object.
    ///
    /// A missing object yields an empty bundle rather than an error.
    pub fn detail(&self, id: i64) -> Result<DetailBundle> {
        if id <= 0 {
            return Err(CatalogError::InvalidObjectId(id.to_string()));
        }
        let conn = self.connect()?;
        fetch_detail(&conn, id)
    }
}

/// Run a blocking catalog call off the async runtime, bounded by `timeout_seconds`.
pub async fn run_blocking<T, F>(timeout_seconds: u64, job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(job);

    match tokio::time::timeout(Duration::from_secs(timeout_seconds), handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(CatalogError::Worker(join_error.to_string())),
        Err(_) => Err(CatalogError::Timeout(timeout_seconds)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::fixture_catalog;

    #[test]
    fn test_check_connection() {
        let (catalog, _dir) = fixture_catalog();
        assert!(catalog.check_connection().is_ok());
    }

    #[test]
    fn test_missing_file_is_store_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        let catalog = Catalog::new(dir.path().join("absent.sqlite"));

        let err = catalog.check_connection().unwrap_err();
        assert!(matches!(err, CatalogError::StoreUnavailable { .. }));
        // Read-only open must not create the file.
        assert!(!catalog.path().exists());
    }

    #[test]
    fn test_missing_schema_is_query_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.sqlite");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (id INTEGER);")
            .unwrap();

        let err = Catalog::new(path).check_connection().unwrap_err();
        assert!(matches!(err, CatalogError::Query(_)));
    }

    #[test]
    fn test_connection_is_read_only() {
        let (catalog, _dir) = fixture_catalog();
        let conn = catalog.connect().unwrap();
        let result = conn.execute("DELETE FROM objects", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_criteria_skips_store() {
        // The path does not exist, so any attempt to connect would fail differently.
        let catalog = Catalog::new("/nonexistent/lux.sqlite");
        let err = catalog.search(&SearchCriteria::default(), 1000).unwrap_err();
        assert!(matches!(err, CatalogError::NoCriteriaProvided));
    }

    #[test]
    fn test_detail_rejects_non_positive_id() {
        let (catalog, _dir) = fixture_catalog();
        assert!(matches!(
            catalog.detail(0),
            Err(CatalogError::InvalidObjectId(_))
        ));
        assert!(matches!(
            catalog.detail(-3),
            Err(CatalogError::InvalidObjectId(_))
        ));
    }

    #[tokio::test]
    async fn test_run_blocking_returns_result() {
        let (catalog, _dir) = fixture_catalog();
        let bundle = run_blocking(5, move || catalog.detail(1)).await.unwrap();
        assert!(!bundle.is_empty());
    }

    #[tokio::test]
    async fn test_run_blocking_times_out() {
        let result: Result<()> = run_blocking(1, || {
            std::thread::sleep(Duration::from_millis(2500));
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(CatalogError::Timeout(1))));
    }
}
