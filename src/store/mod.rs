//! Read-only access to the catalog database.

pub mod catalog;

pub use catalog::{run_blocking, Catalog};

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixture database for module tests.

    use super::Catalog;
    use rusqlite::Connection;
    use tempfile::TempDir;

    const FIXTURE_SQL: &str = include_str!("../../fixtures/catalog.sql");

    /// Build the fixture catalog, apply `extra_sql`, and reopen it read-only.
    pub fn fixture_catalog_with(extra_sql: &str) -> (Catalog, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lux.sqlite");

        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(FIXTURE_SQL).unwrap();
        if !extra_sql.is_empty() {
            conn.execute_batch(extra_sql).unwrap();
        }
        drop(conn);

        (Catalog::new(path), dir)
    }

    pub fn fixture_catalog() -> (Catalog, TempDir) {
        fixture_catalog_with("")
    }
}
