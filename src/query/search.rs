//! Filtered search over the aggregation view.

use super::aggregate::{row_to_summary, AGGREGATED_COLUMNS, AGGREGATED_OBJECTS};
use super::predicate::{where_clause, Predicate};
use crate::error::Result;
use crate::models::ObjectSummary;
use rusqlite::{Connection, ToSql};
use tracing::{debug, info};

/// Hard cap on rows returned by a single search.
pub const MAX_RESULTS: usize = 1000;

/// Result ordering: label, then date, then agents, all case-insensitive.
const ORDER_BY: &str = " ORDER BY lower(label) ASC, lower(date) ASC, lower(agents) ASC";

/// Build the full search statement for the given predicates.
///
/// The limit is bound at placeholder `?{predicates.len() + 1}`.
pub fn search_sql(predicates: &[Predicate]) -> String {
    format!(
        "{}SELECT {} FROM aggregated{}{} LIMIT ?{}",
        AGGREGATED_OBJECTS,
        AGGREGATED_COLUMNS,
        where_clause(predicates),
        ORDER_BY,
        predicates.len() + 1
    )
}

/// Run a search with already-built predicates.
///
/// `limit` is clamped to [`MAX_RESULTS`].
pub fn search_objects(
    conn: &Connection,
    predicates: &[Predicate],
    limit: usize,
) -> Result<Vec<ObjectSummary>> {
    let sql = search_sql(predicates);
    let limit = limit.min(MAX_RESULTS) as i64;

    debug!("Search SQL: {}", sql);
    for predicate in predicates {
        debug!("  {} matches {:?}", predicate.field, predicate.pattern);
    }

    let mut params: Vec<&dyn ToSql> = predicates
        .iter()
        .map(|p| &p.pattern as &dyn ToSql)
        .collect();
    params.push(&limit);

    let mut stmt = conn.prepare(&sql)?;
    let results = stmt
        .query_map(params.as_slice(), row_to_summary)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    info!("Search produced {} items", results.len());

    Ok(results)
}
