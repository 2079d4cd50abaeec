//! Detail aggregation for a single object.
//!
//! Five independent projections are read on one connection and collected
//! into a [`DetailBundle`]. There is no separate existence check: an object
//! that does not exist simply produces five empty sections.

use crate::error::Result;
use crate::models::{DetailBundle, ProductionRow, ReferenceRow, SummaryRow};
use rusqlite::{params, Connection, Row};
use tracing::debug;

const SUMMARY_SQL: &str = "\
SELECT o.accession_no, IFNULL(o.date, ' '), IFNULL(pl.label, ' '), d.name
FROM objects o
LEFT JOIN objects_departments od ON od.obj_id = o.id
LEFT JOIN departments d ON d.id = od.dep_id
LEFT JOIN objects_places op ON op.obj_id = o.id
LEFT JOIN places pl ON pl.id = op.pl_id
WHERE o.id = ?1";

const LABEL_SQL: &str = "SELECT label FROM objects WHERE id = ?1";

const PRODUCTION_SQL: &str = "\
WITH nations AS (
    SELECT an.agt_id AS agt_id,
        group_concat(lower(n.descriptor), ', ' ORDER BY lower(n.descriptor)) AS nationalities
    FROM agents_nationalities an
    JOIN nationalities n ON n.id = an.nat_id
    WHERE n.descriptor IS NOT NULL
    GROUP BY an.agt_id
)
SELECT p.part, a.name, IFNULL(nations.nationalities, 'Unknown') AS nationalities,
    a.begin_date, a.end_date
FROM productions p
JOIN objects o ON o.id = p.obj_id
LEFT JOIN agents a ON a.id = p.agt_id
LEFT JOIN nations ON nations.agt_id = p.agt_id
WHERE o.id = ?1
ORDER BY lower(a.name) ASC, lower(p.part) ASC, nationalities ASC";

const CLASSIFIER_SQL: &str = "\
SELECT c.name
FROM objects o
JOIN objects_classifiers oc ON oc.obj_id = o.id
JOIN classifiers c ON c.id = oc.cls_id
WHERE o.id = ?1 AND c.name IS NOT NULL
ORDER BY lower(c.name) ASC, c.name ASC";

const REFERENCE_SQL: &str = "\
SELECT r.type, r.content
FROM objects o
JOIN \"references\" r ON r.obj_id = o.id
WHERE o.id = ?1
ORDER BY r.id";

/// Read all five sections for `id`.
///
/// Any failing statement aborts the whole lookup; partial bundles are never returned.
pub fn fetch_detail(conn: &Connection, id: i64) -> Result<DetailBundle> {
    let mut bundle = DetailBundle::new(id);

    bundle.summary = query_rows(conn, SUMMARY_SQL, id, |row| {
        Ok(SummaryRow {
            accession_no: row.get(0)?,
            date: row.get(1)?,
            place: row.get(2)?,
            department: row.get(3)?,
        })
    })?;

    bundle.label = query_rows(conn, LABEL_SQL, id, |row| row.get(0))?;

    bundle.production = query_rows(conn, PRODUCTION_SQL, id, |row| {
        let begin: Option<String> = row.get(3)?;
        let end: Option<String> = row.get(4)?;
        Ok(ProductionRow {
            part: row.get(0)?,
            name: row.get(1)?,
            nationalities: row.get(2)?,
            lifespan: lifespan(begin.as_deref(), end.as_deref()),
        })
    })?;

    bundle.classifiers = query_rows(conn, CLASSIFIER_SQL, id, |row| row.get(0))?;

    bundle.references = query_rows(conn, REFERENCE_SQL, id, |row| {
        Ok(ReferenceRow {
            kind: row.get(0)?,
            content: row.get(1)?,
        })
    })?;

    debug!(
        "Object {}: {} summary, {} label, {} production, {} classifier, {} reference rows",
        id,
        bundle.summary.len(),
        bundle.label.len(),
        bundle.production.len(),
        bundle.classifiers.len(),
        bundle.references.len()
    );

    Ok(bundle)
}

fn query_rows<T, F>(conn: &Connection, sql: &str, id: i64, map: F) -> Result<Vec<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![id], map)?
        .collect::<rusqlite::Result<Vec<T>>>()?;
    Ok(rows)
}

/// Lifespan string `"YYYY-YYYY"` from an agent's begin and end dates.
///
/// Empty unless both dates are recorded.
pub fn lifespan(begin: Option<&str>, end: Option<&str>) -> String {
    fn recorded(date: Option<&str>) -> Option<&str> {
        date.map(str::trim).filter(|d| !d.is_empty())
    }

    match (recorded(begin), recorded(end)) {
        (Some(begin), Some(end)) => format!("{}-{}", year_prefix(begin), year_prefix(end)),
        _ => String::new(),
    }
}

/// First four characters of a date string.
fn year_prefix(date: &str) -> &str {
    match date.char_indices().nth(4) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}
