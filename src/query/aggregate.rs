//! Aggregation view over the object catalog.
//!
//! Every object is projected onto `(id, label, date, agents, classifiers)`
//! in a single statement. Both aggregate columns are lower-cased and sorted
//! inside the aggregate itself, so their text never depends on the order in
//! which join rows were stored.

use crate::models::ObjectSummary;
use rusqlite::Row;

/// Common table expressions defining the `aggregated` relation.
///
/// Callers append a `SELECT ... FROM aggregated` to use it. Objects without
/// classifiers or productions get `''`, never NULL. A production with no
/// recorded role or agent name contributes no agent entry.
pub const AGGREGATED_OBJECTS: &str = "\
WITH classified AS (
    SELECT obj_id, group_concat(name, ', ' ORDER BY name) AS classifiers
    FROM (
        SELECT DISTINCT oc.obj_id AS obj_id, lower(c.name) AS name
        FROM objects_classifiers oc
        JOIN classifiers c ON c.id = oc.cls_id
        WHERE c.name IS NOT NULL
    )
    GROUP BY obj_id
),
produced AS (
    SELECT p.obj_id AS obj_id,
        group_concat(
            lower(a.name) || ' (' || lower(p.part) || ')',
            ','
            ORDER BY lower(a.name), lower(p.part)
        ) AS agents
    FROM productions p
    JOIN agents a ON a.id = p.agt_id
    GROUP BY p.obj_id
),
aggregated AS (
    SELECT o.id AS id,
        o.label AS label,
        o.date AS date,
        IFNULL(pr.agents, '') AS agents,
        IFNULL(cl.classifiers, '') AS classifiers
    FROM objects o
    LEFT JOIN produced pr ON pr.obj_id = o.id
    LEFT JOIN classified cl ON cl.obj_id = o.id
)
";

/// Columns selected from `aggregated`, in the order [`row_to_summary`] reads them.
pub const AGGREGATED_COLUMNS: &str = "id, label, date, agents, classifiers";

/// Map one `aggregated` row onto an [`ObjectSummary`].
pub fn row_to_summary(row: &Row) -> rusqlite::Result<ObjectSummary> {
    Ok(ObjectSummary {
        id: row.get(0)?,
        label: row.get(1)?,
        date: row.get(2)?,
        agents: row.get(3)?,
        classifiers: row.get(4)?,
    })
}
