//! Data models for the catalog.
//!
//! This module contains the search criteria accepted by the core and
//! the result shapes it hands back to the caller for rendering.

use serde::{Deserialize, Serialize};

/// Base URL for object thumbnails on the public collection site.
const THUMBNAIL_BASE_URL: &str = "https://media.collections.yale.edu/thumbnail/yuag/obj/";

/// Sparse set of search terms. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Substring of the object label.
    #[serde(default)]
    pub label: Option<String>,
    /// Substring of the free-text date.
    #[serde(default)]
    pub date: Option<String>,
    /// Substring of the aggregated "agent (role)" list.
    #[serde(default)]
    pub agent: Option<String>,
    /// Substring of the aggregated classifier list.
    #[serde(default)]
    pub classifier: Option<String>,
}

impl SearchCriteria {
    /// Returns true when no criterion carries any text.
    pub fn is_empty(&self) -> bool {
        [&self.label, &self.date, &self.agent, &self.classifier]
            .iter()
            .all(|value| value.as_deref().map_or(true, str::is_empty))
    }
}

/// One row of the aggregation view, as returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub id: i64,
    pub label: Option<String>,
    pub date: Option<String>,
    /// Sorted, lower-cased `"name (role)"` list; empty when the object has no productions.
    pub agents: String,
    /// Sorted, lower-cased classifier list; empty when the object is unclassified.
    pub classifiers: String,
}

/// Summary section of an object's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub accession_no: Option<String>,
    /// A single space when the object has no date.
    pub date: String,
    /// A single space when the object has no place.
    pub place: String,
    pub department: Option<String>,
}

/// One (agent, role) entry in the production roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRow {
    pub part: Option<String>,
    pub name: Option<String>,
    /// Sorted, lower-cased nationality list, or `"Unknown"`.
    pub nationalities: String,
    /// `"YYYY-YYYY"`, or empty when the agent has no recorded dates.
    pub lifespan: String,
}

/// A reference attached to an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content: Option<String>,
}

/// Full record view for one object, assembled from five independent projections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailBundle {
    pub id: i64,
    pub summary: Vec<SummaryRow>,
    pub label: Vec<Option<String>>,
    pub production: Vec<ProductionRow>,
    pub classifiers: Vec<String>,
    pub references: Vec<ReferenceRow>,
}

impl DetailBundle {
    /// Creates an empty bundle for the given id.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Total number of rows across all five sections.
    pub fn row_count(&self) -> usize {
        self.summary.len()
            + self.label.len()
            + self.production.len()
            + self.classifiers.len()
            + self.references.len()
    }

    /// An object exists iff at least one section returned a row.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// The object's label, if one was recorded.
    pub fn title(&self) -> Option<&str> {
        self.label.iter().flatten().next().map(String::as_str)
    }

    /// Public thumbnail image for the object.
    pub fn thumbnail_url(&self) -> String {
        format!("{}{}", THUMBNAIL_BASE_URL, self.id)
    }
}
