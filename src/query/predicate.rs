//! Predicate builder for catalog searches.
//!
//! Criteria are mapped field by field onto [`Predicate`] values. Only the
//! structural fragment (which column, which placeholder) ever reaches the SQL
//! text; the user's text is carried in [`Predicate::pattern`] and bound as a
//! parameter.

use crate::error::{CatalogError, Result};
use crate::models::SearchCriteria;
use std::fmt;

/// Escape character declared in every `LIKE` fragment.
const LIKE_ESCAPE: char = '\\';

/// A searchable column of the aggregation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Label,
    Date,
    Agent,
    Classifier,
}

impl Field {
    /// Fields in the order their predicates are emitted.
    pub const ALL: [Field; 4] = [Field::Label, Field::Date, Field::Agent, Field::Classifier];

    /// Column of the `aggregated` relation this field is matched against.
    pub fn column(self) -> &'static str {
        match self {
            Field::Label => "label",
            Field::Date => "date",
            Field::Agent => "agents",
            Field::Classifier => "classifiers",
        }
    }

    /// The criterion value supplied for this field, if any.
    pub fn value(self, criteria: &SearchCriteria) -> Option<&str> {
        let value = match self {
            Field::Label => criteria.label.as_deref(),
            Field::Date => criteria.date.as_deref(),
            Field::Agent => criteria.agent.as_deref(),
            Field::Classifier => criteria.classifier.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Label => write!(f, "label"),
            Field::Date => write!(f, "date"),
            Field::Agent => write!(f, "agent"),
            Field::Classifier => write!(f, "classifier"),
        }
    }
}

/// Case-insensitive substring test against one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: Field,
    /// Bound value: the escaped criterion wrapped in `%...%`.
    pub pattern: String,
}

impl Predicate {
    /// Predicate matching rows whose `field` contains `needle`.
    pub fn contains(field: Field, needle: &str) -> Self {
        Self {
            field,
            pattern: format!("%{}%", escape_like(needle)),
        }
    }

    /// SQL fragment for this predicate bound at placeholder `?index`.
    pub fn to_sql(&self, index: usize) -> String {
        format!(
            "{} LIKE ?{} ESCAPE '{}'",
            self.field.column(),
            index,
            LIKE_ESCAPE
        )
    }
}

/// Map criteria to predicates, one per non-empty field.
///
/// Returns [`CatalogError::NoCriteriaProvided`] when every field is empty.
pub fn build_predicates(criteria: &SearchCriteria) -> Result<Vec<Predicate>> {
    let predicates: Vec<Predicate> = Field::ALL
        .iter()
        .filter_map(|&field| field.value(criteria).map(|v| Predicate::contains(field, v)))
        .collect();

    if predicates.is_empty() {
        return Err(CatalogError::NoCriteriaProvided);
    }

    Ok(predicates)
}

/// Conjunction of all predicates, numbering placeholders from `?1`.
///
/// Returns an empty string for an empty slice.
pub fn where_clause(predicates: &[Predicate]) -> String {
    if predicates.is_empty() {
        return String::new();
    }

    let fragments: Vec<String> = predicates
        .iter()
        .enumerate()
        .map(|(i, predicate)| predicate.to_sql(i + 1))
        .collect();

    format!(" WHERE {}", fragments.join(" AND "))
}

/// Escape `LIKE` wildcards so user text matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
