//! Markdown and JSON rendering.
//!
//! The core hands back plain rows; this module turns them into
//! something a person (or another program) can read.

use crate::models::{DetailBundle, ObjectSummary, SearchCriteria};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Search results with the criteria that produced them.
#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    generated_at: DateTime<Utc>,
    criteria: &'a SearchCriteria,
    total: usize,
    results: &'a [ObjectSummary],
}

/// Object details, optionally with the thumbnail link.
#[derive(Debug, Serialize)]
struct DetailReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<String>,
    #[serde(flatten)]
    detail: &'a DetailBundle,
}

/// Generate a Markdown table of search results.
pub fn generate_search_markdown(criteria: &SearchCriteria, results: &[ObjectSummary]) -> String {
    let mut output = String::new();

    output.push_str("# Search Results\n\n");
    output.push_str(&generate_criteria_section(criteria));

    if results.is_empty() {
        output.push_str("No objects matched the search terms.\n\n");
        output.push_str(&generate_footer());
        return output;
    }

    output.push_str(&format!("**Objects found:** {}\n\n", results.len()));
    output.push_str("| ID | Label | Date | Agents | Classified As |\n");
    output.push_str("|---:|:---|:---|:---|:---|\n");

    for row in results {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row.id,
            cell(row.label.as_deref().unwrap_or("")),
            cell(row.date.as_deref().unwrap_or("")),
            cell(&row.agents),
            cell(&row.classifiers),
        ));
    }
    output.push('\n');

    output.push_str(&generate_footer());
    output
}

/// Generate the criteria list shown above the results.
fn generate_criteria_section(criteria: &SearchCriteria) -> String {
    let mut section = String::new();

    let terms = [
        ("Label", &criteria.label),
        ("Date", &criteria.date),
        ("Agent", &criteria.agent),
        ("Classifier", &criteria.classifier),
    ];

    for (name, value) in terms {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            section.push_str(&format!("- **{}:** `{}`\n", name, value));
        }
    }
    section.push('\n');

    section
}

/// Generate the full record for one object.
pub fn generate_detail_markdown(bundle: &DetailBundle, include_thumbnail: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", bundle.title().unwrap_or("Untitled")));
    output.push_str(&format!("*Object {}*\n\n", bundle.id));

    if include_thumbnail {
        output.push_str(&format!("![Thumbnail]({})\n\n", bundle.thumbnail_url()));
    }

    output.push_str(&generate_summary_section(bundle));
    output.push_str(&generate_production_section(bundle));
    output.push_str(&generate_classifier_section(bundle));
    output.push_str(&generate_reference_section(bundle));
    output.push_str(&generate_footer());

    output
}

/// Generate the summary section.
fn generate_summary_section(bundle: &DetailBundle) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Accession No. | Date | Place | Department |\n");
    section.push_str("|:---|:---|:---|:---|\n");
    for row in &bundle.summary {
        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            cell(row.accession_no.as_deref().unwrap_or("")),
            cell(&row.date),
            cell(&row.place),
            cell(row.department.as_deref().unwrap_or("")),
        ));
    }
    section.push('\n');

    section
}

/// Generate the production roster.
fn generate_production_section(bundle: &DetailBundle) -> String {
    let mut section = String::new();

    section.push_str("## Produced By\n\n");
    if bundle.production.is_empty() {
        section.push_str("No production information.\n\n");
        return section;
    }

    section.push_str("| Part | Name | Nationalities | Timespan |\n");
    section.push_str("|:---|:---|:---|:---|\n");
    for row in &bundle.production {
        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            cell(row.part.as_deref().unwrap_or("")),
            cell(row.name.as_deref().unwrap_or("")),
            cell(&row.nationalities),
            cell(&row.lifespan),
        ));
    }
    section.push('\n');

    section
}

/// Generate the classification list.
fn generate_classifier_section(bundle: &DetailBundle) -> String {
    let mut section = String::new();

    section.push_str("## Classified As\n\n");
    if bundle.classifiers.is_empty() {
        section.push_str("No classifications.\n\n");
        return section;
    }

    for name in &bundle.classifiers {
        section.push_str(&format!("- {}\n", name));
    }
    section.push('\n');

    section
}

/// Generate the reference table.
fn generate_reference_section(bundle: &DetailBundle) -> String {
    let mut section = String::new();

    section.push_str("## Information\n\n");
    if bundle.references.is_empty() {
        section.push_str("No references.\n\n");
        return section;
    }

    section.push_str("| Type | Content |\n");
    section.push_str("|:---|:---|\n");
    for row in &bundle.references {
        section.push_str(&format!(
            "| {} | {} |\n",
            cell(row.kind.as_deref().unwrap_or("")),
            cell(row.content.as_deref().unwrap_or("")),
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Generated by yuag v{} at {}*\n",
        env!("CARGO_PKG_VERSION"),
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Make text safe inside a Markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Generate JSON search results.
pub fn generate_search_json(
    criteria: &SearchCriteria,
    results: &[ObjectSummary],
) -> Result<String> {
    let report = SearchReport {
        generated_at: Utc::now(),
        criteria,
        total: results.len(),
        results,
    };
    serde_json::to_string_pretty(&report).map_err(Into::into)
}

/// Generate JSON object details.
pub fn generate_detail_json(bundle: &DetailBundle, include_thumbnail: bool) -> Result<String> {
    let report = DetailReport {
        generated_at: Utc::now(),
        thumbnail_url: include_thumbnail.then(|| bundle.thumbnail_url()),
        detail: bundle,
    };
    serde_json::to_string_pretty(&report).map_err(Into::into)
}
