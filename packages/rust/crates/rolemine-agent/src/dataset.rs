//! Dataset file ingestion.

use std::path::Path;

use anyhow::{Context, Result};
use rolemine_types::{Application, DataContext, Dataset, OrganizationalUnit};
use serde::Serialize;

/// Application and org-unit listings of one dataset, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetMetadata<'a> {
    /// Applications sorted by name.
    pub applications: Vec<&'a Application>,
    /// Organizational units sorted by name.
    pub organizational_units: Vec<&'a OrganizationalUnit>,
}

impl<'a> DatasetMetadata<'a> {
    /// Listings borrowed from `ctx`.
    #[must_use]
    pub fn of(ctx: &'a DataContext) -> Self {
        Self {
            applications: ctx.applications(),
            organizational_units: ctx.org_units(),
        }
    }
}

/// Read a JSON dataset document and index it.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is not a valid dataset.
pub fn load_dataset(path: &Path) -> Result<DataContext> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    let dataset: Dataset = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse dataset {}", path.display()))?;
    let ctx = dataset.into_context();
    let summary = ctx.summary();
    tracing::info!(
        event = "dataset.loaded",
        path = %path.display(),
        subjects = summary.subject_count,
        permissions = summary.permission_count,
        assignments = summary.assignment_count,
        "dataset loaded"
    );
    Ok(ctx)
}
