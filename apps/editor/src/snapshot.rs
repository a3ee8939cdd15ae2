//! Point-in-time JSON snapshots of the document.
//!
//! Export produces the document as indented JSON under a
//! `cv-<name>.json` filename; import parses the same shape back. Parsing
//! is strict about the required nested objects so a malformed file is
//! rejected before it can reach the reconciler.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::cv::Document;
use crate::mutation::repair_experience;

/// Filename stem used when the CV has no name yet.
const FALLBACK_FILE_STEM: &str = "dados";

/// An export ready to hand to whatever saves or downloads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub filename: String,
    pub json: String,
}

pub fn snapshot(doc: &Document) -> Result<Snapshot, AppError> {
    Ok(Snapshot {
        filename: export_filename(doc),
        json: export_json(doc)?,
    })
}

/// The document as JSON with 2-space indentation.
pub fn export_json(doc: &Document) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// `cv-<fullName>.json`, falling back to `cv-dados.json` while the name
/// is still empty.
pub fn export_filename(doc: &Document) -> String {
    let name = doc.personal_info.full_name.trim();
    if name.is_empty() {
        format!("cv-{FALLBACK_FILE_STEM}.json")
    } else {
        format!("cv-{name}.json")
    }
}

/// Parses import bytes into a document.
///
/// A file without the `personalInfo` object fails here; optional scalar
/// fields default to empty. Imported experience entries pass through the
/// same invariant repair the mutation layer applies, so a hand-edited
/// file cannot smuggle in an entry that violates them.
pub fn parse_document(bytes: &[u8]) -> Result<Document, AppError> {
    let mut doc: Document = serde_json::from_slice(bytes)?;
    for exp in &mut doc.experience {
        repair_experience(exp);
    }
    Ok(doc)
}

/// Writes the export file into `dir` and returns the full path.
pub async fn write_snapshot(dir: &Path, doc: &Document) -> Result<PathBuf, AppError> {
    let snapshot = snapshot(doc)?;
    let path = dir.join(&snapshot.filename);
    tokio::fs::write(&path, snapshot.json.as_bytes())
        .await
        .with_context(|| format!("failed to write CV snapshot to {}", path.display()))
        .map_err(AppError::Internal)?;
    info!("Exported CV snapshot to {}", path.display());
    Ok(path)
}
