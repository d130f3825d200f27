//! Payload loading from local JSON documents.
//!
//! Endpoint retrieval happens elsewhere; this module reads the JSON document
//! that retrieval left on disk and hands the parsed tree to the extractor.

use std::path::Path;

use report_core::error::{ReportError, Result};
use serde_json::Value;
use tracing::{debug, warn};

/// Read and parse one payload file.
///
/// An empty document or a literal `null` yields `Ok(None)`: the dataset is
/// simply absent. Unreadable files and malformed JSON are errors.
pub fn load_payload(path: &Path) -> Result<Option<Value>> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        warn!("Payload file {} is empty", path.display());
        return Ok(None);
    }

    let value: Value = serde_json::from_str(&content)?;
    if value.is_null() {
        warn!("Payload file {} contains null", path.display());
        return Ok(None);
    }

    debug!("Loaded payload from {} ({} bytes)", path.display(), content.len());
    Ok(Some(value))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
