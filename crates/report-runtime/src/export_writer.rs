//! Tabular export encoders.
//!
//! Both encoders write the complete file to a sibling temp path and rename it
//! into place, so a failed run never leaves a half-written export behind.

use std::path::{Path, PathBuf};

use report_core::error::{ReportError, Result};
use report_core::models::{ExportFormat, ExportRow, EXPORT_HEADERS};
use tracing::debug;

/// Materialises export rows into a file.
pub trait ExportWriter: Send {
    /// Write `rows` and return the path of the finished file.
    fn write(&self, rows: &[ExportRow]) -> Result<PathBuf>;
}

/// Build the writer for `format` targeting `path`.
pub fn writer_for(format: ExportFormat, path: PathBuf) -> Box<dyn ExportWriter> {
    match format {
        ExportFormat::Csv => Box::new(CsvExportWriter::new(path)),
        ExportFormat::Json => Box::new(JsonExportWriter::new(path)),
    }
}

// ── CsvExportWriter ───────────────────────────────────────────────────────────

/// Comma-separated export with the fixed header row.
#[derive(Debug, Clone)]
pub struct CsvExportWriter {
    path: PathBuf,
}

impl CsvExportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Encode `rows` as CSV bytes. The header row is always present.
    pub fn encode(rows: &[ExportRow]) -> Result<Vec<u8>> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        wtr.write_record(EXPORT_HEADERS)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.into_inner()
            .map_err(|e| ReportError::Io(e.into_error()))
    }
}

impl ExportWriter for CsvExportWriter {
    fn write(&self, rows: &[ExportRow]) -> Result<PathBuf> {
        let bytes = Self::encode(rows)?;
        write_atomic(&self.path, &bytes)?;
        debug!("Wrote {} CSV rows to {}", rows.len(), self.path.display());
        Ok(self.path.clone())
    }
}

// ── JsonExportWriter ──────────────────────────────────────────────────────────

/// JSON array of row objects keyed by the export headers.
#[derive(Debug, Clone)]
pub struct JsonExportWriter {
    path: PathBuf,
}

impl JsonExportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExportWriter for JsonExportWriter {
    fn write(&self, rows: &[ExportRow]) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(rows)?;
        write_atomic(&self.path, &bytes)?;
        debug!("Wrote {} JSON rows to {}", rows.len(), self.path.display());
        Ok(self.path.clone())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let to_write_err = |source| ReportError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_write_err)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    std::fs::write(&tmp, bytes).map_err(to_write_err)?;
    std::fs::rename(&tmp, path).map_err(to_write_err)?;
    Ok(())
}
