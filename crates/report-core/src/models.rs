use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column headers of the tabular export, in column order.
pub const EXPORT_HEADERS: [&str; 8] = [
    "Agency",
    "Branch",
    "Medium",
    "EstTotal",
    "RO",
    "IB",
    "OB",
    "Report Type",
];

/// One of the two input datasets a report run consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dataset {
    /// Estimates for the period being reported on.
    CurrentPeriod,
    /// Estimates for the previous period, exported for comparison.
    PriorPeriod,
}

impl Dataset {
    /// Tag attached to every record extracted from this dataset.
    pub fn label(self) -> &'static str {
        match self {
            Dataset::CurrentPeriod => "current-period",
            Dataset::PriorPeriod => "prior-period",
        }
    }

    /// Human-readable report name used in captions and logs.
    pub fn report_type(self) -> &'static str {
        match self {
            Dataset::CurrentPeriod => "Total Estimates",
            Dataset::PriorPeriod => "Last Week Estimates",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A canonical usage record after normalization.
///
/// Every field always carries a value: strings default to `""` and numbers
/// to `0.0`. Numeric fields are always finite.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UsageRecord {
    pub agency_name: String,
    pub branch_name: String,
    pub medium: String,
    pub estimate_total: f64,
    pub ro_total: f64,
    pub ib_total: f64,
    pub ob_total: f64,
    /// Dataset tag assigned at extraction time, never read from raw input.
    pub source_label: String,
}

/// One row of the tabular export.
///
/// Serialises with the exact [`EXPORT_HEADERS`] column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Agency")]
    pub agency: String,
    #[serde(rename = "Branch")]
    pub branch: String,
    #[serde(rename = "Medium")]
    pub medium: String,
    #[serde(rename = "EstTotal")]
    pub estimate_total: f64,
    #[serde(rename = "RO")]
    pub ro_total: f64,
    #[serde(rename = "IB")]
    pub ib_total: f64,
    #[serde(rename = "OB")]
    pub ob_total: f64,
    #[serde(rename = "Report Type")]
    pub source_label: String,
}

/// Narrative digest rendering strategy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DigestStrategy {
    /// Announce the single top agency.
    #[default]
    SingleWinner,
    /// Numbered top-K and bottom-K lists.
    TopBottom,
    /// Fixed-width monospace grid of the ranked records.
    Table,
}

impl std::fmt::Display for DigestStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DigestStrategy::SingleWinner => "single-winner",
            DigestStrategy::TopBottom => "top-bottom",
            DigestStrategy::Table => "table",
        };
        f.write_str(s)
    }
}

/// Parameters controlling digest rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestOptions {
    pub strategy: DigestStrategy,
    /// List length for the top/bottom digest.
    pub top_k: usize,
    /// Maximum number of data rows in the table digest.
    pub table_rows: usize,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            strategy: DigestStrategy::SingleWinner,
            top_k: 5,
            table_rows: 25,
        }
    }
}

/// Finished notification text plus the short caption shown with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Digest {
    pub title: String,
    pub text: String,
}

/// Encoding used for the tabular export file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values, opens directly in spreadsheet tools.
    #[default]
    Csv,
    /// Array of JSON objects keyed by the export headers.
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Per-dataset counters carried in the report metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub estimate_sum: f64,
}

impl DatasetSummary {
    /// Summarise a slice of canonical records.
    pub fn from_records(records: &[UsageRecord]) -> Self {
        Self {
            records: records.len(),
            estimate_sum: records.iter().map(|r| r.estimate_total).sum(),
        }
    }
}

/// Metadata produced alongside a report bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub strategy: DigestStrategy,
    pub current: DatasetSummary,
    pub prior: DatasetSummary,
}

/// Everything one report run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportBundle {
    pub current: Vec<UsageRecord>,
    pub prior: Vec<UsageRecord>,
    pub export_rows: Vec<ExportRow>,
    pub digest: Digest,
    pub metadata: ReportMetadata,
}
