//! Aggregation and reporting engine.
//!
//! [`build_report`] is the single entry point: it takes already-loaded
//! payloads and explicit options, and returns a fresh [`ReportBundle`]. It
//! performs no I/O, reads no ambient state, and cannot fail.

use chrono::{DateTime, Utc};
use report_core::models::{
    Dataset, DatasetSummary, DigestOptions, ReportBundle, ReportMetadata,
};
use report_core::schema::ReportSchema;
use report_data::extractor::DatasetExtractor;
use report_data::ranking::RankedView;
use report_render::digest::render_digest;
use report_render::export::{export_rows, ExportGroup};
use serde_json::Value;
use tracing::info;

/// Everything the engine needs besides the payloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOptions {
    /// Container paths and field aliases.
    pub schema: ReportSchema,
    /// Digest strategy and its parameters.
    pub digest: DigestOptions,
}

/// Build one report from the current-period and prior-period payloads.
///
/// Either payload may be absent; an absent or malformed payload contributes
/// no records. The digest ranks the current-period records only.
pub fn build_report(
    current: Option<&Value>,
    prior: Option<&Value>,
    options: &ReportOptions,
    generated_at: DateTime<Utc>,
) -> ReportBundle {
    let current_label = Dataset::CurrentPeriod.label();
    let prior_label = Dataset::PriorPeriod.label();

    let current_records = DatasetExtractor::extract_records(current, &options.schema, current_label);
    let prior_records = DatasetExtractor::extract_records(prior, &options.schema, prior_label);

    let rows = export_rows(&[
        ExportGroup::new(current_label, &current_records),
        ExportGroup::new(prior_label, &prior_records),
    ]);

    let digest = {
        let view = RankedView::rank(&current_records);
        render_digest(&view, &options.digest)
    };

    let metadata = ReportMetadata {
        generated_at,
        strategy: options.digest.strategy,
        current: DatasetSummary::from_records(&current_records),
        prior: DatasetSummary::from_records(&prior_records),
    };

    info!(
        current = metadata.current.records,
        prior = metadata.prior.records,
        rows = rows.len(),
        strategy = %metadata.strategy,
        "report built"
    );

    ReportBundle {
        current: current_records,
        prior: prior_records,
        export_rows: rows,
        digest,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
