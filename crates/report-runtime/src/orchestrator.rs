//! One report run, end to end.
//!
//! Loads both payloads concurrently, hands them to [`build_report`], then
//! passes the export rows to the [`ExportWriter`] and the digest to the
//! [`DigestNotifier`]. A collaborator failure aborts the run.

use std::sync::Arc;

use chrono::Utc;
use report_core::error::{ReportError, Result};
use report_core::models::{Dataset, ReportBundle};
use report_render::digest::{EXPORT_CAPTION, EXPORT_TITLE};
use serde_json::Value;

use crate::config::ReportConfig;
use crate::engine::{build_report, ReportOptions};
use crate::export_writer::{writer_for, ExportWriter};
use crate::notifier::{DigestNotifier, WriterNotifier};
use crate::sources::{FilePayloadSource, PayloadSource, StaticPayloadSource};

// ── ReportOrchestrator ────────────────────────────────────────────────────────

/// Wires payload sources, the engine and the output collaborators together.
pub struct ReportOrchestrator {
    current: Arc<dyn PayloadSource>,
    prior: Arc<dyn PayloadSource>,
    options: ReportOptions,
    channel: String,
    writer: Box<dyn ExportWriter>,
    notifier: Box<dyn DigestNotifier>,
}

impl ReportOrchestrator {
    pub fn new(
        current: Arc<dyn PayloadSource>,
        prior: Arc<dyn PayloadSource>,
        options: ReportOptions,
        channel: String,
        writer: Box<dyn ExportWriter>,
        notifier: Box<dyn DigestNotifier>,
    ) -> Self {
        Self {
            current,
            prior,
            options,
            channel,
            writer,
            notifier,
        }
    }

    /// Build an orchestrator reading files and writing messages to stdout.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            source_for(config.current_source.as_deref()),
            source_for(config.prior_source.as_deref()),
            config.options.clone(),
            config.channel.clone(),
            writer_for(config.export_format, config.export_path.clone()),
            Box::new(WriterNotifier::new(std::io::stdout())),
        )
    }

    /// Execute one run and return the bundle that was delivered.
    pub async fn run(&mut self) -> Result<ReportBundle> {
        tracing::info!(
            current = %self.current.describe(),
            prior = %self.prior.describe(),
            "loading payloads"
        );

        let (current, prior) = tokio::join!(
            load_source(Arc::clone(&self.current)),
            load_source(Arc::clone(&self.prior)),
        );
        let current = current?;
        let prior = prior?;

        let bundle = build_report(current.as_ref(), prior.as_ref(), &self.options, Utc::now());
        for (dataset, summary) in [
            (Dataset::CurrentPeriod, &bundle.metadata.current),
            (Dataset::PriorPeriod, &bundle.metadata.prior),
        ] {
            tracing::info!(
                dataset = %dataset,
                records = summary.records,
                estimate_sum = summary.estimate_sum,
                "{}",
                dataset.report_type()
            );
        }

        let export_path = self.writer.write(&bundle.export_rows)?;
        tracing::info!(
            path = %export_path.display(),
            rows = bundle.export_rows.len(),
            "export written"
        );

        self.notifier
            .announce_export(&self.channel, EXPORT_CAPTION, EXPORT_TITLE, &export_path)?;
        self.notifier.deliver(&self.channel, &bundle.digest)?;
        tracing::info!(channel = %self.channel, title = %bundle.digest.title, "digest delivered");

        Ok(bundle)
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn source_for(path: Option<&std::path::Path>) -> Arc<dyn PayloadSource> {
    match path {
        Some(p) => Arc::new(FilePayloadSource::new(p)),
        None => Arc::new(StaticPayloadSource::empty()),
    }
}

/// Run a (blocking) source load on the blocking pool.
async fn load_source(source: Arc<dyn PayloadSource>) -> Result<Option<Value>> {
    tokio::task::spawn_blocking(move || source.load())
        .await
        .map_err(|e| ReportError::Io(std::io::Error::other(e)))?
}

// ── Tests ─────────────────────────────────────────────────────────────────────
