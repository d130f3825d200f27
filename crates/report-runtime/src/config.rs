//! Resolved configuration for one report run.

use std::path::PathBuf;

use report_core::error::{ReportError, Result};
use report_core::models::ExportFormat;
use report_core::schema::ReportSchema;
use report_core::settings::Settings;

use crate::engine::ReportOptions;

/// Everything the orchestrator needs, resolved from [`Settings`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub current_source: Option<PathBuf>,
    pub prior_source: Option<PathBuf>,
    pub channel: String,
    pub export_path: PathBuf,
    pub export_format: ExportFormat,
    pub options: ReportOptions,
}

impl ReportConfig {
    /// Resolve settings into a run configuration.
    ///
    /// Loads the schema file when one is given. Fails on a blank channel or an
    /// unreadable schema.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let channel = settings.channel.trim();
        if channel.is_empty() {
            return Err(ReportError::Config(
                "notification channel must not be empty".to_string(),
            ));
        }

        let schema = match &settings.schema {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading report schema");
                ReportSchema::load_from(path)?
            }
            None => ReportSchema::default(),
        };

        Ok(Self {
            current_source: settings.current_source.clone(),
            prior_source: settings.prior_source.clone(),
            channel: channel.to_string(),
            export_path: settings.resolved_export_path(),
            export_format: settings.export_format,
            options: ReportOptions {
                schema,
                digest: settings.digest_options(),
            },
        })
    }
}
