use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::models::{DigestOptions, DigestStrategy, ExportFormat};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Accepted `--top-k` values.
pub const TOP_K_RANGE: RangeInclusive<u32> = 1..=50;

/// Accepted `--table-rows` values.
pub const TABLE_ROWS_RANGE: RangeInclusive<u32> = 1..=500;

fn clap_range(range: RangeInclusive<u32>) -> RangeInclusive<i64> {
    i64::from(*range.start())..=i64::from(*range.end())
}

/// Periodic agency usage report: export table and ranking digest
#[derive(Parser, Debug, Clone)]
#[command(
    name = "usage-report",
    about = "Build the agency usage export and ranking digest from two estimate datasets",
    version
)]
pub struct Settings {
    /// JSON payload with the current-period estimates
    #[arg(long, env = "USAGE_REPORT_CURRENT_SOURCE")]
    pub current_source: Option<PathBuf>,

    /// JSON payload with the prior-period estimates
    #[arg(long, env = "USAGE_REPORT_PRIOR_SOURCE")]
    pub prior_source: Option<PathBuf>,

    /// Notification channel the digest is delivered to
    #[arg(long, env = "USAGE_REPORT_CHANNEL", default_value = "usage-reports")]
    pub channel: String,

    /// Digest format
    #[arg(long, value_enum, default_value_t = DigestStrategy::SingleWinner)]
    pub digest: DigestStrategy,

    /// Number of agencies in each list of the top/bottom digest (1-50)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(clap_range(TOP_K_RANGE)))]
    pub top_k: u32,

    /// Maximum rows in the table digest (1-500)
    #[arg(long, default_value = "25", value_parser = clap::value_parser!(u32).range(clap_range(TABLE_ROWS_RANGE)))]
    pub table_rows: u32,

    /// Export file path (defaults to UsageReport.<format>)
    #[arg(long)]
    pub export_path: Option<PathBuf>,

    /// Export file format
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub export_format: ExportFormat,

    /// JSON schema file overriding container paths and field aliases
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,

    /// Problems met while reading or writing saved preferences. Collected
    /// during parsing, before any log subscriber exists.
    #[arg(skip)]
    pub persistence_warnings: Vec<String>,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used preferences saved to `~/.usage-report/last_used.json`.
///
/// Source paths are never persisted: every run names its inputs.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<DigestStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_format: Option<ExportFormat>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".usage-report").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse process arguments, merge with last-used params where no explicit
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] but with explicit arguments
    /// and config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                settings
                    .persistence_warnings
                    .push(format!("failed to clear saved configuration: {e}"));
            }
            return settings.resolve_debug();
        }

        let last = LastUsedParams::load_from(config_path);

        // clap keys args by field name, not by the hyphenated flag.
        if !is_arg_explicitly_set(&matches, "channel") {
            if let Some(v) = last.channel {
                settings.channel = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "digest") {
            if let Some(v) = last.digest {
                settings.digest = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "top_k") {
            if let Some(v) = last.top_k {
                match checked(v, &TOP_K_RANGE, "top_k") {
                    Ok(v) => settings.top_k = v,
                    Err(w) => settings.persistence_warnings.push(w),
                }
            }
        }
        if !is_arg_explicitly_set(&matches, "table_rows") {
            if let Some(v) = last.table_rows {
                match checked(v, &TABLE_ROWS_RANGE, "table_rows") {
                    Ok(v) => settings.table_rows = v,
                    Err(w) => settings.persistence_warnings.push(w),
                }
            }
        }
        if !is_arg_explicitly_set(&matches, "export_format") {
            if let Some(v) = last.export_format {
                settings.export_format = v;
            }
        }

        let mut settings = settings.resolve_debug();

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            settings
                .persistence_warnings
                .push(format!("failed to persist last-used configuration: {e}"));
        }

        settings
    }

    /// Emit the collected persistence warnings. Call once logging is set up.
    pub fn log_persistence_warnings(&self) {
        for warning in &self.persistence_warnings {
            tracing::warn!("{}", warning);
        }
    }

    /// Digest parameters selected on the command line.
    pub fn digest_options(&self) -> DigestOptions {
        DigestOptions {
            strategy: self.digest,
            top_k: self.top_k as usize,
            table_rows: self.table_rows as usize,
        }
    }

    /// Export destination, falling back to `UsageReport.<ext>`.
    pub fn resolved_export_path(&self) -> PathBuf {
        self.export_path.clone().unwrap_or_else(|| {
            PathBuf::from(format!("UsageReport.{}", self.export_format.extension()))
        })
    }

    fn resolve_debug(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            channel: Some(s.channel.clone()),
            digest: Some(s.digest),
            top_k: Some(s.top_k),
            table_rows: Some(s.table_rows),
            export_format: Some(s.export_format),
        }
    }
}

/// Accept a persisted value only when the command line would have accepted it.
fn checked(value: u32, range: &RangeInclusive<u32>, name: &str) -> Result<u32, String> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "ignoring saved {name} = {value}: outside {}..={}",
            range.start(),
            range.end()
        ))
    }
}

/// Returns `true` when `name` was supplied on the command line or through its
/// environment variable, as opposed to a default value.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(clap::parser::ValueSource::CommandLine | clap::parser::ValueSource::EnvVariable)
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
