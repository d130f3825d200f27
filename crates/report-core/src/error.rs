use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the report collaborators.
///
/// The engine itself is infallible; these variants come from loading payloads,
/// writing exports and delivering digests.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A payload file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An export file could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or serialised.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The CSV encoder rejected a row.
    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The digest could not be handed to the notification channel.
    #[error("Delivery to {channel} failed: {reason}")]
    Delivery { channel: String, reason: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;
