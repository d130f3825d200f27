//! Payload sources feeding the engine.
//!
//! A source yields a parsed payload, reports that no payload exists
//! (`Ok(None)`), or fails. Failures abort the run before the engine is
//! invoked.

use std::path::PathBuf;

use report_core::error::Result;
use report_data::reader::load_payload;
use serde_json::Value;

/// Where one dataset's raw payload comes from.
pub trait PayloadSource: Send + Sync {
    /// Short description for logs.
    fn describe(&self) -> String;

    /// Produce the payload, if any.
    fn load(&self) -> Result<Option<Value>>;
}

/// Reads a JSON document from disk.
#[derive(Debug, Clone)]
pub struct FilePayloadSource {
    path: PathBuf,
}

impl FilePayloadSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PayloadSource for FilePayloadSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Option<Value>> {
        load_payload(&self.path)
    }
}

/// An already-parsed payload held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticPayloadSource {
    payload: Option<Value>,
}

impl StaticPayloadSource {
    pub fn new(payload: Option<Value>) -> Self {
        Self { payload }
    }

    /// A source that never has a payload (dataset not configured).
    pub fn empty() -> Self {
        Self::default()
    }
}

impl PayloadSource for StaticPayloadSource {
    fn describe(&self) -> String {
        match self.payload {
            Some(_) => "<in-memory>".to_string(),
            None => "<none>".to_string(),
        }
    }

    fn load(&self) -> Result<Option<Value>> {
        Ok(self.payload.clone())
    }
}
