//! Delivery of the export announcement and the digest message.

use std::io::Write;
use std::path::Path;

use report_core::error::{ReportError, Result};
use report_core::models::Digest;

/// Posts report output to a named channel.
pub trait DigestNotifier: Send {
    /// Announce the exported file with a caption and title.
    fn announce_export(&mut self, channel: &str, caption: &str, title: &str, path: &Path)
        -> Result<()>;

    /// Deliver the digest message.
    fn deliver(&mut self, channel: &str, digest: &Digest) -> Result<()>;
}

/// Writes channel messages as plain text to any [`Write`] sink (stdout in the
/// binary, a buffer in tests).
pub struct WriterNotifier<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> WriterNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the notifier and return the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, channel: &str, body: &str) -> Result<()> {
        writeln!(self.out, "[#{channel}] {body}")
            .and_then(|_| self.out.flush())
            .map_err(|e| ReportError::Delivery {
                channel: channel.to_string(),
                reason: e.to_string(),
            })
    }
}

impl<W: Write + Send> DigestNotifier for WriterNotifier<W> {
    fn announce_export(
        &mut self,
        channel: &str,
        caption: &str,
        title: &str,
        path: &Path,
    ) -> Result<()> {
        let body = format!("{caption}\n{title}: {}", path.display());
        self.emit(channel, &body)
    }

    fn deliver(&mut self, channel: &str, digest: &Digest) -> Result<()> {
        self.emit(channel, &digest.text)
    }
}
