//! Record-list discovery inside raw payload envelopes.
//!
//! Each endpoint wraps its record list differently (`data`, `Data.Table`, a
//! bare array). The candidate locations come from [`ExtractorConfig`] and are
//! probed in order; the first one holding an array wins.

use report_core::models::UsageRecord;
use report_core::schema::{ContainerPath, ExtractorConfig, ReportSchema};
use serde_json::Value;
use tracing::{debug, warn};

use crate::normalizer::RecordNormalizer;

/// Walks payload envelopes to find the raw record list.
pub struct DatasetExtractor;

impl DatasetExtractor {
    /// Return the raw record objects of `payload`.
    ///
    /// An absent payload, or one where no configured container resolves to an
    /// array, yields an empty list. Array elements that are not objects are
    /// skipped. `source_label` only feeds diagnostics.
    pub fn extract<'p>(
        payload: Option<&'p Value>,
        config: &ExtractorConfig,
        source_label: &str,
    ) -> Vec<&'p Value> {
        let Some(payload) = payload else {
            debug!("No {} payload supplied", source_label);
            return Vec::new();
        };

        let Some((path, items)) = config
            .container_paths
            .iter()
            .find_map(|path| Self::resolve(payload, path).map(|items| (path, items)))
        else {
            warn!(
                "No record list found in {} payload (tried: {})",
                source_label,
                describe_paths(&config.container_paths)
            );
            return Vec::new();
        };

        let records: Vec<&Value> = items.iter().filter(|item| item.is_object()).collect();
        let skipped = items.len() - records.len();
        if skipped > 0 {
            debug!(
                "Skipped {} non-object entries in {} payload at {}",
                skipped, source_label, path
            );
        }

        debug!(
            "Extracted {} {} records from {}",
            records.len(),
            source_label,
            path
        );
        records
    }

    /// Extract and normalize every record of `payload`, tagging each with
    /// `source_label`. Input order is preserved.
    pub fn extract_records(
        payload: Option<&Value>,
        schema: &ReportSchema,
        source_label: &str,
    ) -> Vec<UsageRecord> {
        Self::extract(payload, &schema.extractor, source_label)
            .into_iter()
            .map(|raw| RecordNormalizer::normalize(raw, source_label, &schema.fields))
            .collect()
    }

    /// Follow `path` from the payload root; matches only when it ends on an
    /// array.
    fn resolve<'p>(payload: &'p Value, path: &ContainerPath) -> Option<&'p Vec<Value>> {
        path.segments()
            .iter()
            .try_fold(payload, |node, key| node.get(key.as_str()))
            .and_then(Value::as_array)
    }
}

fn describe_paths(paths: &[ContainerPath]) -> String {
    paths
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
