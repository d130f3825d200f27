//! Key-mapping tables that drive extraction and normalization.
//!
//! Source systems disagree on where the record list lives and on what each
//! column is called. Both facts are data here: new payload shapes are added by
//! extending these tables (or loading them from a JSON schema file), not by
//! branching in the extractor or normalizer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

// ── ContainerPath ─────────────────────────────────────────────────────────────

/// A sequence of object keys leading from the payload root to a record list.
///
/// An empty path addresses the payload root itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerPath(pub Vec<String>);

impl ContainerPath {
    /// Build a path from its key segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The payload root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Key segments in lookup order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for ContainerPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0.join("."))
        }
    }
}

// ── ExtractorConfig ───────────────────────────────────────────────────────────

/// Candidate record-list locations, probed in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub container_paths: Vec<ContainerPath>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            container_paths: vec![
                ContainerPath::new(["data"]),
                ContainerPath::new(["Data", "Table"]),
                ContainerPath::new(["records"]),
                ContainerPath::root(),
            ],
        }
    }
}

// ── FieldMap ──────────────────────────────────────────────────────────────────

/// Ordered key aliases for each canonical record field.
///
/// The first alias present with a non-null value wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    pub agency_name: Vec<String>,
    pub branch_name: Vec<String>,
    pub medium: Vec<String>,
    pub estimate_total: Vec<String>,
    pub ro_total: Vec<String>,
    pub ib_total: Vec<String>,
    pub ob_total: Vec<String>,
}

fn aliases(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            agency_name: aliases(&["agencyName", "Agency Name", "AgencyName", "agency_name"]),
            branch_name: aliases(&["branchName", "BranchName", "Branch Name", "branch_name"]),
            medium: aliases(&["medium", "Medium"]),
            estimate_total: aliases(&[
                "estimateTotal",
                "Total Estimate",
                "EstimateTotal",
                "estimate_total",
            ]),
            ro_total: aliases(&["roTotal", "Total RO", "RO", "ro_total"]),
            ib_total: aliases(&["ibTotal", "Total IB", "IB", "ib_total"]),
            ob_total: aliases(&["obTotal", "Total OB", "OB", "ob_total"]),
        }
    }
}

// ── ReportSchema ──────────────────────────────────────────────────────────────

/// Extraction and normalization tables bundled together, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSchema {
    pub extractor: ExtractorConfig,
    pub fields: FieldMap,
}

impl ReportSchema {
    /// Load a schema file. Missing sections fall back to the built-in tables.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ReportError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let schema: ReportSchema = serde_json::from_str(&content)?;
        if schema.extractor.container_paths.is_empty() {
            return Err(ReportError::Config(format!(
                "schema {} lists no container paths",
                path.display()
            )));
        }
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_container_order() {
        let cfg = ExtractorConfig::default();
        let rendered: Vec<String> = cfg.container_paths.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["data", "Data.Table", "records", "<root>"]);
    }

    #[test]
    fn test_default_field_map_covers_legacy_columns() {
        let map = FieldMap::default();
        assert!(map.agency_name.contains(&"Agency Name".to_string()));
        assert!(map.branch_name.contains(&"BranchName".to_string()));
        assert!(map.estimate_total.contains(&"Total Estimate".to_string()));
        assert!(map.ro_total.contains(&"Total RO".to_string()));
        assert!(map.ib_total.contains(&"Total IB".to_string()));
        assert!(map.ob_total.contains(&"Total OB".to_string()));
        assert_eq!(map.agency_name[0], "agencyName");
    }

    #[test]
    fn test_schema_load_partial_file_keeps_default_fields() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("schema.json");
        std::fs::write(
            &path,
            r#"{ "extractor": { "container_paths": [["payload", "rows"]] } }"#,
        )
        .expect("write");

        let schema = ReportSchema::load_from(&path).expect("load");
        assert_eq!(
            schema.extractor.container_paths,
            vec![ContainerPath::new(["payload", "rows"])]
        );
        assert_eq!(schema.fields, FieldMap::default());
    }

    #[test]
    fn test_schema_load_rejects_empty_paths() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("schema.json");
        std::fs::write(&path, r#"{ "extractor": { "container_paths": [] } }"#).expect("write");

        let err = ReportSchema::load_from(&path).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_schema_load_missing_file() {
        let tmp = TempDir::new().expect("tempdir");
        let err = ReportSchema::load_from(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ReportError::FileRead { .. }));
    }
}
