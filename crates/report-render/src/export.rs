use report_core::models::{ExportRow, UsageRecord};

/// Records of one dataset, tagged with the label written into the
/// "Report Type" column.
#[derive(Debug, Clone, Copy)]
pub struct ExportGroup<'a> {
    pub source_label: &'a str,
    pub records: &'a [UsageRecord],
}

impl<'a> ExportGroup<'a> {
    pub fn new(source_label: &'a str, records: &'a [UsageRecord]) -> Self {
        Self {
            source_label,
            records,
        }
    }
}

/// Flatten `groups` into export rows.
///
/// Groups are concatenated in the order given and records keep their
/// extraction order; nothing is sorted here.
pub fn export_rows(groups: &[ExportGroup<'_>]) -> Vec<ExportRow> {
    groups
        .iter()
        .flat_map(|group| {
            group
                .records
                .iter()
                .map(move |record| to_row(record, group.source_label))
        })
        .collect()
}

fn to_row(record: &UsageRecord, source_label: &str) -> ExportRow {
    ExportRow {
        agency: record.agency_name.clone(),
        branch: record.branch_name.clone(),
        medium: record.medium.clone(),
        estimate_total: record.estimate_total,
        ro_total: record.ro_total,
        ib_total: record.ib_total,
        ob_total: record.ob_total,
        source_label: source_label.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(agency: &str, estimate: f64, label: &str) -> UsageRecord {
        UsageRecord {
            agency_name: agency.to_string(),
            branch_name: format!("{agency} branch"),
            medium: "Radio".to_string(),
            estimate_total: estimate,
            ro_total: 1.0,
            ib_total: 2.0,
            ob_total: 3.0,
            source_label: label.to_string(),
        }
    }

    #[test]
    fn test_groups_concatenate_in_supplied_order() {
        let current = vec![record("C1", 5.0, "current-period"), record("C2", 50.0, "current-period")];
        let prior = vec![record("P1", 7.0, "prior-period")];

        let rows = export_rows(&[
            ExportGroup::new("current-period", &current),
            ExportGroup::new("prior-period", &prior),
        ]);

        let agencies: Vec<&str> = rows.iter().map(|r| r.agency.as_str()).collect();
        assert_eq!(agencies, vec!["C1", "C2", "P1"]);
        assert_eq!(rows[0].source_label, "current-period");
        assert_eq!(rows[2].source_label, "prior-period");
    }

    #[test]
    fn test_rows_are_not_sorted() {
        let current = vec![
            record("low", 1.0, "current-period"),
            record("high", 100.0, "current-period"),
        ];
        let rows = export_rows(&[ExportGroup::new("current-period", &current)]);
        assert_eq!(rows[0].agency, "low");
        assert_eq!(rows[1].agency, "high");
    }

    #[test]
    fn test_row_carries_all_fields() {
        let current = vec![record("Acme", 12.5, "current-period")];
        let rows = export_rows(&[ExportGroup::new("current-period", &current)]);
        assert_eq!(
            rows[0],
            ExportRow {
                agency: "Acme".to_string(),
                branch: "Acme branch".to_string(),
                medium: "Radio".to_string(),
                estimate_total: 12.5,
                ro_total: 1.0,
                ib_total: 2.0,
                ob_total: 3.0,
                source_label: "current-period".to_string(),
            }
        );
    }

    #[test]
    fn test_group_label_wins_over_record_label() {
        let records = vec![record("Acme", 1.0, "something-else")];
        let rows = export_rows(&[ExportGroup::new("prior-period", &records)]);
        assert_eq!(rows[0].source_label, "prior-period");
    }

    #[test]
    fn test_empty_groups() {
        assert!(export_rows(&[]).is_empty());
        let rows = export_rows(&[
            ExportGroup::new("current-period", &[]),
            ExportGroup::new("prior-period", &[]),
        ]);
        assert!(rows.is_empty());
    }
}
