//! Fixed-width monospace grid used by the table digest.
//!
//! Widths are measured in terminal display columns so that the grid stays
//! aligned in a monospace font.

use report_core::formatting::format_estimate;
use report_core::models::UsageRecord;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Column widths of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub agency: usize,
    pub branch: usize,
    pub medium: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            agency: 24,
            branch: 16,
            medium: 10,
        }
    }
}

const AGENCY_HEADER: &str = "Agency";
const BRANCH_HEADER: &str = "Branch";
const MEDIUM_HEADER: &str = "Medium";
const TOTALS_HEADER: &str = "Est/RO/IB/OB";
const COLUMN_GAP: &str = " ";

/// Render the header, the dash separator and one line per record.
pub fn render_grid(records: &[&UsageRecord], layout: &TableLayout) -> Vec<String> {
    let mut lines = Vec::with_capacity(records.len() + 2);

    lines.push(join_columns(
        [
            fit_cell(AGENCY_HEADER, layout.agency),
            fit_cell(BRANCH_HEADER, layout.branch),
            fit_cell(MEDIUM_HEADER, layout.medium),
        ],
        TOTALS_HEADER,
    ));
    lines.push(join_columns(
        [
            "-".repeat(layout.agency),
            "-".repeat(layout.branch),
            "-".repeat(layout.medium),
        ],
        &"-".repeat(TOTALS_HEADER.width()),
    ));

    for record in records {
        lines.push(join_columns(
            [
                fit_cell(&record.agency_name, layout.agency),
                fit_cell(&record.branch_name, layout.branch),
                fit_cell(&record.medium, layout.medium),
            ],
            &combined_totals(record),
        ));
    }

    lines
}

/// Cut `value` to exactly `width` display columns, or right-pad it with
/// spaces. No ellipsis is added.
pub fn fit_cell(value: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for c in value.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// `est/ro/ib/ob` with digest number formatting.
pub fn combined_totals(record: &UsageRecord) -> String {
    format!(
        "{}/{}/{}/{}",
        format_estimate(record.estimate_total),
        format_estimate(record.ro_total),
        format_estimate(record.ib_total),
        format_estimate(record.ob_total)
    )
}

fn join_columns(fixed: [String; 3], last: &str) -> String {
    let mut line = fixed.join(COLUMN_GAP);
    line.push_str(COLUMN_GAP);
    line.push_str(last);
    line
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(agency: &str, branch: &str, medium: &str, est: f64) -> UsageRecord {
        UsageRecord {
            agency_name: agency.to_string(),
            branch_name: branch.to_string(),
            medium: medium.to_string(),
            estimate_total: est,
            ro_total: 1.0,
            ib_total: 2.0,
            ob_total: 3.0,
            source_label: "current-period".to_string(),
        }
    }

    /// Display-column offsets where each fixed column ends.
    fn column_slices(line: &str, layout: &TableLayout) -> Vec<String> {
        let chars: Vec<char> = line.chars().collect();
        let mut out = Vec::new();
        let mut start = 0;
        for width in [layout.agency, layout.branch, layout.medium] {
            out.push(chars[start..start + width].iter().collect());
            start += width + COLUMN_GAP.len();
        }
        out
    }

    // ── fit_cell ──────────────────────────────────────────────────────────────

    #[test]
    fn test_fit_cell_pads_short_values() {
        assert_eq!(fit_cell("Acme", 8), "Acme    ");
        assert_eq!(fit_cell("", 3), "   ");
    }

    #[test]
    fn test_fit_cell_cuts_long_values_without_ellipsis() {
        assert_eq!(fit_cell("Abcdefghij", 4), "Abcd");
    }

    #[test]
    fn test_fit_cell_exact_width_is_unchanged() {
        assert_eq!(fit_cell("Abcd", 4), "Abcd");
    }

    #[test]
    fn test_fit_cell_wide_chars_keep_width() {
        let cell = fit_cell("日本語テキスト", 5);
        assert_eq!(cell.width(), 5);
        assert_eq!(cell, "日本 ");
    }

    // ── render_grid ───────────────────────────────────────────────────────────

    #[test]
    fn test_grid_columns_align() {
        let layout = TableLayout::default();
        let long_agency = "A".repeat(30);
        let records = vec![
            record(&long_agency, "North", "Radio", 80.0),
            record("Acme", "A very long branch name here", "Television", 5.0),
        ];
        let refs: Vec<&UsageRecord> = records.iter().collect();
        let lines = render_grid(&refs, &layout);

        assert_eq!(lines.len(), 4);
        let fixed_prefix = layout.agency + layout.branch + layout.medium + 3 * COLUMN_GAP.len();
        for line in &lines {
            assert!(line.chars().count() > fixed_prefix, "line too short: {line:?}");
            for (i, gap_at) in [
                layout.agency,
                layout.agency + 1 + layout.branch,
                layout.agency + 1 + layout.branch + 1 + layout.medium,
            ]
            .iter()
            .enumerate()
            {
                assert_eq!(
                    line.chars().nth(*gap_at),
                    Some(' '),
                    "column {i} boundary misaligned in {line:?}"
                );
            }
        }
    }

    #[test]
    fn test_grid_truncates_thirty_char_agency() {
        let layout = TableLayout::default();
        let long_agency = "ABCDEFGHIJKLMNOPQRSTUVWXYZ1234";
        assert_eq!(long_agency.len(), 30);
        let records = vec![record(long_agency, "North", "Radio", 80.0)];
        let refs: Vec<&UsageRecord> = records.iter().collect();
        let lines = render_grid(&refs, &layout);

        let cols = column_slices(&lines[2], &layout);
        assert_eq!(cols[0], &long_agency[..layout.agency]);
        assert!(!lines[2].contains("1234"));
    }

    #[test]
    fn test_grid_header_and_separator() {
        let layout = TableLayout {
            agency: 8,
            branch: 6,
            medium: 6,
        };
        let lines = render_grid(&[], &layout);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Agency   Branch Medium Est/RO/IB/OB");
        assert_eq!(lines[1], "-------- ------ ------ ------------");
    }

    #[test]
    fn test_grid_row_totals_field() {
        let layout = TableLayout {
            agency: 4,
            branch: 4,
            medium: 4,
        };
        let records = vec![record("Acme", "N", "TV", 1200.0)];
        let refs: Vec<&UsageRecord> = records.iter().collect();
        let lines = render_grid(&refs, &layout);
        assert_eq!(lines[2], "Acme N    TV   1,200/1/2/3");
    }
}
