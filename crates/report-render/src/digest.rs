//! Narrative digest strategies.
//!
//! Each [`DigestStrategy`] variant has one render function. Selection is by
//! configuration only; the ranked data never changes which strategy runs.

use report_core::formatting::format_estimate;
use report_core::models::{Digest, DigestOptions, DigestStrategy, UsageRecord};
use report_data::ranking::{RankedView, TopRecord};

use crate::table::{render_grid, TableLayout};

/// Sent by the single-winner digest when there is no record to announce.
pub const DATA_MISSING_MESSAGE: &str =
    "⚠️ Could not determine top agency - data might be missing or malformed.";

/// Sent by the top/bottom digest when the two lists would overlap.
pub const INSUFFICIENT_DATA_MESSAGE: &str =
    "⚠️ Not enough agencies in the current period to rank a top and bottom list.";

/// Caption accompanying the exported file.
pub const EXPORT_CAPTION: &str = "📊 Here is the latest usage report";

/// Title of the exported file.
pub const EXPORT_TITLE: &str = "UsageReport";

const SINGLE_WINNER_TITLE: &str = "Top Agency by Estimate Total";
const TOP_BOTTOM_TITLE: &str = "Agency Estimate Rankings";
const TABLE_TITLE: &str = "Agency Usage by Estimate Total";
const UNKNOWN_AGENCY: &str = "Unknown";

/// Render the digest selected by `options.strategy`.
pub fn render_digest(view: &RankedView<'_>, options: &DigestOptions) -> Digest {
    match options.strategy {
        DigestStrategy::SingleWinner => render_single_winner(view),
        DigestStrategy::TopBottom => render_top_bottom(view, options.top_k),
        DigestStrategy::Table => render_table(view, options.table_rows, &TableLayout::default()),
    }
}

/// Announce the top-ranked agency, or the fixed "data missing" message.
pub fn render_single_winner(view: &RankedView<'_>) -> Digest {
    let text = match view.top1() {
        TopRecord::Leader(record) => format!(
            "🏆 *{}*: {} with estimate total of *{}*.",
            SINGLE_WINNER_TITLE,
            agency_label(record),
            format_estimate(record.estimate_total)
        ),
        TopRecord::NoData => DATA_MISSING_MESSAGE.to_string(),
    };
    Digest {
        title: SINGLE_WINNER_TITLE.to_string(),
        text,
    }
}

/// Numbered top-`k` and bottom-`k` lists, or the fixed "insufficient data"
/// message when fewer than `2 * k` records are ranked.
pub fn render_top_bottom(view: &RankedView<'_>, k: usize) -> Digest {
    let text = if view.has_top_bottom_split(k) {
        let mut lines = vec![format!("🏆 *Top {} Agencies by Estimate Total*", k)];
        lines.extend(numbered_lines(view.top_k(k)));
        lines.push(String::new());
        lines.push(format!("🔻 *Bottom {} Agencies by Estimate Total*", k));
        lines.extend(numbered_lines(view.bottom_k(k)));
        lines.join("\n")
    } else {
        INSUFFICIENT_DATA_MESSAGE.to_string()
    };
    Digest {
        title: TOP_BOTTOM_TITLE.to_string(),
        text,
    }
}

/// Monospace grid of the ranked view, capped at `max_rows` data rows.
pub fn render_table(view: &RankedView<'_>, max_rows: usize, layout: &TableLayout) -> Digest {
    let shown = view.top_k(max_rows);
    let mut lines = render_grid(shown, layout);
    if view.is_empty() {
        lines.push("(no records)".to_string());
    } else if view.len() > shown.len() {
        lines.push(format!("... {} more records", view.len() - shown.len()));
    }
    Digest {
        title: TABLE_TITLE.to_string(),
        text: format!("```\n{}\n```", lines.join("\n")),
    }
}

fn numbered_lines(records: &[&UsageRecord]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let who = if record.branch_name.is_empty() {
                agency_label(record).to_string()
            } else {
                format!("{} ({})", agency_label(record), record.branch_name)
            };
            format!("{}. {}: {}", i + 1, who, format_estimate(record.estimate_total))
        })
        .collect()
}

fn agency_label(record: &UsageRecord) -> &str {
    if record.agency_name.is_empty() {
        UNKNOWN_AGENCY
    } else {
        &record.agency_name
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(agency: &str, branch: &str, est: f64) -> UsageRecord {
        UsageRecord {
            agency_name: agency.to_string(),
            branch_name: branch.to_string(),
            medium: "Radio".to_string(),
            estimate_total: est,
            source_label: "current-period".to_string(),
            ..Default::default()
        }
    }

    fn scenario_records() -> Vec<UsageRecord> {
        [10.0, 50.0, 5.0, 80.0, 20.0, 15.0, 3.0]
            .iter()
            .enumerate()
            .map(|(i, &est)| record(&format!("Agency {}", (b'A' + i as u8) as char), "Main", est))
            .collect()
    }

    // ── render_single_winner ──────────────────────────────────────────────────

    #[test]
    fn test_single_winner_names_leader() {
        let records = scenario_records();
        let view = RankedView::rank(&records);
        let digest = render_single_winner(&view);
        assert_eq!(digest.title, "Top Agency by Estimate Total");
        assert_eq!(
            digest.text,
            "🏆 *Top Agency by Estimate Total*: Agency D with estimate total of *80*."
        );
    }

    #[test]
    fn test_single_winner_no_data() {
        let view = RankedView::rank(&[]);
        let digest = render_single_winner(&view);
        assert_eq!(digest.text, DATA_MISSING_MESSAGE);
    }

    #[test]
    fn test_single_winner_unknown_agency() {
        let records = vec![record("", "", 12.5)];
        let view = RankedView::rank(&records);
        let digest = render_single_winner(&view);
        assert!(digest.text.contains("Unknown with estimate total of *12.50*"));
    }

    #[test]
    fn test_single_winner_prints_full_large_estimate() {
        let records = vec![record("Big", "", 1e20), record("Small", "", 5.0)];
        let view = RankedView::rank(&records);
        let digest = render_single_winner(&view);
        assert_eq!(
            digest.text,
            "🏆 *Top Agency by Estimate Total*: Big with estimate total of *100,000,000,000,000,000,000*."
        );
    }

    // ── render_top_bottom ─────────────────────────────────────────────────────

    #[test]
    fn test_top_bottom_falls_back_below_twice_k() {
        let records = scenario_records();
        let view = RankedView::rank(&records);
        let digest = render_top_bottom(&view, 5);
        assert_eq!(digest.text, INSUFFICIENT_DATA_MESSAGE);
    }

    #[test]
    fn test_top_bottom_falls_back_on_empty() {
        let view = RankedView::rank(&[]);
        assert_eq!(render_top_bottom(&view, 1).text, INSUFFICIENT_DATA_MESSAGE);
    }

    #[test]
    fn test_top_bottom_renders_numbered_lists() {
        let records = scenario_records();
        let view = RankedView::rank(&records);
        let digest = render_top_bottom(&view, 3);
        let expected = [
            "🏆 *Top 3 Agencies by Estimate Total*",
            "1. Agency D (Main): 80",
            "2. Agency B (Main): 50",
            "3. Agency E (Main): 20",
            "",
            "🔻 *Bottom 3 Agencies by Estimate Total*",
            "1. Agency A (Main): 10",
            "2. Agency C (Main): 5",
            "3. Agency G (Main): 3",
        ]
        .join("\n");
        assert_eq!(digest.text, expected);
        assert_eq!(digest.title, "Agency Estimate Rankings");
    }

    #[test]
    fn test_top_bottom_omits_empty_branch() {
        let records = vec![record("Acme", "", 9.0), record("Globex", "", 1.0)];
        let view = RankedView::rank(&records);
        let digest = render_top_bottom(&view, 1);
        assert!(digest.text.contains("1. Acme: 9"));
        assert!(digest.text.contains("1. Globex: 1"));
    }

    // ── render_table ──────────────────────────────────────────────────────────

    #[test]
    fn test_table_is_fenced_and_ranked() {
        let records = scenario_records();
        let view = RankedView::rank(&records);
        let digest = render_table(&view, 25, &TableLayout::default());
        let lines: Vec<&str> = digest.text.lines().collect();
        assert_eq!(lines.first(), Some(&"```"));
        assert_eq!(lines.last(), Some(&"```"));
        // fence + header + separator + 7 rows + fence
        assert_eq!(lines.len(), 11);
        assert!(lines[3].starts_with("Agency D"));
        assert!(lines[9].starts_with("Agency G"));
    }

    #[test]
    fn test_table_caps_rows() {
        let records = scenario_records();
        let view = RankedView::rank(&records);
        let digest = render_table(&view, 2, &TableLayout::default());
        let lines: Vec<&str> = digest.text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[5], "... 5 more records");
    }

    #[test]
    fn test_table_empty() {
        let view = RankedView::rank(&[]);
        let digest = render_table(&view, 25, &TableLayout::default());
        assert!(digest.text.contains("(no records)"));
        assert!(digest.text.contains("Est/RO/IB/OB"));
    }

    // ── render_digest ─────────────────────────────────────────────────────────

    #[test]
    fn test_render_digest_dispatches_on_strategy() {
        let records = scenario_records();
        let view = RankedView::rank(&records);
        let mut options = DigestOptions::default();

        assert_eq!(render_digest(&view, &options), render_single_winner(&view));

        options.strategy = DigestStrategy::TopBottom;
        options.top_k = 2;
        assert_eq!(render_digest(&view, &options), render_top_bottom(&view, 2));

        options.strategy = DigestStrategy::Table;
        options.table_rows = 4;
        assert_eq!(
            render_digest(&view, &options),
            render_table(&view, 4, &TableLayout::default())
        );
    }
}
