//! Ranking of canonical records by estimate volume.

use std::cmp::Ordering;

use report_core::models::UsageRecord;

// ── TopRecord ─────────────────────────────────────────────────────────────────

/// Result of [`RankedView::top1`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TopRecord<'a> {
    /// The highest-ranked record.
    Leader(&'a UsageRecord),
    /// The ranked input was empty.
    NoData,
}

impl<'a> TopRecord<'a> {
    pub fn leader(self) -> Option<&'a UsageRecord> {
        match self {
            TopRecord::Leader(record) => Some(record),
            TopRecord::NoData => None,
        }
    }
}

// ── RankedView ────────────────────────────────────────────────────────────────

/// Records ordered by `estimate_total`, highest first.
///
/// The sort is stable: records with equal estimates keep their input order.
/// Built fresh per report run and borrowed from the canonical record list.
#[derive(Debug, Clone)]
pub struct RankedView<'a> {
    records: Vec<&'a UsageRecord>,
}

impl<'a> RankedView<'a> {
    /// Rank `records` by descending estimate total.
    pub fn rank(records: &'a [UsageRecord]) -> Self {
        let mut ranked: Vec<&UsageRecord> = records.iter().collect();
        // `sort_by` is stable; estimates are always finite after normalization.
        ranked.sort_by(|a, b| {
            b.estimate_total
                .partial_cmp(&a.estimate_total)
                .unwrap_or(Ordering::Equal)
        });
        Self { records: ranked }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The full ranked sequence.
    pub fn records(&self) -> &[&'a UsageRecord] {
        &self.records
    }

    /// The first `min(n, len)` records.
    pub fn top_k(&self, n: usize) -> &[&'a UsageRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// The last `min(n, len)` records, in ranked order (lowest estimate last).
    pub fn bottom_k(&self, n: usize) -> &[&'a UsageRecord] {
        let len = self.records.len();
        &self.records[len - n.min(len)..]
    }

    /// The single highest-ranked record, or [`TopRecord::NoData`].
    pub fn top1(&self) -> TopRecord<'a> {
        self.records
            .first()
            .copied()
            .map_or(TopRecord::NoData, TopRecord::Leader)
    }

    /// Whether `top_k(k)` and `bottom_k(k)` are non-empty and disjoint.
    pub fn has_top_bottom_split(&self, k: usize) -> bool {
        k > 0 && self.records.len() >= k.saturating_mul(2)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
