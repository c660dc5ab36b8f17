use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::model::{
    Record, Table, FWCI, PROMINENCE_PERCENTILE, PUBLICATION_SHARE_GROWTH, SCHOLARLY_OUTPUT,
};

// ---------------------------------------------------------------------------
// Filter parameters: one snapshot of the sidebar controls
// ---------------------------------------------------------------------------

/// Current values of the three sidebar controls.
///
/// Both ranges are inclusive and always ordered (`min <= max`). An empty
/// `selected_clusters` means "no restriction".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParameters {
    pub output_range: (u64, u64),
    pub fwci_range: (f64, f64),
    pub selected_clusters: BTreeSet<String>,
}

impl FilterParameters {
    /// Parameters spanning the table's true min/max with no cluster
    /// restriction, i.e. the initial slider positions.
    pub fn full_range(table: &Table) -> Self {
        FilterParameters {
            output_range: table.output_bounds().unwrap_or((0, 0)),
            fwci_range: table.fwci_bounds().unwrap_or((0.0, 0.0)),
            selected_clusters: BTreeSet::new(),
        }
    }

    pub fn set_output_range(&mut self, a: u64, b: u64) {
        self.output_range = (a.min(b), a.max(b));
    }

    pub fn set_fwci_range(&mut self, a: f64, b: f64) {
        self.fwci_range = (a.min(b), a.max(b));
    }

    /// Whether `record` passes all three predicates.
    pub fn matches(&self, record: &Record) -> bool {
        let (out_lo, out_hi) = self.output_range;
        let (fwci_lo, fwci_hi) = self.fwci_range;
        (out_lo..=out_hi).contains(&record.scholarly_output)
            && fwci_lo <= record.fwci
            && record.fwci <= fwci_hi
            && (self.selected_clusters.is_empty()
                || self.selected_clusters.contains(&record.topic_cluster))
    }
}

/// Keep the records of `table` that match `params`, preserving order.
pub fn filter(table: &Table, params: &FilterParameters) -> Table {
    table
        .iter()
        .filter(|r| params.matches(r))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Top-N
// ---------------------------------------------------------------------------

/// Numeric attribute a top-N view ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    ScholarlyOutput,
    Fwci,
    ProminencePercentile,
    /// Signed value: the biggest growth wins, not the biggest change.
    PublicationShareGrowth,
}

impl SortKey {
    pub fn value(self, record: &Record) -> f64 {
        match self {
            SortKey::ScholarlyOutput => record.scholarly_output as f64,
            SortKey::Fwci => record.fwci,
            SortKey::ProminencePercentile => record.prominence_percentile,
            SortKey::PublicationShareGrowth => record.publication_share_growth_pct,
        }
    }

    /// Source column name.
    pub fn column(self) -> &'static str {
        match self {
            SortKey::ScholarlyOutput => SCHOLARLY_OUTPUT,
            SortKey::Fwci => FWCI,
            SortKey::ProminencePercentile => PROMINENCE_PERCENTILE,
            SortKey::PublicationShareGrowth => PUBLICATION_SHARE_GROWTH,
        }
    }
}

/// Up to `n` records with the highest `key`, descending.
///
/// Ties keep their order from `table` (first occurrence wins).
pub fn top_n(table: &Table, n: usize, key: SortKey) -> Vec<Record> {
    let mut ranked: Vec<&Record> = table.iter().collect();
    // `sort_by` is stable, so equal keys stay in table order. Values are
    // finite, and `partial_cmp` treats -0.0 and 0.0 as equal.
    ranked.sort_by(|a, b| {
        key.value(b)
            .partial_cmp(&key.value(a))
            .unwrap_or(Ordering::Equal)
    });
    ranked.into_iter().take(n).cloned().collect()
}
