use std::collections::HashSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names – exact-match keys of the SciVal export
// ---------------------------------------------------------------------------

pub const TOPIC_CLUSTER: &str = "Topic Cluster";
pub const SCHOLARLY_OUTPUT: &str = "Scholarly Output";
pub const FWCI: &str = "Field-Weighted Citation Impact";
pub const PROMINENCE_PERCENTILE: &str = "Prominence percentile";
pub const PUBLICATION_SHARE_GROWTH: &str = "Publication Share growth (%)";

/// Columns every source file must carry, in display order.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    TOPIC_CLUSTER,
    SCHOLARLY_OUTPUT,
    FWCI,
    PROMINENCE_PERCENTILE,
    PUBLICATION_SHARE_GROWTH,
];

// ---------------------------------------------------------------------------
// Record – one row of the export
// ---------------------------------------------------------------------------

/// One topic cluster. Serialises with the export's column headers so that a
/// written file can be read back by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Label, not necessarily unique.
    #[serde(rename = "Topic Cluster")]
    pub topic_cluster: String,
    #[serde(rename = "Scholarly Output")]
    pub scholarly_output: u64,
    #[serde(rename = "Field-Weighted Citation Impact")]
    pub fwci: f64,
    /// Conventionally 0–100.
    #[serde(rename = "Prominence percentile")]
    pub prominence_percentile: f64,
    /// Signed; shrinking clusters are negative.
    #[serde(rename = "Publication Share growth (%)")]
    pub publication_share_growth_pct: f64,
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Ordered, read-only collection of records.
///
/// Row position is the only identity. A filtered view is itself a `Table`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest Scholarly Output, `None` for an empty table.
    pub fn output_bounds(&self) -> Option<(u64, u64)> {
        let min = self.records.iter().map(|r| r.scholarly_output).min()?;
        let max = self.records.iter().map(|r| r.scholarly_output).max()?;
        Some((min, max))
    }

    /// Smallest and largest FWCI, `None` for an empty table.
    pub fn fwci_bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.records.iter().map(|r| r.fwci);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Unique topic cluster labels in order of first appearance.
    pub fn cluster_options(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.topic_cluster.as_str()))
            .map(|r| r.topic_cluster.clone())
            .collect()
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Table::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
