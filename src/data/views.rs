use super::error::EmptyResultWarning;
use super::filter::{filter, top_n, FilterParameters, SortKey};
use super::model::{Record, Table};

/// Number of bars in each top-N chart unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

/// Everything the rendering layer draws, computed from one parameter snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViews {
    /// The snapshot these views were derived from.
    pub params: FilterParameters,
    /// Size of the unfiltered table.
    pub table_len: usize,
    /// Filtered dataset, also the scatter plot's input.
    pub filtered: Table,
    /// Chart 1: top N by Scholarly Output.
    pub top_output: Vec<Record>,
    /// Chart 3: top N by Publication Share growth.
    pub top_growth: Vec<Record>,
}

impl DashboardViews {
    /// Run the pipeline: filter once, then rank the filtered table twice.
    pub fn compute(table: &Table, params: &FilterParameters, n: usize) -> Self {
        let filtered = filter(table, params);
        let top_output = top_n(&filtered, n, SortKey::ScholarlyOutput);
        let top_growth = top_n(&filtered, n, SortKey::PublicationShareGrowth);
        log::debug!(
            "recomputed views: {} of {} records pass filters",
            filtered.len(),
            table.len()
        );
        DashboardViews {
            params: params.clone(),
            table_len: table.len(),
            filtered,
            top_output,
            top_growth,
        }
    }

    /// Chart 2 input: the filtered table, not cut down to N.
    pub fn scatter(&self) -> &Table {
        &self.filtered
    }

    pub fn warning(&self) -> Option<EmptyResultWarning> {
        self.filtered.is_empty().then_some(EmptyResultWarning {
            table_len: self.table_len,
        })
    }
}
