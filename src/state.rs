use std::sync::Arc;

use crate::data::error::{DataLoadError, EmptyResultWarning};
use crate::data::filter::FilterParameters;
use crate::data::loader::Loader;
use crate::data::model::Table;
use crate::data::views::DashboardViews;

// ---------------------------------------------------------------------------
// Filter events
// ---------------------------------------------------------------------------

/// A change to one of the sidebar controls.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    OutputRangeChanged(u64, u64),
    FwciRangeChanged(f64, f64),
    /// Add the label to the selection, or remove it if already selected.
    ClusterToggled(String),
    ClustersCleared,
    /// Back to the full range with no cluster restriction.
    Reset,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct DashboardState {
    /// Source of the table; replaced wholesale by File → Open.
    loader: Loader,

    /// Shared, read-only base table.
    table: Arc<Table>,

    /// Full-range parameters of the current table (slider limits).
    bounds: FilterParameters,

    /// Unique topic cluster labels, first-appearance order.
    cluster_options: Vec<String>,

    /// Current control values.
    params: FilterParameters,

    /// Views derived from `params` (cached).
    views: DashboardViews,

    /// Bars per top-N chart.
    top_n: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl DashboardState {
    pub fn new(loader: Loader, top_n: usize) -> Self {
        let table = loader.table();
        let bounds = FilterParameters::full_range(&table);
        let views = DashboardViews::compute(&table, &bounds, top_n);
        DashboardState {
            cluster_options: table.cluster_options(),
            params: bounds.clone(),
            bounds,
            views,
            table,
            loader,
            top_n,
            status_message: None,
        }
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn bounds(&self) -> &FilterParameters {
        &self.bounds
    }

    pub fn cluster_options(&self) -> &[String] {
        &self.cluster_options
    }

    pub fn params(&self) -> &FilterParameters {
        &self.params
    }

    pub fn views(&self) -> &DashboardViews {
        &self.views
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Apply one control change, then recompute every view from the new
    /// snapshot. Range values are clamped to the table's bounds.
    pub fn apply(&mut self, event: FilterEvent) {
        match event {
            FilterEvent::OutputRangeChanged(lo, hi) => {
                let (min, max) = self.bounds.output_range;
                self.params.set_output_range(lo.clamp(min, max), hi.clamp(min, max));
            }
            FilterEvent::FwciRangeChanged(lo, hi) => {
                let (min, max) = self.bounds.fwci_range;
                self.params.set_fwci_range(lo.clamp(min, max), hi.clamp(min, max));
            }
            FilterEvent::ClusterToggled(label) => {
                if !self.params.selected_clusters.remove(&label) {
                    self.params.selected_clusters.insert(label);
                }
            }
            FilterEvent::ClustersCleared => self.params.selected_clusters.clear(),
            FilterEvent::Reset => self.params = self.bounds.clone(),
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.views = DashboardViews::compute(&self.table, &self.params, self.top_n);
        if let Some(warning) = self.views.warning() {
            log::warn!("{warning}");
        }
    }

    pub fn warning(&self) -> Option<EmptyResultWarning> {
        self.views.warning()
    }

    /// Swap in a newly opened source. Parameters reset to its full range.
    pub fn replace_loader(&mut self, loader: Loader) {
        *self = DashboardState::new(loader, self.top_n);
    }

    /// Re-read the current source. On failure the current table stays and
    /// the error is returned for display.
    pub fn reload(&mut self) -> Result<(), DataLoadError> {
        let mut loader = self.loader.clone();
        loader.reload()?;
        self.replace_loader(loader);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::path::Path;

    fn write_csv(path: &Path, rows: &[&str]) {
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(
            file,
            "Topic Cluster,Scholarly Output,Field-Weighted Citation Impact,\
             Prominence percentile,Publication Share growth (%)"
        )
        .unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
    }

    fn state(dir: &tempfile::TempDir) -> DashboardState {
        let path = dir.path().join("clusters.csv");
        write_csv(
            &path,
            &[
                "Materials Science,40,1.1,90.0,3.0",
                "Physics,12,0.8,70.0,-2.0",
                "Chemistry,25,1.9,80.0,14.0",
                "Materials Science,7,2.2,60.0,0.5",
            ],
        );
        DashboardState::new(Loader::open(&path).unwrap(), 10)
    }

    #[test]
    fn starts_at_full_range() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        assert_eq!(state.params(), state.bounds());
        assert_eq!(state.params().output_range, (7, 40));
        assert_eq!(state.params().fwci_range, (0.8, 2.2));
        assert_eq!(state.views().filtered.len(), 4);
        assert_eq!(
            state.cluster_options(),
            ["Materials Science", "Physics", "Chemistry"]
        );
    }

    #[test]
    fn every_event_recomputes_all_views_from_new_params() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);

        state.apply(FilterEvent::OutputRangeChanged(10, 40));
        assert_eq!(state.views().params, *state.params());
        assert_eq!(state.views().filtered.len(), 3);
        assert_eq!(state.views().top_output.len(), 3);
        assert_eq!(state.views().top_growth.len(), 3);

        state.apply(FilterEvent::ClusterToggled("Physics".into()));
        assert_eq!(state.views().params, *state.params());
        assert_eq!(state.views().filtered.len(), 1);
        assert_eq!(state.views().top_output[0].topic_cluster, "Physics");
        assert_eq!(state.views().top_growth[0].topic_cluster, "Physics");
    }

    #[test]
    fn range_events_clamp_to_table_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);

        state.apply(FilterEvent::OutputRangeChanged(1000, 0));
        assert_eq!(state.params().output_range, (7, 40));
        state.apply(FilterEvent::FwciRangeChanged(-3.0, 9.5));
        assert_eq!(state.params().fwci_range, (0.8, 2.2));
        assert_eq!(state.views().filtered.len(), 4);

        // Entirely above the bounds collapses onto the maximum.
        state.apply(FilterEvent::OutputRangeChanged(50, 60));
        assert_eq!(state.params().output_range, (40, 40));
        assert_eq!(state.views().filtered.len(), 1);
    }

    #[test]
    fn toggling_twice_deselects() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        state.apply(FilterEvent::ClusterToggled("Chemistry".into()));
        assert_eq!(state.views().filtered.len(), 1);
        state.apply(FilterEvent::ClusterToggled("Chemistry".into()));
        assert!(state.params().selected_clusters.is_empty());
        assert_eq!(state.views().filtered.len(), 4);
    }

    #[test]
    fn reset_and_clear_restore_views() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        state.apply(FilterEvent::FwciRangeChanged(2.0, 1.0));
        state.apply(FilterEvent::ClusterToggled("Physics".into()));
        assert!(state.warning().is_some());

        state.apply(FilterEvent::ClustersCleared);
        assert_eq!(state.params().fwci_range, (1.0, 2.0));
        assert_eq!(state.views().filtered.len(), 2);

        state.apply(FilterEvent::Reset);
        assert_eq!(state.params(), state.bounds());
        assert_eq!(state.views().filtered.len(), 4);
        assert!(state.warning().is_none());
    }

    #[test]
    fn reload_picks_up_new_rows_and_resets_filters() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        state.apply(FilterEvent::ClusterToggled("Physics".into()));

        write_csv(
            &state.loader().path().to_path_buf(),
            &["Physics,3,0.5,10.0,1.0", "Biology,99,3.0,99.0,20.0"],
        );
        state.reload().unwrap();
        assert_eq!(state.table().len(), 2);
        assert_eq!(state.params().output_range, (3, 99));
        assert!(state.params().selected_clusters.is_empty());
    }

    #[test]
    fn failed_reload_keeps_current_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        std::fs::remove_file(state.loader().path()).unwrap();
        assert!(state.reload().is_err());
        assert_eq!(state.table().len(), 4);
    }
}
