//! End-to-end checks of the filter-and-aggregate pipeline: load an export
//! from disk, filter it, and rank it the way the dashboard charts do.

use std::io::Write;
use std::path::PathBuf;

use scival_dashboard::data::error::DataLoadError;
use scival_dashboard::data::filter::{filter, top_n, FilterParameters, SortKey};
use scival_dashboard::data::loader::Loader;
use scival_dashboard::data::views::{DashboardViews, DEFAULT_TOP_N};
use scival_dashboard::state::{DashboardState, FilterEvent};

const HEADER: &str = "Topic Cluster,Scholarly Output,Field-Weighted Citation Impact,\
                      Prominence percentile,Publication Share growth (%)";

/// Twelve clusters; outputs `[5,5,8,3,12,7,9,6,10,11,6,6]`, three labelled
/// "Materials Science".
const TWELVE: [&str; 12] = [
    "Materials Science,5,0.91,72.4,3.5",
    "Computer Science,5,1.42,95.1,18.0",
    "Medicine,8,0.77,64.0,-4.2",
    "Materials Science,3,1.05,81.3,0.0",
    "Engineering,12,1.88,97.9,22.7",
    "Chemistry,7,0.64,58.8,-12.5",
    "Materials Science,9,1.21,88.0,6.1",
    "Energy,6,2.35,99.2,41.0",
    "Mathematics,10,0.52,47.6,-1.0",
    "Physics and Astronomy,11,1.10,90.4,2.2",
    "Social Sciences,6,0.83,55.5,9.9",
    "Environmental Science,6,1.33,86.1,15.3",
];

fn write_export(dir: &tempfile::TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("All_Topic_Clusters_Cleaned.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    path
}

fn open_twelve(dir: &tempfile::TempDir) -> Loader {
    Loader::open(write_export(dir, &TWELVE)).unwrap()
}

#[test]
fn boundary_ranges_are_inclusive() {
    let dir = tempfile::tempdir().unwrap();
    let table = open_twelve(&dir).table();

    let mut params = FilterParameters::full_range(&table);
    params.set_output_range(3, 12);
    assert_eq!(filter(&table, &params).len(), 12);

    // Both 5s and the 3 fall below the new minimum.
    params.set_output_range(6, 12);
    let narrowed = filter(&table, &params);
    assert_eq!(narrowed.len(), 9);
    assert!(narrowed.iter().all(|r| r.scholarly_output >= 6));
}

#[test]
fn full_range_returns_table_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let table = open_twelve(&dir).table();
    let params = FilterParameters::full_range(&table);
    assert_eq!(params.fwci_range, (0.52, 2.35));
    assert_eq!(filter(&table, &params), *table);
}

#[test]
fn single_cluster_selection() {
    let dir = tempfile::tempdir().unwrap();
    let table = open_twelve(&dir).table();
    let mut params = FilterParameters::full_range(&table);
    params.selected_clusters.insert("Materials Science".to_string());

    let filtered = filter(&table, &params);
    assert_eq!(filtered.len(), 3);
    assert!(filtered.iter().all(|r| r.topic_cluster == "Materials Science"));
    let outputs: Vec<u64> = filtered.iter().map(|r| r.scholarly_output).collect();
    assert_eq!(outputs, vec![5, 3, 9]);
}

#[test]
fn top_ten_of_four_returns_all_four_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let table = open_twelve(&dir).table();
    let mut params = FilterParameters::full_range(&table);
    params.set_fwci_range(1.2, 2.0);
    let filtered = filter(&table, &params);
    assert_eq!(filtered.len(), 4);

    let top = top_n(&filtered, 10, SortKey::ScholarlyOutput);
    let outputs: Vec<u64> = top.iter().map(|r| r.scholarly_output).collect();
    assert_eq!(outputs, vec![12, 9, 6, 5]);
}

#[test]
fn growth_chart_ranks_signed_growth() {
    let dir = tempfile::tempdir().unwrap();
    let table = open_twelve(&dir).table();
    let views = DashboardViews::compute(&table, &FilterParameters::full_range(&table), 3);
    let labels: Vec<&str> = views
        .top_growth
        .iter()
        .map(|r| r.topic_cluster.as_str())
        .collect();
    assert_eq!(labels, vec!["Energy", "Engineering", "Computer Science"]);
}

#[test]
fn output_ties_keep_source_order() {
    let dir = tempfile::tempdir().unwrap();
    let table = open_twelve(&dir).table();
    let top = top_n(&table, DEFAULT_TOP_N, SortKey::ScholarlyOutput);
    let tail: Vec<&str> = top[6..].iter().map(|r| r.topic_cluster.as_str()).collect();
    // Three clusters at 6 in file order, then the first of the two 5s.
    assert_eq!(
        tail,
        vec![
            "Energy",
            "Social Sciences",
            "Environmental Science",
            "Materials Science"
        ]
    );
}

#[test]
fn dashboard_events_keep_views_consistent() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = DashboardState::new(open_twelve(&dir), DEFAULT_TOP_N);

    state.apply(FilterEvent::OutputRangeChanged(6, 12));
    state.apply(FilterEvent::ClusterToggled("Materials Science".into()));
    let views = state.views();
    assert_eq!(&views.params, state.params());
    assert_eq!(views.filtered.len(), 1);
    assert_eq!(views.top_output, views.filtered.records());
    assert_eq!(views.top_growth, views.filtered.records());

    state.apply(FilterEvent::OutputRangeChanged(10, 12));
    assert!(state.warning().is_some());
    assert!(state.views().top_output.is_empty());
}

#[test]
fn missing_export_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let err = Loader::open(dir.path().join("All_Topic_Clusters_Cleaned.csv")).unwrap_err();
    assert!(matches!(err, DataLoadError::NotFound(_)));
    assert!(err.to_string().contains("All_Topic_Clusters_Cleaned.csv"));
}
