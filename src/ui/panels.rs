use eframe::egui::{self, emath::Numeric, Color32, RichText, ScrollArea, Slider, Ui};

use scival_dashboard::data::export::{export_csv, export_json};
use scival_dashboard::data::loader::Loader;
use scival_dashboard::data::model::{FWCI, SCHOLARLY_OUTPUT};
use scival_dashboard::state::{DashboardState, FilterEvent};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Control changes are collected as events
/// and applied after the widgets are drawn.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading("Filters");
    ui.separator();

    let bounds = state.bounds().clone();
    let params = state.params().clone();
    let mut events = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Scholarly Output range ----
            ui.strong(SCHOLARLY_OUTPUT);
            if let Some((lo, hi)) = range_sliders(ui, params.output_range, bounds.output_range) {
                events.push(FilterEvent::OutputRangeChanged(lo, hi));
            }
            ui.add_space(6.0);

            // ---- FWCI range ----
            ui.strong(format!("{FWCI} (FWCI)"));
            if let Some((lo, hi)) = range_sliders(ui, params.fwci_range, bounds.fwci_range) {
                events.push(FilterEvent::FwciRangeChanged(lo, hi));
            }
            ui.add_space(6.0);
            ui.separator();

            // ---- Topic Cluster multi-select ----
            let selected = &params.selected_clusters;
            let header_text = if selected.is_empty() {
                "Topic Clusters  (all)".to_string()
            } else {
                format!("Topic Clusters  ({} selected)", selected.len())
            };

            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("topic_clusters")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    if ui
                        .add_enabled(!selected.is_empty(), egui::Button::new("Clear").small())
                        .clicked()
                    {
                        events.push(FilterEvent::ClustersCleared);
                    }

                    ScrollArea::vertical()
                        .id_salt("cluster_list")
                        .max_height(320.0)
                        .show(ui, |ui: &mut Ui| {
                            for label in state.cluster_options() {
                                let mut checked = selected.contains(label);
                                if ui.checkbox(&mut checked, label.as_str()).changed() {
                                    events.push(FilterEvent::ClusterToggled(label.clone()));
                                }
                            }
                        });
                });

            ui.separator();
            if ui.button("Reset filters").clicked() {
                events.push(FilterEvent::Reset);
            }
        });

    // Each event recomputes every view from the updated parameters.
    for event in events {
        log::debug!("filter event: {event:?}");
        state.apply(event);
    }
}

/// A min and a max slider over `limits`. Returns the new ordered range when
/// either moved; the handle being dragged pushes the other one along.
fn range_sliders<T: Numeric>(ui: &mut Ui, current: (T, T), limits: (T, T)) -> Option<(T, T)> {
    let (min, max) = limits;
    let (mut lo, mut hi) = current;
    let lo_changed = ui.add(Slider::new(&mut lo, min..=max).text("min")).changed();
    let hi_changed = ui.add(Slider::new(&mut hi, min..=max).text("max")).changed();
    (lo_changed || hi_changed).then(|| resolve_crossing(lo, hi, lo_changed))
}

/// Resolve crossed handles in favour of the one that moved.
fn resolve_crossing<T: Numeric>(lo: T, hi: T, lo_moved: bool) -> (T, T) {
    match (lo > hi, lo_moved) {
        (true, true) => (lo, lo),
        (true, false) => (hi, hi),
        (false, _) => (lo, hi),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                reload(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export filtered as CSV…").clicked() {
                export_dialog(state, ExportFormat::Csv);
                ui.close_menu();
            }
            if ui.button("Export filtered as JSON…").clicked() {
                export_dialog(state, ExportFormat::Json);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} topic clusters loaded, {} match",
            state.table().len(),
            state.views().filtered.len()
        ));

        if let Some(warning) = state.warning() {
            ui.separator();
            ui.label(RichText::new(warning.to_string()).color(Color32::YELLOW));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open SciVal topic cluster export")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match Loader::open(&path) {
            Ok(loader) => state.replace_loader(loader),
            Err(e) => {
                // Keep the current table; the dashboard stays usable.
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

fn reload(state: &mut DashboardState) {
    if let Err(e) = state.reload() {
        log::error!("Failed to reload {}: {e}", state.loader().path().display());
        state.status_message = Some(format!("Error: {e}"));
    }
}

#[derive(Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}

fn export_dialog(state: &mut DashboardState, format: ExportFormat) {
    let (name, ext) = match format {
        ExportFormat::Csv => ("CSV", "csv"),
        ExportFormat::Json => ("JSON", "json"),
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export filtered dataset")
        .set_file_name(format!("filtered_topic_clusters.{ext}"))
        .add_filter(name, &[ext])
        .save_file()
    else {
        log::warn!("Export cancelled");
        return;
    };

    let records = state.views().filtered.records();
    let result = match format {
        ExportFormat::Csv => export_csv(records, &path),
        ExportFormat::Json => export_json(records, &path),
    };
    state.status_message = match result {
        Ok(()) => None,
        Err(e) => {
            log::error!("{e}");
            Some(format!("Error: {e}"))
        }
    };
}
