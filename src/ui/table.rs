use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use scival_dashboard::data::model::REQUIRED_COLUMNS;
use scival_dashboard::data::views::DashboardViews;

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 320.0;

/// Render the filtered dataset. Only visible rows are laid out.
pub fn filtered_table(ui: &mut Ui, views: &DashboardViews) {
    if let Some(warning) = views.warning() {
        ui.label(RichText::new(warning.to_string()).italics());
        return;
    }

    let records = views.filtered.records();
    ui.push_id("filtered_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(40.0)) // row index
            .column(Column::initial(320.0).at_least(120.0).clip(true)) // Topic Cluster
            .columns(Column::auto().at_least(90.0), REQUIRED_COLUMNS.len() - 1)
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for name in REQUIRED_COLUMNS {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let idx = row.index();
                    let record = &records[idx];
                    row.col(|ui| {
                        ui.label((idx + 1).to_string());
                    });
                    row.col(|ui| {
                        ui.label(record.topic_cluster.as_str());
                    });
                    row.col(|ui| {
                        ui.label(record.scholarly_output.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", record.fwci));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}", record.prominence_percentile));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:+.2}", record.publication_share_growth_pct));
                    });
                });
            });
    });
}
