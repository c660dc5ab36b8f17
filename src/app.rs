use eframe::egui::{self, ScrollArea, Ui};

use scival_dashboard::state::DashboardState;

use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: DashboardState,
}

impl DashboardApp {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    dashboard_body(ui, &self.state);
                });
        });
    }
}

fn dashboard_body(ui: &mut Ui, state: &DashboardState) {
    let views = state.views();
    let n = state.top_n();

    ui.heading("UiTM SciVal Dashboard");
    ui.label(
        "This interactive dashboard visualizes key research impact metrics from the \
         UiTM SciVal dataset, allowing exploration of scholarly output, citation impact, \
         prominence, and publication growth across topic clusters.",
    );
    ui.add_space(8.0);

    ui.heading("Filtered Dataset");
    table::filtered_table(ui, views);
    ui.add_space(12.0);

    ui.heading(format!("Top {n} Topic Clusters by Scholarly Output"));
    charts::output_bar_chart(ui, views);
    ui.add_space(12.0);

    ui.heading("FWCI vs Prominence Percentile");
    charts::fwci_prominence_scatter(ui, views);
    ui.add_space(12.0);

    ui.heading(format!("Top {n} Topic Clusters by Publication Share Growth (%)"));
    charts::growth_bar_chart(ui, views);

    ui.separator();
    ui.label(egui::RichText::new("Dashboard generated using egui and egui_plot.").italics());
}
