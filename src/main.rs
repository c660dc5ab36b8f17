mod app;
mod ui;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use app::DashboardApp;
use scival_dashboard::config::DashboardConfig;
use scival_dashboard::data::loader::Loader;
use scival_dashboard::state::DashboardState;

const WINDOW_TITLE: &str = "UiTM SciVal Dashboard";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::parse();

    // No dashboard without the base table: a load failure ends startup here.
    let loader = Loader::open(&config.data)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", config.data.display()))
        .with_context(|| format!("loading {}", config.data.display()))?;
    let state = DashboardState::new(loader, config.top_n);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
