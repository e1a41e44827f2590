mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::SalaryDashboardApp;
use clap::Parser;
use eframe::egui;

use config::Config;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::parse();

    // Without data there is nothing to show: fail before opening a window.
    let dataset = data::loader::load_file(&config.data)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", config.data.display()))
        .with_context(|| format!("loading salary data from {}", config.data.display()))?;
    log::info!(
        "Loaded {} salary records from {}",
        dataset.len(),
        config.data.display()
    );
    if dataset.is_empty() {
        log::warn!("{} has a header but no records", config.data.display());
    }

    let state = AppState::new(dataset, config.analysis());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Data Salary Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
