mod app;
mod chart;
mod color;
mod config;
mod controller;
mod data;
mod error;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use app::LaunchDashApp;
use config::{DATA_CANDIDATES, DashboardConfig};
use data::{loader, store};
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    // A missing or malformed table is fatal: no window is opened.
    if let Err(e) = load_and_install() {
        log::error!("Failed to load launch data: {e:#}");
        return Err(e);
    }
    let dataset = store::dataset().context("launch dataset missing after install")?;

    let config = DashboardConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(dataset, config)))),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}

fn load_and_install() -> Result<()> {
    let cwd = std::env::current_dir().context("resolving working directory")?;
    let path = loader::locate_dataset(&cwd, &DATA_CANDIDATES)?;
    let dataset = loader::load_file(&path)?;
    store::install(dataset)
}
