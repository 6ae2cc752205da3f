//! Sensboard - Overwatch Pro Player Settings Dashboard
//!
//! Loads the pro player settings datasets and shows sensitivity, DPI and
//! mouse statistics as interactive charts.

mod charts;
mod config;
mod dashboard;
mod data;
mod export;
mod gui;
mod stats;

use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use gui::DashboardApp;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));
    tracing::info!(data_dir = %config.data_dir.display(), "starting dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Sensibilidade de Jogadores Profissionais de Overwatch"),
        ..Default::default()
    };

    eframe::run_native(
        "Sensboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
}
