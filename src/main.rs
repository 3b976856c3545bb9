mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use app::LaunchDashApp;
use eframe::egui;
use state::AppState;

/// Dataset read when no path is given on the command line.
const DEFAULT_DATA_PATH: &str = "spacex_launch_dash.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    // The dashboard is unusable without its table: fail before opening a window.
    let dataset = match data::loader::load_file(&path) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            eprintln!("error: failed to load {}: {e:#}", path.display());
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} launches from {} (payload {}..={} kg)",
        dataset.len(),
        path.display(),
        dataset.min_payload(),
        dataset.max_payload()
    );

    let state = AppState::new(Arc::new(dataset), path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Dash – SpaceX Launch Records",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
}
