//! EEG Desktop Application - brainwave simulator with live rendering

mod app;
mod surface;
mod ui;

use anyhow::Context;
use app::EEGApp;
use eeg_core::SimulatorConfig;
use tracing::info;

/// Configuration from the JSON file given as first argument, defaults otherwise
fn load_config(path: Option<String>) -> anyhow::Result<SimulatorConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path))?;
            let config = SimulatorConfig::from_json(&json)
                .with_context(|| format!("Invalid config file {}", path))?;
            info!(%path, "configuration loaded");
            Ok(config)
        }
        None => Ok(SimulatorConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = load_config(std::env::args().nth(1))?;
    info!(bands = config.bands.len(), frame_rate = config.frame_rate, "starting EEG simulator");

    let app = EEGApp::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EEG Brainwave Simulator",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    ).map_err(|e| anyhow::anyhow!("Failed to run native app: {}", e))?;

    Ok(())
}
