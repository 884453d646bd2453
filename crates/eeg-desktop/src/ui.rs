//! UI components and state management

use std::ops::RangeInclusive;
use eeg_core::{BandId, BandInfo, WaveCatalog};
use eeg_simulation::PlayState;
use crate::app::EEGApp;
use crate::surface::to_color32;

/// UI state management
#[derive(Debug)]
pub struct UIState {
    // Panel visibility
    pub show_controls: bool,
    pub show_stats: bool,
    pub show_band_info: bool,
    pub show_spectrum: bool,
    pub show_comparison: bool,

    // Control values
    pub amplitude: f32,
    pub speed: f32,
    pub speed_range: RangeInclusive<f32>,

    // Drawing regions
    pub plot_size: [f32; 2],
    pub spectrum_size: [f32; 2],

    /// Most recent rejected command
    pub last_error: Option<String>,
}

impl UIState {
    pub fn new(amplitude: f32, speed: f32) -> Self {
        Self {
            show_controls: true,
            show_stats: true,
            show_band_info: true,
            show_spectrum: true,
            show_comparison: false,

            amplitude,
            speed,
            speed_range: 0.1..=3.0,

            plot_size: [800.0, 400.0],
            spectrum_size: [400.0, 300.0],

            last_error: None,
        }
    }
}

/// Control panel UI
pub struct ControlPanel;

impl ControlPanel {
    pub fn show(ui: &mut egui::Ui, app: &mut EEGApp) {
        ui.heading("Simulation Controls");
        ui.separator();

        // Band selection
        ui.group(|ui| {
            ui.label("Brainwave Band");

            let selected = app.state().selected_band;
            let bands: Vec<_> = app.catalog().iter().copied().collect();
            ui.horizontal_wrapped(|ui| {
                for band in bands {
                    let text = egui::RichText::new(format!("{} ({}Hz)", band.id, band.frequency_hz))
                        .color(to_color32(band.display_color));
                    if ui.selectable_label(band.id == selected, text).clicked() {
                        app.select_band(band.id);
                    }
                }
            });
        });

        ui.separator();

        // Playback controls
        ui.group(|ui| {
            ui.label("Playback");

            ui.horizontal(|ui| {
                let label = match app.state().play_state() {
                    PlayState::Playing => "⏸ Pause",
                    PlayState::Paused => "▶ Play",
                };
                if ui.button(label).clicked() {
                    app.toggle_play();
                }

                if ui.button("⏮ Reset").clicked() {
                    app.reset();
                }
            });
        });

        ui.separator();

        // Signal parameters
        ui.group(|ui| {
            ui.label("Signal Parameters");

            let bounds = app.amplitude_bounds();
            let mut amplitude = app.ui_state.amplitude;
            ui.horizontal(|ui| {
                ui.label("Amplitude:");
                if ui.add(egui::Slider::new(&mut amplitude, bounds.min..=bounds.max)).changed() {
                    app.set_amplitude(amplitude);
                }
            });

            let mut speed = app.ui_state.speed;
            let speed_range = app.ui_state.speed_range.clone();
            ui.horizontal(|ui| {
                ui.label("Speed:");
                if ui.add(egui::Slider::new(&mut speed, speed_range).suffix("x")).changed() {
                    app.set_speed(speed);
                }
            });
        });

        ui.separator();
        if ui.button("🔍 Compare Waves").clicked() {
            app.ui_state.show_comparison = true;
        }

        ui.separator();
        ui.collapsing("Help", |ui| {
            ui.label("Controls:");
            ui.label("• Pick a band to switch the simulated rhythm");
            ui.label("• Pause freezes time, edits still show immediately");
            ui.label("• Reset rewinds the time axis to zero");
            ui.label("• Amplitude scales every harmonic of the trace");
            ui.label("• Hover a channel label for its electrode position");
        });
    }
}

/// Status readouts
pub struct StatsPanel;

impl StatsPanel {
    pub fn show(ui: &mut egui::Ui, app: &EEGApp) {
        ui.heading("Session");
        ui.separator();

        let state = app.state();
        let band = app.active_band();
        ui.label(format!("Status: {}", state.play_state()));
        ui.colored_label(
            to_color32(band.display_color),
            format!("Band: {} ({}Hz)", band.id, band.frequency_hz),
        );
        ui.label(format!("Channels: {}", band.channel_count));
        ui.label(format!("Amplitude: {:.0}", state.amplitude_scale));
        ui.label(format!("Speed: {:.2}x", state.speed_multiplier));
        ui.label(format!("Elapsed: {:.2}s", state.elapsed_time));
        ui.label(format!("Frames: {}", app.frames()));

        if let Some(error) = &app.ui_state.last_error {
            ui.colored_label(egui::Color32::RED, error);
        }
    }
}

/// Reference card for the selected band
pub struct BandInfoPanel;

impl BandInfoPanel {
    pub fn show(ui: &mut egui::Ui, selected: BandId) {
        let info = BandInfo::of(selected);

        ui.heading(info.title);
        ui.label(format!("Frequency: {}", info.frequency_range));
        ui.label(format!("Amplitude: {}", info.amplitude_range));
        ui.label(format!("State: {}", info.state));

        ui.add_space(6.0);
        ui.strong("Characteristics:");
        ui.label(info.description);

        ui.add_space(6.0);
        ui.strong("Clinical Significance:");
        for item in info.significance {
            ui.label(format!("• {}", item));
        }
    }
}

/// Side-by-side table of every band
pub struct ComparisonWindow;

impl ComparisonWindow {
    pub fn show(ui: &mut egui::Ui, catalog: &WaveCatalog) {
        egui::Grid::new("band_comparison")
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                ui.strong("Wave Type");
                ui.strong("Frequency");
                ui.strong("Amplitude");
                ui.strong("Mental State");
                ui.end_row();

                for info in BandInfo::all() {
                    let name = egui::RichText::new(info.id.name()).strong();
                    match catalog.get(info.id) {
                        Ok(band) => ui.label(name.color(to_color32(band.display_color))),
                        Err(_) => ui.label(name),
                    };
                    ui.label(info.frequency_range);
                    ui.label(info.amplitude_range);
                    ui.label(info.summary_state);
                    ui.end_row();
                }
            });
    }
}
