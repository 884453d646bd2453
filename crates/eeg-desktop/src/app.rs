//! Main application state and frame loop

use std::time::Duration;
use eeg_core::{channel_tooltip, AmplitudeBounds, BandId, Point, SimulatorConfig, WaveBand, WaveCatalog};
use eeg_render::{ChannelRenderer, SpectrumRenderer};
use eeg_simulation::{frame_period, Command, EEGSimulator, SimulationState, UniformNoise};

use crate::surface::EguiSurface;
use crate::ui::{BandInfoPanel, ComparisonWindow, ControlPanel, StatsPanel, UIState};

/// Main application state
pub struct EEGApp {
    simulator: EEGSimulator,
    // Commands issued by the panels, applied at the start of the next frame
    pending: Vec<Command>,
    frame_period: Duration,

    noise: UniformNoise,
    channel_renderer: ChannelRenderer,
    spectrum_renderer: SpectrumRenderer,

    pub ui_state: UIState,
}

impl EEGApp {
    pub fn new(config: SimulatorConfig) -> anyhow::Result<Self> {
        let frame_period = frame_period(config.frame_rate)?;
        let noise = UniformNoise::new(config.noise_seed);
        let ui_state = UIState::new(config.default_amplitude, config.default_speed);
        let simulator = EEGSimulator::new(config)?;

        Ok(EEGApp {
            simulator,
            pending: Vec::new(),
            frame_period,
            noise,
            channel_renderer: ChannelRenderer::default(),
            spectrum_renderer: SpectrumRenderer::default(),
            ui_state,
        })
    }

    fn queue(&mut self, command: Command) {
        self.pending.push(command);
    }

    pub fn select_band(&mut self, id: BandId) {
        self.queue(Command::SelectBand(id));
    }

    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.ui_state.amplitude = self.amplitude_bounds().clamp(amplitude);
        self.queue(Command::SetAmplitude(amplitude));
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.ui_state.speed = speed;
        self.queue(Command::SetSpeed(speed));
    }

    pub fn toggle_play(&mut self) {
        self.queue(Command::TogglePlay);
    }

    pub fn reset(&mut self) {
        self.queue(Command::Reset);
    }

    /// Apply queued commands in order, then advance the clock once.
    /// Called exactly once per rendered frame, before drawing.
    fn advance_frame(&mut self) -> f64 {
        for command in std::mem::take(&mut self.pending) {
            // Rejections are logged by the simulator
            if let Err(e) = self.simulator.apply(command) {
                self.ui_state.last_error = Some(e.to_string());
            }
        }

        self.simulator.tick()
    }

    pub fn state(&self) -> SimulationState {
        self.simulator.state()
    }

    pub fn active_band(&self) -> &WaveBand {
        self.simulator.active_band()
    }

    pub fn catalog(&self) -> &WaveCatalog {
        self.simulator.catalog()
    }

    pub fn amplitude_bounds(&self) -> AmplitudeBounds {
        self.simulator.config().amplitude
    }

    pub fn frames(&self) -> u64 {
        self.simulator.frames()
    }

    fn show_channel_plot(&mut self, ui: &mut egui::Ui) {
        let [width, height] = self.ui_state.plot_size;
        let (response, painter) = ui.allocate_painter(egui::vec2(width, height), egui::Sense::hover());
        let rect = response.rect;

        let state = self.simulator.state();
        let band = *self.simulator.active_band();
        let mut surface = EguiSurface::new(&painter, rect, egui::Color32::WHITE);
        self.channel_renderer.render(&mut surface, &state, &band, &mut self.noise);

        if let Some(pointer) = response.hover_pos() {
            let local = pointer - rect.min;
            let lane = self.channel_renderer.label_at(
                Point::new(local.x, local.y),
                band.channel_count,
                rect.height(),
            );
            if let Some(channel) = lane {
                response.on_hover_text_at_pointer(channel_tooltip(channel));
            }
        }
    }

    fn show_spectrum(&self, ui: &mut egui::Ui) {
        let [width, height] = self.ui_state.spectrum_size;
        let (response, painter) = ui.allocate_painter(egui::vec2(width, height), egui::Sense::hover());

        let mut surface = EguiSurface::new(&painter, response.rect, egui::Color32::WHITE);
        self.spectrum_renderer.render(&mut surface, &self.simulator.state(), self.simulator.catalog());
    }
}

impl eframe::App for EEGApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.ui_state.show_controls, "Show Controls");
                    ui.checkbox(&mut self.ui_state.show_stats, "Show Session");
                    ui.checkbox(&mut self.ui_state.show_band_info, "Show Band Info");
                    ui.checkbox(&mut self.ui_state.show_spectrum, "Show Spectrum");
                    ui.checkbox(&mut self.ui_state.show_comparison, "Compare Waves");
                });

                ui.separator();

                let playing = self.simulator.state().playing;
                let status_color = if playing {
                    egui::Color32::GREEN
                } else {
                    egui::Color32::RED
                };
                ui.colored_label(status_color, if playing { "● PLAYING" } else { "● PAUSED" });
            });
        });

        if self.ui_state.show_controls {
            egui::SidePanel::left("control_panel")
                .resizable(true)
                .default_width(280.0)
                .show(ctx, |ui| {
                    ControlPanel::show(ui, self);
                });
        }

        if self.ui_state.show_stats || self.ui_state.show_band_info {
            egui::SidePanel::right("stats_panel")
                .resizable(true)
                .default_width(280.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        if self.ui_state.show_stats {
                            StatsPanel::show(ui, self);
                            ui.separator();
                        }
                        if self.ui_state.show_band_info {
                            BandInfoPanel::show(ui, self.state().selected_band);
                        }
                    });
                });
        }

        let mut show_comparison = self.ui_state.show_comparison;
        egui::Window::new("Brainwave Comparison")
            .open(&mut show_comparison)
            .resizable(false)
            .show(ctx, |ui| {
                ComparisonWindow::show(ui, self.catalog());
            });
        self.ui_state.show_comparison = show_comparison;

        // One tick and one render pass per frame, after this frame's commands
        self.advance_frame();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("EEG Channels");
            self.show_channel_plot(ui);

            if self.ui_state.show_spectrum {
                ui.separator();
                ui.heading("Frequency Spectrum");
                self.show_spectrum(ui);
            }
        });

        // Frame cadence comes from the configured rate, capped by the display
        ctx.request_repaint_after(self.frame_period);
    }
}
