//! EEG simulation session: catalog, state and clock behind one command API

use eeg_core::{BandId, EegResult, SimulatorConfig, WaveBand, WaveCatalog};
use tracing::{debug, warn};
use crate::frame_clock::FrameClock;
use crate::simulation_state::{Command, SimulationState};

/// One simulation session
pub struct EEGSimulator {
    config: SimulatorConfig,
    catalog: WaveCatalog,
    state: SimulationState,
    clock: FrameClock,
}

impl EEGSimulator {
    /// Create a session from a validated configuration
    pub fn new(config: SimulatorConfig) -> EegResult<Self> {
        config.validate()?;

        let catalog = config.catalog()?;
        let state = SimulationState::initial(&config, &catalog);
        let clock = FrameClock::new(config.fixed_time_step)?;

        Ok(EEGSimulator {
            config,
            catalog,
            state,
            clock,
        })
    }

    /// Apply one command. On error the state is unchanged.
    pub fn apply(&mut self, command: Command) -> EegResult<()> {
        match self.state.apply(command, &self.catalog, &self.config.amplitude) {
            Ok(()) => {
                debug!(?command, state = ?self.state, "command applied");
                Ok(())
            }
            Err(e) => {
                warn!(?command, error = %e, "command rejected");
                Err(e)
            }
        }
    }

    pub fn select_band(&mut self, id: BandId) -> EegResult<()> {
        self.apply(Command::SelectBand(id))
    }

    pub fn set_amplitude(&mut self, value: f32) -> EegResult<()> {
        self.apply(Command::SetAmplitude(value))
    }

    pub fn set_speed(&mut self, value: f32) -> EegResult<()> {
        self.apply(Command::SetSpeed(value))
    }

    pub fn toggle_play(&mut self) {
        self.state.toggle_play();
        debug!(play_state = %self.state.play_state(), "play toggled");
    }

    pub fn reset(&mut self) {
        self.state.reset();
        debug!("elapsed time reset");
    }

    /// Advance the clock by the configured step
    pub fn tick(&mut self) -> f64 {
        self.clock.tick(&mut self.state)
    }

    /// Advance the clock by an explicit step
    pub fn tick_with(&mut self, step: f64) -> EegResult<f64> {
        self.clock.tick_with(&mut self.state, step)
    }

    /// Current state snapshot
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Band currently selected
    pub fn active_band(&self) -> &WaveBand {
        // The state only ever holds ids validated against this catalog.
        self.catalog
            .get(self.state.selected_band)
            .unwrap_or_else(|_| self.catalog.lowest_frequency())
    }

    pub fn catalog(&self) -> &WaveCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesizer::deterministic_sample;
    use eeg_core::{EegError, Rgb};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_end_to_end_scenario() {
        let mut simulator = EEGSimulator::new(SimulatorConfig::default()).unwrap();

        let state = simulator.state();
        assert_eq!(state.selected_band, BandId::Delta);
        assert_eq!(state.amplitude_scale, 50.0);
        assert_eq!(state.speed_multiplier, 1.0);
        assert_eq!(state.elapsed_time, 0.0);
        assert!(state.playing);

        simulator.tick_with(0.05).unwrap();
        assert!((simulator.state().elapsed_time - 0.05).abs() < EPSILON);

        simulator.select_band(BandId::Alpha).unwrap();
        assert_eq!(simulator.state().selected_band, BandId::Alpha);
        assert!((simulator.state().elapsed_time - 0.05).abs() < EPSILON);
        assert_eq!(simulator.active_band().frequency_hz, 10.0);

        simulator.reset();
        let state = simulator.state();
        assert_eq!(state.elapsed_time, 0.0);
        assert_eq!(state.selected_band, BandId::Alpha);
        assert!(state.playing);
    }

    #[test]
    fn test_long_session_keeps_exact_time() {
        // 45 minutes of frames at 60 Hz
        let mut simulator = EEGSimulator::new(SimulatorConfig::default()).unwrap();
        let mut reference = 0.0f64;
        for _ in 0..162_000 {
            simulator.tick();
            reference += 0.05;
        }

        let elapsed = simulator.state().elapsed_time;
        assert!((elapsed - reference).abs() < EPSILON);
        assert!((elapsed - 8100.0).abs() < 1e-6, "elapsed drifted to {}", elapsed);

        // Fastest band keeps its phase after the long run
        let gamma = simulator.catalog().get(BandId::Gamma).unwrap().frequency_hz;
        let traced = deterministic_sample(elapsed, 0, gamma, 50.0);
        let exact = deterministic_sample(8100.0, 0, gamma, 50.0);
        assert!((traced - exact).abs() < 0.01, "{} vs {}", traced, exact);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulatorConfig::default();
        config.fixed_time_step = 0.0;
        assert!(EEGSimulator::new(config).is_err());
    }

    #[test]
    fn test_unknown_band_leaves_state() {
        let mut config = SimulatorConfig::default();
        config.bands = vec![
            WaveBand::new(BandId::Alpha, 10.0, Rgb::new(0xFF, 0x98, 0x00), 8),
            WaveBand::new(BandId::Beta, 20.0, Rgb::new(0x9C, 0x27, 0xB0), 8),
        ];
        let mut simulator = EEGSimulator::new(config).unwrap();
        assert_eq!(simulator.state().selected_band, BandId::Alpha);

        let result = simulator.select_band(BandId::Delta);
        assert!(matches!(result, Err(EegError::InvalidBand { .. })));
        assert_eq!(simulator.state().selected_band, BandId::Alpha);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut simulator = EEGSimulator::new(SimulatorConfig::default()).unwrap();
        simulator.set_speed(3.0).unwrap();
        simulator.tick();
        simulator.toggle_play();

        let frozen = simulator.state().elapsed_time;
        for _ in 0..10 {
            simulator.tick();
        }
        assert_eq!(simulator.state().elapsed_time, frozen);
        assert_eq!(simulator.frames(), 11);

        // Parameter edits still land while paused
        simulator.set_amplitude(75.0).unwrap();
        assert_eq!(simulator.state().amplitude_scale, 75.0);
    }
}
