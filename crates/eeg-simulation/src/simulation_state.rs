//! Session parameters and the commands that mutate them

use core::fmt;
use eeg_core::{AmplitudeBounds, BandId, EegError, EegResult, SimulatorConfig, WaveCatalog};
use serde::{Deserialize, Serialize};

/// Mutable parameters of one simulation session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub selected_band: BandId,
    pub amplitude_scale: f32,
    pub speed_multiplier: f32,
    /// Simulated seconds, already scaled by the speed multiplier.
    /// Accumulated in f64 so long sessions keep waveform phase.
    pub elapsed_time: f64,
    pub playing: bool,
}

/// Play state machine. Only `TogglePlay` moves between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    Playing,
    Paused,
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayState::Playing => f.write_str("Playing"),
            PlayState::Paused => f.write_str("Paused"),
        }
    }
}

/// Commands accepted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    SelectBand(BandId),
    SetAmplitude(f32),
    SetSpeed(f32),
    TogglePlay,
    Reset,
}

impl SimulationState {
    /// Start-up state: slowest band, configured amplitude and speed, playing
    pub fn initial(config: &SimulatorConfig, catalog: &WaveCatalog) -> Self {
        SimulationState {
            selected_band: catalog.lowest_frequency().id,
            amplitude_scale: config.default_amplitude,
            speed_multiplier: config.default_speed,
            elapsed_time: 0.0,
            playing: true,
        }
    }

    pub fn play_state(&self) -> PlayState {
        if self.playing {
            PlayState::Playing
        } else {
            PlayState::Paused
        }
    }

    /// Select a band from the catalog. Elapsed time is kept, so the waveform
    /// phase carries over to the new band.
    pub fn select_band(&mut self, id: BandId, catalog: &WaveCatalog) -> EegResult<()> {
        catalog.get(id)?;
        self.selected_band = id;
        Ok(())
    }

    /// Assign the amplitude clamped to `bounds`
    pub fn set_amplitude(&mut self, value: f32, bounds: &AmplitudeBounds) -> EegResult<()> {
        if !value.is_finite() {
            return Err(EegError::OutOfRange {
                parameter: "amplitude",
                value,
                constraint: "a finite number",
            });
        }

        self.amplitude_scale = bounds.clamp(value);
        Ok(())
    }

    pub fn set_speed(&mut self, value: f32) -> EegResult<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(EegError::OutOfRange {
                parameter: "speed",
                value,
                constraint: "a finite value > 0",
            });
        }

        self.speed_multiplier = value;
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    /// Rewind elapsed time to zero, nothing else changes
    pub fn reset(&mut self) {
        self.elapsed_time = 0.0;
    }

    /// Apply a command in place
    pub fn apply(&mut self, command: Command, catalog: &WaveCatalog, bounds: &AmplitudeBounds) -> EegResult<()> {
        match command {
            Command::SelectBand(id) => self.select_band(id, catalog),
            Command::SetAmplitude(value) => self.set_amplitude(value, bounds),
            Command::SetSpeed(value) => self.set_speed(value),
            Command::TogglePlay => {
                self.toggle_play();
                Ok(())
            }
            Command::Reset => {
                self.reset();
                Ok(())
            }
        }
    }
}

/// Pure reducer over the command set
pub fn reduce(
    state: &SimulationState,
    command: Command,
    catalog: &WaveCatalog,
    bounds: &AmplitudeBounds,
) -> EegResult<SimulationState> {
    let mut next = *state;
    next.apply(command, catalog, bounds)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eeg_core::{Rgb, WaveBand};

    fn setup() -> (SimulationState, WaveCatalog, AmplitudeBounds) {
        let config = SimulatorConfig::default();
        let catalog = config.catalog().unwrap();
        let state = SimulationState::initial(&config, &catalog);
        (state, catalog, config.amplitude)
    }

    #[test]
    fn test_initial_state() {
        let (state, _, _) = setup();
        assert_eq!(state.selected_band, BandId::Delta);
        assert_eq!(state.amplitude_scale, 50.0);
        assert_eq!(state.speed_multiplier, 1.0);
        assert_eq!(state.elapsed_time, 0.0);
        assert!(state.playing);
        assert_eq!(state.play_state(), PlayState::Playing);
    }

    #[test]
    fn test_reset_only_touches_elapsed_time() {
        let (mut state, catalog, bounds) = setup();
        state.elapsed_time = 12.5;
        state.apply(Command::SelectBand(BandId::Beta), &catalog, &bounds).unwrap();
        state.apply(Command::SetAmplitude(70.0), &catalog, &bounds).unwrap();
        state.apply(Command::SetSpeed(2.0), &catalog, &bounds).unwrap();
        state.toggle_play();

        let before = state;
        state.reset();

        assert_eq!(state.elapsed_time, 0.0);
        assert_eq!(state.playing, before.playing);
        assert_eq!(state.selected_band, before.selected_band);
        assert_eq!(state.amplitude_scale, before.amplitude_scale);
        assert_eq!(state.speed_multiplier, before.speed_multiplier);
    }

    #[test]
    fn test_toggle_play_keeps_elapsed_time() {
        let (mut state, _, _) = setup();
        state.elapsed_time = 3.25;

        state.toggle_play();
        assert!(!state.playing);
        assert_eq!(state.play_state(), PlayState::Paused);
        assert_eq!(state.elapsed_time, 3.25);

        state.toggle_play();
        assert!(state.playing);
        assert_eq!(state.elapsed_time, 3.25);
    }

    #[test]
    fn test_select_band_keeps_phase() {
        let (mut state, catalog, _) = setup();
        state.elapsed_time = 0.05;

        state.select_band(BandId::Alpha, &catalog).unwrap();
        assert_eq!(state.selected_band, BandId::Alpha);
        assert_eq!(state.elapsed_time, 0.05);
    }

    #[test]
    fn test_select_band_missing_from_catalog() {
        let config = SimulatorConfig::default();
        let catalog = WaveCatalog::new(vec![
            WaveBand::new(BandId::Theta, 6.0, Rgb::new(0x21, 0x96, 0xF3), 8),
        ]).unwrap();
        let mut state = SimulationState::initial(&config, &catalog);
        let before = state;

        let result = state.apply(Command::SelectBand(BandId::Gamma), &catalog, &config.amplitude);
        assert!(matches!(result, Err(EegError::InvalidBand { .. })));
        assert_eq!(state, before);
    }

    #[test]
    fn test_amplitude_is_clamped() {
        let (mut state, _, bounds) = setup();

        state.set_amplitude(1000.0, &bounds).unwrap();
        assert_eq!(state.amplitude_scale, bounds.max);

        state.set_amplitude(0.0, &bounds).unwrap();
        assert_eq!(state.amplitude_scale, bounds.min);

        state.set_amplitude(33.0, &bounds).unwrap();
        assert_eq!(state.amplitude_scale, 33.0);

        assert!(state.set_amplitude(f32::NAN, &bounds).is_err());
        assert_eq!(state.amplitude_scale, 33.0);
    }

    #[test]
    fn test_speed_rejects_non_positive() {
        let (mut state, _, _) = setup();

        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = state.set_speed(bad);
            assert!(matches!(result, Err(EegError::OutOfRange { parameter: "speed", .. })));
            assert_eq!(state.speed_multiplier, 1.0);
        }

        state.set_speed(2.5).unwrap();
        assert_eq!(state.speed_multiplier, 2.5);
    }

    #[test]
    fn test_reducer_leaves_input_untouched() {
        let (state, catalog, bounds) = setup();

        let next = reduce(&state, Command::TogglePlay, &catalog, &bounds).unwrap();
        assert!(!next.playing);
        assert!(state.playing);

        assert!(reduce(&state, Command::SetSpeed(-2.0), &catalog, &bounds).is_err());
    }
}
