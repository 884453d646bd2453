//! EEG-Simulation: brainwave signal synthesis and the simulation clock
//!
//! Provides the waveform generator, the session state with its command
//! reducer, the per-frame clock and a tokio frame driver.

pub mod synthesizer;
pub mod simulation_state;
pub mod frame_clock;
pub mod eeg_simulator;
pub mod frame_driver;

pub use synthesizer::*;
pub use simulation_state::*;
pub use frame_clock::*;
pub use eeg_simulator::*;
pub use frame_driver::*;
