//! EEG-Core: Foundation types for the brainwave simulator
//!
//! Band catalog, reference text, configuration, errors and the drawing surface capability
//! shared by the simulation, rendering and desktop crates.

pub mod wave_types;
pub mod band_info;
pub mod config;
pub mod surface;
pub mod error;

pub use wave_types::*;
pub use band_info::{channel_tooltip, electrode_description, BandInfo};
pub use config::{AmplitudeBounds, SimulatorConfig, FRAME_RATE_RANGE};
pub use surface::*;
pub use error::{EegError, EegResult};
