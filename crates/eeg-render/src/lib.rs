//! EEG-Render: frame renderers for the brainwave simulator
//!
//! Draws the multi-channel trace plot and the band spectrum onto any
//! `DrawingSurface` the host provides.

pub mod channel_renderer;
pub mod spectrum_renderer;
pub mod recording;

pub use channel_renderer::{ChannelPlotStyle, ChannelRenderer};
pub use spectrum_renderer::{SpectrumBar, SpectrumRenderer, SpectrumStyle};
pub use recording::{DrawOp, RecordingSurface};
