//! Multi-channel trace plot

use eeg_core::{channel_label, DrawingSurface, Point, Region, Rgb, TextAnchor, WaveBand};
use eeg_simulation::{sample, NoiseSource, SimulationState};
use serde::{Deserialize, Serialize};

/// Geometry and colours of the trace plot, in surface pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPlotStyle {
    /// Left edge of the traced area (room for labels)
    pub plot_left: f32,
    /// Gap between the traced area and the right edge
    pub right_margin: f32,
    pub grid_pitch_x: f32,
    pub grid_pitch_y: f32,
    /// Horizontal distance between trace samples
    pub sample_step: f32,
    /// Simulated seconds per horizontal pixel
    pub time_scale: f64,
    pub grid_color: Rgb,
    pub grid_width: f32,
    pub baseline_color: Rgb,
    pub baseline_width: f32,
    pub trace_width: f32,
    pub label_color: Rgb,
    pub label_size: f32,
    pub label_x: f32,
    /// Label baseline height above the channel baseline
    pub label_offset: f32,
    pub readout_color: Rgb,
    pub readout_size: f32,
    /// Readout distance from the right edge
    pub readout_inset: f32,
}

impl Default for ChannelPlotStyle {
    fn default() -> Self {
        Self {
            plot_left: 40.0,
            right_margin: 20.0,
            grid_pitch_x: 40.0,
            grid_pitch_y: 50.0,
            sample_step: 2.0,
            time_scale: 0.01,
            grid_color: Rgb::new(0xF0, 0xF0, 0xF0),
            grid_width: 0.5,
            baseline_color: Rgb::new(0xE0, 0xE0, 0xE0),
            baseline_width: 1.0,
            trace_width: 2.0,
            label_color: Rgb::new(0x33, 0x33, 0x33),
            label_size: 12.0,
            label_x: 5.0,
            label_offset: 15.0,
            readout_color: Rgb::new(0xFF, 0x57, 0x22),
            readout_size: 14.0,
            readout_inset: 100.0,
        }
    }
}

/// Positions `start, start + pitch, ...` strictly below `end`
fn positions(start: f32, end: f32, pitch: f32) -> impl Iterator<Item = f32> {
    let count = if pitch > 0.0 && end > start {
        ((end - start) / pitch).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |i| start + i as f32 * pitch)
}

/// Draws grid, per-channel baselines and labels, and synthesized traces
#[derive(Debug, Clone, Default)]
pub struct ChannelRenderer {
    style: ChannelPlotStyle,
}

impl ChannelRenderer {
    pub fn new(style: ChannelPlotStyle) -> Self {
        Self { style }
    }

    /// Channel whose label sits under `point`, for hover text. Labels occupy
    /// the gutter left of the traced area, one lane per channel.
    pub fn label_at(&self, point: Point, channel_count: usize, height: f32) -> Option<usize> {
        if channel_count == 0 || point.x < 0.0 || point.x >= self.style.plot_left {
            return None;
        }
        if point.y < 0.0 || point.y >= height {
            return None;
        }

        let lane = height / channel_count as f32;
        Some(((point.y / lane) as usize).min(channel_count - 1))
    }

    /// Draw one frame of the plot
    pub fn render<S, N>(&self, surface: &mut S, state: &SimulationState, band: &WaveBand, noise: &mut N)
    where
        S: DrawingSurface + ?Sized,
        N: NoiseSource + ?Sized,
    {
        let (width, height) = surface.size();
        surface.clear(Region::from_size(width, height));

        self.draw_grid(surface, width, height);

        let right = width - self.style.right_margin;
        for channel in 0..band.channel_count {
            let baseline = Self::baseline(channel, band.channel_count, height);

            surface.draw_text(
                &channel_label(channel),
                Point::new(self.style.label_x, baseline - self.style.label_offset),
                TextAnchor::Start,
                self.style.label_size,
                self.style.label_color,
            );

            surface.stroke_line(
                Point::new(self.style.plot_left, baseline),
                Point::new(right, baseline),
                self.style.baseline_color,
                self.style.baseline_width,
            );

            let trace = self.trace_points(width, baseline, channel, state, band, noise);
            surface.stroke_polyline(&trace, band.display_color, self.style.trace_width);
        }

        self.draw_readouts(surface, width, state, band);
    }

    fn draw_grid<S: DrawingSurface + ?Sized>(&self, surface: &mut S, width: f32, height: f32) {
        let style = &self.style;
        let right = width - style.right_margin;

        for x in positions(style.plot_left, right, style.grid_pitch_x) {
            surface.stroke_line(Point::new(x, 0.0), Point::new(x, height), style.grid_color, style.grid_width);
        }

        for y in positions(0.0, height, style.grid_pitch_y) {
            surface.stroke_line(Point::new(style.plot_left, y), Point::new(right, y), style.grid_color, style.grid_width);
        }
    }

    /// Time readout shows `elapsed_time` itself. Speed is already folded in by
    /// the clock, so this differs from a `time * speed` display, which would
    /// count the multiplier twice.
    fn draw_readouts<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        width: f32,
        state: &SimulationState,
        band: &WaveBand,
    ) {
        let x = width - self.style.readout_inset;

        surface.draw_text(
            &format!("Time: {:.1}s", state.elapsed_time),
            Point::new(x, 20.0),
            TextAnchor::Start,
            self.style.readout_size,
            self.style.readout_color,
        );
        surface.draw_text(
            &format!("{}Hz", band.frequency_hz),
            Point::new(x, 40.0),
            TextAnchor::Start,
            self.style.readout_size,
            band.display_color,
        );
    }

    /// Vertical centre of a channel's lane
    pub fn baseline(channel: usize, channel_count: usize, height: f32) -> f32 {
        (channel as f32 + 0.5) * (height / channel_count as f32)
    }

    /// Trace of one channel across the plot width
    pub fn trace_points<N: NoiseSource + ?Sized>(
        &self,
        width: f32,
        baseline: f32,
        channel: usize,
        state: &SimulationState,
        band: &WaveBand,
        noise: &mut N,
    ) -> Vec<Point> {
        let left = self.style.plot_left;
        let right = width - self.style.right_margin;

        positions(left, right, self.style.sample_step)
            .map(|x| {
                let t = f64::from(x - left) * self.style.time_scale + state.elapsed_time;
                let displacement = sample(t, channel, band, state.amplitude_scale, noise);
                Point::new(x, baseline - displacement)
            })
            .collect()
    }
}
