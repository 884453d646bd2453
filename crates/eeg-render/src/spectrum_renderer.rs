//! Band spectrum bar chart with a pulsing active bar

use eeg_core::{BandId, DrawingSurface, Point, Region, Rgb, TextAnchor, WaveCatalog};
use eeg_simulation::SimulationState;
use serde::{Deserialize, Serialize};

/// Layout and intensities of the spectrum chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumStyle {
    /// Left and right margin around the bar row
    pub side_margin: f32,
    /// Horizontal gap after each bar
    pub bar_gap: f32,
    /// Height not available to bars (labels plus headroom)
    pub vertical_reserve: f32,
    /// Distance from the bottom edge to the bar base
    pub bottom_margin: f32,
    pub selected_intensity: f32,
    pub idle_intensity: f32,
    /// Relative depth of the pulse
    pub pulse_depth: f32,
    /// Pulse angular rate per simulated second
    pub pulse_rate: f32,
    /// How far the static bar under the pulse is washed out toward the background
    pub track_fade: f32,
    pub background: Rgb,
    pub label_color: Rgb,
    pub label_size: f32,
    pub name_offset: f32,
    pub frequency_offset: f32,
}

impl Default for SpectrumStyle {
    fn default() -> Self {
        Self {
            side_margin: 30.0,
            bar_gap: 10.0,
            vertical_reserve: 60.0,
            bottom_margin: 30.0,
            selected_intensity: 0.8,
            idle_intensity: 0.2,
            pulse_depth: 0.1,
            pulse_rate: 2.0,
            track_fade: 0.6,
            background: Rgb::new(0xFF, 0xFF, 0xFF),
            label_color: Rgb::new(0x33, 0x33, 0x33),
            label_size: 10.0,
            name_offset: 10.0,
            frequency_offset: 20.0,
        }
    }
}

/// Computed geometry of one bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumBar {
    pub id: BandId,
    pub frequency_hz: f32,
    pub rect: Region,
    pub color: Rgb,
    pub selected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SpectrumRenderer {
    style: SpectrumStyle,
}

impl SpectrumRenderer {
    pub fn new(style: SpectrumStyle) -> Self {
        Self { style }
    }

    /// Height available to a full-intensity bar
    pub fn plot_area_height(&self, height: f32) -> f32 {
        (height - self.style.vertical_reserve).max(0.0)
    }

    /// Pulse multiplier, oscillating in `[1 - 2 * depth, 1]`
    pub fn pulse_factor(&self, elapsed_time: f64) -> f32 {
        let depth = self.style.pulse_depth;
        let phase = f64::from(self.style.pulse_rate) * elapsed_time;
        (1.0 - depth) + depth * phase.sin() as f32
    }

    fn bar_rect(&self, index: usize, bar_width: f32, bar_height: f32, height: f32) -> Region {
        let x = self.style.side_margin + index as f32 * bar_width;
        let base = height - self.style.bottom_margin;
        Region::new(x, base - bar_height, (bar_width - self.style.bar_gap).max(0.0), bar_height)
    }

    fn bar_width(&self, width: f32, bar_count: usize) -> f32 {
        (width - 2.0 * self.style.side_margin) / bar_count.max(1) as f32
    }

    /// Static bars, one per catalog band in display order
    pub fn bars(&self, size: (f32, f32), state: &SimulationState, catalog: &WaveCatalog) -> Vec<SpectrumBar> {
        let (width, height) = size;
        let area = self.plot_area_height(height);
        let bar_width = self.bar_width(width, catalog.len());

        catalog
            .iter()
            .enumerate()
            .map(|(index, band)| {
                let selected = band.id == state.selected_band;
                let intensity = if selected {
                    self.style.selected_intensity
                } else {
                    self.style.idle_intensity
                };

                SpectrumBar {
                    id: band.id,
                    frequency_hz: band.frequency_hz,
                    rect: self.bar_rect(index, bar_width, intensity * area, height),
                    color: band.display_color,
                    selected,
                }
            })
            .collect()
    }

    /// Pulsing overlay for the selected band
    pub fn pulse_bar(&self, size: (f32, f32), state: &SimulationState, catalog: &WaveCatalog) -> Option<SpectrumBar> {
        let (width, height) = size;
        let index = catalog.iter().position(|band| band.id == state.selected_band)?;
        let band = &catalog.bands()[index];

        let pulse_height = self.style.selected_intensity
            * self.plot_area_height(height)
            * self.pulse_factor(state.elapsed_time);

        Some(SpectrumBar {
            id: band.id,
            frequency_hz: band.frequency_hz,
            rect: self.bar_rect(index, self.bar_width(width, catalog.len()), pulse_height, height),
            color: band.display_color,
            selected: true,
        })
    }

    /// Draw one frame of the chart
    pub fn render<S>(&self, surface: &mut S, state: &SimulationState, catalog: &WaveCatalog)
    where
        S: DrawingSurface + ?Sized,
    {
        let size = surface.size();
        let (width, height) = size;
        surface.clear(Region::from_size(width, height));

        for bar in self.bars(size, state, catalog) {
            // The selected bar is a faded track under the pulse
            let color = if bar.selected {
                bar.color.mix(self.style.background, self.style.track_fade)
            } else {
                bar.color
            };
            surface.fill_rect(bar.rect, color);

            let label_x = bar.rect.x + bar.rect.width / 2.0;
            surface.draw_text(
                bar.id.name(),
                Point::new(label_x, height - self.style.name_offset),
                TextAnchor::Center,
                self.style.label_size,
                self.style.label_color,
            );
            surface.draw_text(
                &format!("{}Hz", bar.frequency_hz),
                Point::new(label_x, height - self.style.frequency_offset),
                TextAnchor::Center,
                self.style.label_size,
                self.style.label_color,
            );
        }

        if let Some(pulse) = self.pulse_bar(size, state, catalog) {
            surface.fill_rect(pulse.rect, pulse.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingSurface;
    use eeg_core::SimulatorConfig;

    const EPSILON: f32 = 1e-3;
    const SIZE: (f32, f32) = (400.0, 300.0);

    fn state(band: BandId, elapsed_time: f64) -> (SimulationState, WaveCatalog) {
        let catalog = WaveCatalog::standard();
        let mut state = SimulationState::initial(&SimulatorConfig::default(), &catalog);
        state.select_band(band, &catalog).unwrap();
        state.elapsed_time = elapsed_time;
        (state, catalog)
    }

    #[test]
    fn test_bar_heights() {
        let renderer = SpectrumRenderer::default();
        let area = renderer.plot_area_height(SIZE.1);
        assert_eq!(area, 240.0);

        for selected in BandId::ALL {
            let (state, catalog) = state(selected, 1.0);
            for bar in renderer.bars(SIZE, &state, &catalog) {
                let expected = if bar.id == selected { 0.8 * area } else { 0.2 * area };
                assert!((bar.rect.height - expected).abs() < EPSILON);
                assert!((bar.rect.bottom() - 270.0).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_bars_follow_catalog_order() {
        let renderer = SpectrumRenderer::default();
        let (state, catalog) = state(BandId::Delta, 0.0);

        let bars = renderer.bars(SIZE, &state, &catalog);
        let ids: Vec<BandId> = bars.iter().map(|b| b.id).collect();
        assert_eq!(ids, BandId::ALL.to_vec());

        // (400 - 60) / 5 = 68 wide slots, 58 wide bars
        assert!((bars[0].rect.x - 30.0).abs() < EPSILON);
        assert!((bars[1].rect.x - 98.0).abs() < EPSILON);
        assert!((bars[0].rect.width - 58.0).abs() < EPSILON);
    }

    #[test]
    fn test_pulse_stays_in_range() {
        let renderer = SpectrumRenderer::default();
        let area = renderer.plot_area_height(SIZE.1);

        for step in 0..400 {
            let elapsed = step as f64 * 0.05;
            let (state, catalog) = state(BandId::Beta, elapsed);
            let pulse = renderer.pulse_bar(SIZE, &state, &catalog).unwrap();

            assert_eq!(pulse.id, BandId::Beta);
            assert!(pulse.rect.height >= 0.8 * 0.8 * area - EPSILON);
            assert!(pulse.rect.height <= 0.8 * area + EPSILON);

            let expected = 0.8 * area * (0.9 + 0.1 * (2.0 * elapsed).sin() as f32);
            assert!((pulse.rect.height - expected).abs() < EPSILON);
        }
    }

    #[test]
    fn test_custom_pulse_depth() {
        let renderer = SpectrumRenderer::new(SpectrumStyle { pulse_depth: 0.25, ..Default::default() });

        assert!((renderer.pulse_factor(0.0) - 0.75).abs() < EPSILON);
        let peak = std::f64::consts::FRAC_PI_4;
        assert!((renderer.pulse_factor(peak) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_render_draws_bars_labels_and_pulse() {
        let renderer = SpectrumRenderer::default();
        let (state, catalog) = state(BandId::Alpha, 0.75);
        let mut surface = RecordingSurface::new(SIZE.0, SIZE.1);

        renderer.render(&mut surface, &state, &catalog);

        let rects: Vec<_> = surface.rects().collect();
        assert_eq!(rects.len(), 6);

        let alpha = catalog.get(BandId::Alpha).unwrap();
        let (pulse_rect, pulse_color) = rects[5];
        assert_eq!(*pulse_color, alpha.display_color);
        assert_eq!(*pulse_rect, renderer.pulse_bar(SIZE, &state, &catalog).unwrap().rect);
        assert_ne!(*rects[2].1, alpha.display_color);

        let texts: Vec<&str> = surface.texts().collect();
        for expected in ["Delta", "Theta", "Alpha", "Beta", "Gamma", "2Hz", "6Hz", "10Hz", "20Hz", "50Hz"] {
            assert!(texts.contains(&expected), "missing {}", expected);
        }
    }
}
