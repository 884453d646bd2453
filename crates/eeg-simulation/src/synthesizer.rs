//! Per-channel brainwave waveform synthesis
//!
//! A sample is three harmonics of the band frequency, phase shifted per
//! channel, plus a fixed per-channel offset and a fresh uniform noise draw.
//! Given the noise draw the computation is pure. Phase is computed in f64
//! and narrowed to f32 once per harmonic.

use std::f64::consts::FRAC_PI_4;
use eeg_core::WaveBand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

/// Half-width of the uniform noise added to every sample
pub const NOISE_AMPLITUDE: f32 = 2.5;

/// (frequency multiplier, amplitude weight) of each harmonic
const HARMONICS: [(f32, f32); 3] = [(0.5, 0.8), (1.5, 0.2), (2.0, 0.1)];

/// Source of uniform random draws
pub trait NoiseSource {
    /// Draw a value in `[low, high]`
    fn uniform(&mut self, low: f32, high: f32) -> f32;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        (**self).uniform(low, high)
    }
}

/// Pseudo-random noise, reproducible when seeded
pub struct UniformNoise {
    rng: StdRng,
    unit: Uniform<f32>,
}

impl UniformNoise {
    /// Seeded when `seed` is given, entropy-seeded otherwise
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        UniformNoise {
            rng,
            unit: Uniform::new(0.0, 1.0),
        }
    }
}

impl NoiseSource for UniformNoise {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.unit.sample(&mut self.rng)
    }
}

/// Constant noise for deterministic output, clamped into the requested range
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedNoise(pub f32);

impl NoiseSource for FixedNoise {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        self.0.clamp(low.min(high), high.max(low))
    }
}

/// Noise-free displacement of one channel at time `t`
pub fn deterministic_sample(t: f64, channel_index: usize, frequency_hz: f32, amplitude_scale: f32) -> f32 {
    let channel = channel_index as f64;
    let phase_shift = channel * FRAC_PI_4;
    let channel_variation = ((channel * 0.5).sin() * 10.0) as f32;
    let frequency = f64::from(frequency_hz);

    let base: f32 = HARMONICS
        .iter()
        .map(|&(multiplier, weight)| {
            let phase = t * frequency * f64::from(multiplier) + phase_shift;
            phase.sin() as f32 * amplitude_scale * weight
        })
        .sum();

    base + channel_variation
}

/// Displacement of one channel from its baseline, positive upward
pub fn sample<N: NoiseSource + ?Sized>(
    t: f64,
    channel_index: usize,
    band: &WaveBand,
    amplitude_scale: f32,
    noise: &mut N,
) -> f32 {
    let noise = noise.uniform(-NOISE_AMPLITUDE, NOISE_AMPLITUDE);
    deterministic_sample(t, channel_index, band.frequency_hz, amplitude_scale) + noise
}
