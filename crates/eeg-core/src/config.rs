//! Simulator configuration supplied at start-up

use serde::{Deserialize, Serialize};
use crate::config_error;
use crate::error::{EegError, EegResult};
use crate::wave_types::{WaveBand, WaveCatalog};

/// Frame driver tick rate accepted by validation, in Hz
pub const FRAME_RATE_RANGE: std::ops::RangeInclusive<f32> = 1.0..=1000.0;

/// Inclusive bounds applied to the amplitude scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeBounds {
    pub min: f32,
    pub max: f32,
}

impl AmplitudeBounds {
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for AmplitudeBounds {
    fn default() -> Self {
        Self { min: 10.0, max: 100.0 }
    }
}

/// Start-up configuration for a simulation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Band catalog, in display order
    pub bands: Vec<WaveBand>,
    /// Amplitude slider bounds
    pub amplitude: AmplitudeBounds,
    /// Initial amplitude scale
    pub default_amplitude: f32,
    /// Initial speed multiplier
    pub default_speed: f32,
    /// Unscaled elapsed-time increment per tick
    pub fixed_time_step: f64,
    /// Tick rate of the frame driver in Hz
    pub frame_rate: f32,
    /// Seed for reproducible noise
    pub noise_seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            bands: WaveBand::standard_bands(),
            amplitude: AmplitudeBounds::default(),
            default_amplitude: 50.0,
            default_speed: 1.0,
            fixed_time_step: 0.05,
            frame_rate: 60.0,
            noise_seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Validate the whole configuration
    pub fn validate(&self) -> EegResult<()> {
        self.catalog()?;

        let AmplitudeBounds { min, max } = self.amplitude;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(config_error!("amplitude bounds [{}, {}] are invalid", min, max));
        }

        if !self.amplitude.contains(self.default_amplitude) {
            return Err(config_error!(
                "default amplitude {} outside [{}, {}]", self.default_amplitude, min, max
            ));
        }

        Self::require_positive("default speed", f64::from(self.default_speed))?;
        Self::require_positive("fixed time step", self.fixed_time_step)?;

        if !FRAME_RATE_RANGE.contains(&self.frame_rate) {
            return Err(config_error!(
                "frame rate must be within [{}, {}] Hz, got {}",
                FRAME_RATE_RANGE.start(), FRAME_RATE_RANGE.end(), self.frame_rate
            ));
        }

        Ok(())
    }

    fn require_positive(name: &str, value: f64) -> EegResult<()> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(config_error!("{} must be positive, got {}", name, value))
        }
    }

    /// Build the wave catalog described by this configuration
    pub fn catalog(&self) -> EegResult<WaveCatalog> {
        WaveCatalog::new(self.bands.clone())
    }

    pub fn to_json(&self) -> EegResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EegError::Serialization {
            reason: e.to_string(),
        })
    }

    /// Parse and validate a configuration
    pub fn from_json(json: &str) -> EegResult<Self> {
        let config: SimulatorConfig = serde_json::from_str(json).map_err(|e| {
            EegError::Serialization { reason: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave_types::BandId;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_amplitude, 50.0);
        assert_eq!(config.default_speed, 1.0);
        assert_eq!(config.fixed_time_step, 0.05);
        assert_eq!(config.catalog().unwrap().len(), 5);
    }

    #[test]
    fn test_config_validation() {
        let mut config = SimulatorConfig::default();
        config.amplitude = AmplitudeBounds { min: 80.0, max: 20.0 };
        assert!(config.validate().is_err());

        let mut config = SimulatorConfig::default();
        config.default_amplitude = 150.0;
        assert!(config.validate().is_err());

        let mut config = SimulatorConfig::default();
        config.default_speed = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulatorConfig::default();
        config.fixed_time_step = -0.05;
        assert!(config.validate().is_err());

        let mut config = SimulatorConfig::default();
        config.frame_rate = f32::NAN;
        assert!(config.validate().is_err());

        for bad_rate in [0.5, 1.0e10, 1.0e-10, f32::INFINITY] {
            let mut config = SimulatorConfig::default();
            config.frame_rate = bad_rate;
            assert!(config.validate().is_err(), "frame rate {} accepted", bad_rate);
        }

        for good_rate in [1.0, 144.0, 1000.0] {
            let mut config = SimulatorConfig::default();
            config.frame_rate = good_rate;
            assert!(config.validate().is_ok());
        }

        let mut config = SimulatorConfig::default();
        config.bands.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_amplitude_clamp() {
        let bounds = AmplitudeBounds::default();
        assert_eq!(bounds.clamp(500.0), 100.0);
        assert_eq!(bounds.clamp(-3.0), 10.0);
        assert_eq!(bounds.clamp(42.0), 42.0);
    }

    #[test]
    fn test_json_serialization() {
        let mut config = SimulatorConfig::default();
        config.noise_seed = Some(7);

        let json = config.to_json().unwrap();
        assert!(json.contains("\"delta\""));
        assert!(json.contains("#4CAF50"));

        let parsed = SimulatorConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r##"{
            "bands": [
                { "id": "alpha", "frequency_hz": 10.0, "display_color": "#FF9800", "channel_count": 4 }
            ],
            "frame_rate": 30.0
        }"##;

        let config = SimulatorConfig::from_json(json).unwrap();
        assert_eq!(config.frame_rate, 30.0);
        assert_eq!(config.default_amplitude, 50.0);

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(BandId::Alpha).unwrap().channel_count, 4);
    }

    #[test]
    fn test_invalid_json() {
        let result = SimulatorConfig::from_json("{ not json");
        assert!(matches!(result, Err(EegError::Serialization { .. })));

        let bad_colour = r##"{ "bands": [ { "id": "beta", "frequency_hz": 20.0, "display_color": "purple", "channel_count": 8 } ] }"##;
        assert!(SimulatorConfig::from_json(bad_colour).is_err());
    }
}
