//! Brainwave band definitions and the static band catalog

use core::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::config_error;
use crate::error::{EegError, EegResult};

/// Named oscillation classes, ordered slow to fast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandId {
    Delta,
    Theta,
    Alpha,
    Beta,
    Gamma,
}

impl BandId {
    /// Number of distinct band ids
    pub const COUNT: usize = 5;

    /// All band ids, slow to fast
    pub const ALL: [BandId; BandId::COUNT] = [
        BandId::Delta,
        BandId::Theta,
        BandId::Alpha,
        BandId::Beta,
        BandId::Gamma,
    ];

    /// Display name ("Delta")
    pub fn name(&self) -> &'static str {
        match self {
            BandId::Delta => "Delta",
            BandId::Theta => "Theta",
            BandId::Alpha => "Alpha",
            BandId::Beta => "Beta",
            BandId::Gamma => "Gamma",
        }
    }

    /// Lowercase key used in configuration files ("delta")
    pub fn key(&self) -> &'static str {
        match self {
            BandId::Delta => "delta",
            BandId::Theta => "theta",
            BandId::Alpha => "alpha",
            BandId::Beta => "beta",
            BandId::Gamma => "gamma",
        }
    }

    pub(crate) fn slot(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for BandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BandId {
    type Err = EegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        BandId::ALL
            .into_iter()
            .find(|id| id.key() == key)
            .ok_or_else(|| EegError::InvalidBand { id: s.to_string() })
    }
}

/// 24-bit display colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` colour
    pub fn from_hex(hex: &str) -> EegResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(config_error!("colour '{}' is not #RRGGBB", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| config_error!("colour '{}' is not #RRGGBB", hex))
        };

        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear blend toward `other`, `t` in [0, 1]
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(channel(self.r, other.r), channel(self.g, other.g), channel(self.b, other.b))
    }
}

impl TryFrom<String> for Rgb {
    type Error = EegError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(colour: Rgb) -> Self {
        colour.to_hex()
    }
}

/// One band definition of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveBand {
    /// Band identifier
    pub id: BandId,
    /// Base oscillation frequency in Hz
    pub frequency_hz: f32,
    /// Trace and bar colour
    pub display_color: Rgb,
    /// Number of simulated leads shown for this band
    pub channel_count: usize,
}

impl WaveBand {
    pub const fn new(id: BandId, frequency_hz: f32, display_color: Rgb, channel_count: usize) -> Self {
        Self { id, frequency_hz, display_color, channel_count }
    }

    /// Validate a single band definition
    pub fn validate(&self) -> EegResult<()> {
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(config_error!(
                "{} frequency must be positive, got {}Hz", self.id, self.frequency_hz
            ));
        }

        if self.channel_count == 0 {
            return Err(config_error!("{} must have at least one channel", self.id));
        }

        Ok(())
    }

    /// Standard band table, slow to fast
    pub fn standard_bands() -> Vec<WaveBand> {
        vec![
            WaveBand::new(BandId::Delta, 2.0, Rgb::new(0x4C, 0xAF, 0x50), 8),
            WaveBand::new(BandId::Theta, 6.0, Rgb::new(0x21, 0x96, 0xF3), 8),
            WaveBand::new(BandId::Alpha, 10.0, Rgb::new(0xFF, 0x98, 0x00), 8),
            WaveBand::new(BandId::Beta, 20.0, Rgb::new(0x9C, 0x27, 0xB0), 8),
            WaveBand::new(BandId::Gamma, 50.0, Rgb::new(0xE9, 0x1E, 0x63), 8),
        ]
    }
}

/// Read-only band registry with constant-time lookup by id
#[derive(Debug, Clone, PartialEq)]
pub struct WaveCatalog {
    bands: Vec<WaveBand>,
    slots: [Option<usize>; BandId::COUNT],
}

impl WaveCatalog {
    /// Build a catalog from configured bands, kept in the given display order
    pub fn new(bands: Vec<WaveBand>) -> EegResult<Self> {
        if bands.is_empty() {
            return Err(config_error!("wave catalog must contain at least one band"));
        }

        let mut slots = [None; BandId::COUNT];
        for (position, band) in bands.iter().enumerate() {
            band.validate()?;

            let slot = &mut slots[band.id.slot()];
            if slot.is_some() {
                return Err(config_error!("band {} is defined more than once", band.id));
            }
            *slot = Some(position);
        }

        Ok(WaveCatalog { bands, slots })
    }

    /// The five standard bands (2, 6, 10, 20 and 50 Hz)
    pub fn standard() -> Self {
        let bands = WaveBand::standard_bands();
        let mut slots = [None; BandId::COUNT];
        for (position, band) in bands.iter().enumerate() {
            slots[band.id.slot()] = Some(position);
        }
        WaveCatalog { bands, slots }
    }

    /// Look up a band by id
    pub fn get(&self, id: BandId) -> EegResult<&WaveBand> {
        self.slots[id.slot()]
            .map(|position| &self.bands[position])
            .ok_or_else(|| EegError::InvalidBand { id: id.key().to_string() })
    }

    pub fn contains(&self, id: BandId) -> bool {
        self.slots[id.slot()].is_some()
    }

    /// Bands in display order
    pub fn iter(&self) -> impl Iterator<Item = &WaveBand> {
        self.bands.iter()
    }

    pub fn bands(&self) -> &[WaveBand] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Slowest band, the session default
    pub fn lowest_frequency(&self) -> &WaveBand {
        // Non-empty by construction.
        self.bands
            .iter()
            .min_by(|a, b| a.frequency_hz.total_cmp(&b.frequency_hz))
            .unwrap_or(&self.bands[0])
    }
}

impl Default for WaveCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// 10-20 system electrode names for the first eight leads
pub const ELECTRODE_LABELS: [&str; 8] = ["Fp1", "Fp2", "F3", "F4", "C3", "C4", "P3", "P4"];

/// Label drawn next to a channel baseline
pub fn channel_label(index: usize) -> String {
    match ELECTRODE_LABELS.get(index) {
        Some(label) => (*label).to_string(),
        None => format!("Ch{}", index + 1),
    }
}
