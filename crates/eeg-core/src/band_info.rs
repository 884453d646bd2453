//! Educational reference text for each band and electrode

use crate::wave_types::{channel_label, BandId};

/// Descriptive card shown next to the simulation for the selected band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandInfo {
    pub id: BandId,
    pub title: &'static str,
    /// Physiological frequency range, wider than the simulated base frequency
    pub frequency_range: &'static str,
    pub amplitude_range: &'static str,
    pub state: &'static str,
    /// Short mental state used in the comparison table
    pub summary_state: &'static str,
    pub description: &'static str,
    pub significance: &'static [&'static str],
}

const BAND_INFO: [BandInfo; BandId::COUNT] = [
    BandInfo {
        id: BandId::Delta,
        title: "Delta Waves",
        frequency_range: "0.5-4 Hz",
        amplitude_range: "High (100-200 µV)",
        state: "Deep Sleep, Unconsciousness",
        summary_state: "Deep Sleep",
        description: "Delta waves are the slowest brainwaves and are associated with deep, \
            dreamless sleep. They have the highest amplitude and are crucial for healing and regeneration.",
        significance: &[
            "Present during stages 3 and 4 of NREM sleep",
            "Associated with growth hormone release",
            "Important for memory consolidation",
            "Abnormal delta activity in awake states may indicate brain injury",
        ],
    },
    BandInfo {
        id: BandId::Theta,
        title: "Theta Waves",
        frequency_range: "4-8 Hz",
        amplitude_range: "Medium (50-100 µV)",
        state: "Light Sleep, Deep Meditation, Creativity",
        summary_state: "Light Sleep, Meditation",
        description: "Theta waves occur during light sleep, deep meditation, and creative states. \
            They are associated with memory formation and emotional processing.",
        significance: &[
            "Present during REM sleep and drowsiness",
            "Associated with creativity and insight",
            "Important for memory consolidation",
            "Increased during meditation and hypnosis",
        ],
    },
    BandInfo {
        id: BandId::Alpha,
        title: "Alpha Waves",
        frequency_range: "8-13 Hz",
        amplitude_range: "Medium (30-50 µV)",
        state: "Relaxed Wakefulness, Calm Focus",
        summary_state: "Relaxed Wakefulness",
        description: "Alpha waves appear when you are awake but relaxed and not actively processing \
            information. They are strongest in the occipital region and indicate a calm, focused state.",
        significance: &[
            "Dominant when eyes are closed and relaxed",
            "Associated with calm, peaceful mental states",
            "Reduced during mental effort and stress",
            "Important marker for meditation depth",
        ],
    },
    BandInfo {
        id: BandId::Beta,
        title: "Beta Waves",
        frequency_range: "13-30 Hz",
        amplitude_range: "Low (10-30 µV)",
        state: "Active Thinking, Problem Solving, Anxiety",
        summary_state: "Active Thinking",
        description: "Beta waves dominate during active, busy thinking and active concentration. \
            They are associated with normal waking consciousness and can increase with stress.",
        significance: &[
            "Present during active concentration and problem-solving",
            "Increased during stress and anxiety",
            "Normal during active mental engagement",
            "High beta may indicate overthinking or anxiety",
        ],
    },
    BandInfo {
        id: BandId::Gamma,
        title: "Gamma Waves",
        frequency_range: "30-100 Hz",
        amplitude_range: "Very Low (5-10 µV)",
        state: "High-Level Cognitive Function, Consciousness",
        summary_state: "High-Level Processing",
        description: "Gamma waves are the fastest brainwaves and are associated with high-level \
            cognitive functions, consciousness, and binding of distributed brain processes.",
        significance: &[
            "Associated with consciousness and awareness",
            "Present during high-level cognitive processing",
            "Involved in binding distributed brain processes",
            "Increased during moments of insight and learning",
        ],
    },
];

impl BandInfo {
    /// Reference card of a band
    pub fn of(id: BandId) -> &'static BandInfo {
        &BAND_INFO[id.slot()]
    }

    /// All cards, slow to fast
    pub fn all() -> &'static [BandInfo] {
        &BAND_INFO
    }
}

/// 10-20 system positions and the functions they are associated with
const ELECTRODE_INFO: [(&str, &str); 21] = [
    ("Fpz", "Frontal Polar Midline - Attention, working memory"),
    ("Fp1", "Left Frontal Polar - Executive functions"),
    ("Fp2", "Right Frontal Polar - Executive functions"),
    ("F7", "Left Frontal - Language processing (Broca's area)"),
    ("F3", "Left Frontal - Motor planning, working memory"),
    ("Fz", "Frontal Midline - Attention, error monitoring"),
    ("F4", "Right Frontal - Motor planning, spatial processing"),
    ("F8", "Right Frontal - Spatial attention"),
    ("T3", "Left Temporal - Auditory processing, language"),
    ("C3", "Left Central - Motor cortex (right body movement)"),
    ("Cz", "Central Midline - Motor control, balance"),
    ("C4", "Right Central - Motor cortex (left body movement)"),
    ("T4", "Right Temporal - Auditory processing"),
    ("T5", "Left Posterior Temporal - Language comprehension"),
    ("P3", "Left Parietal - Spatial processing, attention"),
    ("Pz", "Parietal Midline - Attention, spatial awareness"),
    ("P4", "Right Parietal - Spatial processing, attention"),
    ("T6", "Right Posterior Temporal - Visual-spatial processing"),
    ("O1", "Left Occipital - Visual processing"),
    ("Oz", "Occipital Midline - Visual processing"),
    ("O2", "Right Occipital - Visual processing"),
];

/// Fallback for leads without a known position
pub const GENERIC_ELECTRODE_DESCRIPTION: &str = "EEG electrode position";

/// Description of a named electrode
pub fn electrode_description(label: &str) -> Option<&'static str> {
    ELECTRODE_INFO
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, description)| *description)
}

/// Hover text for a plotted channel: "Fp1: Left Frontal Polar - ..."
pub fn channel_tooltip(index: usize) -> String {
    let label = channel_label(index);
    let description = electrode_description(&label).unwrap_or(GENERIC_ELECTRODE_DESCRIPTION);
    format!("{}: {}", label, description)
}
