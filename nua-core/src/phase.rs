//! Cycle phases and day classification.
//!
//! Phases are defined by fixed, absolute day-offset ranges that do not scale
//! with the configured cycle length. Cycles longer than 29 days leave their
//! last days unclassified.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKey {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl PhaseKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKey::Menstrual => "menstrual",
            PhaseKey::Follicular => "follicular",
            PhaseKey::Ovulation => "ovulation",
            PhaseKey::Luteal => "luteal",
        }
    }
}

impl fmt::Display for PhaseKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dark/light hex color pair used for a phase badge gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub dark: &'static str,
    pub light: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PhaseDefinition {
    pub key: PhaseKey,
    pub name: &'static str,
    /// Inclusive range of 0-based day offsets from the cycle start
    pub day_range: (u32, u32),
    pub tip: &'static str,
    pub colors: ColorPair,
    pub sub_stages: &'static [&'static str],
}

impl PhaseDefinition {
    fn contains(&self, offset: u32) -> bool {
        let (start, end) = self.day_range;
        (start..=end).contains(&offset)
    }
}

/// All phases, in classification order. The first range containing an
/// offset wins.
pub static PHASES: [PhaseDefinition; 4] = [
    PhaseDefinition {
        key: PhaseKey::Menstrual,
        name: "Menstrual Phase",
        day_range: (0, 4),
        tip: "You're bleeding. The tiredness is real, not in your head. Give your body iron \
              (spinach, lentils, meat) and water. And rest. Don't apologize for needing it.",
        colors: ColorPair {
            dark: "#8B1538",
            light: "#F4C2D8",
        },
        sub_stages: &[
            "day-menstrual-1",
            "day-menstrual-2",
            "day-menstrual-3",
            "day-menstrual-4",
            "day-menstrual-5",
        ],
    },
    PhaseDefinition {
        key: PhaseKey::Follicular,
        name: "Follicular Phase",
        day_range: (5, 13),
        tip: "Your energy is coming back. Use it: cardio, dancing, anything that makes you \
              feel strong. Protein is your ally: eggs, fish, legumes.",
        colors: ColorPair {
            dark: "#0D5C3D",
            light: "#B8E5D2",
        },
        sub_stages: &[
            "day-follicular-early",
            "day-follicular-mid",
            "day-follicular-late",
        ],
    },
    PhaseDefinition {
        key: PhaseKey::Ovulation,
        name: "Ovulation Phase",
        day_range: (14, 16),
        tip: "You feel magnetic and you're not imagining it: you're ovulating. Your \
              communication is at its clearest. Say what you need to say. Move: yoga flow, \
              dance, aerobics. This is your peak.",
        colors: ColorPair {
            dark: "#C42063",
            light: "#FFDEE9",
        },
        sub_stages: &["day-ovulation-fertile", "day-ovulation-peak"],
    },
    PhaseDefinition {
        key: PhaseKey::Luteal,
        name: "Luteal Phase",
        day_range: (17, 28),
        tip: "Feeling off has a name: the luteal phase. Progesterone drops and everything \
              feels heavier. Don't just push through. Say no without guilt. Magnesium calms \
              you: chocolate, almonds, spinach. Warm food helps too.",
        colors: ColorPair {
            dark: "#6B4D7C",
            light: "#E8D9F0",
        },
        sub_stages: &["day-luteal-early", "day-luteal-mid", "day-luteal-late"],
    },
];

/// A classified cycle day: its phase and the sub-stage within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseMatch {
    pub phase: &'static PhaseDefinition,
    pub sub_stage: &'static str,
}

impl PhaseMatch {
    pub fn key(&self) -> PhaseKey {
        self.phase.key
    }
}

/// Classify a 1-based cycle day.
///
/// Ranges are 0-based offsets, so day `n` is looked up at offset `n - 1`.
/// Returns `None` for day 0 and for days past the last range (30 and up).
pub fn classify(cycle_day: u32) -> Option<PhaseMatch> {
    let offset = cycle_day.checked_sub(1)?;

    PHASES.iter().find(|p| p.contains(offset)).map(|phase| {
        let within = (offset - phase.day_range.0) as usize;
        let idx = within.min(phase.sub_stages.len() - 1);
        PhaseMatch {
            phase,
            sub_stage: phase.sub_stages[idx],
        }
    })
}

pub fn definition(key: PhaseKey) -> &'static PhaseDefinition {
    match key {
        PhaseKey::Menstrual => &PHASES[0],
        PhaseKey::Follicular => &PHASES[1],
        PhaseKey::Ovulation => &PHASES[2],
        PhaseKey::Luteal => &PHASES[3],
    }
}
