//! Climbing disciplines, their grade scales, and the slider mapping used by
//! the skill-level filter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discipline a user can list as a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    #[serde(rename = "Mountaineering", alias = "Bergsteigen")]
    Mountaineering,
    #[serde(rename = "Ice climbing", alias = "Eisklettern")]
    IceClimbing,
    #[serde(rename = "Drytooling", alias = "Drytoolen")]
    Drytooling,
    #[serde(rename = "Rock climbing (Trad)", alias = "Felsklettern (Trad)")]
    RockTrad,
    #[serde(rename = "Rock climbing (Sport)", alias = "Felsklettern (Sport)")]
    RockSport,
    #[serde(rename = "Indoor climbing", alias = "Indoor Klettern")]
    Indoor,
    #[serde(rename = "Bouldering", alias = "Bouldern")]
    Bouldering,
}

const ALPINE: &[&str] = &["F", "PD", "AD", "D", "TD", "ED"];
const WATER_ICE: &[&str] = &["WI1", "WI2", "WI3", "WI4", "WI5", "WI6", "WI7"];
const MIXED: &[&str] = &["M1", "M2", "M3", "M4", "M5", "M6", "M7", "M8", "M9", "M10"];
const FRENCH: &[&str] = &["3", "4", "5", "6a", "6b", "6c", "7a", "7b", "7c", "8a"];
const FONT: &[&str] = &["3", "4", "5", "6A", "6B", "6C", "7A", "7B", "7C", "8A"];

const ALPINE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("F", "Facile - Easy terrain, basic skills needed"),
    ("PD", "Peu Difficile - Slightly difficult, some technical skills required"),
    ("AD", "Assez Difficile - Fairly difficult, good technical skills needed"),
    ("D", "Difficile - Difficult, extensive experience required"),
    ("TD", "Très Difficile - Very difficult, expert level"),
    ("ED", "Extrêmement Difficile - Extremely difficult, highest level"),
];

const ICE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("WI1", "Low-angle ice, basic skills needed"),
    ("WI2", "Consistent 60° ice, good technique required"),
    ("WI3", "Sustained 70° ice with possible bulges"),
    ("WI4", "Near-vertical ice with technical sections"),
    ("WI5", "Vertical ice with extended technical sections"),
    ("WI6", "Vertical to overhanging ice, expert level"),
    ("WI7", "Overhanging ice with minimal rests, highest level"),
];

impl Discipline {
    pub const ALL: [Discipline; 7] = [
        Self::Mountaineering,
        Self::IceClimbing,
        Self::Drytooling,
        Self::RockTrad,
        Self::RockSport,
        Self::Indoor,
        Self::Bouldering,
    ];

    /// Name as stored by the backend.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mountaineering => "Mountaineering",
            Self::IceClimbing => "Ice climbing",
            Self::Drytooling => "Drytooling",
            Self::RockTrad => "Rock climbing (Trad)",
            Self::RockSport => "Rock climbing (Sport)",
            Self::Indoor => "Indoor climbing",
            Self::Bouldering => "Bouldering",
        }
    }

    pub fn german_name(self) -> &'static str {
        match self {
            Self::Mountaineering => "Bergsteigen",
            Self::IceClimbing => "Eisklettern",
            Self::Drytooling => "Drytoolen",
            Self::RockTrad => "Felsklettern (Trad)",
            Self::RockSport => "Felsklettern (Sport)",
            Self::Indoor => "Indoor Klettern",
            Self::Bouldering => "Bouldern",
        }
    }

    /// Parse an English or German discipline name (exact match).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == name || d.german_name() == name)
    }

    /// Grades from easiest to hardest.
    pub fn levels(self) -> &'static [&'static str] {
        match self {
            Self::Mountaineering => ALPINE,
            Self::IceClimbing => WATER_ICE,
            Self::Drytooling => MIXED,
            Self::RockTrad | Self::RockSport | Self::Indoor => FRENCH,
            Self::Bouldering => FONT,
        }
    }

    /// Position of `level` in [`Self::levels`].
    pub fn level_index(self, level: &str) -> Option<usize> {
        self.levels().iter().position(|l| *l == level)
    }

    /// Human description of a grade, where one is available.
    pub fn level_description(self, level: &str) -> Option<&'static str> {
        let table = match self {
            Self::Mountaineering => ALPINE_DESCRIPTIONS,
            Self::IceClimbing => ICE_DESCRIPTIONS,
            _ => return None,
        };
        table.iter().find(|(l, _)| *l == level).map(|(_, d)| *d)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Slider positions (0..=100) bounding an acceptable grade range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    pub min: u8,
    pub max: u8,
}

impl Default for LevelRange {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

impl LevelRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min: min.min(100), max: max.min(100) }
    }

    /// True when the slider spans every grade.
    pub fn is_full(&self) -> bool {
        self.min == 0 && self.max >= 100
    }

    /// Map both bounds onto grade indices of a scale with `len` grades.
    ///
    /// Each bound becomes `floor((len - 1) * pct / 100)`.
    pub fn indices(&self, len: usize) -> (usize, usize) {
        let last = len.saturating_sub(1);
        let scale = |pct: u8| last * usize::from(pct.min(100)) / 100;
        (scale(self.min), scale(self.max))
    }

    /// Whether the grade at `index` falls inside the range on a scale of `len`.
    pub fn contains(&self, index: usize, len: usize) -> bool {
        let (lo, hi) = self.indices(len);
        (lo..=hi).contains(&index)
    }
}
