//! Blind schedule and speed configuration models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::errors::{PlanError, PlanResult};

/// Tournament speed variants
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TournamentSpeed {
    Slow,
    #[default]
    Normal,
    Turbo,
    Hyper,
}

impl std::fmt::Display for TournamentSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentSpeed::Slow => write!(f, "slow"),
            TournamentSpeed::Normal => write!(f, "normal"),
            TournamentSpeed::Turbo => write!(f, "turbo"),
            TournamentSpeed::Hyper => write!(f, "hyper"),
        }
    }
}

impl FromStr for TournamentSpeed {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "slow" => Ok(TournamentSpeed::Slow),
            "normal" => Ok(TournamentSpeed::Normal),
            "turbo" => Ok(TournamentSpeed::Turbo),
            "hyper" => Ok(TournamentSpeed::Hyper),
            _ => Err(PlanError::UnknownSpeed(s.to_string())),
        }
    }
}

/// Timing and progression defaults for one speed.
///
/// The timing fields are passed through untouched; only
/// `default_increase_rate` affects generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedProfile {
    /// Minutes per blind level
    pub level_duration_minutes: u32,
    /// Levels played between breaks (0 for no breaks)
    pub break_every_levels: u32,
    /// Minutes per break
    pub break_duration_minutes: u32,
    /// Big blind growth per level when the request gives no usable rate
    pub default_increase_rate: f64,
}

/// Standard increase rates per speed
pub const SLOW_INCREASE_RATE: f64 = 1.2;
pub const NORMAL_INCREASE_RATE: f64 = 1.3;
pub const TURBO_INCREASE_RATE: f64 = 1.5;
pub const HYPER_INCREASE_RATE: f64 = 1.75;

/// Operator-supplied speed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeedTable {
    profiles: BTreeMap<TournamentSpeed, SpeedProfile>,
}

impl SpeedTable {
    pub fn new(profiles: BTreeMap<TournamentSpeed, SpeedProfile>) -> Self {
        Self { profiles }
    }

    /// The built-in table
    pub fn standard() -> Self {
        let profiles = [
            (
                TournamentSpeed::Slow,
                SpeedProfile {
                    level_duration_minutes: 30,
                    break_every_levels: 4,
                    break_duration_minutes: 15,
                    default_increase_rate: SLOW_INCREASE_RATE,
                },
            ),
            (
                TournamentSpeed::Normal,
                SpeedProfile {
                    level_duration_minutes: 20,
                    break_every_levels: 4,
                    break_duration_minutes: 10,
                    default_increase_rate: NORMAL_INCREASE_RATE,
                },
            ),
            (
                TournamentSpeed::Turbo,
                SpeedProfile {
                    level_duration_minutes: 10,
                    break_every_levels: 6,
                    break_duration_minutes: 5,
                    default_increase_rate: TURBO_INCREASE_RATE,
                },
            ),
            (
                TournamentSpeed::Hyper,
                SpeedProfile {
                    level_duration_minutes: 5,
                    break_every_levels: 0,
                    break_duration_minutes: 0,
                    default_increase_rate: HYPER_INCREASE_RATE,
                },
            ),
        ];

        Self {
            profiles: profiles.into_iter().collect(),
        }
    }

    /// Parse a table from JSON such as `{"normal": {"level_duration_minutes": 20, ...}}`
    pub fn from_json(json: &str) -> PlanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn profile(&self, speed: TournamentSpeed) -> PlanResult<&SpeedProfile> {
        self.profiles
            .get(&speed)
            .ok_or_else(|| PlanError::UnknownSpeed(speed.to_string()))
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// One blind level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindLevel {
    /// Level number (1-indexed)
    pub level: u32,
    /// Small blind amount
    pub small_blind: u64,
    /// Big blind amount
    pub big_blind: u64,
    /// Big blind ante, either 0 or equal to the big blind
    pub ante: u64,
}

impl BlindLevel {
    pub fn new(level: u32, small_blind: u64, big_blind: u64) -> Self {
        Self {
            level,
            small_blind,
            big_blind,
            ante: 0,
        }
    }

    /// Activate the big blind ante
    pub fn with_ante(mut self) -> Self {
        self.ante = self.big_blind;
        self
    }
}

/// Generated level schedule plus pass-through timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlindStructure {
    pub levels: Vec<BlindLevel>,
    pub speed: TournamentSpeed,
    /// Rate actually applied between levels
    pub increase_rate: f64,
    pub level_duration_minutes: u32,
    pub break_every_levels: u32,
    pub break_duration_minutes: u32,
}

impl BlindStructure {
    pub fn first_level(&self) -> Option<&BlindLevel> {
        self.levels.first()
    }

    /// Get blind level by number
    pub fn level_by_number(&self, number: u32) -> Option<&BlindLevel> {
        self.levels.iter().find(|lvl| lvl.level == number)
    }

    /// The first `count` levels
    pub fn early_levels(&self, count: usize) -> &[BlindLevel] {
        &self.levels[..count.min(self.levels.len())]
    }

    /// Whether a break follows the given level
    pub fn is_break_after(&self, level: u32) -> bool {
        self.break_every_levels > 0
            && level > 0
            && level % self.break_every_levels == 0
            && (level as usize) < self.levels.len()
    }

    /// Check numbering, positive blinds, strict big blind increase and ante values
    pub fn validate(&self) -> Result<(), String> {
        if self.levels.is_empty() {
            return Err("Blind structure has no levels".to_string());
        }

        let mut previous: Option<&BlindLevel> = None;
        for (idx, lvl) in self.levels.iter().enumerate() {
            let expected = idx as u32 + 1;
            if lvl.level != expected {
                return Err(format!("Expected level {}, got {}", expected, lvl.level));
            }
            if lvl.big_blind == 0 {
                return Err(format!("Level {}: big blind is 0", lvl.level));
            }
            if lvl.small_blind > lvl.big_blind {
                return Err(format!(
                    "Level {}: small blind ({}) exceeds big blind ({})",
                    lvl.level, lvl.small_blind, lvl.big_blind
                ));
            }
            if lvl.ante != 0 && lvl.ante != lvl.big_blind {
                return Err(format!(
                    "Level {}: ante ({}) must be 0 or the big blind",
                    lvl.level, lvl.ante
                ));
            }
            if let Some(prev) = previous {
                if lvl.big_blind <= prev.big_blind {
                    return Err(format!(
                        "Level {}: big blind ({}) does not exceed level {} ({})",
                        lvl.level, lvl.big_blind, prev.level, prev.big_blind
                    ));
                }
            }
            previous = Some(lvl);
        }

        Ok(())
    }
}
