//! Tournament planning request and result models.

use serde::{Deserialize, Serialize};

use crate::blinds::{BlindStructure, TournamentSpeed};
use crate::capacity::Capacity;
use crate::distribution::{Allocation, Distribution};
use crate::inventory::ChipCounts;

/// Starting depth in level-1 big blinds when the request names none
pub const DEFAULT_STARTING_DEPTH_BB: u64 = 50;

/// First level paying the big blind ante when the request names none
pub const DEFAULT_ANTE_START_LEVEL: u32 = 6;

/// Parameters for planning one tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Registered players
    pub players: u32,
    /// Re-entries allowed per player
    pub reentries: u32,
    /// Explicit starting stack; selected from the field size when `None`
    pub starting_stack: Option<u64>,
    /// Blind speed
    pub speed: TournamentSpeed,
    /// Starting stack measured in level-1 big blinds
    pub starting_depth_bb: u64,
    /// Big blind growth per level; values not above 1 use the speed default
    pub increase_rate: f64,
    /// First level paying the big blind ante
    pub ante_start_level: u32,
}

impl PlanRequest {
    /// Create a request with default speed, depth, rate and ante start
    pub fn new(players: u32, reentries: u32) -> Self {
        Self {
            players,
            reentries,
            starting_stack: None,
            speed: TournamentSpeed::Normal,
            starting_depth_bb: DEFAULT_STARTING_DEPTH_BB,
            increase_rate: 0.0,
            ante_start_level: DEFAULT_ANTE_START_LEVEL,
        }
    }

    pub fn with_starting_stack(mut self, stack: u64) -> Self {
        self.starting_stack = Some(stack);
        self
    }

    pub fn with_speed(mut self, speed: TournamentSpeed) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_starting_depth(mut self, depth_bb: u64) -> Self {
        self.starting_depth_bb = depth_bb;
        self
    }

    pub fn with_increase_rate(mut self, rate: f64) -> Self {
        self.increase_rate = rate;
        self
    }

    pub fn with_ante_start_level(mut self, level: u32) -> Self {
        self.ante_start_level = level;
        self
    }
}

/// Everything the calling layer needs to open a tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentPlan {
    /// `players × (reentries + 1)`
    pub max_entries: u64,
    /// Stack every entry receives
    pub starting_stack: u64,
    /// Whether the stack was selected rather than supplied
    pub stack_selected: bool,
    pub capacity: Capacity,
    pub blinds: BlindStructure,
    /// Liquidity floor before clamping to capacity
    pub min_chips: ChipCounts,
    pub allocation: Allocation,
}

impl TournamentPlan {
    pub fn distribution(&self) -> &Distribution {
        &self.allocation.distribution
    }

    pub fn is_exact(&self) -> bool {
        self.allocation.is_exact()
    }
}
