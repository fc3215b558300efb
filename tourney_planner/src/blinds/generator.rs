//! Blind structure generation.

use crate::errors::{PlanError, PlanResult};
use crate::inventory::{ChipInventory, Denomination};

use super::models::{BlindLevel, BlindStructure, SpeedTable, TournamentSpeed};
use super::rounding::{BlindRounding, RoundingPolicy};

/// Hard ceiling on generated levels
pub const MAX_LEVELS: u32 = 500;

/// Generation stops once a big blind reaches this multiple of the starting stack
pub const STOP_STACK_MULTIPLE: u64 = 2;

/// Generates blind schedules for one chip set and speed table
#[derive(Debug, Clone)]
pub struct BlindStructureGenerator {
    denominations: Vec<Denomination>,
    base_unit: u64,
    speeds: SpeedTable,
    rounding: RoundingPolicy,
}

impl BlindStructureGenerator {
    pub fn new(inventory: &ChipInventory, speeds: SpeedTable) -> Self {
        Self {
            denominations: inventory.denominations(),
            base_unit: inventory.base_unit(),
            speeds,
            rounding: RoundingPolicy::default(),
        }
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    /// Generate the level schedule.
    ///
    /// # Arguments
    ///
    /// * `starting_stack` - Stack each entry starts with
    /// * `speed` - Speed whose timing is passed through and whose default rate
    ///   replaces an unusable `increase_rate`
    /// * `starting_depth_bb` - Starting stack measured in level-1 big blinds
    /// * `increase_rate` - Big blind growth per level; must be finite and `> 1`
    /// * `ante_start_level` - First level paying a big blind ante
    ///
    /// # Errors
    ///
    /// Returns error for a zero stack, a zero depth or a speed missing from
    /// the speed table.
    pub fn generate(
        &self,
        starting_stack: u64,
        speed: TournamentSpeed,
        starting_depth_bb: u64,
        increase_rate: f64,
        ante_start_level: u32,
    ) -> PlanResult<BlindStructure> {
        if starting_stack == 0 {
            return Err(PlanError::InvalidStartingStack(starting_stack));
        }
        if starting_depth_bb == 0 {
            return Err(PlanError::InvalidStartingDepth(starting_depth_bb));
        }
        let profile = self.speeds.profile(speed)?;

        let rate = if increase_rate.is_finite() && increase_rate > 1.0 {
            increase_rate
        } else {
            log::warn!(
                "Increase rate {} is not above 1; using {} default {}",
                increase_rate,
                speed,
                profile.default_increase_rate
            );
            profile.default_increase_rate
        };

        let threshold = starting_stack.saturating_mul(STOP_STACK_MULTIPLE);
        let mut raw = (starting_stack / starting_depth_bb).max(self.base_unit);
        let mut previous: Option<u64> = None;
        let mut levels = Vec::new();

        for number in 1..=MAX_LEVELS {
            let mut big_blind = self.rounding.round_blind(raw, &self.denominations);
            if let Some(prev) = previous {
                if big_blind <= prev {
                    big_blind = prev.saturating_add(self.base_unit);
                }
            }

            let small_blind = self
                .rounding
                .round_blind(big_blind / 2, &self.denominations)
                .clamp(self.base_unit.min(big_blind), big_blind);

            let mut level = BlindLevel::new(number, small_blind, big_blind);
            if number >= ante_start_level {
                level = level.with_ante();
            }
            levels.push(level);
            previous = Some(big_blind);

            if big_blind >= threshold {
                break;
            }
            raw = next_raw(raw, rate);
        }

        log::debug!(
            "Generated {} levels for stack {} at rate {}",
            levels.len(),
            starting_stack,
            rate
        );

        Ok(BlindStructure {
            levels,
            speed,
            increase_rate: rate,
            level_duration_minutes: profile.level_duration_minutes,
            break_every_levels: profile.break_every_levels,
            break_duration_minutes: profile.break_duration_minutes,
        })
    }
}

/// Advance the unrounded big blind by `rate`, as an integer, always growing.
fn next_raw(raw: u64, rate: f64) -> u64 {
    // Float-to-int `as` saturates
    let scaled = (raw as f64 * rate).round() as u64;
    scaled.max(raw.saturating_add(1))
}
