//! Tournament planner running the capacity, stack, blind, liquidity and
//! distribution pipeline.

use super::models::{PlanRequest, TournamentPlan};
use crate::blinds::{BlindStructureGenerator, RoundingPolicy, SpeedTable};
use crate::capacity::{capacity, max_entries};
use crate::distribution::solve;
use crate::errors::{PlanError, PlanResult};
use crate::inventory::ChipInventory;
use crate::liquidity::LiquidityPolicy;
use crate::stack::select_stack_for_entries;

/// Tournament planner
///
/// Holds only immutable configuration, so a single planner can serve any
/// number of concurrent requests.
#[derive(Debug, Clone)]
pub struct TournamentPlanner {
    inventory: ChipInventory,
    generator: BlindStructureGenerator,
    liquidity: LiquidityPolicy,
}

impl TournamentPlanner {
    /// Create a new planner for a chip set and speed table
    pub fn new(inventory: ChipInventory, speeds: SpeedTable) -> Self {
        let generator = BlindStructureGenerator::new(&inventory, speeds);
        Self {
            inventory,
            generator,
            liquidity: LiquidityPolicy::default(),
        }
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.generator = self.generator.with_rounding(rounding);
        self
    }

    pub fn with_liquidity(mut self, liquidity: LiquidityPolicy) -> Self {
        self.liquidity = liquidity;
        self
    }

    pub fn inventory(&self) -> &ChipInventory {
        &self.inventory
    }

    /// Starting stack the planner would select for a field
    pub fn preview_stack(&self, players: u32, reentries: u32) -> PlanResult<u64> {
        let entries =
            max_entries(players, reentries).ok_or(PlanError::InvalidEntries { players, reentries })?;
        select_stack_for_entries(&self.inventory, entries)
    }

    /// Plan a tournament
    ///
    /// # Errors
    ///
    /// Returns error for an empty field, a zero starting stack or depth, or
    /// a speed missing from the speed table. An unreachable target is not an
    /// error; check [`TournamentPlan::is_exact`].
    pub fn plan(&self, request: &PlanRequest) -> PlanResult<TournamentPlan> {
        let entries = max_entries(request.players, request.reentries).ok_or(
            PlanError::InvalidEntries {
                players: request.players,
                reentries: request.reentries,
            },
        )?;
        let capacity = capacity(&self.inventory, entries)?;

        let (starting_stack, stack_selected) = match request.starting_stack {
            Some(0) => return Err(PlanError::InvalidStartingStack(0)),
            Some(stack) => (stack, false),
            None => (select_stack_for_entries(&self.inventory, entries)?, true),
        };

        let blinds = self.generator.generate(
            starting_stack,
            request.speed,
            request.starting_depth_bb,
            request.increase_rate,
            request.ante_start_level,
        )?;

        let min_chips = self
            .liquidity
            .estimate(&blinds.levels, &self.inventory.denominations());
        let allocation = solve(starting_stack, &capacity.per_entry_cap, &min_chips);

        log::info!(
            "Planned {} entries at stack {}: {} levels, distribution total {} (residual {})",
            entries,
            starting_stack,
            blinds.levels.len(),
            allocation.distribution.total(),
            allocation.residual
        );

        Ok(TournamentPlan {
            max_entries: entries,
            starting_stack,
            stack_selected,
            capacity,
            blinds,
            min_chips,
            allocation,
        })
    }
}

impl Default for TournamentPlanner {
    fn default() -> Self {
        Self::new(ChipInventory::standard(), SpeedTable::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blinds::TournamentSpeed;

    #[test]
    fn test_plan_selects_stack() {
        let plan = TournamentPlanner::default()
            .plan(&PlanRequest::new(16, 0))
            .unwrap();
        assert!(plan.stack_selected);
        assert_eq!(plan.starting_stack, 2300);
        assert_eq!(plan.max_entries, 16);
        assert!(plan.is_exact());
        assert_eq!(plan.distribution().total(), 2300);
    }

    #[test]
    fn test_plan_explicit_stack() {
        let plan = TournamentPlanner::default()
            .plan(&PlanRequest::new(16, 0).with_starting_stack(2300))
            .unwrap();
        assert!(!plan.stack_selected);
        assert!(plan.is_exact());
        // Fives are pinned by the liquidity floor
        assert_eq!(plan.distribution().count(5), 9);
        assert_eq!(plan.allocation.clamped_floors, vec![5]);
    }

    #[test]
    fn test_plan_rejects_zero_stack() {
        let err = TournamentPlanner::default()
            .plan(&PlanRequest::new(16, 0).with_starting_stack(0))
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidStartingStack(0)));
    }

    #[test]
    fn test_plan_rejects_empty_field() {
        let err = TournamentPlanner::default()
            .plan(&PlanRequest::new(0, 4))
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidEntries { .. }));
    }

    #[test]
    fn test_plan_unknown_speed_in_custom_table() {
        let speeds = SpeedTable::new(Default::default());
        let planner = TournamentPlanner::new(ChipInventory::standard(), speeds);
        let err = planner
            .plan(&PlanRequest::new(8, 0).with_speed(TournamentSpeed::Turbo))
            .unwrap_err();
        assert!(matches!(err, PlanError::UnknownSpeed(_)));
    }

    #[test]
    fn test_preview_stack() {
        let planner = TournamentPlanner::default();
        assert_eq!(planner.preview_stack(10, 1).unwrap(), 2200);
    }
}
