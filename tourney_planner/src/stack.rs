//! Starting-stack selection from the field size.

use crate::capacity::{capacity, max_entries, round_down};
use crate::distribution::{largest_exact_stack, solve};
use crate::errors::{PlanError, PlanResult};
use crate::inventory::{ChipCounts, ChipInventory, lcm};

/// Selected stacks are multiples of this (widened to a base-unit multiple)
pub const STACK_INCREMENT: u64 = 100;

/// Candidates tried, one increment apart, before giving up on exactness
pub const MAX_SELECTION_ATTEMPTS: usize = 20;

/// Pick a clean starting stack for `players` with `reentries` re-entries each.
pub fn select_stack(inventory: &ChipInventory, players: u32, reentries: u32) -> PlanResult<u64> {
    let entries =
        max_entries(players, reentries).ok_or(PlanError::InvalidEntries { players, reentries })?;
    select_stack_for_entries(inventory, entries)
}

/// Pick the largest clean stack every one of `entries` entries can receive.
///
/// The candidate is the smaller of the capped stack and the raw
/// `total_value / entries` bound, rounded down to the stack increment and
/// floored at the smallest denomination. It is then checked against the
/// solver and lowered one increment at a time until it solves exactly. When
/// no clean candidate works, the largest exactly payable stack below the
/// first candidate is used, then the fully capped stack.
pub fn select_stack_for_entries(inventory: &ChipInventory, entries: u64) -> PlanResult<u64> {
    let cap = capacity(inventory, entries)?;
    let theoretical = inventory.total_value() / entries;
    let increment = lcm(STACK_INCREMENT, inventory.base_unit());
    let smallest = inventory.smallest();

    let first = round_down(cap.max_achievable_stack.min(theoretical), increment).max(smallest);
    let no_floors = ChipCounts::new();

    let mut candidate = first;
    for _ in 0..MAX_SELECTION_ATTEMPTS {
        if solve(candidate, &cap.per_entry_cap, &no_floors).is_exact() {
            log::debug!("Selected starting stack {} for {} entries", candidate, entries);
            return Ok(candidate);
        }
        if candidate < smallest + increment {
            break;
        }
        candidate -= increment;
    }

    let fallback = largest_exact_stack(&cap.per_entry_cap, first).or_else(|| {
        let capped = cap.capped_value();
        (capped > 0).then_some(capped)
    });

    match fallback {
        Some(stack) => {
            log::warn!(
                "No clean stack below {} solves exactly for {} entries; using {}",
                first,
                entries,
                stack
            );
            Ok(stack)
        }
        None => {
            log::warn!(
                "Inventory cannot give {} entries any chips; using {} anyway",
                entries,
                first
            );
            Ok(first)
        }
    }
}
