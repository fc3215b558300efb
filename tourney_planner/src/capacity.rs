//! Per-entry chip ceilings for a given concurrency.

use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};
use crate::inventory::{ChipCounts, ChipInventory, Denomination};

/// Achievable stacks are rounded down to this increment.
pub const CAPACITY_INCREMENT: u64 = 10;

/// Concurrency bound used to partition the inventory.
///
/// Returns `None` when the product does not describe at least one entry.
pub fn max_entries(players: u32, reentries: u32) -> Option<u64> {
    let entries = u64::from(players).checked_mul(u64::from(reentries) + 1)?;
    (entries >= 1).then_some(entries)
}

/// What a single entry may hold when every entry is seated at once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    /// Entries the inventory is split across
    pub max_entries: u64,
    /// `floor(inventory[d] / max_entries)` per denomination
    pub per_entry_cap: ChipCounts,
    /// Face value of a fully capped entry, rounded down to [`CAPACITY_INCREMENT`]
    pub max_achievable_stack: u64,
}

impl Capacity {
    pub fn cap(&self, denomination: Denomination) -> u64 {
        self.per_entry_cap.get(&denomination).copied().unwrap_or(0)
    }

    /// Unrounded face value of a fully capped entry
    pub fn capped_value(&self) -> u64 {
        self.per_entry_cap
            .iter()
            .map(|(&d, &c)| d.saturating_mul(c))
            .fold(0u64, u64::saturating_add)
    }
}

/// Derive per-entry ceilings and the largest stack the inventory supports.
pub fn capacity(inventory: &ChipInventory, max_entries: u64) -> PlanResult<Capacity> {
    if max_entries < 1 {
        return Err(PlanError::InvalidMaxEntries(max_entries));
    }

    let per_entry_cap: ChipCounts = inventory
        .counts()
        .iter()
        .map(|(&d, &count)| (d, count / max_entries))
        .collect();

    let mut capacity = Capacity {
        max_entries,
        per_entry_cap,
        max_achievable_stack: 0,
    };
    capacity.max_achievable_stack = round_down(capacity.capped_value(), CAPACITY_INCREMENT);

    log::debug!(
        "Capacity for {} entries: {:?} (max stack {})",
        max_entries,
        capacity.per_entry_cap,
        capacity.max_achievable_stack
    );

    Ok(capacity)
}

pub(crate) fn round_down(value: u64, increment: u64) -> u64 {
    if increment == 0 {
        return value;
    }
    value - value % increment
}
