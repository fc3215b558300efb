//! Distribution data models.

use serde::{Deserialize, Serialize};

use crate::inventory::{ChipCounts, ChipInventory, Denomination};

/// Chips handed to a single entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// Count per denomination, every capped denomination present (possibly 0)
    pub counts: ChipCounts,
}

impl Distribution {
    pub fn new(counts: ChipCounts) -> Self {
        Self { counts }
    }

    pub fn count(&self, denomination: Denomination) -> u64 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    /// Face value of the distribution
    pub fn total(&self) -> u64 {
        self.counts
            .iter()
            .map(|(&d, &c)| d.saturating_mul(c))
            .fold(0u64, u64::saturating_add)
    }

    /// Number of physical chips in one entry's bag
    pub fn chip_count(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Physical chips needed to seat `entries` entries with this distribution
    pub fn chips_required(&self, entries: u64) -> ChipCounts {
        self.counts
            .iter()
            .map(|(&d, &c)| (d, c.saturating_mul(entries)))
            .collect()
    }

    /// Whether `entries` copies of this distribution fit in the inventory
    pub fn fits(&self, inventory: &ChipInventory, entries: u64) -> bool {
        self.chips_required(entries)
            .iter()
            .all(|(&d, &needed)| needed <= inventory.count(d))
    }
}

/// Solver output: the best distribution plus how far it is from the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub distribution: Distribution,
    /// Stack the solver aimed for
    pub target_stack: u64,
    /// `target_stack - distribution.total()`; zero when exact
    pub residual: i64,
    /// Denominations whose liquidity floor exceeded the ceiling and was clamped
    pub clamped_floors: Vec<Denomination>,
}

impl Allocation {
    pub fn is_exact(&self) -> bool {
        self.residual == 0
    }
}
