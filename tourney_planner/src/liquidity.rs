//! Minimum small-chip liquidity derived from the early blind levels.

use serde::{Deserialize, Serialize};

use crate::blinds::BlindLevel;
use crate::inventory::{ChipCounts, Denomination, base_unit_of};

/// How the liquidity floor is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPolicy {
    /// Leading levels whose blinds are inspected
    pub levels_inspected: usize,
    /// How many of the smallest denominations receive the buffer
    pub small_denominations: usize,
    /// Multiplier on small-denomination counts; a player pays the blinds
    /// repeatedly before holding enough to break a larger chip
    pub buffer_multiplier: u64,
}

impl Default for LiquidityPolicy {
    fn default() -> Self {
        Self {
            levels_inspected: 10,
            small_denominations: 2,
            buffer_multiplier: 6,
        }
    }
}

impl LiquidityPolicy {
    /// Per-denomination floor for `levels` given ascending `denominations`.
    ///
    /// Every denomination appears in the result, possibly with 0.
    pub fn estimate(&self, levels: &[BlindLevel], denominations: &[Denomination]) -> ChipCounts {
        let mut floors: ChipCounts = denominations.iter().map(|&d| (d, 0)).collect();

        for level in levels.iter().take(self.levels_inspected) {
            for amount in [level.small_blind, level.big_blind, level.ante] {
                for (d, n) in decompose(amount, denominations) {
                    let floor = floors.entry(d).or_insert(0);
                    *floor = (*floor).max(n);
                }
            }
        }

        for d in denominations.iter().take(self.small_denominations) {
            if let Some(floor) = floors.get_mut(d) {
                *floor = floor.saturating_mul(self.buffer_multiplier);
            }
        }

        log::debug!("Liquidity floors: {:?}", floors);
        floors
    }
}

/// Liquidity floor with the default policy
pub fn min_liquidity(early_levels: &[BlindLevel], denominations: &[Denomination]) -> ChipCounts {
    LiquidityPolicy::default().estimate(early_levels, denominations)
}

/// Split one blind payment into chips.
///
/// The unit chip is the base unit when it is itself a denomination, else the
/// smallest denomination. Exact multiples are paid in unit chips only.
/// Otherwise as many unit chips as fit are used, the remainder goes to the
/// other denominations largest first, and anything left costs one more unit
/// chip.
pub fn decompose(amount: u64, denominations: &[Denomination]) -> ChipCounts {
    let mut chips = ChipCounts::new();
    let Some(&smallest) = denominations.first() else {
        return chips;
    };
    if amount == 0 {
        return chips;
    }

    let base = base_unit_of(denominations.iter().copied());
    let unit = if denominations.contains(&base) {
        base
    } else {
        smallest
    };

    if amount % unit == 0 {
        chips.insert(unit, amount / unit);
        return chips;
    }

    let mut unit_chips = amount / unit;
    let mut rest = amount % unit;
    for &d in denominations.iter().rev().filter(|&&d| d != unit) {
        let n = rest / d;
        if n > 0 {
            chips.insert(d, n);
            rest -= n * d;
        }
    }
    if rest > 0 {
        unit_chips += 1;
    }
    if unit_chips > 0 {
        chips.insert(unit, unit_chips);
    }

    chips
}
