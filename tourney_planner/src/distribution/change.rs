//! Bounded coin-change table used when local repair moves stall.
//!
//! Amounts are tabulated in steps of the base unit, so the table size is
//! `amount / base_unit + 1`. Tables past [`EXACT_SEARCH_LIMIT`] entries are
//! not built.

use crate::inventory::{ChipCounts, Denomination, base_unit_of};

/// Most amounts a change table will tabulate
pub const EXACT_SEARCH_LIMIT: usize = 250_000;

const UNREACHABLE: u32 = u32::MAX;

/// For every amount up to a ceiling, whether it can be paid with at most
/// `bounds[i]` chips of `denominations[i]`, and how.
///
/// `used[i][a]` is the fewest chips of denomination `i` that pay amount
/// `a * unit` together with denominations `0..i`. Reconstruction walks the
/// rows largest first, so large chips are used sparingly and the small
/// chips carry as much of the amount as their bounds allow.
pub(crate) struct ChangeTable {
    unit: u64,
    steps: Vec<usize>,
    used: Vec<Vec<u32>>,
    reached: Vec<bool>,
}

impl ChangeTable {
    /// Tabulate amounts `0..=ceiling`. `None` when there are no
    /// denominations or the table would exceed [`EXACT_SEARCH_LIMIT`].
    pub(crate) fn build(
        denominations: &[Denomination],
        bounds: &[u64],
        ceiling: u64,
    ) -> Option<Self> {
        if denominations.is_empty() {
            return None;
        }

        let unit = base_unit_of(denominations.iter().copied());
        let size = usize::try_from(ceiling / unit).ok()?.checked_add(1)?;
        if size > EXACT_SEARCH_LIMIT {
            log::debug!(
                "Change table for {} would need {} entries; skipping exact search",
                ceiling,
                size
            );
            return None;
        }

        let mut reached = vec![false; size];
        reached[0] = true;
        let mut steps = Vec::with_capacity(denominations.len());
        let mut used = Vec::with_capacity(denominations.len());

        for (&d, &bound) in denominations.iter().zip(bounds) {
            let step = usize::try_from(d / unit).ok()?;
            let bound = u32::try_from(bound).unwrap_or(UNREACHABLE).min(UNREACHABLE - 1);
            let mut row = vec![UNREACHABLE; size];

            for amount in 0..size {
                if reached[amount] {
                    row[amount] = 0;
                } else if amount >= step && row[amount - step] < bound {
                    row[amount] = row[amount - step] + 1;
                    reached[amount] = true;
                }
            }

            steps.push(step);
            used.push(row);
        }

        Some(Self {
            unit,
            steps,
            used,
            reached,
        })
    }

    fn index(&self, amount: u64) -> Option<usize> {
        if amount % self.unit != 0 {
            return None;
        }
        let idx = usize::try_from(amount / self.unit).ok()?;
        self.reached.get(idx).copied().unwrap_or(false).then_some(idx)
    }

    /// Chip counts paying `amount` exactly, aligned with the denominations
    /// the table was built from.
    pub(crate) fn counts_for(&self, amount: u64) -> Option<Vec<u64>> {
        let mut idx = self.index(amount)?;
        let mut counts = vec![0; self.steps.len()];

        for i in (0..self.steps.len()).rev() {
            let n = self.used[i][idx];
            if n == UNREACHABLE {
                return None;
            }
            counts[i] = u64::from(n);
            idx -= n as usize * self.steps[i];
        }

        (idx == 0).then_some(counts)
    }

    /// Largest positive amount not above `ceiling` that can be paid exactly.
    pub(crate) fn largest_up_to(&self, ceiling: u64) -> Option<u64> {
        let top = usize::try_from(ceiling / self.unit)
            .ok()?
            .min(self.reached.len() - 1);
        (1..=top)
            .rev()
            .find(|&idx| self.reached[idx])
            .map(|idx| idx as u64 * self.unit)
    }
}

/// Largest stack not above `ceiling` that the capped denominations can pay
/// exactly.
pub fn largest_exact_stack(per_entry_cap: &ChipCounts, ceiling: u64) -> Option<u64> {
    let (denominations, bounds): (Vec<Denomination>, Vec<u64>) = per_entry_cap
        .iter()
        .filter(|&(&d, _)| d > 0)
        .map(|(&d, &cap)| (d, cap))
        .unzip();

    ChangeTable::build(&denominations, &bounds, ceiling)?.largest_up_to(ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_denomination_change() {
        // 1 = 3 * 2 - 5 cannot be reached by swapping two denominations
        let table = ChangeTable::build(&[2, 5, 20], &[4, 3, 5], 200).unwrap();
        let counts = table.counts_for(101).unwrap();
        assert_eq!(counts[0] * 2 + counts[1] * 5 + counts[2] * 20, 101);
        assert!(counts[0] <= 4 && counts[1] <= 3 && counts[2] <= 5);
    }

    #[test]
    fn test_bounds_are_respected() {
        let table = ChangeTable::build(&[5, 25], &[2, 1], 100).unwrap();
        assert_eq!(table.counts_for(35), Some(vec![2, 1]));
        assert_eq!(table.counts_for(40), None);
        assert_eq!(table.counts_for(7), None);
    }

    #[test]
    fn test_small_chips_carry_the_amount() {
        let table = ChangeTable::build(&[5, 10, 100], &[10, 10, 5], 500).unwrap();
        assert_eq!(table.counts_for(150), Some(vec![10, 10, 0]));
    }

    #[test]
    fn test_largest_exact_stack() {
        let per_entry_cap: ChipCounts = [(2, 0), (5, 1)].into();
        assert_eq!(largest_exact_stack(&per_entry_cap, 4), None);
        assert_eq!(largest_exact_stack(&per_entry_cap, 9), Some(5));

        let per_entry_cap: ChipCounts = [(25, 3), (100, 2)].into();
        assert_eq!(largest_exact_stack(&per_entry_cap, 260), Some(250));
    }

    #[test]
    fn test_oversized_table_is_not_built() {
        assert!(ChangeTable::build(&[1], &[10], EXACT_SEARCH_LIMIT as u64).is_none());
    }
}
