//! Phased chip distribution solver.
//!
//! The solver starts from the widest possible spread (every denomination at
//! its ceiling) and repairs toward the exact target in bounded local steps:
//!
//! 1. Seed at `per_entry_cap`
//! 2. Raise toward the liquidity floor
//! 3. Strip chips while over target, keeping one of every held denomination
//! 4. Repair passes: direct moves, overshoot swaps, two-denomination exchanges
//! 5. Exact change search when the passes stall; floors are lifted and the
//!    phases rerun from the seed only when the target is unreachable with them
//! 6. Final top-up and residual report
//!
//! Every phase respects `count[d] <= cap[d]` and, unless exactness demands
//! otherwise, `count[d] >= floor[d]`, where the floor is the liquidity
//! minimum clamped to the ceiling. Every repair pass must strictly shrink
//! `|gap|` or the loop stops.

use crate::inventory::{ChipCounts, Denomination};

use super::change::ChangeTable;
use super::models::{Allocation, Distribution};

/// Upper bound on repair passes
pub const MAX_REPAIR_PASSES: usize = 200;

/// Most chips of one denomination moved by a single exchange
pub const EXCHANGE_SEARCH_LIMIT: u64 = 40;

/// Distribute `target_stack` across the capped denominations.
///
/// Never fails: when the target cannot be met exactly, the returned
/// allocation carries a non-zero residual.
pub fn solve(target_stack: u64, per_entry_cap: &ChipCounts, min_chips: &ChipCounts) -> Allocation {
    let mut solver = ChipSolver::new(target_stack, per_entry_cap, min_chips);
    solver.seed();
    solver.top_up_liquidity();
    solver.reduce_excess();
    solver.repair();
    solver.finish()
}

/// A chip move: `remove` chips of one denomination, `add` chips of another.
/// Indices refer to the ascending denomination list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Exchange {
    remove: Option<(usize, u64)>,
    add: Option<(usize, u64)>,
}

impl Exchange {
    fn cost(&self) -> u64 {
        self.remove.map_or(0, |(_, n)| n) + self.add.map_or(0, |(_, n)| n)
    }
}

struct ChipSolver {
    target: i128,
    denominations: Vec<Denomination>,
    caps: Vec<u64>,
    floors: Vec<u64>,
    counts: Vec<u64>,
    clamped: Vec<Denomination>,
}

impl ChipSolver {
    fn new(target_stack: u64, per_entry_cap: &ChipCounts, min_chips: &ChipCounts) -> Self {
        // Zero-valued keys carry no value and are ignored
        let (denominations, caps): (Vec<Denomination>, Vec<u64>) = per_entry_cap
            .iter()
            .filter(|&(&d, _)| d > 0)
            .map(|(&d, &cap)| (d, cap))
            .unzip();

        let mut clamped = Vec::new();
        let floors = denominations
            .iter()
            .zip(&caps)
            .map(|(d, &cap)| {
                let wanted = min_chips.get(d).copied().unwrap_or(0);
                if wanted > cap {
                    clamped.push(*d);
                }
                wanted.min(cap)
            })
            .collect();

        if !clamped.is_empty() {
            log::warn!(
                "Liquidity floor exceeds capacity for denominations {:?}; clamping to capacity",
                clamped
            );
        }

        Self {
            target: i128::from(target_stack),
            counts: vec![0; denominations.len()],
            denominations,
            caps,
            floors,
            clamped,
        }
    }

    fn total(&self) -> i128 {
        self.denominations
            .iter()
            .zip(&self.counts)
            .map(|(&d, &c)| i128::from(d) * i128::from(c))
            .sum()
    }

    /// Signed change in total still needed: positive means add value.
    fn gap(&self) -> i128 {
        self.target - self.total()
    }

    fn value(&self, idx: usize) -> i128 {
        i128::from(self.denominations[idx])
    }

    fn headroom(&self, idx: usize) -> u64 {
        self.caps[idx].saturating_sub(self.counts[idx])
    }

    /// Chips of `idx` that may be removed. With `reserve`, one chip of every
    /// held denomination stays put.
    fn removable(&self, idx: usize, reserve: bool) -> u64 {
        let mut keep = self.floors[idx];
        if reserve && self.counts[idx] > 0 {
            keep = keep.max(1);
        }
        self.counts[idx].saturating_sub(keep)
    }

    fn apply(&mut self, exchange: Exchange) {
        if let Some((idx, n)) = exchange.remove {
            self.counts[idx] -= n;
        }
        if let Some((idx, n)) = exchange.add {
            self.counts[idx] += n;
        }
    }

    fn seed(&mut self) {
        self.counts.clone_from(&self.caps);
        log::debug!("Seeded at capacity: total {}", self.total());
    }

    fn top_up_liquidity(&mut self) {
        for idx in 0..self.counts.len() {
            if self.floors[idx] > self.counts[idx] {
                self.counts[idx] = self.floors[idx];
            }
        }
    }

    fn reduce_excess(&mut self) {
        let gap = self.gap();
        if gap >= 0 {
            return;
        }

        let mut excess = -gap;
        for idx in (0..self.counts.len()).rev() {
            let value = self.value(idx);
            let take = (excess / value).min(i128::from(self.removable(idx, true)));
            if take > 0 {
                // `take` is bounded by a u64 count
                self.counts[idx] -= take as u64;
                excess -= take * value;
            }
        }

        if excess > 0 {
            if let Some(exchange) = self.find_exchange(-excess, true) {
                self.apply(exchange);
            }
        }

        log::debug!("After reduction: total {}, gap {}", self.total(), self.gap());
    }

    /// Repair with floors in place. If the target stays out of reach, lift
    /// the floors, start again from the seed and keep whichever result is
    /// closer.
    fn repair(&mut self) {
        self.repair_passes();
        if self.gap() == 0 || self.settle_exactly() {
            return;
        }
        if self.floors.iter().all(|&f| f == 0) {
            return;
        }

        let floored_gap = self.gap().abs();
        let floored = self.counts.clone();
        let floors = std::mem::replace(&mut self.floors, vec![0; self.counts.len()]);

        self.seed();
        self.reduce_excess();
        self.repair_passes();
        if self.gap() != 0 {
            self.settle_exactly();
        }

        if self.gap().abs() < floored_gap {
            log::debug!("Liquidity floors lifted to reach gap {}", self.gap());
        } else {
            self.counts = floored;
        }
        self.floors = floors;
    }

    /// Replace the counts with an exact solution between floor and cap, if
    /// one exists.
    fn settle_exactly(&mut self) -> bool {
        match self.exact_counts() {
            Some(counts) => {
                log::debug!("Exact change search closed gap {}", self.gap());
                self.counts = counts;
                true
            }
            None => false,
        }
    }

    fn exact_counts(&self) -> Option<Vec<u64>> {
        let floor_value: i128 = (0..self.counts.len())
            .map(|idx| self.value(idx) * i128::from(self.floors[idx]))
            .sum();
        let rest = u64::try_from(self.target - floor_value).ok()?;
        let bounds: Vec<u64> = self
            .caps
            .iter()
            .zip(&self.floors)
            .map(|(&cap, &floor)| cap - floor)
            .collect();

        let extra = ChangeTable::build(&self.denominations, &bounds, rest)?.counts_for(rest)?;
        Some(
            self.floors
                .iter()
                .zip(extra)
                .map(|(&floor, n)| floor + n)
                .collect(),
        )
    }

    fn repair_passes(&mut self) {
        for pass in 0..MAX_REPAIR_PASSES {
            let before = self.gap().abs();
            if before == 0 {
                return;
            }

            self.direct_moves();
            if self.gap() != 0 {
                self.overshoot_swap();
            }
            if self.gap() != 0 {
                if let Some(exchange) = self
                    .find_exchange(self.gap(), false)
                    .or_else(|| self.find_improving_exchange())
                {
                    self.apply(exchange);
                }
            }

            let after = self.gap().abs();
            log::debug!("Repair pass {}: |gap| {} -> {}", pass + 1, before, after);
            if after >= before {
                return;
            }
        }
    }

    /// Whole-chip moves toward the target that never cross it.
    fn direct_moves(&mut self) {
        for idx in (0..self.counts.len()).rev() {
            let gap = self.gap();
            let value = self.value(idx);
            if gap > 0 {
                let add = (gap / value).min(i128::from(self.headroom(idx)));
                self.counts[idx] += add as u64;
            } else if gap < 0 {
                let remove = (-gap / value).min(i128::from(self.removable(idx, false)));
                self.counts[idx] -= remove as u64;
            }
        }
    }

    /// Cross the target with one chip larger than the gap, then pay back the
    /// overshoot with smaller denominations so the result is exact.
    fn overshoot_swap(&mut self) -> bool {
        let gap = self.gap();
        let need = gap.abs();

        for idx in 0..self.counts.len() {
            let value = self.value(idx);
            if value <= need {
                continue;
            }
            let available = if gap > 0 {
                self.headroom(idx)
            } else {
                self.removable(idx, false)
            };
            if available == 0 {
                continue;
            }

            let overshoot = value - need;
            if let Some(change) = self.make_change(overshoot, idx, gap > 0) {
                if gap > 0 {
                    self.counts[idx] += 1;
                    for (small, n) in change {
                        self.counts[small] -= n;
                    }
                } else {
                    self.counts[idx] -= 1;
                    for (small, n) in change {
                        self.counts[small] += n;
                    }
                }
                return true;
            }
        }

        false
    }

    /// Greedy exact change for `amount` using denominations below `limit`,
    /// largest first. `take` removes chips (above the floor), otherwise
    /// chips are added (below the cap).
    fn make_change(&self, amount: i128, limit: usize, take: bool) -> Option<Vec<(usize, u64)>> {
        let mut rest = amount;
        let mut change = Vec::new();
        for idx in (0..limit).rev() {
            let value = self.value(idx);
            let available = if take {
                self.removable(idx, false)
            } else {
                self.headroom(idx)
            };
            let n = (rest / value).min(i128::from(available));
            if n > 0 {
                change.push((idx, n as u64));
                rest -= n * value;
            }
        }
        (rest == 0).then_some(change)
    }

    /// Cheapest exchange of two denominations whose net value is exactly `delta`.
    fn find_exchange(&self, delta: i128, reserve: bool) -> Option<Exchange> {
        let n = self.counts.len();
        let mut best: Option<Exchange> = None;

        for out in 0..n {
            let max_out = self.removable(out, reserve).min(EXCHANGE_SEARCH_LIMIT);
            for removed in 1..=max_out {
                let needed = delta + i128::from(removed) * self.value(out);
                if needed <= 0 {
                    continue;
                }
                for into in (0..n).filter(|&into| into != out) {
                    let value = self.value(into);
                    if needed % value != 0 {
                        continue;
                    }
                    let added = needed / value;
                    if added > i128::from(self.headroom(into).min(EXCHANGE_SEARCH_LIMIT)) {
                        continue;
                    }
                    let candidate = Exchange {
                        remove: Some((out, removed)),
                        add: Some((into, added as u64)),
                    };
                    if best.is_none_or(|b| candidate.cost() < b.cost()) {
                        best = Some(candidate);
                    }
                }
            }
        }

        best
    }

    /// Exchange that strictly shrinks `|gap|` when no exact one exists.
    fn find_improving_exchange(&self) -> Option<Exchange> {
        let gap = self.gap();
        let n = self.counts.len();
        let mut best: Option<(i128, Exchange)> = None;

        for out in 0..n {
            let max_out = self.removable(out, false).min(EXCHANGE_SEARCH_LIMIT);
            for removed in 0..=max_out {
                let base = gap + i128::from(removed) * self.value(out);
                for into in (0..n).filter(|&into| into != out) {
                    let value = self.value(into);
                    let cap = i128::from(self.headroom(into).min(EXCHANGE_SEARCH_LIMIT));
                    // Closest feasible add counts around base / value
                    let lower = base.div_euclid(value).clamp(0, cap);
                    let upper = (lower + 1).min(cap);
                    for added in [lower, upper] {
                        if removed == 0 && added == 0 {
                            continue;
                        }
                        let remaining = (base - added * value).abs();
                        if remaining >= gap.abs() {
                            continue;
                        }
                        let candidate = Exchange {
                            remove: (removed > 0).then_some((out, removed)),
                            add: (added > 0).then_some((into, added as u64)),
                        };
                        let better = match best {
                            None => true,
                            Some((r, b)) => {
                                remaining < r || (remaining == r && candidate.cost() < b.cost())
                            }
                        };
                        if better {
                            best = Some((remaining, candidate));
                        }
                    }
                }
            }
        }

        best.map(|(_, exchange)| exchange)
    }

    fn finish(mut self) -> Allocation {
        // Last targeted top-up with any spare capacity
        if self.gap() > 0 {
            for idx in (0..self.counts.len()).rev() {
                let add = (self.gap() / self.value(idx)).min(i128::from(self.headroom(idx)));
                self.counts[idx] += add as u64;
            }
        }

        let gap = self.gap();
        let residual = i64::try_from(gap).unwrap_or(if gap > 0 { i64::MAX } else { i64::MIN });
        if residual != 0 {
            log::warn!(
                "Could not reach target stack {} exactly; residual {}",
                self.target,
                residual
            );
        }

        let counts: ChipCounts = self
            .denominations
            .iter()
            .copied()
            .zip(self.counts.iter().copied())
            .collect();

        Allocation {
            distribution: Distribution::new(counts),
            target_stack: u64::try_from(self.target).unwrap_or(u64::MAX),
            residual,
            clamped_floors: self.clamped,
        }
    }
}
