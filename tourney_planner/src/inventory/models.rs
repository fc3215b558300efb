//! Chip inventory data models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{PlanError, PlanResult};

/// A chip face value
pub type Denomination = u64;

/// Per-denomination chip counts, ordered by ascending denomination.
pub type ChipCounts = BTreeMap<Denomination, u64>;

/// Standard home-game set used when the operator supplies nothing else.
pub const STANDARD_INVENTORY: [(Denomination, u64); 6] = [
    (5, 150),
    (10, 100),
    (25, 100),
    (100, 100),
    (500, 25),
    (1000, 25),
];

/// Physical chips available to the tournament.
///
/// Always holds at least one denomination and every denomination is
/// positive. Serializes as a JSON object keyed by denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChipCounts", into = "ChipCounts")]
pub struct ChipInventory {
    counts: ChipCounts,
}

impl ChipInventory {
    /// Build an inventory from `(denomination, count)` pairs
    pub fn new<I>(entries: I) -> PlanResult<Self>
    where
        I: IntoIterator<Item = (Denomination, u64)>,
    {
        let mut counts = ChipCounts::new();
        for (denomination, count) in entries {
            if denomination == 0 {
                return Err(PlanError::InvalidDenomination(denomination));
            }
            if counts.insert(denomination, count).is_some() {
                return Err(PlanError::DuplicateDenomination(denomination));
            }
        }

        if counts.is_empty() {
            return Err(PlanError::EmptyInventory);
        }

        Ok(Self { counts })
    }

    /// The standard 6-denomination set
    pub fn standard() -> Self {
        Self {
            counts: STANDARD_INVENTORY.into_iter().collect(),
        }
    }

    /// Parse an inventory from a JSON object such as `{"5": 150, "25": 100}`
    pub fn from_json(json: &str) -> PlanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Denominations in ascending order
    pub fn denominations(&self) -> Vec<Denomination> {
        self.counts.keys().copied().collect()
    }

    /// Total physical count of a denomination (0 if absent)
    pub fn count(&self, denomination: Denomination) -> u64 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &ChipCounts {
        &self.counts
    }

    pub fn smallest(&self) -> Denomination {
        // Non-empty by construction
        self.counts.keys().next().copied().unwrap_or(1)
    }

    /// Greatest common divisor of all denominations
    pub fn base_unit(&self) -> Denomination {
        base_unit_of(self.counts.keys().copied())
    }

    /// Face value of every chip in the inventory
    pub fn total_value(&self) -> u64 {
        self.counts
            .iter()
            .map(|(&d, &c)| d.saturating_mul(c))
            .fold(0u64, u64::saturating_add)
    }
}

impl Default for ChipInventory {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<ChipCounts> for ChipInventory {
    type Error = PlanError;

    fn try_from(counts: ChipCounts) -> Result<Self, Self::Error> {
        Self::new(counts)
    }
}

impl From<ChipInventory> for ChipCounts {
    fn from(inventory: ChipInventory) -> Self {
        inventory.counts
    }
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b)).saturating_mul(b)
}

/// GCD of a set of denominations, 1 for an empty set.
pub fn base_unit_of<I>(denominations: I) -> Denomination
where
    I: IntoIterator<Item = Denomination>,
{
    match denominations.into_iter().fold(0, gcd) {
        0 => 1,
        unit => unit,
    }
}
