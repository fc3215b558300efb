//! Rounding policies for blind amounts.
//!
//! Both policies return a positive multiple of the base unit so every blind
//! can be paid with the inventory's chips.

use enum_dispatch::enum_dispatch;
use std::fmt;
use std::str::FromStr;

use crate::capacity::round_down;
use crate::errors::PlanError;
use crate::inventory::{Denomination, base_unit_of};

/// Turns a raw blind amount into a clean, payable value
#[enum_dispatch]
pub trait BlindRounding {
    /// `denominations` must be ascending.
    fn round_blind(&self, amount: u64, denominations: &[Denomination]) -> u64;
}

/// Floor to two significant digits (1234 -> 1200), then down to a base-unit
/// multiple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoSignificantDigits;

impl BlindRounding for TwoSignificantDigits {
    fn round_blind(&self, amount: u64, denominations: &[Denomination]) -> u64 {
        let base = base_unit_of(denominations.iter().copied());
        let floored = if amount < 100 {
            amount
        } else {
            let magnitude = 10u64.pow(amount.ilog10() - 1);
            round_down(amount, magnitude)
        };
        round_down(floored, base).max(base)
    }
}

/// Round half-up to the nearest multiple of the largest denomination that
/// is at most a tenth of the amount (the base unit for small amounts).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearestPayable;

impl BlindRounding for NearestPayable {
    fn round_blind(&self, amount: u64, denominations: &[Denomination]) -> u64 {
        let base = base_unit_of(denominations.iter().copied());
        let step = denominations
            .iter()
            .rev()
            .copied()
            .find(|&d| d.saturating_mul(10) <= amount)
            .unwrap_or(base);
        let rounded = (amount.saturating_add(step / 2) / step).saturating_mul(step);
        rounded.max(base)
    }
}

#[enum_dispatch(BlindRounding)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingPolicy {
    TwoSignificantDigits(TwoSignificantDigits),
    NearestPayable(NearestPayable),
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        NearestPayable.into()
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingPolicy::TwoSignificantDigits(_) => write!(f, "two-significant-digits"),
            RoundingPolicy::NearestPayable(_) => write!(f, "nearest-payable"),
        }
    }
}

impl FromStr for RoundingPolicy {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "two-significant-digits" | "sig2" => Ok(TwoSignificantDigits.into()),
            "nearest-payable" | "payable" => Ok(NearestPayable.into()),
            other => Err(PlanError::InvalidRounding(other.to_string())),
        }
    }
}
