//! Chip inventory: the operator's physical chip set.
//!
//! The inventory is immutable configuration. Everything downstream
//! (capacity, liquidity, distribution) reads it and never mutates it.

pub mod models;

pub use models::{
    ChipCounts, ChipInventory, Denomination, STANDARD_INVENTORY, base_unit_of, gcd, lcm,
};
