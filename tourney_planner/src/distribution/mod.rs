//! Per-entry chip distribution.
//!
//! This module provides:
//! - The [`Distribution`] handed to each entry
//! - The [`Allocation`] result with its residual and clamped floors
//! - The phased repair [`solve`]r
//! - A bounded exact change search backing both the solver and stack selection
//!
//! ## Example
//!
//! ```
//! use tourney_planner::capacity::capacity;
//! use tourney_planner::distribution::solve;
//! use tourney_planner::inventory::{ChipCounts, ChipInventory};
//!
//! let cap = capacity(&ChipInventory::standard(), 16).unwrap();
//! let alloc = solve(2300, &cap.per_entry_cap, &ChipCounts::new());
//!
//! assert!(alloc.is_exact());
//! assert_eq!(alloc.distribution.total(), 2300);
//! ```

pub mod change;
pub mod models;
pub mod solver;

pub use change::{EXACT_SEARCH_LIMIT, largest_exact_stack};
pub use models::{Allocation, Distribution};
pub use solver::{EXCHANGE_SEARCH_LIMIT, MAX_REPAIR_PASSES, solve};
