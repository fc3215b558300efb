//! Blind structure generation.
//!
//! This module provides:
//! - Level and schedule models with pass-through speed timing
//! - The operator speed table
//! - Swappable rounding policies dispatched through [`BlindRounding`]
//! - The bounded [`BlindStructureGenerator`]
//!
//! ## Example
//!
//! ```
//! use tourney_planner::blinds::{BlindStructureGenerator, SpeedTable, TournamentSpeed};
//! use tourney_planner::inventory::ChipInventory;
//!
//! let generator = BlindStructureGenerator::new(&ChipInventory::standard(), SpeedTable::standard());
//! let structure = generator
//!     .generate(10_000, TournamentSpeed::Normal, 50, 1.25, 6)
//!     .unwrap();
//!
//! assert_eq!(structure.levels[0].big_blind, 200);
//! assert_eq!(structure.levels[5].ante, structure.levels[5].big_blind);
//! ```

pub mod generator;
pub mod models;
pub mod rounding;

pub use generator::{BlindStructureGenerator, MAX_LEVELS, STOP_STACK_MULTIPLE};
pub use models::{
    BlindLevel, BlindStructure, HYPER_INCREASE_RATE, NORMAL_INCREASE_RATE, SLOW_INCREASE_RATE,
    SpeedProfile, SpeedTable, TURBO_INCREASE_RATE, TournamentSpeed,
};
pub use rounding::{BlindRounding, NearestPayable, RoundingPolicy, TwoSignificantDigits};
