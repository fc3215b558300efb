//! # Tourney Planner
//!
//! Blind structure generation and exact per-entry chip distribution for
//! poker tournaments played with a physical, finite chip set.
//!
//! Everything here is a pure, deterministic function of its inputs. The chip
//! inventory and speed table are immutable configuration handed in by the
//! caller; nothing is cached or shared between calls.
//!
//! ## Pipeline
//!
//! - **Capacity**: per-entry ceilings `floor(inventory[d] / max_entries)`
//! - **Stack selection**: the largest clean stack every entry can receive
//! - **Blinds**: a bounded, strictly increasing level schedule
//! - **Liquidity**: small-chip floors derived from the early levels
//! - **Distribution**: a phased repair solver hitting the stack exactly
//!
//! ## Core Modules
//!
//! - [`inventory`]: chip set configuration
//! - [`blinds`]: level models, speed table, rounding policies, generator
//! - [`distribution`]: distribution models and the solver
//! - [`tournament`]: the [`TournamentPlanner`] tying it all together
//!
//! ## Example
//!
//! ```
//! use tourney_planner::{PlanRequest, TournamentPlanner};
//!
//! let planner = TournamentPlanner::default();
//! let plan = planner
//!     .plan(&PlanRequest::new(16, 0).with_starting_stack(2300))
//!     .unwrap();
//!
//! assert_eq!(plan.distribution().total(), 2300);
//! ```

pub mod blinds;
pub mod capacity;
pub mod distribution;
pub mod errors;
pub mod inventory;
pub mod liquidity;
pub mod stack;
pub mod tournament;

pub use blinds::{BlindLevel, BlindStructure, RoundingPolicy, SpeedTable, TournamentSpeed};
pub use capacity::{Capacity, capacity, max_entries};
pub use distribution::{Allocation, Distribution, solve};
pub use errors::{PlanError, PlanResult};
pub use inventory::ChipInventory;
pub use liquidity::{LiquidityPolicy, min_liquidity};
pub use stack::select_stack;
pub use tournament::{PlanRequest, TournamentPlan, TournamentPlanner};
