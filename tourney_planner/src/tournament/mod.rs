//! Tournament planning: the single entry point for calling layers.
//!
//! This module provides:
//! - Request parameters with defaults
//! - Full pipeline orchestration (capacity, stack, blinds, liquidity, solver)
//! - A serializable plan for presentation or persistence
//!
//! ## Example
//!
//! ```
//! use tourney_planner::tournament::{PlanRequest, TournamentPlanner};
//!
//! let planner = TournamentPlanner::default();
//!
//! // 16 players, no re-entries: the planner picks the stack
//! let plan = planner.plan(&PlanRequest::new(16, 0)).unwrap();
//!
//! assert_eq!(plan.starting_stack, 2300);
//! assert!(plan.is_exact());
//! ```

pub mod manager;
pub mod models;

pub use manager::TournamentPlanner;
pub use models::{DEFAULT_ANTE_START_LEVEL, DEFAULT_STARTING_DEPTH_BB, PlanRequest, TournamentPlan};
