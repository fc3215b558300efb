//! Planner error types.

use thiserror::Error;

/// Configuration errors rejected before any generation or solving begins.
///
/// Infeasible targets and exhausted capacity are not errors; they surface
/// through [`crate::distribution::Allocation`] instead.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Inventory holds no denominations
    #[error("Chip inventory is empty")]
    EmptyInventory,

    /// Denominations must be positive
    #[error("Invalid denomination: {0}")]
    InvalidDenomination(u64),

    /// A denomination appeared more than once
    #[error("Duplicate denomination: {0}")]
    DuplicateDenomination(u64),

    /// `players × (reentries + 1)` evaluated to less than one entry
    #[error("Invalid entry count: {players} players with {reentries} re-entries")]
    InvalidEntries { players: u32, reentries: u32 },

    /// Capacity was asked to split the inventory across zero entries
    #[error("Invalid max entries: {0}")]
    InvalidMaxEntries(u64),

    /// Blind generation needs a positive starting stack
    #[error("Invalid starting stack: {0}")]
    InvalidStartingStack(u64),

    /// Starting depth must be at least one big blind
    #[error("Invalid starting depth: {0} big blinds")]
    InvalidStartingDepth(u64),

    /// Speed name has no profile in the speed table
    #[error("Unknown speed: {0}")]
    UnknownSpeed(String),

    /// Rounding policy name not recognized
    #[error("Unknown rounding policy: {0}")]
    InvalidRounding(String),

    /// Inventory or speed table could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlanError {
    /// Whether the error stems from operator-supplied configuration rather
    /// than from request parameters.
    pub fn is_operator_config(&self) -> bool {
        matches!(
            self,
            PlanError::EmptyInventory
                | PlanError::InvalidDenomination(_)
                | PlanError::DuplicateDenomination(_)
                | PlanError::Serialization(_)
        )
    }
}

/// Result type for planner operations
pub type PlanResult<T> = Result<T, PlanError>;
