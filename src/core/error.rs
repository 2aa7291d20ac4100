//! Error types for queue planning and access checks.

use thiserror::Error;

use crate::util::serde::{MealId, QueuePosition};

/// Errors produced by the planning rules and the planner service.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A move referenced an index outside the unscheduled sequence.
    #[error("invalid move: index {index} out of bounds for queue of length {len}")]
    InvalidMove {
        /// Offending index.
        index: usize,
        /// Length of the sequence the move was applied to.
        len: usize,
    },
    /// The meal at the origin index is not the one the move names.
    #[error("move mismatch: expected meal `{expected}` at origin, found `{found}`")]
    MoveMismatch {
        /// Meal id carried by the move.
        expected: MealId,
        /// Meal id actually found at the origin index.
        found: MealId,
    },
    /// A position update or lookup referenced a meal that is not present.
    #[error("unknown meal: {0}")]
    UnknownMeal(MealId),
    /// Two unscheduled meals share the same queue position.
    #[error("duplicate queue position: {0}")]
    DuplicatePosition(QueuePosition),
    /// The acting principal may not edit the target resource.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// The request contradicts stored state, such as a change of owner.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Store-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
