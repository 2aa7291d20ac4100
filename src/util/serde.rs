//! Identifier types shared across the crate and its wire models.

/// Identifier of a user account.
pub type UserId = String;

/// Identifier of a meal (the schedulable queue item).
pub type MealId = String;

/// Integer position of an unscheduled meal in its owner's queue. Lower sorts first.
pub type QueuePosition = i64;
