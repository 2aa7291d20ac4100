//! Storage seam for fetching meals and persisting position changes.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::queue::{MealItem, MealStatus, PositionUpdate};
use crate::core::PlanError;
use crate::util::serde::MealId;

/// Backend holding meals.
///
/// Implementations filter by owner and status themselves; callers never see
/// meals outside the requested set.
#[async_trait]
pub trait MealStore: Send + Sync {
    /// Meals owned by `owner` whose status is in `statuses`.
    async fn list_meals(
        &self,
        owner: &str,
        statuses: &[MealStatus],
    ) -> Result<Vec<MealItem>, PlanError>;

    /// Fetch a single meal.
    async fn get_meal(&self, meal_id: &str) -> Result<Option<MealItem>, PlanError>;

    /// Insert or overwrite a meal.
    async fn save_meal(&self, meal: MealItem) -> Result<(), PlanError>;

    /// Set the absolute queue position of one meal.
    async fn update_position(&self, update: &PositionUpdate) -> Result<(), PlanError>;
}

/// Retry behaviour for per-meal position updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Attempts per update, including the first.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(50),
        }
    }
}

/// Per-meal result of applying a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Meals whose position was written.
    pub applied: Vec<MealId>,
    /// Meals that still failed after all attempts, with the last error.
    pub failed: Vec<(MealId, String)>,
}

impl BatchOutcome {
    /// Whether every update was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Updates that should be retried later.
    #[must_use]
    pub fn pending<'a>(&self, updates: &'a [PositionUpdate]) -> Vec<&'a PositionUpdate> {
        updates
            .iter()
            .filter(|u| self.failed.iter().any(|(id, _)| *id == u.meal_id))
            .collect()
    }
}

/// Write every update, one call per meal, retrying each independently.
///
/// Partial failure is reported in the outcome rather than raised. Updates are
/// absolute, so re-running the whole batch or only [`BatchOutcome::pending`]
/// is safe.
pub async fn apply_batch<S>(
    store: &S,
    updates: &[PositionUpdate],
    retry: &RetryPolicy,
) -> BatchOutcome
where
    S: MealStore + ?Sized,
{
    let mut outcome = BatchOutcome::default();
    let attempts = retry.max_attempts.max(1);

    for update in updates {
        let mut last_err = None;
        for attempt in 1..=attempts {
            match store.update_position(update).await {
                Ok(()) => {
                    last_err = None;
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        meal_id = %update.meal_id,
                        attempt,
                        "position update failed: {}",
                        e
                    );
                    last_err = Some(e.to_string());
                    if attempt < attempts {
                        pause(retry.backoff).await;
                    }
                }
            }
        }
        match last_err {
            None => outcome.applied.push(update.meal_id.clone()),
            Some(err) => outcome.failed.push((update.meal_id.clone(), err)),
        }
    }

    tracing::info!(
        applied = outcome.applied.len(),
        failed = outcome.failed.len(),
        "position batch applied"
    );
    outcome
}

#[cfg(feature = "tokio-runtime")]
async fn pause(backoff: Duration) {
    if !backoff.is_zero() {
        tokio::time::sleep(backoff).await;
    }
}

#[cfg(not(feature = "tokio-runtime"))]
#[allow(clippy::unused_async)]
async fn pause(_backoff: Duration) {}
