//! Planner service combining the edit rule, queue ordering, and a store.

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::access::{decide, Principal};
use crate::core::queue::{
    check_unique_positions, group_queue, next_queue_position, reorder, MealItem, MealStatus,
    MoveOp, QueueView, ReorderPlan,
};
use crate::core::store::{apply_batch, BatchOutcome, MealStore, RetryPolicy};
use crate::core::{build_audit_event, AuditEvent, AuditSink, PlanError};

/// Values the planner needs from configuration.
#[derive(Debug, Clone)]
pub struct PlannerSettings {
    /// Statuses fetched as the active queue.
    pub active_statuses: Vec<MealStatus>,
    /// Retry policy for position batches.
    pub retry: RetryPolicy,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            active_statuses: vec![MealStatus::Queued],
            retry: RetryPolicy::default(),
        }
    }
}

/// Result of a reorder request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderReport {
    /// Planned order and position updates.
    pub plan: ReorderPlan,
    /// What the store accepted.
    pub outcome: BatchOutcome,
    /// Queue re-read from the store after the batch.
    pub view: QueueView,
}

/// Meal queue service.
///
/// Every mutation checks the edit rule first, works from a fresh snapshot of
/// the store, and re-reads the queue after writing.
pub struct MealPlanner<S> {
    settings: PlannerSettings,
    store: Arc<S>,
    audit: Option<Arc<Mutex<Box<dyn AuditSink>>>>,
}

impl<S> Clone for MealPlanner<S> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            store: Arc::clone(&self.store),
            audit: self.audit.clone(),
        }
    }
}

impl<S> MealPlanner<S>
where
    S: MealStore,
{
    /// Create a planner over `store`.
    pub fn new(settings: PlannerSettings, store: S) -> Self {
        Self::with_shared_store(settings, Arc::new(store))
    }

    /// Create a planner over a store shared with other owners.
    pub const fn with_shared_store(settings: PlannerSettings, store: Arc<S>) -> Self {
        Self {
            settings,
            store,
            audit: None,
        }
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(Arc::new(Mutex::new(audit)));
        self
    }

    /// Planner settings.
    pub const fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Underlying store.
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Snapshot of the attached audit sink, empty when none is attached or
    /// the sink does not retain events.
    #[must_use]
    pub fn audit_events(&self) -> Vec<AuditEvent> {
        self.audit
            .as_ref()
            .map(|audit| audit.lock().events())
            .unwrap_or_default()
    }

    /// Active meals of `owner`, grouped and sorted.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn queue_view(&self, owner: &str) -> Result<QueueView, PlanError> {
        let meals = self
            .store
            .list_meals(owner, &self.settings.active_statuses)
            .await?;
        Ok(group_queue(meals))
    }

    /// Append `meal` to the end of its owner's unscheduled queue.
    ///
    /// Re-enqueueing a stored meal is checked against the stored owner, and
    /// its owner cannot be changed this way.
    ///
    /// # Errors
    ///
    /// [`PlanError::Forbidden`] if the principal may not edit the meal or the
    /// meal has no owner, [`PlanError::Conflict`] if the meal exists under a
    /// different owner; store failures otherwise.
    pub async fn add_to_queue(
        &self,
        principal: &Principal,
        mut meal: MealItem,
    ) -> Result<MealItem, PlanError> {
        let owner = meal
            .owner_id
            .clone()
            .ok_or_else(|| PlanError::Forbidden("queued meals must have an owner".into()))?;

        if let Some(stored) = self.store.get_meal(&meal.id).await? {
            self.ensure_can_edit(
                principal,
                stored.owner_id.as_deref(),
                Some(meal.id.as_str()),
                "enqueue",
            )?;
            if stored.owner_id.as_deref() != Some(owner.as_str()) {
                tracing::warn!(meal_id = %meal.id, "enqueue would change meal owner");
                return Err(PlanError::Conflict(format!(
                    "meal {} is owned by {}",
                    meal.id,
                    stored.owner_id.as_deref().unwrap_or("nobody")
                )));
            }
        }
        self.ensure_can_edit(
            principal,
            Some(owner.as_str()),
            Some(meal.id.as_str()),
            "enqueue",
        )?;

        let current = self
            .store
            .list_meals(&owner, &self.settings.active_statuses)
            .await?;
        let others: Vec<_> = current.into_iter().filter(|m| m.id != meal.id).collect();
        meal.status = MealStatus::Queued;
        meal.clear_date(next_queue_position(&others));
        self.store.save_meal(meal.clone()).await?;

        tracing::info!(meal_id = %meal.id, position = ?meal.queue_position, "meal queued");
        self.record(
            principal,
            Some(owner.as_str()),
            Some(meal.id.as_str()),
            "enqueue",
            None,
        );
        Ok(meal)
    }

    /// Assign a date to a meal, or clear it with `None`.
    ///
    /// Clearing a date places the meal at the end of the unscheduled queue.
    ///
    /// # Errors
    ///
    /// [`PlanError::UnknownMeal`], [`PlanError::Forbidden`], or store failures.
    pub async fn set_date(
        &self,
        principal: &Principal,
        meal_id: &str,
        date: Option<NaiveDate>,
    ) -> Result<MealItem, PlanError> {
        let mut meal = self
            .store
            .get_meal(meal_id)
            .await?
            .ok_or_else(|| PlanError::UnknownMeal(meal_id.to_owned()))?;
        let owner = meal.owner_id.clone();
        let action = if date.is_some() { "schedule" } else { "unschedule" };
        self.ensure_can_edit(principal, owner.as_deref(), Some(meal_id), action)?;

        match date {
            Some(date) => meal.assign_date(date),
            None if meal.is_unscheduled() => {}
            None => {
                let current = match owner.as_deref() {
                    Some(owner) => {
                        self.store
                            .list_meals(owner, &self.settings.active_statuses)
                            .await?
                    }
                    None => Vec::new(),
                };
                meal.clear_date(next_queue_position(&current));
            }
        }
        self.store.save_meal(meal.clone()).await?;

        self.record(
            principal,
            owner.as_deref(),
            Some(meal_id),
            action,
            date.map(|d| d.to_string()),
        );
        Ok(meal)
    }

    /// Move one unscheduled meal of `owner` and persist the new positions.
    ///
    /// The move is planned against a fresh snapshot. Failed position writes
    /// are reported in [`ReorderReport::outcome`], and the returned view is
    /// re-read from the store either way.
    ///
    /// # Errors
    ///
    /// [`PlanError::Forbidden`], [`PlanError::InvalidMove`],
    /// [`PlanError::MoveMismatch`], or store failures while reading.
    pub async fn reorder(
        &self,
        principal: &Principal,
        owner: &str,
        op: &MoveOp,
    ) -> Result<ReorderReport, PlanError> {
        self.ensure_can_edit(
            principal,
            Some(owner),
            Some(op.meal_id.as_str()),
            "reorder",
        )?;

        let snapshot = self.queue_view(owner).await?;
        if let Err(e) = check_unique_positions(&snapshot.unscheduled) {
            tracing::warn!(owner, "queue positions not unique before reorder: {}", e);
        }

        let plan = reorder(&snapshot.unscheduled, op)?;
        if plan.is_noop() {
            tracing::debug!(meal_id = %op.meal_id, "reorder is a no-op");
            return Ok(ReorderReport {
                plan,
                outcome: BatchOutcome::default(),
                view: snapshot,
            });
        }

        let outcome = apply_batch(self.store.as_ref(), &plan.updates, &self.settings.retry).await;
        if !outcome.is_complete() {
            tracing::warn!(
                owner,
                failed = outcome.failed.len(),
                "reorder partially applied"
            );
        }
        self.record(
            principal,
            Some(owner),
            Some(op.meal_id.as_str()),
            "reorder",
            Some(format!(
                "from={} to={} applied={} failed={}",
                op.from,
                op.to,
                outcome.applied.len(),
                outcome.failed.len()
            )),
        );

        let view = self.queue_view(owner).await?;
        Ok(ReorderReport {
            plan,
            outcome,
            view,
        })
    }

    fn ensure_can_edit(
        &self,
        principal: &Principal,
        owner: Option<&str>,
        meal_id: Option<&str>,
        action: &str,
    ) -> Result<(), PlanError> {
        let decision = decide(principal, owner);
        if decision.allowed {
            tracing::debug!(action, path = ?decision.path, "edit allowed");
            return Ok(());
        }
        tracing::warn!(
            action,
            actor = ?principal.current_user_id,
            owner = ?owner,
            "edit denied"
        );
        self.record(principal, owner, meal_id, "deny", Some(action.to_owned()));
        Err(PlanError::Forbidden(format!(
            "{action} not permitted on resource owned by {}",
            owner.unwrap_or("nobody")
        )))
    }

    fn record(
        &self,
        principal: &Principal,
        owner: Option<&str>,
        meal_id: Option<&str>,
        action: &str,
        payload: Option<String>,
    ) {
        if let Some(audit) = self.audit.as_ref() {
            audit.lock().record(build_audit_event(
                principal.current_user_id.as_deref(),
                owner,
                meal_id,
                action,
                payload,
            ));
        }
    }
}
