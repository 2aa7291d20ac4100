//! Meal queue grouping and manual reordering.
//!
//! Active meals split into two groups: **unscheduled** (no date, ordered by
//! queue position) and **scheduled** (ordered by calendar date). Both sorts
//! are stable, so ties keep their input order.
//!
//! A manual reorder is a single-element list move inside the unscheduled
//! group. Every item is renumbered to its 0-based index afterwards and only
//! the items whose position changed produce a [`PositionUpdate`]. Updates
//! carry absolute positions, so applying any subset of them again (after a
//! partial failure, in any order) converges on the same final order.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::access::Owned;
use crate::core::PlanError;
use crate::util::serde::{MealId, QueuePosition, UserId};

/// Lifecycle state of a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealStatus {
    /// Waiting in the queue.
    Queued,
    /// Proposed for a date but not confirmed.
    Proposed,
    /// Confirmed for a date.
    Scheduled,
    /// Already cooked.
    Cooked,
    /// Abandoned.
    Cancelled,
}

impl MealStatus {
    /// Whether the meal is still pending (not cooked or cancelled).
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Queued | Self::Proposed | Self::Scheduled)
    }
}

/// A schedulable meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealItem {
    /// Unique identifier.
    pub id: MealId,
    /// User who owns the meal.
    pub owner_id: Option<UserId>,
    /// Lifecycle state.
    pub status: MealStatus,
    /// Assigned calendar date; absent means unscheduled.
    pub scheduled_date: Option<NaiveDate>,
    /// Manual order among unscheduled meals.
    pub queue_position: Option<QueuePosition>,
}

impl MealItem {
    /// A queued, unscheduled meal at `position`.
    pub fn queued(id: impl Into<MealId>, position: QueuePosition) -> Self {
        Self {
            id: id.into(),
            owner_id: None,
            status: MealStatus::Queued,
            scheduled_date: None,
            queue_position: Some(position),
        }
    }

    /// A queued meal assigned to `date`.
    pub fn on_date(id: impl Into<MealId>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            owner_id: None,
            status: MealStatus::Queued,
            scheduled_date: Some(date),
            queue_position: None,
        }
    }

    /// Set the owner.
    #[must_use]
    pub fn owned_by(mut self, owner: impl Into<UserId>) -> Self {
        self.owner_id = Some(owner.into());
        self
    }

    /// Set the status.
    #[must_use]
    pub const fn with_status(mut self, status: MealStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the meal has no assigned date.
    #[must_use]
    pub const fn is_unscheduled(&self) -> bool {
        self.scheduled_date.is_none()
    }

    /// Move the meal into the scheduled group.
    pub fn assign_date(&mut self, date: NaiveDate) {
        self.scheduled_date = Some(date);
    }

    /// Move the meal back into the unscheduled group at `position`.
    pub fn clear_date(&mut self, position: QueuePosition) {
        self.scheduled_date = None;
        self.queue_position = Some(position);
    }
}

impl Owned for MealItem {
    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}

/// Active meals split into display groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueView {
    /// Undated meals, ascending by queue position.
    pub unscheduled: Vec<MealItem>,
    /// Dated meals, ascending by date.
    pub scheduled: Vec<MealItem>,
}

impl QueueView {
    /// Total number of meals across both groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unscheduled.len() + self.scheduled.len()
    }

    /// Whether both groups are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unscheduled.is_empty() && self.scheduled.is_empty()
    }

    /// Unscheduled meals followed by scheduled meals.
    pub fn iter(&self) -> impl Iterator<Item = &MealItem> {
        self.unscheduled.iter().chain(self.scheduled.iter())
    }

    /// Ids of the unscheduled group in display order.
    #[must_use]
    pub fn unscheduled_ids(&self) -> Vec<MealId> {
        self.unscheduled.iter().map(|m| m.id.clone()).collect()
    }
}

/// Partition meals into unscheduled and scheduled groups and sort each.
///
/// Unscheduled meals without a position sort after every positioned meal.
pub fn group_queue<I>(items: I) -> QueueView
where
    I: IntoIterator<Item = MealItem>,
{
    let (mut unscheduled, mut scheduled): (Vec<_>, Vec<_>) =
        items.into_iter().partition(MealItem::is_unscheduled);

    // `None` orders before `Some` for Option, so key on (is_none, position).
    unscheduled.sort_by_key(|m| (m.queue_position.is_none(), m.queue_position));
    scheduled.sort_by_key(|m| m.scheduled_date);

    QueueView {
        unscheduled,
        scheduled,
    }
}

/// A single drag-reorder inside the unscheduled group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOp {
    /// Meal being moved.
    pub meal_id: MealId,
    /// Index the meal currently occupies.
    pub from: usize,
    /// Index the meal should occupy after the move.
    pub to: usize,
}

impl MoveOp {
    /// Build a move.
    pub fn new(meal_id: impl Into<MealId>, from: usize, to: usize) -> Self {
        Self {
            meal_id: meal_id.into(),
            from,
            to,
        }
    }
}

/// Absolute position assignment for one meal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionUpdate {
    /// Meal to update.
    pub meal_id: MealId,
    /// New queue position.
    pub queue_position: QueuePosition,
}

/// Outcome of planning a reorder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderPlan {
    /// Unscheduled ids in their post-move order.
    pub order: Vec<MealId>,
    /// Position updates for every meal whose position changed.
    pub updates: Vec<PositionUpdate>,
}

impl ReorderPlan {
    /// Whether the plan changes nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.updates.is_empty()
    }
}

/// Plan a move within an ordered unscheduled sequence.
///
/// # Errors
///
/// [`PlanError::InvalidMove`] when either index is out of bounds and
/// [`PlanError::MoveMismatch`] when the meal at `from` is not `op.meal_id`.
pub fn reorder(unscheduled: &[MealItem], op: &MoveOp) -> Result<ReorderPlan, PlanError> {
    let len = unscheduled.len();
    for index in [op.from, op.to] {
        if index >= len {
            return Err(PlanError::InvalidMove { index, len });
        }
    }
    let moved = &unscheduled[op.from];
    if moved.id != op.meal_id {
        return Err(PlanError::MoveMismatch {
            expected: op.meal_id.clone(),
            found: moved.id.clone(),
        });
    }

    let mut order: Vec<&MealItem> = unscheduled.iter().collect();
    if op.from == op.to {
        return Ok(ReorderPlan {
            order: order.iter().map(|m| m.id.clone()).collect(),
            updates: Vec::new(),
        });
    }

    let item = order.remove(op.from);
    order.insert(op.to, item);

    let updates = order
        .iter()
        .zip(0..)
        .filter(|(m, pos)| m.queue_position != Some(*pos))
        .map(|(m, pos)| PositionUpdate {
            meal_id: m.id.clone(),
            queue_position: pos,
        })
        .collect();

    Ok(ReorderPlan {
        order: order.iter().map(|m| m.id.clone()).collect(),
        updates,
    })
}

/// Write absolute positions into `items`.
///
/// # Errors
///
/// [`PlanError::UnknownMeal`] if an update names a meal not in `items`.
/// Updates before the unknown one have already been applied.
pub fn apply_updates(items: &mut [MealItem], updates: &[PositionUpdate]) -> Result<(), PlanError> {
    for update in updates {
        let item = items
            .iter_mut()
            .find(|m| m.id == update.meal_id)
            .ok_or_else(|| PlanError::UnknownMeal(update.meal_id.clone()))?;
        item.queue_position = Some(update.queue_position);
    }
    Ok(())
}

/// Position for a meal appended to the end of the unscheduled queue.
#[must_use]
pub fn next_queue_position(items: &[MealItem]) -> QueuePosition {
    items
        .iter()
        .filter(|m| m.is_unscheduled())
        .filter_map(|m| m.queue_position)
        .max()
        .map_or(0, |max| max.saturating_add(1))
}

/// Ensure no two unscheduled meals share a queue position.
///
/// # Errors
///
/// [`PlanError::DuplicatePosition`] with the first repeated position.
pub fn check_unique_positions(items: &[MealItem]) -> Result<(), PlanError> {
    let mut seen = HashSet::new();
    for pos in items
        .iter()
        .filter(|m| m.is_unscheduled())
        .filter_map(|m| m.queue_position)
    {
        if !seen.insert(pos) {
            return Err(PlanError::DuplicatePosition(pos));
        }
    }
    Ok(())
}
