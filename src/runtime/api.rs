//! API-facing request/response models.

use serde::{Deserialize, Serialize};

use crate::core::{
    decide, AccessPath, MealItem, MealPlanner, MealStore, MoveOp, PositionUpdate, Principal,
};
use crate::util::serde::{MealId, UserId};

/// Edit-permission query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditCheckRequest {
    /// Acting principal.
    pub principal: Principal,
    /// Owner of the resource being edited.
    pub resource_owner_id: Option<UserId>,
}

/// Edit-permission answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCheckResponse {
    /// Whether editing is allowed.
    pub can_edit: bool,
    /// Branch of the rule that decided.
    pub path: AccessPath,
}

/// Drag-reorder submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    /// Owner of the queue.
    pub owner_id: UserId,
    /// Meal being moved.
    pub meal_id: MealId,
    /// Current index in the unscheduled group.
    pub from_index: usize,
    /// Target index in the unscheduled group.
    pub to_index: usize,
}

/// Grouped queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueViewResponse {
    /// Undated meals in queue order.
    pub unscheduled: Vec<MealItem>,
    /// Dated meals in calendar order.
    pub scheduled: Vec<MealItem>,
}

/// Reorder result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderResponse {
    /// Position updates issued.
    pub updates: Vec<PositionUpdate>,
    /// Meals whose update failed; the client should resync.
    pub failed: Vec<MealId>,
    /// Queue as stored after the batch.
    pub queue: QueueViewResponse,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Answer an edit-permission query.
#[must_use]
pub fn check_edit(req: &EditCheckRequest) -> EditCheckResponse {
    let decision = decide(&req.principal, req.resource_owner_id.as_deref());
    EditCheckResponse {
        can_edit: decision.allowed,
        path: decision.path,
    }
}

/// Fetch the grouped queue of `owner_id`.
///
/// # Errors
///
/// The store error, rendered as a string.
pub async fn queue_view<S>(
    planner: &MealPlanner<S>,
    owner_id: &str,
) -> Result<QueueViewResponse, String>
where
    S: MealStore,
{
    let view = planner.queue_view(owner_id).await.map_err(|e| e.to_string())?;
    Ok(QueueViewResponse {
        unscheduled: view.unscheduled,
        scheduled: view.scheduled,
    })
}

/// Apply a drag-reorder on behalf of `principal`.
///
/// # Errors
///
/// Permission, validation, or store errors rendered as strings.
pub async fn reorder_queue<S>(
    planner: &MealPlanner<S>,
    principal: &Principal,
    req: ReorderRequest,
) -> Result<ReorderResponse, String>
where
    S: MealStore,
{
    let op = MoveOp::new(req.meal_id, req.from_index, req.to_index);
    let report = planner
        .reorder(principal, &req.owner_id, &op)
        .await
        .map_err(|e| e.to_string())?;
    Ok(ReorderResponse {
        updates: report.plan.updates,
        failed: report.outcome.failed.into_iter().map(|(id, _)| id).collect(),
        queue: QueueViewResponse {
            unscheduled: report.view.unscheduled,
            scheduled: report.view.scheduled,
        },
    })
}

/// Return a health payload.
#[must_use]
pub const fn health() -> Health {
    Health { ok: true }
}
