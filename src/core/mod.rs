//! Core rules: edit permissions, queue ordering, and the planner service.

pub mod access;
pub mod audit;
pub mod error;
pub mod paging;
pub mod planner;
pub mod queue;
pub mod store;

pub use access::{compute_can_edit, decide, AccessDecision, AccessPath, Owned, Principal, Resource};
pub use audit::{build_audit_event, AuditEvent, AuditSink, InMemoryAuditSink, TracingAuditSink};
pub use error::{AppResult, PlanError};
pub use paging::{Keyed, Page, PageAccumulator};
pub use planner::{MealPlanner, PlannerSettings, ReorderReport};
pub use queue::{
    apply_updates, check_unique_positions, group_queue, next_queue_position, reorder, MealItem,
    MealStatus, MoveOp, PositionUpdate, QueueView, ReorderPlan,
};
pub use store::{apply_batch, BatchOutcome, MealStore, RetryPolicy};
