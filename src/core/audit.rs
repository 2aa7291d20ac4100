//! Audit trail for edit decisions and queue mutations.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::util::clock::now_ms;

/// Audit event structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Event identifier.
    pub event_id: String,
    /// Acting user, if authenticated.
    pub actor: Option<String>,
    /// Owner of the affected queue or resource.
    pub owner: Option<String>,
    /// Affected meal, when the event concerns a single meal.
    pub meal_id: Option<String>,
    /// Action taken (reorder, enqueue, schedule, unschedule, deny).
    pub action: String,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
    /// Additional context.
    pub payload: Option<String>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);

    /// Retained events, oldest first. Sinks that forward events elsewhere
    /// retain nothing.
    fn events(&self) -> Vec<AuditEvent> {
        Vec::new()
    }
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }
}

/// Audit sink that forwards events to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&mut self, event: AuditEvent) {
        tracing::info!(
            event_id = %event.event_id,
            actor = ?event.actor,
            owner = ?event.owner,
            meal_id = ?event.meal_id,
            action = %event.action,
            payload = ?event.payload,
            "audit"
        );
    }
}

/// Build an audit event with a fresh v4 id and the current timestamp.
pub fn build_audit_event(
    actor: Option<&str>,
    owner: Option<&str>,
    meal_id: Option<&str>,
    action: impl Into<String>,
    payload: Option<String>,
) -> AuditEvent {
    AuditEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        actor: actor.map(str::to_owned),
        owner: owner.map(str::to_owned),
        meal_id: meal_id.map(str::to_owned),
        action: action.into(),
        created_at_ms: now_ms(),
        payload,
    }
}

impl<S> AuditSink for std::sync::Arc<parking_lot::Mutex<S>>
where
    S: AuditSink + ?Sized,
{
    fn record(&mut self, event: AuditEvent) {
        self.lock().record(event);
    }

    fn events(&self) -> Vec<AuditEvent> {
        self.lock().events()
    }
}
