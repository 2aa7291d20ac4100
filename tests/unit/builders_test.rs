//! Tests for builder modules

use std::collections::HashMap;

use meal_queue_core::builders::{build_audit_sink, build_planner, build_planner_from_lookup};
use meal_queue_core::config::{AuditBackendConfig, AuditConfig, PlannerConfig};
use meal_queue_core::core::{MealItem, MealStatus, MoveOp, PlanError, Principal};
use meal_queue_core::infra::InMemoryMealStore;

#[test]
fn test_build_planner_copies_settings() {
    let cfg = PlannerConfig {
        active_statuses: vec![MealStatus::Queued, MealStatus::Proposed],
        ..PlannerConfig::default()
    };
    let planner = build_planner(&cfg, InMemoryMealStore::new()).unwrap();
    assert_eq!(planner.settings().active_statuses.len(), 2);
    assert_eq!(planner.settings().retry.max_attempts, cfg.retry.max_attempts);
}

#[test]
fn test_build_planner_rejects_invalid_config() {
    let cfg = PlannerConfig {
        active_statuses: Vec::new(),
        ..PlannerConfig::default()
    };
    assert!(matches!(
        build_planner(&cfg, InMemoryMealStore::new()),
        Err(PlanError::Backend(_))
    ));
}

#[test]
fn test_build_audit_sink_selection() {
    let disabled = AuditConfig {
        backend: AuditBackendConfig::Disabled,
        buffer: 0,
    };
    assert!(build_audit_sink(&disabled).is_none());
    assert!(build_audit_sink(&AuditConfig::default()).is_some());
}

#[tokio::test]
async fn test_built_planner_reads_store() {
    let store = InMemoryMealStore::with_meals(vec![MealItem::queued("a", 0).owned_by("u1")]);
    let planner = build_planner(&PlannerConfig::default(), store).unwrap();
    let view = planner.queue_view("u1").await.unwrap();
    assert_eq!(view.unscheduled_ids(), ["a"]);
}

#[tokio::test]
async fn test_in_memory_audit_is_readable_from_built_planner() {
    let cfg = PlannerConfig {
        audit: AuditConfig {
            backend: AuditBackendConfig::InMemory,
            buffer: 16,
        },
        ..PlannerConfig::default()
    };
    let store = InMemoryMealStore::with_meals(vec![
        MealItem::queued("a", 0).owned_by("u1"),
        MealItem::queued("b", 1).owned_by("u1"),
    ]);
    let planner = build_planner(&cfg, store).unwrap();
    assert!(planner.audit_events().is_empty());

    planner
        .reorder(&Principal::user("u1"), "u1", &MoveOp::new("a", 0, 1))
        .await
        .unwrap();
    let _ = planner
        .reorder(&Principal::user("u2"), "u1", &MoveOp::new("b", 0, 1))
        .await;

    let events = planner.audit_events();
    let actions: Vec<_> = events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, ["reorder", "deny"]);
    assert_eq!(events[1].actor.as_deref(), Some("u2"));
}

#[tokio::test]
async fn test_tracing_audit_retains_nothing() {
    let store = InMemoryMealStore::with_meals(vec![MealItem::queued("a", 0).owned_by("u1")]);
    let planner = build_planner(&PlannerConfig::default(), store).unwrap();
    let _ = planner
        .reorder(&Principal::user("u2"), "u1", &MoveOp::new("a", 0, 0))
        .await;
    assert!(planner.audit_events().is_empty());
}

#[tokio::test]
async fn test_build_planner_from_lookup() {
    let vars: HashMap<&str, &str> = [
        ("MEAL_QUEUE_MAX_ATTEMPTS", "2"),
        ("MEAL_QUEUE_AUDIT_BACKEND", "in_memory"),
    ]
    .into_iter()
    .collect();
    let store = InMemoryMealStore::with_meals(vec![MealItem::queued("a", 0).owned_by("u1")]);
    let planner =
        build_planner_from_lookup(|k| vars.get(k).map(|v| (*v).to_string()), store).unwrap();
    assert_eq!(planner.settings().retry.max_attempts, 2);

    let _ = planner
        .reorder(&Principal::user("u2"), "u1", &MoveOp::new("a", 0, 0))
        .await;
    assert_eq!(planner.audit_events().len(), 1);
}

#[test]
fn test_build_planner_from_lookup_reports_bad_variable() {
    let err = build_planner_from_lookup(
        |k| (k == "MEAL_QUEUE_MAX_ATTEMPTS").then(|| "lots".to_string()),
        InMemoryMealStore::new(),
    )
    .err()
    .unwrap();
    let message = format!("{err:#}");
    assert!(message.contains("loading planner configuration"));
    assert!(message.contains("MEAL_QUEUE_MAX_ATTEMPTS"));
}
