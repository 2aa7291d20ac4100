//! Tests for configuration validation

use std::collections::HashMap;
use std::time::Duration;

use meal_queue_core::config::{AuditBackendConfig, PlannerConfig, RetryConfig};
use meal_queue_core::core::MealStatus;

#[test]
fn test_default_config_is_valid() {
    let cfg = PlannerConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.active_statuses, vec![MealStatus::Queued]);
}

#[test]
fn test_empty_statuses_rejected() {
    let cfg = PlannerConfig {
        active_statuses: Vec::new(),
        ..PlannerConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_finished_status_rejected() {
    let cfg = PlannerConfig {
        active_statuses: vec![MealStatus::Queued, MealStatus::Cooked],
        ..PlannerConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_zero_attempts_rejected() {
    let cfg = PlannerConfig {
        retry: RetryConfig {
            max_attempts: 0,
            backoff_ms: 10,
        },
        ..PlannerConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_retry_policy_conversion() {
    let policy = RetryConfig {
        max_attempts: 4,
        backoff_ms: 250,
    }
    .policy();
    assert_eq!(policy.max_attempts, 4);
    assert_eq!(policy.backoff, Duration::from_millis(250));
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "active_statuses": ["queued", "proposed"],
        "retry": { "max_attempts": 5, "backoff_ms": 10 },
        "audit": { "backend": "in_memory", "buffer": 32 }
    }"#;

    let cfg = PlannerConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.active_statuses, vec![MealStatus::Queued, MealStatus::Proposed]);
    assert_eq!(cfg.retry.max_attempts, 5);
    assert_eq!(cfg.audit.backend, AuditBackendConfig::InMemory);
}

#[test]
fn test_config_from_json_defaults_missing_sections() {
    let cfg = PlannerConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, PlannerConfig::default());
}

#[test]
fn test_config_from_json_rejects_garbage() {
    assert!(PlannerConfig::from_json_str("not json").is_err());
    assert!(PlannerConfig::from_json_str(r#"{"active_statuses": []}"#).is_err());
}

#[test]
fn test_config_from_lookup() {
    let vars: HashMap<&str, &str> = [
        ("MEAL_QUEUE_MAX_ATTEMPTS", "7"),
        ("MEAL_QUEUE_BACKOFF_MS", " 5 "),
        ("MEAL_QUEUE_AUDIT_BUFFER", "64"),
    ]
    .into_iter()
    .collect();
    let cfg = PlannerConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string())).unwrap();
    assert_eq!(cfg.retry.max_attempts, 7);
    assert_eq!(cfg.retry.backoff_ms, 5);
    assert_eq!(cfg.audit.buffer, 64);
    assert_eq!(cfg.audit.backend, AuditBackendConfig::Tracing);
}

#[test]
fn test_config_from_lookup_selects_audit_backend() {
    let vars: HashMap<&str, &str> = [
        ("MEAL_QUEUE_AUDIT_BACKEND", "in_memory"),
        ("MEAL_QUEUE_AUDIT_BUFFER", "8"),
    ]
    .into_iter()
    .collect();
    let cfg = PlannerConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string())).unwrap();
    assert_eq!(cfg.audit.backend, AuditBackendConfig::InMemory);
    assert_eq!(cfg.audit.buffer, 8);

    let cfg = PlannerConfig::from_lookup(|k| {
        (k == "MEAL_QUEUE_AUDIT_BACKEND").then(|| "disabled".to_string())
    })
    .unwrap();
    assert_eq!(cfg.audit.backend, AuditBackendConfig::Disabled);

    let err = PlannerConfig::from_lookup(|k| {
        (k == "MEAL_QUEUE_AUDIT_BACKEND").then(|| "syslog".to_string())
    })
    .unwrap_err();
    assert!(err.contains("MEAL_QUEUE_AUDIT_BACKEND"));
}

#[test]
fn test_config_from_lookup_bad_value() {
    let err = PlannerConfig::from_lookup(|k| {
        (k == "MEAL_QUEUE_MAX_ATTEMPTS").then(|| "many".to_string())
    })
    .unwrap_err();
    assert!(err.contains("MEAL_QUEUE_MAX_ATTEMPTS"));
}
