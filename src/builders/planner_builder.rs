//! Builders to construct a meal planner from configuration.

use anyhow::{anyhow, Context};

use crate::config::{AuditBackendConfig, AuditConfig, PlannerConfig};
use crate::core::{
    AppResult, AuditSink, InMemoryAuditSink, MealPlanner, MealStore, PlanError, PlannerSettings,
    TracingAuditSink,
};

/// Build the audit sink selected by `cfg`, if any.
#[must_use]
pub fn build_audit_sink(cfg: &AuditConfig) -> Option<Box<dyn AuditSink>> {
    match cfg.backend {
        AuditBackendConfig::Disabled => None,
        AuditBackendConfig::InMemory => Some(Box::new(InMemoryAuditSink::new(cfg.buffer))),
        AuditBackendConfig::Tracing => Some(Box::new(TracingAuditSink)),
    }
}

/// Build a planner over `store` from validated configuration.
///
/// # Errors
///
/// [`PlanError::Backend`] when the configuration is invalid.
pub fn build_planner<S>(cfg: &PlannerConfig, store: S) -> Result<MealPlanner<S>, PlanError>
where
    S: MealStore,
{
    cfg.validate()
        .map_err(|e| PlanError::Backend(format!("config invalid: {e}")))?;

    let settings = PlannerSettings {
        active_statuses: cfg.active_statuses.clone(),
        retry: cfg.retry.policy(),
    };
    let planner = MealPlanner::new(settings, store);

    Ok(match build_audit_sink(&cfg.audit) {
        Some(sink) => planner.with_audit(sink),
        None => planner,
    })
}

/// Build a planner over `store` from environment configuration.
///
/// # Errors
///
/// Configuration that fails to load or validate, with context.
pub fn build_planner_from_env<S>(store: S) -> AppResult<MealPlanner<S>>
where
    S: MealStore,
{
    let _ = dotenvy::dotenv();
    build_planner_from_lookup(|key| std::env::var(key).ok(), store)
}

/// Build a planner over `store` from configuration read through `lookup`.
///
/// # Errors
///
/// Same as [`build_planner_from_env`].
pub fn build_planner_from_lookup<S, F>(lookup: F, store: S) -> AppResult<MealPlanner<S>>
where
    S: MealStore,
    F: Fn(&str) -> Option<String>,
{
    let cfg = PlannerConfig::from_lookup(lookup)
        .map_err(|e| anyhow!(e))
        .context("loading planner configuration from environment")?;
    build_planner(&cfg, store).context("building meal planner")
}
