//! Planner configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::queue::MealStatus;
use crate::core::store::RetryPolicy;

/// Environment variable overriding [`RetryConfig::max_attempts`].
pub const ENV_MAX_ATTEMPTS: &str = "MEAL_QUEUE_MAX_ATTEMPTS";
/// Environment variable overriding [`RetryConfig::backoff_ms`].
pub const ENV_BACKOFF_MS: &str = "MEAL_QUEUE_BACKOFF_MS";
/// Environment variable overriding [`AuditConfig::backend`]
/// (`disabled`, `in_memory`, or `tracing`).
pub const ENV_AUDIT_BACKEND: &str = "MEAL_QUEUE_AUDIT_BACKEND";
/// Environment variable overriding [`AuditConfig::buffer`].
pub const ENV_AUDIT_BUFFER: &str = "MEAL_QUEUE_AUDIT_BUFFER";

/// Retry settings for position updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Attempts per update, including the first.
    pub max_attempts: u32,
    /// Pause between attempts in milliseconds.
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 50,
        }
    }
}

impl RetryConfig {
    /// Convert to the runtime policy.
    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditBackendConfig {
    /// No auditing.
    Disabled,
    /// Bounded in-memory buffer.
    InMemory,
    /// Emit events through `tracing`.
    Tracing,
}

impl std::str::FromStr for AuditBackendConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(Self::Disabled),
            "in_memory" => Ok(Self::InMemory),
            "tracing" => Ok(Self::Tracing),
            other => Err(format!("unknown audit backend `{other}`")),
        }
    }
}

/// Audit settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Sink selection.
    pub backend: AuditBackendConfig,
    /// Maximum retained events for the in-memory sink.
    pub buffer: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            backend: AuditBackendConfig::Tracing,
            buffer: 256,
        }
    }
}

/// Root planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Statuses that count as "in the queue" when fetching meals.
    #[serde(default = "default_active_statuses")]
    pub active_statuses: Vec<MealStatus>,
    /// Retry settings for position batches.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Audit settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_active_statuses() -> Vec<MealStatus> {
    vec![MealStatus::Queued]
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            active_statuses: default_active_statuses(),
            retry: RetryConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.active_statuses.is_empty() {
            return Err("active_statuses must not be empty".into());
        }
        if let Some(s) = self.active_statuses.iter().find(|s| !s.is_pending()) {
            return Err(format!("active_statuses may not include finished status {s:?}"));
        }
        if self.retry.max_attempts == 0 {
            return Err("retry.max_attempts must be greater than 0".into());
        }
        if self.audit.backend == AuditBackendConfig::InMemory && self.audit.buffer == 0 {
            return Err("audit.buffer must be greater than 0 for the in_memory backend".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation message.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from defaults overridden by environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns a message naming the variable that failed to parse, or a
    /// validation message.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from defaults overridden through `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`PlannerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup(ENV_MAX_ATTEMPTS) {
            cfg.retry.max_attempts = parse_var(ENV_MAX_ATTEMPTS, &v)?;
        }
        if let Some(v) = lookup(ENV_BACKOFF_MS) {
            cfg.retry.backoff_ms = parse_var(ENV_BACKOFF_MS, &v)?;
        }
        if let Some(v) = lookup(ENV_AUDIT_BACKEND) {
            cfg.audit.backend = parse_var(ENV_AUDIT_BACKEND, &v)?;
        }
        if let Some(v) = lookup(ENV_AUDIT_BUFFER) {
            cfg.audit.buffer = parse_var(ENV_AUDIT_BUFFER, &v)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| format!("{key}: invalid value `{value}`: {e}"))
}
