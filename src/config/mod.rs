//! Configuration models for the planner, retries, and auditing.

pub mod planner;

pub use planner::{AuditBackendConfig, AuditConfig, PlannerConfig, RetryConfig};
