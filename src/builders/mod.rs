//! Builders to construct the planner from configuration.

pub mod planner_builder;

pub use planner_builder::{
    build_audit_sink, build_planner, build_planner_from_env, build_planner_from_lookup,
};
