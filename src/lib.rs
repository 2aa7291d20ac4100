//! # Meal Queue Core
//!
//! Edit permissions and meal queue ordering for a meal-planning application.
//!
//! The application lets users keep recipes, lists, and meal templates, queue
//! meals they intend to cook, and schedule them onto calendar dates. Members
//! of a household can be administrators, and administrators can switch on an
//! admin override or impersonate another member. This crate holds the rules
//! behind those features; transport, rendering, and persistence belong to the
//! caller.
//!
//! ## Key Features
//!
//! - **Edit Rule**: one decision over ownership, admin mode, and impersonation,
//!   with impersonation taking precedence
//! - **Queue Grouping**: unscheduled meals by queue position, scheduled meals by date
//! - **Manual Reorder**: single-element moves renumbered to absolute positions
//! - **Tolerant Persistence**: per-meal, retryable, idempotent position writes
//! - **Paging**: infinite-scroll accumulation without duplicates
//!
//! ## Edit Rule
//!
//! ```rust
//! use meal_queue_core::core::{compute_can_edit, Principal};
//!
//! let owner = Principal::user("owner-1");
//! assert!(compute_can_edit(&owner, Some("owner-1")));
//!
//! let admin = Principal::user("admin-1").as_admin().with_admin_mode(true);
//! assert!(compute_can_edit(&admin, Some("owner-1")));
//!
//! let acting = admin.impersonating("someone-else");
//! assert!(!compute_can_edit(&acting, Some("owner-1")));
//! ```
//!
//! ## Queue Ordering
//!
//! ```rust
//! use meal_queue_core::core::{group_queue, reorder, MealItem, MoveOp};
//!
//! let view = group_queue(vec![
//!     MealItem::queued("A", 0),
//!     MealItem::queued("B", 1),
//!     MealItem::queued("C", 2),
//! ]);
//! let plan = reorder(&view.unscheduled, &MoveOp::new("A", 0, 2)).unwrap();
//! assert_eq!(plan.order, ["B", "C", "A"]);
//! ```
//!
//! ## Planner Service
//!
//! ```rust,ignore
//! use meal_queue_core::builders::build_planner_from_env;
//! use meal_queue_core::infra::InMemoryMealStore;
//!
//! let planner = build_planner_from_env(InMemoryMealStore::new())?;
//! let report = planner.reorder(&principal, "owner-1", &MoveOp::new("A", 0, 2)).await?;
//! if !report.outcome.is_complete() {
//!     // retry report.outcome.pending(&report.plan.updates)
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Edit rule, queue ordering, store seam, and planner service.
pub mod core;
/// Configuration models for the planner, retries, and auditing.
pub mod config;
/// Builders to construct the planner from configuration.
pub mod builders;
/// Storage adapters.
pub mod infra;
/// API request/response models.
pub mod runtime;
/// Shared utilities.
pub mod util;
