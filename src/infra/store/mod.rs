//! Meal store backends.

pub mod memory;

pub use memory::{FailureInjector, InMemoryMealStore};
