//! Infrastructure adapters for meal storage.

pub mod store;

pub use store::{FailureInjector, InMemoryMealStore};
