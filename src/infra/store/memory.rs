//! In-memory meal store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::queue::{MealItem, MealStatus, PositionUpdate};
use crate::core::{MealStore, PlanError};
use crate::util::serde::MealId;

/// Makes position updates fail a set number of times per meal.
#[derive(Debug, Default)]
pub struct FailureInjector {
    remaining: HashMap<MealId, u32>,
}

impl FailureInjector {
    /// Fail the next `times` position updates for `meal_id`.
    pub fn fail_next(&mut self, meal_id: impl Into<MealId>, times: u32) {
        self.remaining.insert(meal_id.into(), times);
    }

    fn should_fail(&mut self, meal_id: &str) -> bool {
        match self.remaining.get_mut(meal_id) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }
}

/// In-memory store for development and tests.
///
/// Meals are listed in insertion order so grouping ties stay deterministic.
#[derive(Debug, Default)]
pub struct InMemoryMealStore {
    meals: Mutex<Vec<MealItem>>,
    failures: Mutex<FailureInjector>,
}

impl InMemoryMealStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `meals`.
    pub fn with_meals<I>(meals: I) -> Self
    where
        I: IntoIterator<Item = MealItem>,
    {
        let store = Self::new();
        store.meals.lock().extend(meals);
        store
    }

    /// Fail the next `times` position updates for `meal_id`.
    pub fn fail_next(&self, meal_id: impl Into<MealId>, times: u32) {
        self.failures.lock().fail_next(meal_id, times);
    }

    /// Snapshot of every stored meal.
    pub fn snapshot(&self) -> Vec<MealItem> {
        self.meals.lock().clone()
    }

    /// Number of stored meals.
    pub fn len(&self) -> usize {
        self.meals.lock().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.meals.lock().is_empty()
    }
}

#[async_trait]
impl MealStore for InMemoryMealStore {
    async fn list_meals(
        &self,
        owner: &str,
        statuses: &[MealStatus],
    ) -> Result<Vec<MealItem>, PlanError> {
        Ok(self
            .meals
            .lock()
            .iter()
            .filter(|m| m.owner_id.as_deref() == Some(owner) && statuses.contains(&m.status))
            .cloned()
            .collect())
    }

    async fn get_meal(&self, meal_id: &str) -> Result<Option<MealItem>, PlanError> {
        Ok(self.meals.lock().iter().find(|m| m.id == meal_id).cloned())
    }

    async fn save_meal(&self, meal: MealItem) -> Result<(), PlanError> {
        let mut meals = self.meals.lock();
        match meals.iter_mut().find(|m| m.id == meal.id) {
            Some(existing) => *existing = meal,
            None => meals.push(meal),
        }
        Ok(())
    }

    async fn update_position(&self, update: &PositionUpdate) -> Result<(), PlanError> {
        if self.failures.lock().should_fail(&update.meal_id) {
            return Err(PlanError::Backend(format!(
                "injected failure for {}",
                update.meal_id
            )));
        }
        let mut meals = self.meals.lock();
        let meal = meals
            .iter_mut()
            .find(|m| m.id == update.meal_id)
            .ok_or_else(|| PlanError::UnknownMeal(update.meal_id.clone()))?;
        meal.queue_position = Some(update.queue_position);
        Ok(())
    }
}
