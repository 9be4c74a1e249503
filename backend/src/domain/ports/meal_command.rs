//! Driving port for meal mutations.

use async_trait::async_trait;

use crate::domain::{Error, Meal, MealDraft, MealId, MealPatch, UserId};

/// Domain use-case port for creating, changing, and removing meals.
///
/// Every operation acts on behalf of `owner`; meals of other users behave
/// exactly as if they did not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealCommand: Send + Sync {
    /// Log a new meal for `owner`.
    async fn create_meal(&self, owner: &UserId, draft: MealDraft) -> Result<Meal, Error>;

    /// Merge `patch` over the stored meal. An empty patch succeeds.
    async fn update_meal(
        &self,
        owner: &UserId,
        id: &MealId,
        patch: MealPatch,
    ) -> Result<Meal, Error>;

    /// Remove the meal.
    async fn delete_meal(&self, owner: &UserId, id: &MealId) -> Result<(), Error>;
}
