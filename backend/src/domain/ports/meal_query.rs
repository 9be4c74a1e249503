//! Driving port for meal reads.

use async_trait::async_trait;

use crate::domain::{Error, Meal, MealId, UserId};

/// Domain use-case port for reading an owner's meals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealQuery: Send + Sync {
    /// Every meal of `owner`, in storage order.
    async fn list_meals(&self, owner: &UserId) -> Result<Vec<Meal>, Error>;

    /// One meal of `owner`; `not_found` covers both missing and foreign ids.
    async fn get_meal(&self, owner: &UserId, id: &MealId) -> Result<Meal, Error>;
}
