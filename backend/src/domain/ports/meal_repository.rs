//! Port for meal persistence.
//!
//! Every method that touches an existing meal takes the owner alongside the
//! meal id so adapters express ownership in the same predicate as the id.
//! A meal belonging to someone else is therefore indistinguishable from one
//! that does not exist.

use async_trait::async_trait;

use crate::domain::{Meal, MealId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by meal repository adapters.
    pub enum MealRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "meal repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "meal repository query failed: {message}",
    }
}

/// Port for reading and writing meals scoped to their owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Persist a new meal.
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError>;

    /// All meals of `owner` in storage order.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Meal>, MealRepositoryError>;

    /// All meals of `owner` ordered by date, time of day, then id.
    async fn list_chronological_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Meal>, MealRepositoryError>;

    /// The meal matching both `id` and `owner`.
    async fn find_owned(
        &self,
        id: &MealId,
        owner: &UserId,
    ) -> Result<Option<Meal>, MealRepositoryError>;

    /// Overwrite the stored content of `meal` where id and owner both match.
    ///
    /// Returns `false` when no row matched.
    async fn update_owned(&self, meal: &Meal) -> Result<bool, MealRepositoryError>;

    /// Delete the meal matching both `id` and `owner`.
    ///
    /// Returns `false` when no row matched.
    async fn delete_owned(&self, id: &MealId, owner: &UserId) -> Result<bool, MealRepositoryError>;
}
