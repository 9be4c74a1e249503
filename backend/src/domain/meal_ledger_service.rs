//! Meal ledger domain service.
//!
//! Implements the meal command, query, and metrics driving ports. Every
//! repository call carries the owner, so "not yours" and "does not exist"
//! collapse into the same `not_found` outcome with the same message.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    MealCommand, MealMetricsQuery, MealQuery, MealRepository, MealRepositoryError,
};
use crate::domain::{Error, Meal, MealDraft, MealId, MealMetrics, MealPatch, UserId};

const MEAL_NOT_FOUND: &str = "meal not found";

fn map_repository_error(error: MealRepositoryError) -> Error {
    match error {
        MealRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("meal repository unavailable: {message}"))
        }
        MealRepositoryError::Query { message } => {
            Error::internal(format!("meal repository error: {message}"))
        }
    }
}

fn meal_not_found() -> Error {
    Error::not_found(MEAL_NOT_FOUND)
}

/// Meal service implementing the meal driving ports.
#[derive(Clone)]
pub struct MealLedgerService<R> {
    meals: Arc<R>,
}

impl<R> MealLedgerService<R> {
    /// Create a new service with the meal repository.
    pub fn new(meals: Arc<R>) -> Self {
        Self { meals }
    }
}

#[async_trait]
impl<R> MealCommand for MealLedgerService<R>
where
    R: MealRepository,
{
    async fn create_meal(&self, owner: &UserId, draft: MealDraft) -> Result<Meal, Error> {
        let meal = Meal::new(MealId::random(), *owner, draft);
        self.meals
            .insert(&meal)
            .await
            .map_err(map_repository_error)?;
        debug!(user_id = %owner, meal_id = %meal.id(), "meal created");
        Ok(meal)
    }

    async fn update_meal(
        &self,
        owner: &UserId,
        id: &MealId,
        patch: MealPatch,
    ) -> Result<Meal, Error> {
        let current = self
            .meals
            .find_owned(id, owner)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(meal_not_found)?;

        let updated = current.apply(patch);
        // The write re-checks id and owner; a delete that slipped in after
        // the read leaves nothing to update.
        let matched = self
            .meals
            .update_owned(&updated)
            .await
            .map_err(map_repository_error)?;
        if !matched {
            debug!(user_id = %owner, meal_id = %id, "meal vanished before update");
            return Err(meal_not_found());
        }
        Ok(updated)
    }

    async fn delete_meal(&self, owner: &UserId, id: &MealId) -> Result<(), Error> {
        let removed = self
            .meals
            .delete_owned(id, owner)
            .await
            .map_err(map_repository_error)?;
        if removed {
            Ok(())
        } else {
            Err(meal_not_found())
        }
    }
}

#[async_trait]
impl<R> MealQuery for MealLedgerService<R>
where
    R: MealRepository,
{
    async fn list_meals(&self, owner: &UserId) -> Result<Vec<Meal>, Error> {
        self.meals
            .list_for_owner(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn get_meal(&self, owner: &UserId, id: &MealId) -> Result<Meal, Error> {
        self.meals
            .find_owned(id, owner)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(meal_not_found)
    }
}

#[async_trait]
impl<R> MealMetricsQuery for MealLedgerService<R>
where
    R: MealRepository,
{
    async fn meal_metrics(&self, owner: &UserId) -> Result<MealMetrics, Error> {
        // One ordered read feeds both the counts and the streak.
        let history = self
            .meals
            .list_chronological_for_owner(owner)
            .await
            .map_err(map_repository_error)?;
        Ok(MealMetrics::from_history(&history))
    }
}

#[cfg(test)]
#[path = "meal_ledger_service_tests.rs"]
mod tests;
