//! PostgreSQL-backed `MealRepository` implementation using Diesel ORM.
//!
//! Every statement touching an existing meal filters on `id` and `user_id`
//! together.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MealRepository, MealRepositoryError};
use crate::domain::{Meal, MealDraft, MealId, MealName, TimeOfDay, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{MealChanges, MealRow, NewMealRow};
use super::pool::{DbPool, PoolError};
use super::schema::meals;

/// Diesel-backed implementation of the meal repository port.
#[derive(Clone)]
pub struct DieselMealRepository {
    pool: DbPool,
}

impl DieselMealRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MealRepositoryError {
    map_basic_pool_error(error, MealRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MealRepositoryError {
    map_basic_diesel_error(
        error,
        MealRepositoryError::query,
        MealRepositoryError::connection,
    )
}

fn minute_column(time: TimeOfDay) -> i32 {
    i32::from(time.minutes())
}

fn row_to_meal(row: MealRow) -> Result<Meal, MealRepositoryError> {
    let MealRow {
        id,
        name,
        description,
        date,
        minute_of_day,
        is_on_diet,
        user_id,
    } = row;

    let name = MealName::new(name)
        .map_err(|err| MealRepositoryError::query(format!("stored meal invalid: {err}")))?;
    let time = u16::try_from(minute_of_day)
        .ok()
        .and_then(TimeOfDay::from_minutes)
        .ok_or_else(|| {
            MealRepositoryError::query(format!("stored minute_of_day out of range: {minute_of_day}"))
        })?;

    Ok(Meal::new(
        MealId::from_uuid(id),
        UserId::from_uuid(user_id),
        MealDraft {
            name,
            description,
            date,
            time,
            on_diet: is_on_diet,
        },
    ))
}

fn rows_to_meals(rows: Vec<MealRow>) -> Result<Vec<Meal>, MealRepositoryError> {
    rows.into_iter().map(row_to_meal).collect()
}

#[async_trait]
impl MealRepository for DieselMealRepository {
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewMealRow {
            id: *meal.id().as_uuid(),
            name: meal.name().as_ref(),
            description: meal.description(),
            date: meal.date(),
            minute_of_day: minute_column(meal.time()),
            is_on_diet: meal.is_on_diet(),
            user_id: *meal.owner().as_uuid(),
        };

        diesel::insert_into(meals::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Meal>, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MealRow> = meals::table
            .filter(meals::user_id.eq(owner.as_uuid()))
            .order((meals::created_at.asc(), meals::id.asc()))
            .select(MealRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_meals(rows)
    }

    async fn list_chronological_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Meal>, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MealRow> = meals::table
            .filter(meals::user_id.eq(owner.as_uuid()))
            .order((
                meals::date.asc(),
                meals::minute_of_day.asc(),
                meals::id.asc(),
            ))
            .select(MealRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_meals(rows)
    }

    async fn find_owned(
        &self,
        id: &MealId,
        owner: &UserId,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = meals::table
            .filter(
                meals::id
                    .eq(id.as_uuid())
                    .and(meals::user_id.eq(owner.as_uuid())),
            )
            .select(MealRow::as_select())
            .first::<MealRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_meal).transpose()
    }

    async fn update_owned(&self, meal: &Meal) -> Result<bool, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = MealChanges {
            name: meal.name().as_ref(),
            description: meal.description(),
            date: meal.date(),
            minute_of_day: minute_column(meal.time()),
            is_on_diet: meal.is_on_diet(),
        };

        let affected = diesel::update(
            meals::table.filter(
                meals::id
                    .eq(meal.id().as_uuid())
                    .and(meals::user_id.eq(meal.owner().as_uuid())),
            ),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn delete_owned(&self, id: &MealId, owner: &UserId) -> Result<bool, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(
            meals::table.filter(
                meals::id
                    .eq(id.as_uuid())
                    .and(meals::user_id.eq(owner.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
