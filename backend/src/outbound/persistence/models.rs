//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{meals, users};

/// Profile columns of the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Profile columns plus the stored secret.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserAccountRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

// ---------------------------------------------------------------------------
// Meal models
// ---------------------------------------------------------------------------

/// Row struct for reading from the meals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = meals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MealRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub minute_of_day: i32,
    pub is_on_diet: bool,
    pub user_id: Uuid,
}

/// Insertable struct for creating new meal records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = meals)]
pub(crate) struct NewMealRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub date: NaiveDate,
    pub minute_of_day: i32,
    pub is_on_diet: bool,
    pub user_id: Uuid,
}

/// Changeset for overwriting the mutable meal columns.
///
/// `user_id` is deliberately absent: ownership never changes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = meals)]
pub(crate) struct MealChanges<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub date: NaiveDate,
    pub minute_of_day: i32,
    pub is_on_diet: bool,
}
