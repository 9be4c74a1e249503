//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Rows are converted through the validated domain constructors; a row that
//! fails validation is reported as a query error rather than trusted.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, Password, SessionToken, User, UserAccount, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation_of, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserAccountRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow { id, name, email } = row;
    User::try_from_strings(id.to_string(), name, email)
        .map_err(|err| UserPersistenceError::query(format!("stored user invalid: {err}")))
}

fn row_to_account(row: UserAccountRow) -> Result<UserAccount, UserPersistenceError> {
    let UserAccountRow {
        id,
        name,
        email,
        password,
    } = row;
    let user = row_to_user(UserRow { id, name, email })?;
    let password = Password::new(&password)
        .ok_or_else(|| UserPersistenceError::query("stored password is empty"))?;
    Ok(UserAccount::new(user, password))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn email_exists(&self, email: &Email) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(email.as_ref())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user = account.user();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.display_name().as_ref(),
            email: user.email().as_ref(),
            password: account.password().expose(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation_of(&err, EMAIL_UNIQUE_CONSTRAINT) {
                    warn!(user_id = %user.id(), "email uniqueness enforced by store");
                    UserPersistenceError::duplicate_email()
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_account_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserAccountRow::as_select())
            .first::<UserAccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::session_id.eq(token.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn replace_session_token(
        &self,
        id: &UserId,
        token: &SessionToken,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(users::session_id.eq(Some(*token.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
