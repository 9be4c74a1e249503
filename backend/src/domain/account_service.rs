//! Account domain service.
//!
//! Implements registration, login, session resolution, and profile lookup on
//! top of a single [`UserRepository`]. Each user holds at most one session
//! token; logging in overwrites it, which is what invalidates older sessions.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, RegistrationService, SessionAuthenticator, UserPersistenceError,
    UserProfileQuery, UserRepository,
};
use crate::domain::{
    Error, IssuedSession, LoginCredentials, NewAccount, SessionToken, User, UserId,
};

const DUPLICATE_EMAIL: &str = "email already registered";
const INVALID_CREDENTIALS: &str = "invalid credentials";
const INVALID_SESSION: &str = "invalid session";

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail => Error::duplicate_email(DUPLICATE_EMAIL),
    }
}

/// Account service implementing the authentication driving ports.
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create a new service backed by the user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> AccountService<R>
where
    R: UserRepository,
{
    async fn user_for_token(&self, token: &SessionToken) -> Result<User, Error> {
        self.users
            .find_by_session_token(token)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| {
                debug!("session token matched no user");
                Error::invalid_session(INVALID_SESSION)
            })
    }
}

#[async_trait]
impl<R> RegistrationService for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, account: NewAccount) -> Result<User, Error> {
        let taken = self
            .users
            .email_exists(account.email())
            .await
            .map_err(map_persistence_error)?;
        if taken {
            return Err(Error::duplicate_email(DUPLICATE_EMAIL));
        }

        // Two registrations can both pass the check above; the insert is
        // where the store's unique constraint decides.
        let account = account.into_account(UserId::random());
        self.users
            .insert(&account)
            .await
            .map_err(map_persistence_error)?;

        let user = account.user().clone();
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: UserRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedSession, Error> {
        let account = self
            .users
            .find_account_by_email(credentials.email())
            .await
            .map_err(map_persistence_error)?
            .filter(|account| account.password_matches(credentials.password()))
            .ok_or_else(|| {
                debug!("login rejected");
                Error::invalid_credentials(INVALID_CREDENTIALS)
            })?;

        let user_id = *account.user().id();
        let token = SessionToken::generate();
        let bound = self
            .users
            .replace_session_token(&user_id, &token)
            .await
            .map_err(map_persistence_error)?;
        if !bound {
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        }

        info!(user_id = %user_id, "session issued");
        Ok(IssuedSession { user_id, token })
    }
}

#[async_trait]
impl<R> SessionAuthenticator for AccountService<R>
where
    R: UserRepository,
{
    async fn resolve(&self, token: &SessionToken) -> Result<UserId, Error> {
        self.user_for_token(token).await.map(|user| *user.id())
    }
}

#[async_trait]
impl<R> UserProfileQuery for AccountService<R>
where
    R: UserRepository,
{
    async fn fetch_profile(&self, token: &SessionToken) -> Result<User, Error> {
        self.user_for_token(token).await
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
