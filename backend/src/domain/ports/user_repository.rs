//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, SessionToken, User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store's uniqueness constraint on email rejected an insert.
        DuplicateEmail => "user repository rejected duplicate email",
    }
}

/// Credential store: user records, their secrets, and the single active
/// session token each one may hold.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether any user is registered under `email`.
    async fn email_exists(&self, email: &Email) -> Result<bool, UserPersistenceError>;

    /// Insert a new account with no session token.
    ///
    /// Adapters must enforce email uniqueness atomically and report a
    /// violation as [`UserPersistenceError::DuplicateEmail`].
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch the account registered under `email`, secret included.
    async fn find_account_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch the user whose stored session token equals `token`.
    async fn find_by_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite the user's session token, invalidating any previous one.
    ///
    /// Returns `false` when no user with `id` exists.
    async fn replace_session_token(
        &self,
        id: &UserId,
        token: &SessionToken,
    ) -> Result<bool, UserPersistenceError>;
}
