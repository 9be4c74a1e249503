//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, NewAccount, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Register a new account; fails with `duplicate_email` when taken.
    async fn register(&self, account: NewAccount) -> Result<User, Error>;
}
