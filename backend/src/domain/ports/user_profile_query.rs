//! Driving port for user profile queries.
//!
//! Inbound adapters use this port to load the profile behind a session token
//! without importing persistence details.

use async_trait::async_trait;

use crate::domain::{Error, SessionToken, User};

/// Domain use-case port for reading the caller's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the profile of the user holding `token`.
    async fn fetch_profile(&self, token: &SessionToken) -> Result<User, Error>;
}
