//! Driving port resolving a presented session token to its owner.

use async_trait::async_trait;

use crate::domain::{Error, SessionToken, UserId};

/// Maps a session token to the user currently holding it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    /// Resolve `token` with a single store read.
    ///
    /// A token that matches no user, whether forged or superseded by a later
    /// login, fails with `invalid_session`.
    async fn resolve(&self, token: &SessionToken) -> Result<UserId, Error>;
}
