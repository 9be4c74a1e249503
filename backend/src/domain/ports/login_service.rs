//! Driving port for login use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange credentials for a session token without knowing the backing
//! infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, IssuedSession, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and bind a freshly minted session token to the user.
    ///
    /// Any token issued earlier for the same user stops resolving.
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedSession, Error>;
}
