//! Authentication primitives: credentials, new accounts, and session tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;
use zeroize::Zeroizing;

use super::user::{DisplayName, Email, User, UserId, UserValidationError};

/// Credential secret supplied at registration and login.
///
/// Stored and compared as given. The backing buffer is wiped on drop and the
/// value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a non-empty secret; surrounding whitespace is kept as typed.
    pub fn new(raw: &str) -> Option<Self> {
        (!raw.is_empty()).then(|| Self(Zeroizing::new(raw.to_owned())))
    }

    /// Secret text, for persistence adapters only.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    InvalidEmail(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// # Examples
/// ```
/// use daily_diet::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@example.com ", "hunter2").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email).map_err(LoginValidationError::InvalidEmail)?;
        let password = Password::new(password).ok_or(LoginValidationError::EmptyPassword)?;
        Ok(Self { email, password })
    }

    /// Email used to look the account up.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Secret presented by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Domain error returned when registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Display name was missing or too long.
    InvalidName(UserValidationError),
    /// Email was missing or malformed.
    InvalidEmail(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName(err) | Self::InvalidEmail(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    name: DisplayName,
    email: Email,
    password: Password,
}

impl NewAccount {
    /// Validate raw registration inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        Ok(Self {
            name: DisplayName::new(name).map_err(RegistrationValidationError::InvalidName)?,
            email: Email::new(email).map_err(RegistrationValidationError::InvalidEmail)?,
            password: Password::new(password).ok_or(RegistrationValidationError::EmptyPassword)?,
        })
    }

    /// Email the account will log in with.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Turn the request into a stored account with a freshly assigned id.
    pub fn into_account(self, id: UserId) -> UserAccount {
        UserAccount::new(User::new(id, self.name, self.email), self.password)
    }
}

/// A user together with the secret needed to authenticate them.
///
/// Only repositories and the account service handle this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    user: User,
    password: Password,
}

impl UserAccount {
    /// Pair a profile with its credential secret.
    pub fn new(user: User, password: Password) -> Self {
        Self { user, password }
    }

    /// Public profile.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Stored secret.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Whether `presented` matches the stored secret exactly.
    pub fn password_matches(&self, presented: &Password) -> bool {
        self.password == *presented
    }
}

/// Opaque token proving a prior successful login.
///
/// # Examples
/// ```
/// use daily_diet::domain::SessionToken;
///
/// let token = SessionToken::generate();
/// let parsed: SessionToken = token.to_string().parse().unwrap();
/// assert_eq!(parsed, token);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Mint a fresh random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a token read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Result of a successful login: the user and the token now bound to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuedSession {
    pub user_id: UserId,
    pub token: SessionToken,
}
