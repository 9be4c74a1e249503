//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The `sessionId` cookie is the credential carrier. It holds only the opaque
//! session token; which user that token belongs to is decided per request by
//! the session authenticator.

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, SessionToken};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "sessionId";

pub(crate) const SESSION_TOKEN_KEY: &str = "session_id";

const LOGIN_REQUIRED: &str = "login required";
const INVALID_SESSION: &str = "invalid session";
const SESSION_TTL_DAYS: i64 = 7;

/// Cookie session middleware carrying the session token.
///
/// The cookie is private (encrypted with `key`), `HttpOnly`, scoped to `/`,
/// and persists for seven days.
pub fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(CookieDuration::days(SESSION_TTL_DAYS)),
        )
        .build()
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store a freshly issued token in the session cookie.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_TOKEN_KEY, token.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Token carried by the request, if any.
    ///
    /// A value that is not a well-formed token is an invalid session, not a
    /// missing one.
    pub fn session_token(&self) -> Result<Option<SessionToken>, Error> {
        let raw = self
            .0
            .get::<String>(SESSION_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        raw.map(|value| {
            value.parse::<SessionToken>().map_err(|error| {
                debug!(%error, "malformed session token in cookie");
                Error::invalid_session(INVALID_SESSION)
            })
        })
        .transpose()
    }

    /// Require a session token or return `401 Unauthorized`.
    pub fn require_session_token(&self) -> Result<SessionToken, Error> {
        self.session_token()?
            .ok_or_else(|| Error::unauthorized(LOGIN_REQUIRED))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
