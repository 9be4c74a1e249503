//! Identity extraction for handlers that act on behalf of a user.
//!
//! Keep the HTTP modules focused on request/response mapping by resolving the
//! session cookie here. Handlers receive the owner as an explicit
//! [`CurrentUser`] argument; nothing is stashed on the request.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, UserId};

use super::session::SessionContext;
use super::state::HttpState;

/// The user owning the session presented with the request.
///
/// Extraction fails with `401 Unauthorized` when no session cookie is
/// present and with `400 invalid_session` when the token matches no user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(UserId);

impl CurrentUser {
    /// Identifier of the authenticated user.
    pub fn id(&self) -> &UserId {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let token = session.require_session_token()?;
            let user_id = state.sessions.resolve(&token).await?;
            debug!(%user_id, "session resolved");
            Ok(CurrentUser(user_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use mockall::predicate::eq;
    use rstest::rstest;
    use rstest_bdd_macros::{given, then};

    use super::*;
    use crate::domain::ports::MockSessionAuthenticator;
    use crate::domain::{ErrorCode, SessionToken};
    use crate::inbound::http::session::SESSION_COOKIE_NAME;
    use crate::inbound::http::test_utils::{mock_ports, test_session_middleware};

    const LIVE_TOKEN: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    const STALE_TOKEN: &str = "0b7f6a0e-2a55-4ad7-9e09-2c1f3b5d8a11";
    const OWNER: &str = "11111111-2222-4333-8444-555555555555";

    #[derive(Clone)]
    struct Outcome {
        status: StatusCode,
        body: String,
    }

    impl Outcome {
        fn error(&self) -> Error {
            serde_json::from_str(&self.body).expect("error payload")
        }
    }

    fn owner() -> UserId {
        UserId::new(OWNER).expect("fixture id")
    }

    fn authenticator() -> MockSessionAuthenticator {
        let mut sessions = MockSessionAuthenticator::new();
        sessions.expect_resolve().returning(|token| {
            if token.to_string() == LIVE_TOKEN {
                Ok(owner())
            } else {
                Err(Error::invalid_session("invalid session"))
            }
        });
        sessions
    }

    async fn request_as(sessions: MockSessionAuthenticator, token: Option<&'static str>) -> Outcome {
        let mut ports = mock_ports();
        ports.sessions = Arc::new(sessions);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::new(ports)))
                .wrap(test_session_middleware())
                .route(
                    "/sign-in/{token}",
                    web::get().to(|session: SessionContext, path: web::Path<String>| async move {
                        let token: SessionToken = path.parse().expect("fixture token");
                        session.persist_token(&token)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/whoami",
                    web::get().to(|user: CurrentUser| async move {
                        HttpResponse::Ok().body(user.id().to_string())
                    }),
                ),
        )
        .await;

        let mut request = test::TestRequest::get().uri("/whoami");
        if let Some(token) = token {
            let signed_in = test::call_service(
                &app,
                test::TestRequest::get()
                    .uri(&format!("/sign-in/{token}"))
                    .to_request(),
            )
            .await;
            let cookie = signed_in
                .response()
                .cookies()
                .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
                .map(Cookie::into_owned)
                .expect("session cookie");
            request = request.cookie(cookie);
        }

        let res = test::call_service(&app, request.to_request()).await;
        let status = res.status();
        let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body");
        Outcome { status, body }
    }

    #[given("a session cookie holding the current token")]
    fn a_live_session() -> Option<&'static str> {
        Some(LIVE_TOKEN)
    }

    #[given("a session cookie superseded by a later login")]
    fn a_stale_session() -> Option<&'static str> {
        Some(STALE_TOKEN)
    }

    #[given("no session cookie")]
    fn no_session() -> Option<&'static str> {
        None
    }

    #[then("the owner is resolved")]
    fn the_owner_is_resolved(outcome: Outcome) {
        assert_eq!(outcome.status, StatusCode::OK);
        assert_eq!(outcome.body, OWNER);
    }

    #[then("the session is rejected as invalid")]
    fn the_session_is_rejected(outcome: Outcome) {
        assert_eq!(outcome.status, StatusCode::BAD_REQUEST);
        assert_eq!(outcome.error().code(), ErrorCode::InvalidSession);
    }

    #[then("the caller is told to log in")]
    fn the_caller_must_log_in(outcome: Outcome) {
        assert_eq!(outcome.status, StatusCode::UNAUTHORIZED);
        assert_eq!(outcome.error().code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[actix_web::test]
    async fn live_session_resolves_to_owner() {
        let outcome = request_as(authenticator(), a_live_session()).await;
        the_owner_is_resolved(outcome);
    }

    #[rstest]
    #[actix_web::test]
    async fn superseded_session_is_invalid() {
        let outcome = request_as(authenticator(), a_stale_session()).await;
        the_session_is_rejected(outcome);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_session_is_unauthorised_without_store_access() {
        let mut sessions = MockSessionAuthenticator::new();
        sessions.expect_resolve().times(0);

        let outcome = request_as(sessions, no_session()).await;

        the_caller_must_log_in(outcome);
    }

    #[rstest]
    #[actix_web::test]
    async fn resolution_reads_the_store_once() {
        let token: SessionToken = LIVE_TOKEN.parse().expect("fixture token");
        let mut sessions = MockSessionAuthenticator::new();
        sessions
            .expect_resolve()
            .with(eq(token))
            .times(1)
            .returning(|_| Ok(owner()));

        let outcome = request_as(sessions, a_live_session()).await;

        the_owner_is_resolved(outcome);
    }
}
