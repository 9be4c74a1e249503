//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};

use super::session::session_middleware;
use super::state::{HttpState, HttpStatePorts};
use crate::domain::ports::{
    MockLoginService, MockMealCommand, MockMealMetricsQuery, MockMealQuery,
    MockRegistrationService, MockSessionAuthenticator, MockUserProfileQuery,
};
use crate::domain::{AccountService, MealLedgerService};
use crate::outbound::memory::{InMemoryMealRepository, InMemoryUserRepository};

/// Production session middleware with a fresh key and the `Secure` flag off
/// so cookies survive plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware(Key::generate(), false, SameSite::Lax)
}

/// Ports backed by mocks with no expectations; any unplanned call panics.
///
/// Tests replace the fields they exercise.
pub fn mock_ports() -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(MockLoginService::new()),
        registration: Arc::new(MockRegistrationService::new()),
        sessions: Arc::new(MockSessionAuthenticator::new()),
        profile: Arc::new(MockUserProfileQuery::new()),
        meals: Arc::new(MockMealCommand::new()),
        meals_query: Arc::new(MockMealQuery::new()),
        metrics: Arc::new(MockMealMetricsQuery::new()),
    }
}

/// State wired to the real services over fresh in-memory repositories.
pub fn memory_state() -> HttpState {
    let accounts = Arc::new(AccountService::new(Arc::new(InMemoryUserRepository::new())));
    let ledger = Arc::new(MealLedgerService::new(Arc::new(InMemoryMealRepository::new())));
    HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts.clone(),
        sessions: accounts.clone(),
        profile: accounts,
        meals: ledger.clone(),
        meals_query: ledger.clone(),
        metrics: ledger,
    })
}
