//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, MealCommand, MealMetricsQuery, MealQuery, RegistrationService,
    SessionAuthenticator, UserProfileQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub sessions: Arc<dyn SessionAuthenticator>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub meals: Arc<dyn MealCommand>,
    pub meals_query: Arc<dyn MealQuery>,
    pub metrics: Arc<dyn MealMetricsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub sessions: Arc<dyn SessionAuthenticator>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub meals: Arc<dyn MealCommand>,
    pub meals_query: Arc<dyn MealQuery>,
    pub metrics: Arc<dyn MealMetricsQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use daily_diet::domain::{AccountService, MealLedgerService};
    /// use daily_diet::inbound::http::state::{HttpState, HttpStatePorts};
    /// use daily_diet::outbound::memory::{InMemoryMealRepository, InMemoryUserRepository};
    ///
    /// let accounts = Arc::new(AccountService::new(Arc::new(InMemoryUserRepository::default())));
    /// let ledger = Arc::new(MealLedgerService::new(Arc::new(InMemoryMealRepository::default())));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     registration: accounts.clone(),
    ///     sessions: accounts.clone(),
    ///     profile: accounts,
    ///     meals: ledger.clone(),
    ///     meals_query: ledger.clone(),
    ///     metrics: ledger,
    /// });
    /// let _sessions = state.sessions.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            sessions,
            profile,
            meals,
            meals_query,
            metrics,
        } = ports;
        Self {
            login,
            registration,
            sessions,
            profile,
            meals,
            meals_query,
            metrics,
        }
    }
}
