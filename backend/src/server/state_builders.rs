//! Builders wiring repositories into the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use daily_diet::domain::ports::{MealRepository, UserRepository};
use daily_diet::domain::{AccountService, MealLedgerService};
use daily_diet::inbound::http::state::{HttpState, HttpStatePorts};
use daily_diet::outbound::memory::{InMemoryMealRepository, InMemoryUserRepository};
use daily_diet::outbound::persistence::{DieselMealRepository, DieselUserRepository};

use super::ServerConfig;

/// Assemble the ports from one user store and one meal store.
fn ports_over<U, M>(users: U, meals: M) -> HttpStatePorts
where
    U: UserRepository + 'static,
    M: MealRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(Arc::new(users)));
    let ledger = Arc::new(MealLedgerService::new(Arc::new(meals)));
    HttpStatePorts {
        login: accounts.clone(),
        registration: accounts.clone(),
        sessions: accounts.clone(),
        profile: accounts,
        meals: ledger.clone(),
        meals_query: ledger.clone(),
        metrics: ledger,
    }
}

/// Build HTTP state backed by PostgreSQL when a pool is configured, otherwise
/// by in-memory stores.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL stores");
            ports_over(
                DieselUserRepository::new(pool.clone()),
                DieselMealRepository::new(pool.clone()),
            )
        }
        None => {
            info!("no database configured; using in-memory stores");
            ports_over(InMemoryUserRepository::new(), InMemoryMealRepository::new())
        }
    };
    web::Data::new(HttpState::new(ports))
}
