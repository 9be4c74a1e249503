//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;
use tracing::debug;

use crate::domain::Error;

pub mod auth;
pub mod error;
pub mod health;
pub mod meals;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;

/// JSON extractor settings: malformed or mistyped bodies are `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected JSON body");
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Register the versioned API routes.
///
/// Mount inside a scope such as `/api/v1` wrapped by the session middleware.
/// `/meals/metrics` is registered ahead of `/meals/{id}` so the literal
/// segment wins.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use daily_diet::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(users::register)
        .service(users::login)
        .service(users::profile)
        .service(meals::create_meal)
        .service(meals::list_meals)
        .service(meals::meal_metrics)
        .service(meals::get_meal)
        .service(meals::update_meal)
        .service(meals::delete_meal);
}
