//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the request and response bodies
//! they exchange, and the `sessionId` cookie security scheme. The document is
//! served by Swagger UI in debug builds and exported by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::meals::{
    CreateMealRequest, MealEnvelope, MealResponse, MealsEnvelope, MetricsResponse,
    UpdateMealRequest,
};
use crate::inbound::http::users::{LoginRequest, RegisterRequest, UserEnvelope, UserResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "sessionId",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Daily Diet API",
        description = "Meal logging with session cookies, per-user meal ledgers, and diet adherence metrics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::profile,
        crate::inbound::http::meals::create_meal,
        crate::inbound::http::meals::list_meals,
        crate::inbound::http::meals::meal_metrics,
        crate::inbound::http::meals::get_meal,
        crate::inbound::http::meals::update_meal,
        crate::inbound::http::meals::delete_meal,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        UserEnvelope,
        CreateMealRequest,
        UpdateMealRequest,
        MealResponse,
        MealEnvelope,
        MealsEnvelope,
        MetricsResponse,
    )),
    tags(
        (name = "users", description = "Registration and profile"),
        (name = "auth", description = "Session issuance"),
        (name = "meals", description = "Meal ledger and adherence metrics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
