//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the services that implement the driving ports.
//! Types validate on construction so downstream code never sees a malformed
//! email, meal time, or session token.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User (alias to `user::User`) — registered account without its secret.
//! - Meal (alias to `meal::Meal`) — an owned meal record.
//! - MealMetrics (alias to `metrics::MealMetrics`) — per-user summary.
//! - AccountService and MealLedgerService — port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod meal;
pub mod meal_ledger_service;
pub mod metrics;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    IssuedSession, LoginCredentials, LoginValidationError, NewAccount, Password,
    RegistrationValidationError, SessionToken, UserAccount,
};
pub use self::error::{Error, ErrorCode};
pub use self::meal::{
    MEAL_DATE_FORMAT, MEAL_NAME_MAX, Meal, MealDraft, MealId, MealName, MealPatch,
    MealValidationError, TimeOfDay, parse_meal_date,
};
pub use self::meal_ledger_service::MealLedgerService;
pub use self::metrics::MealMetrics;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DISPLAY_NAME_MAX, DisplayName, EMAIL_MAX, Email, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use daily_diet::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("meal not found"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
