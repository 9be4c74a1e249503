//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `MealCommand`, ...) are called by inbound
//! adapters. Driven ports (`UserRepository`, `MealRepository`) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod meal_command;
mod meal_metrics_query;
mod meal_query;
mod meal_repository;
mod registration_service;
mod session_authenticator;
mod user_profile_query;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use meal_command::MealCommand;
#[cfg(test)]
pub use meal_command::MockMealCommand;
pub use meal_metrics_query::MealMetricsQuery;
#[cfg(test)]
pub use meal_metrics_query::MockMealMetricsQuery;
pub use meal_query::MealQuery;
#[cfg(test)]
pub use meal_query::MockMealQuery;
#[cfg(test)]
pub use meal_repository::MockMealRepository;
pub use meal_repository::{MealRepository, MealRepositoryError};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use session_authenticator::MockSessionAuthenticator;
pub use session_authenticator::SessionAuthenticator;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
