//! Daily diet backend library.
//!
//! Accounts, cookie-backed sessions, and a per-user meal ledger with diet
//! adherence metrics, served over a versioned JSON API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
