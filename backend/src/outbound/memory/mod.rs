//! Process-local repositories.
//!
//! State lives behind a `tokio::sync::RwLock` and disappears with the
//! process. Each adapter performs its check-and-write under one write guard,
//! so the uniqueness and ownership rules hold under concurrent requests just
//! as the database constraints do.

mod meal_repository;
mod user_repository;

pub use meal_repository::InMemoryMealRepository;
pub use user_repository::InMemoryUserRepository;
