//! Driving port for adherence metrics.

use async_trait::async_trait;

use crate::domain::{Error, MealMetrics, UserId};

/// Domain use-case port computing an owner's diet metrics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealMetricsQuery: Send + Sync {
    /// Totals and best on-diet streak, all taken from one snapshot.
    async fn meal_metrics(&self, owner: &UserId) -> Result<MealMetrics, Error>;
}
