//! Diet adherence metrics over a user's meal history.
//!
//! Everything here is a pure function of the meals passed in; nothing is
//! written back and no store is consulted.

use super::Meal;

/// Aggregate adherence figures for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealMetrics {
    /// Number of meals logged.
    pub total: u64,
    /// Meals flagged as fitting the diet.
    pub on_diet: u64,
    /// Meals flagged as off the diet.
    pub off_diet: u64,
    /// Longest run of consecutive on-diet meals in chronological order.
    pub best_sequence: u64,
}

impl MealMetrics {
    /// Compute metrics from a complete meal history.
    ///
    /// The history may arrive in any order. Meals are ordered by date, then
    /// time of day, then id, so equal timestamps still walk deterministically.
    ///
    /// # Examples
    /// ```
    /// use daily_diet::domain::MealMetrics;
    ///
    /// assert_eq!(MealMetrics::from_history(&[]), MealMetrics::default());
    /// ```
    pub fn from_history(meals: &[Meal]) -> Self {
        let mut ordered: Vec<&Meal> = meals.iter().collect();
        ordered.sort_by_key(|meal| meal.chronological_key());

        let on_diet = meals.iter().filter(|meal| meal.is_on_diet()).count();
        let total = meals.len();
        Self {
            total: total as u64,
            on_diet: on_diet as u64,
            off_diet: (total - on_diet) as u64,
            best_sequence: best_streak(ordered.iter().map(|meal| meal.is_on_diet())),
        }
    }
}

/// Longest run of `true` in a sequence of compliance flags.
pub fn best_streak(flags: impl IntoIterator<Item = bool>) -> u64 {
    let (_, best) = flags
        .into_iter()
        .fold((0_u64, 0_u64), |(current, best), on_diet| {
            if on_diet {
                let current = current + 1;
                (current, best.max(current))
            } else {
                (0, best)
            }
        });
    best
}
