//! In-memory [`MealRepository`].

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{MealRepository, MealRepositoryError};
use crate::domain::{Meal, MealId, UserId};

/// Meal store backed by a vector in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryMealRepository {
    meals: RwLock<Vec<Meal>>,
}

impl InMemoryMealRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_owned(meal: &Meal, id: &MealId, owner: &UserId) -> bool {
    meal.id() == *id && meal.owner() == owner
}

#[async_trait]
impl MealRepository for InMemoryMealRepository {
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError> {
        self.meals.write().await.push(meal.clone());
        Ok(())
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Meal>, MealRepositoryError> {
        let meals = self.meals.read().await;
        Ok(meals
            .iter()
            .filter(|meal| meal.owner() == owner)
            .cloned()
            .collect())
    }

    async fn list_chronological_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Meal>, MealRepositoryError> {
        let mut history = self.list_for_owner(owner).await?;
        history.sort_by_key(Meal::chronological_key);
        Ok(history)
    }

    async fn find_owned(
        &self,
        id: &MealId,
        owner: &UserId,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        let meals = self.meals.read().await;
        Ok(meals
            .iter()
            .find(|meal| is_owned(meal, id, owner))
            .cloned())
    }

    async fn update_owned(&self, meal: &Meal) -> Result<bool, MealRepositoryError> {
        let mut meals = self.meals.write().await;
        let id = meal.id();
        match meals
            .iter_mut()
            .find(|stored| is_owned(stored, &id, meal.owner()))
        {
            Some(stored) => {
                *stored = meal.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_owned(&self, id: &MealId, owner: &UserId) -> Result<bool, MealRepositoryError> {
        let mut meals = self.meals.write().await;
        let before = meals.len();
        meals.retain(|meal| !is_owned(meal, id, owner));
        Ok(meals.len() != before)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{MealDraft, MealName, MealPatch};

    fn meal(owner: UserId, day: u32, time: &str) -> Meal {
        Meal::new(
            MealId::random(),
            owner,
            MealDraft {
                name: MealName::new("Soup").expect("valid name"),
                description: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 3, day).expect("valid date"),
                time: time.parse().expect("valid time"),
                on_diet: true,
            },
        )
    }

    #[fixture]
    fn repo() -> InMemoryMealRepository {
        InMemoryMealRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn listing_is_scoped_to_owner_and_keeps_insertion_order(repo: InMemoryMealRepository) {
        let ada = UserId::random();
        let bob = UserId::random();
        let late = meal(ada, 2, "08:00");
        let early = meal(ada, 1, "08:00");
        repo.insert(&late).await.expect("insert");
        repo.insert(&meal(bob, 1, "09:00")).await.expect("insert");
        repo.insert(&early).await.expect("insert");

        let listed = repo.list_for_owner(&ada).await.expect("list");

        assert_eq!(listed, vec![late, early]);
    }

    #[rstest]
    #[tokio::test]
    async fn chronological_listing_orders_by_date_then_time(repo: InMemoryMealRepository) {
        let owner = UserId::random();
        let evening = meal(owner, 1, "20:00");
        let next_day = meal(owner, 2, "07:00");
        let morning = meal(owner, 1, "9:30");
        for item in [&next_day, &evening, &morning] {
            repo.insert(item).await.expect("insert");
        }

        let history = repo
            .list_chronological_for_owner(&owner)
            .await
            .expect("list");

        assert_eq!(history, vec![morning, evening, next_day]);
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_owner_cannot_touch_a_meal(repo: InMemoryMealRepository) {
        let owner = UserId::random();
        let intruder = UserId::random();
        let stored = meal(owner, 1, "12:00");
        repo.insert(&stored).await.expect("insert");

        assert!(
            repo.find_owned(&stored.id(), &intruder)
                .await
                .expect("find")
                .is_none()
        );
        assert!(!repo.delete_owned(&stored.id(), &intruder).await.expect("delete"));
        assert_eq!(repo.list_for_owner(&owner).await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_content_in_place(repo: InMemoryMealRepository) {
        let owner = UserId::random();
        let stored = meal(owner, 1, "12:00");
        repo.insert(&stored).await.expect("insert");

        let updated = stored.clone().apply(MealPatch {
            on_diet: Some(false),
            ..MealPatch::default()
        });
        assert!(repo.update_owned(&updated).await.expect("update"));

        let found = repo
            .find_owned(&stored.id(), &owner)
            .await
            .expect("find")
            .expect("present");
        assert!(!found.is_on_diet());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_twice_reports_no_match_the_second_time(repo: InMemoryMealRepository) {
        let owner = UserId::random();
        let stored = meal(owner, 1, "12:00");
        repo.insert(&stored).await.expect("insert");

        assert!(repo.delete_owned(&stored.id(), &owner).await.expect("delete"));
        assert!(!repo.delete_owned(&stored.id(), &owner).await.expect("delete"));
    }
}
