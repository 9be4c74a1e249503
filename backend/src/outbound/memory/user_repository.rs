//! In-memory [`UserRepository`].

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, SessionToken, User, UserAccount, UserId};

#[derive(Debug)]
struct StoredUser {
    account: UserAccount,
    session: Option<SessionToken>,
}

/// User store backed by a vector in registration order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<StoredUser>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn email_exists(&self, email: &Email) -> Result<bool, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .any(|stored| stored.account.user().email() == email))
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().await;
        let email = account.user().email();
        if users
            .iter()
            .any(|stored| stored.account.user().email() == email)
        {
            return Err(UserPersistenceError::duplicate_email());
        }
        users.push(StoredUser {
            account: account.clone(),
            session: None,
        });
        Ok(())
    }

    async fn find_account_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|stored| stored.account.user().email() == email)
            .map(|stored| stored.account.clone()))
    }

    async fn find_by_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|stored| stored.session.as_ref() == Some(token))
            .map(|stored| stored.account.user().clone()))
    }

    async fn replace_session_token(
        &self,
        id: &UserId,
        token: &SessionToken,
    ) -> Result<bool, UserPersistenceError> {
        let mut users = self.users.write().await;
        match users
            .iter_mut()
            .find(|stored| stored.account.user().id() == id)
        {
            Some(stored) => {
                stored.session = Some(*token);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::NewAccount;

    fn account(email: &str) -> UserAccount {
        NewAccount::try_from_parts("Ada", email, "secret")
            .expect("valid registration")
            .into_account(UserId::random())
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_then_lookup_by_email(repo: InMemoryUserRepository) {
        let stored = account("ada@example.com");
        repo.insert(&stored).await.expect("insert");

        let email = stored.user().email().clone();
        assert!(repo.email_exists(&email).await.expect("exists"));
        let found = repo
            .find_account_by_email(&email)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(found, stored);
    }

    #[rstest]
    #[tokio::test]
    async fn second_insert_with_same_email_is_rejected(repo: InMemoryUserRepository) {
        repo.insert(&account("ada@example.com"))
            .await
            .expect("first insert");

        let err = repo
            .insert(&account("ada@example.com"))
            .await
            .expect_err("duplicate");

        assert_eq!(err, UserPersistenceError::DuplicateEmail);
    }

    #[rstest]
    #[tokio::test]
    async fn replacing_a_token_retires_the_previous_one(repo: InMemoryUserRepository) {
        let stored = account("ada@example.com");
        let id = *stored.user().id();
        repo.insert(&stored).await.expect("insert");

        let first = SessionToken::generate();
        let second = SessionToken::generate();
        assert!(repo.replace_session_token(&id, &first).await.expect("bind"));
        assert!(repo.replace_session_token(&id, &second).await.expect("rebind"));

        assert!(
            repo.find_by_session_token(&first)
                .await
                .expect("lookup")
                .is_none()
        );
        let current = repo
            .find_by_session_token(&second)
            .await
            .expect("lookup")
            .expect("bound");
        assert_eq!(current.id(), &id);
    }

    #[rstest]
    #[tokio::test]
    async fn replacing_token_for_unknown_user_reports_no_match(repo: InMemoryUserRepository) {
        let bound = repo
            .replace_session_token(&UserId::random(), &SessionToken::generate())
            .await
            .expect("query");
        assert!(!bound);
    }

    #[tokio::test]
    async fn concurrent_registrations_admit_exactly_one() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let attempts = (0..8).map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.insert(&account("race@example.com")).await })
        });

        let mut admitted = 0;
        for attempt in attempts {
            if attempt.await.expect("task joins").is_ok() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 1);
    }
}
