//! Account service - login accounts consumed by the auth service.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::Account;

use crate::repository::AccountRepository;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Get account by username (includes password hash)
    async fn get_account_by_username(&self, username: &str) -> AppResult<Account>;

    /// Create a new account (internal use - password already hashed)
    async fn create_account(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> AppResult<Account>;
}

/// Concrete implementation of AccountService using repository.
pub struct AccountManager {
    repo: Arc<dyn AccountRepository>,
}

impl AccountManager {
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn get_account_by_username(&self, username: &str) -> AppResult<Account> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or_not_found("Account")
    }

    async fn create_account(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> AppResult<Account> {
        if self.repo.find_by_username(&username).await?.is_some() {
            return Err(AppError::validation("Username is already taken"));
        }
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::validation("Email is already registered"));
        }

        let account = self.repo.create(username, email, password_hash).await?;
        tracing::info!(account_id = %account.id, "Account created");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockAccountRepository;
    use uuid::Uuid;

    fn account(username: &str) -> Account {
        Account::new(
            Uuid::new_v4(),
            username.to_string(),
            format!("{}@example.com", username),
            "$argon2id$hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_account_rejects_taken_username() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(account(name))));
        repo.expect_create().times(0);

        let service = AccountManager::new(Arc::new(repo));
        let result = service
            .create_account("ada".into(), "ada@example.com".into(), "hash".into())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_account_rejects_taken_email() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(account("someone"))));
        repo.expect_create().times(0);

        let service = AccountManager::new(Arc::new(repo));
        let result = service
            .create_account("ada".into(), "ada@example.com".into(), "hash".into())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_account_success() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|username, email, hash| Ok(Account::new(Uuid::new_v4(), username, email, hash)));

        let service = AccountManager::new(Arc::new(repo));
        let account = service
            .create_account("ada".into(), "ada@example.com".into(), "hash".into())
            .await
            .unwrap();

        assert_eq!(account.username, "ada");
        assert_eq!(account.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_unknown_username_is_not_found() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));

        let service = AccountManager::new(Arc::new(repo));
        let result = service.get_account_by_username("ghost").await;

        assert!(matches!(result, Err(AppError::NotFound(entity)) if entity == "Account"));
    }
}
