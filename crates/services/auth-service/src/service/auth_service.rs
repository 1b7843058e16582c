//! Authentication service - account registration, login and token checks.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::client::AccountServiceClient;
use common::{AppError, AppResult, JwtConfig};
use domain::{
    Account, Password, MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH, SECONDS_PER_HOUR,
    TOKEN_TYPE_BEARER,
};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token issued after successful authentication
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Token plus the account it was issued for.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: TokenResponse,
    pub account: Account,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and sign it in
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<AuthSession>;

    /// Check credentials and issue a token
    async fn login(&self, username: String, password: String) -> AppResult<AuthSession>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService backed by the registrar accounts.
pub struct Authenticator {
    accounts: Arc<dyn AccountServiceClient>,
    jwt: JwtConfig,
    /// Verified against when the username is unknown, so both paths hash
    dummy_password: Password,
}

impl Authenticator {
    pub fn new(accounts: Arc<dyn AccountServiceClient>, jwt: JwtConfig) -> AppResult<Self> {
        let dummy_password = Password::new(&Uuid::new_v4().to_string())?;
        Ok(Self {
            accounts,
            jwt,
            dummy_password,
        })
    }

    fn generate_token(&self, account: &Account) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt.expiration_hours);

        let claims = Claims {
            sub: account.id,
            username: account.username.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret.as_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.jwt.expiration_hours * SECONDS_PER_HOUR,
        })
    }
}

/// Username: 3-32 characters of letters, digits, `_`, `.` or `-`.
fn validate_username(username: &str) -> AppResult<()> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(AppError::validation(format!(
            "Username must be between {} and {} characters",
            MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(AppError::validation(
            "Username may only contain letters, digits, '_', '.' and '-'",
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> AppResult<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::validation("Invalid email format")),
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<AuthSession> {
        let username = username.trim().to_string();
        let email = email.trim().to_lowercase();
        validate_username(&username)?;
        validate_email(&email)?;

        // Cheap check before paying for the hash
        if self.accounts.find_by_username(&username).await?.is_some() {
            return Err(AppError::validation("Username is already taken"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let account = self.accounts.create(username, email, password_hash).await?;
        tracing::info!(account_id = %account.id, "Account registered");

        let token = self.generate_token(&account)?;
        Ok(AuthSession { token, account })
    }

    async fn login(&self, username: String, password: String) -> AppResult<AuthSession> {
        let account = self.accounts.find_by_username(username.trim()).await?;

        // Verify against a real hash either way so unknown usernames take as long
        let password_valid = match &account {
            Some(account) => Password::from_hash(account.password_hash.as_str()).verify(&password),
            None => {
                self.dummy_password.verify(&password);
                false
            }
        };

        match account {
            Some(account) if password_valid => {
                let token = self.generate_token(&account)?;
                Ok(AuthSession { token, account })
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockAccountServiceClient;

    const SECRET: &str = "test-secret-that-is-at-least-32-characters";

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: SECRET.to_string(),
            expiration_hours: 24,
        }
    }

    fn stored_account(username: &str, password: &str) -> Account {
        Account::new(
            Uuid::new_v4(),
            username.to_string(),
            format!("{}@example.com", username),
            Password::new(password).unwrap().into_string(),
        )
    }

    #[tokio::test]
    async fn test_register_issues_token() {
        let mut client = MockAccountServiceClient::new();
        client.expect_find_by_username().returning(|_| Ok(None));
        client
            .expect_create()
            .withf(|username, email, hash| {
                username == "ada" && email == "ada@example.com" && hash.starts_with("$argon2")
            })
            .returning(|username, email, _| {
                Ok(Account::new(Uuid::new_v4(), username, email, String::new()))
            });

        let auth = Authenticator::new(Arc::new(client), jwt()).unwrap();
        let session = auth
            .register(" ada ".into(), "Ada@Example.com".into(), "correct horse".into())
            .await
            .unwrap();

        assert_eq!(session.token.token_type, "Bearer");
        assert_eq!(session.token.expires_in, 24 * 3600);
        let claims = auth.verify_token(&session.token.access_token).unwrap();
        assert_eq!(claims.sub, session.account.id);
        assert_eq!(claims.username, "ada");
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let mut client = MockAccountServiceClient::new();
        client.expect_find_by_username().returning(|_| Ok(None));
        client.expect_create().times(0);

        let auth = Authenticator::new(Arc::new(client), jwt()).unwrap();
        let result = auth
            .register("ada".into(), "ada@example.com".into(), "short".into())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_username() {
        let mut client = MockAccountServiceClient::new();
        client.expect_find_by_username().times(0);

        let auth = Authenticator::new(Arc::new(client), jwt()).unwrap();
        for username in ["ab", "has space", "semi;colon"] {
            let result = auth
                .register(username.into(), "ada@example.com".into(), "long enough".into())
                .await;
            assert!(matches!(result, Err(AppError::Validation(_))), "{}", username);
        }
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let mut client = MockAccountServiceClient::new();
        client
            .expect_find_by_username()
            .returning(|name| Ok(Some(stored_account(name, "whatever1"))));
        client.expect_create().times(0);

        let auth = Authenticator::new(Arc::new(client), jwt()).unwrap();
        let result = auth
            .register("ada".into(), "ada@example.com".into(), "correct horse".into())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let account = stored_account("ada", "correct horse");
        let mut client = MockAccountServiceClient::new();
        client
            .expect_find_by_username()
            .returning(move |_| Ok(Some(account.clone())));

        let auth = Authenticator::new(Arc::new(client), jwt()).unwrap();
        let session = auth.login("ada".into(), "correct horse".into()).await.unwrap();

        assert_eq!(session.account.username, "ada");
        assert!(auth.verify_token(&session.token.access_token).is_ok());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let account = stored_account("ada", "correct horse");
        let mut client = MockAccountServiceClient::new();
        client
            .expect_find_by_username()
            .returning(move |_| Ok(Some(account.clone())));

        let auth = Authenticator::new(Arc::new(client), jwt()).unwrap();
        let result = auth.login("ada".into(), "battery staple".into()).await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_invalid_credentials() {
        let mut client = MockAccountServiceClient::new();
        client.expect_find_by_username().returning(|_| Ok(None));

        let auth = Authenticator::new(Arc::new(client), jwt()).unwrap();
        let result = auth.login("ghost".into(), "anything at all".into()).await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let auth =
            Authenticator::new(Arc::new(MockAccountServiceClient::new()), jwt()).unwrap();
        let other = Authenticator::new(
            Arc::new(MockAccountServiceClient::new()),
            JwtConfig {
                secret: "another-secret-that-is-32-characters-long".to_string(),
                expiration_hours: 1,
            },
        )
        .unwrap();

        let account = stored_account("ada", "correct horse");
        let token = other.generate_token(&account).unwrap();

        assert!(auth.verify_token(&token.access_token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let auth =
            Authenticator::new(Arc::new(MockAccountServiceClient::new()), jwt()).unwrap();
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: "ada".to_string(),
            exp: past.timestamp(),
            iat: (past - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = auth.verify_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Jwt(_)));
    }
}
