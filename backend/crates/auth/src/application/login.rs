//! Login Use Case
//!
//! Verifies email + password and issues an access token.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub user_id: UserId,
    pub access_token: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    /// Unknown email, malformed input and wrong password all fail the same way
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            tracing::warn!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let stored_hash = user.password_hash.clone();
        let pepper = self.config.password_pepper.clone();
        let verified =
            tokio::task::spawn_blocking(move || stored_hash.verify(&password, pepper.as_deref()))
                .await
                .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?;

        if !verified {
            tracing::warn!(user_id = %user.user_id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .issue(&user.user_id.to_string(), self.config.access_token_ttl)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput {
            user_id: user.user_id,
            access_token,
        })
    }
}
