//! Authenticate Use Case
//!
//! Resolves a bearer token to a persisted user. Runs on every protected
//! request; nothing is cached between requests.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::cookie::{bearer_token, extract_cookie, strip_bearer_prefix};
use platform::token::TokenService;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Token candidates found on a request
#[derive(Default)]
pub struct Credentials {
    /// Credential of `Authorization: Bearer <token>`
    pub bearer: Option<String>,
    /// Access-token cookie value, `Bearer ` prefix already stripped
    pub cookie: Option<String>,
}

impl Credentials {
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        Self {
            bearer: bearer_token(headers),
            cookie: extract_cookie(headers, cookie_name)
                .as_deref()
                .and_then(strip_bearer_prefix),
        }
    }

    /// Header wins over cookie
    pub fn token(self) -> Option<String> {
        self.bearer.or(self.cookie)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer", &self.bearer.is_some())
            .field("cookie", &self.cookie.is_some())
            .finish()
    }
}

/// Authenticate use case
pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, credentials: Credentials) -> AuthResult<User> {
        let token = credentials.token().ok_or(AuthError::NotAuthenticated)?;

        let subject = self
            .tokens
            .verify(&token)
            .map_err(|_| AuthError::InvalidToken)?;

        let user_id: UserId = subject.parse().map_err(|_| AuthError::InvalidToken)?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
