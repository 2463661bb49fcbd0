//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::token::{TokenError, TokenService};

use crate::application::config::AuthConfig;
use crate::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers and the auth middleware
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    /// Fails only if the configured secret/algorithm cannot sign tokens
    pub fn new(repo: R, config: AuthConfig) -> Result<Self, TokenError> {
        let tokens = config.token_service()?;
        Ok(Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        })
    }
}

// Manual impl: cloning the state only clones the Arcs, whatever `R` is.
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /user/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<Json<RegisterResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(RegisterResponse::from(user)))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
///
/// Returns the token in the body and also sets it as an HttpOnly cookie.
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let body = Json(LoginResponse::bearer(output.access_token.clone()));

    match state
        .config
        .access_cookie()
        .set_cookie_header(&output.access_token)
    {
        Some(cookie) => Ok(([(header::SET_COOKIE, cookie)], body).into_response()),
        None => Ok(body.into_response()),
    }
}

// ============================================================================
// Current User
// ============================================================================

/// GET /user/me, GET /auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse::from(&user))
}
