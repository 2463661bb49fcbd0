//! Auth Middleware
//!
//! `require_auth` guards protected routes and stores the resolved user in
//! request extensions; handlers receive it through the `CurrentUser`
//! extractor.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::{AuthenticateUseCase, Credentials};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Authenticated caller of the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::NotAuthenticated)
    }
}

/// Middleware that requires a valid access token
///
/// Mount with `axum::middleware::from_fn_with_state(state, require_auth::<R>)`.
pub async fn require_auth<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let credentials = Credentials::from_headers(req.headers(), &state.config.cookie_name);

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.tokens.clone());
    let user = use_case.execute(credentials).await?;

    tracing::debug!(user_id = %user.user_id, "Request authenticated");

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
