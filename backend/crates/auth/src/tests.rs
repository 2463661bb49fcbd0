//! HTTP-level tests against the in-memory repository

#[cfg(test)]
mod auth_flow_tests {
    use std::time::Duration;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::user_id::UserId;
    use crate::infra::memory::InMemoryUserRepository;
    use crate::presentation::dto::LoginResponse;
    use crate::presentation::handlers::AuthAppState;
    use crate::presentation::router::auth_router_generic;

    fn app() -> (Router, AuthAppState<InMemoryUserRepository>) {
        let state = AuthAppState::new(InMemoryUserRepository::new(), AuthConfig::development())
            .expect("development config signs tokens");
        (auth_router_generic(state.clone()), state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value, Option<String>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body, cookie)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with(uri: &str, name: header::HeaderName, value: &str) -> Request<Body> {
        Request::get(uri)
            .header(name, value)
            .body(Body::empty())
            .unwrap()
    }

    async fn register_alice(app: &Router) -> Value {
        let (status, body, _) = send(
            app,
            post_json(
                "/user/register",
                json!({"username": "alice", "email": "alice@example.com", "password": "pw1"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    async fn login_alice(app: &Router) -> (String, Option<String>) {
        let (status, body, cookie) = send(
            app,
            post_json(
                "/auth/login",
                json!({"email": "alice@example.com", "password": "pw1"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let login: LoginResponse = serde_json::from_value(body).unwrap();
        assert_eq!(login.token_type, "bearer");
        (login.access_token, cookie)
    }

    #[tokio::test]
    async fn test_register_returns_public_fields() {
        let (app, _) = app();
        let body = register_alice(&app).await;

        assert_eq!(body["username"], "alice");
        assert_eq!(body["email"], "alice@example.com");
        assert!(body["id"].as_str().unwrap().parse::<UserId>().is_ok());
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let (app, _) = app();
        register_alice(&app).await;

        let (status, body, _) = send(
            &app,
            post_json(
                "/user/register",
                json!({"username": "other", "email": "ALICE@example.com", "password": "pw2"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["detail"], "Email already registered");
    }

    #[tokio::test]
    async fn test_register_validation() {
        let (app, state) = app();
        let (status, _, _) = send(
            &app,
            post_json(
                "/user/register",
                json!({"username": "alice", "email": "not-an-email", "password": "pw1"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, _) = send(
            &app,
            post_json(
                "/user/register",
                json!({"username": "alice", "email": "alice@example.com", "password": "  "}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(state.repo.is_empty());
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let (app, state) = app();
        register_alice(&app).await;

        let email = crate::domain::value_object::email::Email::new("alice@example.com").unwrap();
        let user = state.repo.find_by_email(&email).await.unwrap().unwrap();
        assert!(user.password_hash.as_phc_string().starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (app, _) = app();
        register_alice(&app).await;

        for body in [
            json!({"email": "alice@example.com", "password": "wrong"}),
            json!({"email": "nobody@example.com", "password": "pw1"}),
        ] {
            let (status, body, cookie) = send(&app, post_json("/auth/login", body)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["detail"], "Invalid email or password");
            assert!(cookie.is_none());
        }
    }

    #[tokio::test]
    async fn test_login_sets_http_only_cookie() {
        let (app, _) = app();
        register_alice(&app).await;
        let (token, cookie) = login_alice(&app).await;

        let cookie = cookie.expect("login sets the access-token cookie");
        assert!(cookie.starts_with(&format!("access_token={}", token)));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_me_with_bearer_header() {
        let (app, _) = app();
        register_alice(&app).await;
        let (token, _) = login_alice(&app).await;

        for uri in ["/user/me", "/auth/me"] {
            let (status, body, _) = send(
                &app,
                get_with(uri, header::AUTHORIZATION, &format!("Bearer {}", token)),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"username": "alice", "email": "alice@example.com"}));
        }
    }

    #[tokio::test]
    async fn test_cookie_alone_authenticates() {
        let (app, _) = app();
        register_alice(&app).await;
        let (token, _) = login_alice(&app).await;

        let (status, body, _) = send(
            &app,
            get_with("/auth/me", header::COOKIE, &format!("access_token={}", token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "alice@example.com");

        let (status, _, _) = send(
            &app,
            get_with(
                "/auth/me",
                header::COOKIE,
                &format!("access_token=Bearer {}", token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_header_takes_precedence_over_cookie() {
        let (app, _) = app();
        register_alice(&app).await;
        let (token, _) = login_alice(&app).await;

        let request = Request::get("/auth/me")
            .header(header::AUTHORIZATION, "Bearer garbage")
            .header(header::COOKIE, format!("access_token={}", token))
            .body(Body::empty())
            .unwrap();
        let (status, body, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid token");
    }

    #[tokio::test]
    async fn test_gate_rejections() {
        let (app, state) = app();

        let (status, body, _) =
            send(&app, Request::get("/auth/me").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Not authenticated");

        let (status, body, _) = send(
            &app,
            get_with("/auth/me", header::AUTHORIZATION, "Bearer not.a.jwt"),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid token");

        // Well-signed token whose subject is not a user id
        let token = state.tokens.issue("alice", Duration::from_secs(60)).unwrap();
        let (_, body, _) = send(
            &app,
            get_with("/auth/me", header::AUTHORIZATION, &format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(body["detail"], "Invalid token");

        // Well-signed token for a user that does not exist
        let token = state
            .tokens
            .issue(&UserId::new().to_string(), Duration::from_secs(60))
            .unwrap();
        let (status, body, _) = send(
            &app,
            get_with("/auth/me", header::AUTHORIZATION, &format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "User not found");
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let (app, state) = app();
        let body = register_alice(&app).await;

        let token = state
            .tokens
            .issue(body["id"].as_str().unwrap(), Duration::ZERO)
            .unwrap();
        let (status, body, _) = send(
            &app,
            get_with("/auth/me", header::AUTHORIZATION, &format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid token");
    }
}
