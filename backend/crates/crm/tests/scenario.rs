//! End-to-end flows through the merged auth and CRM routers

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use auth::{AuthAppState, AuthConfig, InMemoryUserRepository, auth_router_generic};
use crm::{CrmAppState, CrmCaches, InMemoryCrmRepository, crm_router_generic};

fn app() -> Router {
    let auth = AuthAppState::new(InMemoryUserRepository::new(), AuthConfig::development())
        .expect("development config signs tokens");
    let crm = CrmAppState::new(InMemoryCrmRepository::new(), CrmCaches::default());

    auth_router_generic(auth.clone()).merge(crm_router_generic(crm, auth))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn sign_up(app: &Router, email: &str, password: &str) -> String {
    let (status, _) = send(
        app,
        Request::post("/user/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"username": "user", "email": email, "password": password}).to_string(),
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        Request::post("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"email": email, "password": password}).to_string(),
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

async fn add_client(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/clients/add",
            token,
            Some(json!({"name": name, "contact": "bob@x.com", "notes": ""})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_client_lifecycle() {
    let app = app();
    let token = sign_up(&app, "alice@example.com", "pw1").await;

    let id = add_client(&app, &token, "Bob").await;

    let (status, body) = send(&app, request("GET", "/clients/all", &token, None)).await;
    assert_eq!(status, StatusCode::OK);
    let clients = body.as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["name"], "Bob");
    assert_eq!(clients[0]["contact"], "bob@x.com");

    let (status, _) = send(
        &app,
        request("DELETE", &format!("/clients/delete/{id}"), &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        request("GET", &format!("/clients/get/{id}"), &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, request("GET", "/clients/all", &token, None)).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_orders_and_payments_cascade() {
    let app = app();
    let token = sign_up(&app, "alice@example.com", "pw1").await;
    let client_id = add_client(&app, &token, "Bob").await;

    let (status, order) = send(
        &app,
        request(
            "POST",
            "/orders/add",
            &token,
            Some(json!({
                "client_id": client_id,
                "title": "Logo",
                "description": "Vector logo",
                "price": 15000
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "new");
    assert_eq!(order["is_paid"], false);
    let order_id = order["id"].as_str().unwrap().to_string();

    let (status, payment) = send(
        &app,
        request(
            "POST",
            "/payments/add",
            &token,
            Some(json!({"order_id": order_id, "amount": 5000, "is_paid": true})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let payment_id = payment["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        request(
            "PUT",
            &format!("/orders/update/{order_id}"),
            &token,
            Some(json!({
                "client_id": client_id,
                "title": "Logo",
                "description": "Vector logo",
                "price": 15000,
                "status": "active"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "active");

    let (_, orders) = send(
        &app,
        request("GET", &format!("/orders/all/{client_id}"), &token, None),
    )
    .await;
    assert_eq!(orders.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        request("DELETE", &format!("/clients/delete/{client_id}"), &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for uri in [
        format!("/orders/get/{order_id}"),
        format!("/payments/get/{payment_id}"),
    ] {
        let (status, _) = send(&app, request("GET", &uri, &token, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_tenants_are_isolated() {
    let app = app();
    let alice = sign_up(&app, "alice@example.com", "pw1").await;
    let mallory = sign_up(&app, "mallory@example.com", "pw2").await;

    let id = add_client(&app, &alice, "Bob").await;

    let (_, body) = send(&app, request("GET", "/clients/all", &mallory, None)).await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = send(
        &app,
        request("GET", &format!("/clients/get/{id}"), &mallory, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/clients/update/{id}"),
            &mallory,
            Some(json!({"name": "Pwned", "contact": "m@x.com"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request("DELETE", &format!("/clients/delete/{id}"), &mallory, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/orders/add",
            &mallory,
            Some(json!({
                "client_id": id,
                "title": "Steal",
                "description": "",
                "price": 1
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, order) = send(
        &app,
        request(
            "POST",
            "/orders/add",
            &alice,
            Some(json!({
                "client_id": id,
                "title": "Logo",
                "description": "",
                "price": 100
            })),
        ),
    )
    .await;
    let order_id = order["id"].as_str().unwrap().to_string();
    let (_, payment) = send(
        &app,
        request(
            "POST",
            "/payments/add",
            &alice,
            Some(json!({"order_id": order_id, "amount": 40, "is_paid": true})),
        ),
    )
    .await;
    let payment_id = payment["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/orders/update/{order_id}"),
            &mallory,
            Some(json!({
                "client_id": id,
                "title": "Pwned",
                "description": "",
                "price": 0
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/payments/update/{payment_id}"),
            &mallory,
            Some(json!({"order_id": order_id, "amount": 0, "is_paid": false})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        request("GET", &format!("/clients/get/{id}"), &alice, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Bob");

    let (_, body) = send(
        &app,
        request("GET", &format!("/orders/get/{order_id}"), &alice, None),
    )
    .await;
    assert_eq!(body, order);

    let (_, body) = send(
        &app,
        request("GET", &format!("/payments/get/{payment_id}"), &alice, None),
    )
    .await;
    assert_eq!(body, payment);
}

#[tokio::test]
async fn test_crm_routes_require_authentication() {
    let app = app();

    let (status, _) = send(
        &app,
        Request::get("/clients/all").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, request("GET", "/clients/all", "garbage", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_payloads_are_rejected() {
    let app = app();
    let token = sign_up(&app, "alice@example.com", "pw1").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/clients/add",
            &token,
            Some(json!({"name": "   ", "contact": "bob@x.com"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let client_id = add_client(&app, &token, "Bob").await;
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/orders/add",
            &token,
            Some(json!({
                "client_id": client_id,
                "title": "Logo",
                "description": "",
                "price": -5
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
