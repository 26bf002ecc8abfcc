//! Error envelope and status mapping as seen over HTTP.

mod common;

use axum::http::StatusCode;
use common::{body_json, car, get, get_auth, InMemoryStore, TEST_JWT_SECRET};
use jsonwebtoken::{encode, EncodingKey, Header};
use modrepo_api::auth::jwt::Claims;

#[tokio::test]
async fn not_found_uses_error_envelope() {
    let app = common::build_test_app(InMemoryStore::new());

    let response = get(app, "/car/nation/Atlantis").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn store_failure_is_sanitized_500() {
    let store = InMemoryStore::new();
    store.seed_car(car("M3", "BMW", "Germany", false));
    store.set_unavailable(true);
    let app = common::build_test_app(store);

    let response = get(app, "/car/all").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn malformed_authorization_header_is_unauthorized() {
    let store = InMemoryStore::new();
    store.seed_car(car("M3", "BMW", "Germany", false));
    let app = common::build_test_app(store);

    let request = axum::http::Request::builder()
        .uri("/car/all")
        .header("Authorization", "Basic ZGF2aWRlOnB3")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let store = InMemoryStore::new();
    store.seed_car(car("M3", "BMW", "Germany", false));
    let app = common::build_test_app(store);

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "davide".into(),
        role: "standard".into(),
        exp: now - 3600,
        iat: now - 7200,
        jti: "expired".into(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let response = get_auth(app, "/car/all", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_with_unknown_role_is_unauthorized() {
    let store = InMemoryStore::new();
    store.seed_car(car("M3", "BMW", "Germany", false));
    let app = common::build_test_app(store);

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "davide".into(),
        role: "superuser".into(),
        exp: now + 3600,
        iat: now,
        jti: "odd-role".into(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let response = get_auth(app, "/car/all", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
