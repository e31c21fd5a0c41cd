//! End-to-end scenarios against a live PostgreSQL at `DATABASE_DSN`
//!
//! Run with `cargo test -- --ignored`.

use axum::{
    Router,
    body::Body,
    http::{Method, StatusCode, header},
};
use common::database::{DatabaseConfig, init_pool};
use serde_json::{Value, json};
use serial_test::serial;
use sqlx::PgPool;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

use crate::{config::HttpConfig, state::AppState};

use super::create_router;

async fn setup() -> (Router, PgPool) {
    let config = DatabaseConfig::from_env().unwrap();
    let pool = init_pool(&config).await.unwrap();
    sqlx::raw_sql(include_str!("../../schema.sql"))
        .execute(&pool)
        .await
        .unwrap();

    let state = AppState::new(pool.clone(), config.request_timeout());
    (create_router(state, &HttpConfig::default()), pool)
}

fn unique_email() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("u{}x{}@b.c", std::process::id(), nanos)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn registration(email: &str, username: &str, password: &str) -> Value {
    json!({
        "email": email,
        "username": username,
        "password": password,
        "repeatPassword": password,
    })
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL at DATABASE_DSN"]
async fn test_author_lifecycle() {
    let (app, _pool) = setup().await;

    let (status, created) = call(
        &app,
        Method::POST,
        "/api/authors",
        Some(json!({"name": "Ilya", "surname": "Sokolov"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Ilya");
    assert_eq!(created["surname"], "Sokolov");
    let uri = format!("/api/authors/{}", created["id"]);

    let (status, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = call(&app, Method::PATCH, &uri, Some(json!({"surname": "Ivanov"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["name"], "Ilya");
    assert_eq!(fetched["surname"], "Ivanov");

    let (status, _) = call(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"id": 999999, "name": "Lev", "surname": "Tolstoy"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["name"], "Lev");

    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::PATCH, &uri, Some(json!({"name": "Anton"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL at DATABASE_DSN"]
async fn test_genre_and_language_lifecycle() {
    let (app, _pool) = setup().await;

    for (path, field, first, second) in [
        ("/api/genres", "genre", "fantasy", "horror"),
        ("/api/languages", "language", "English", "Russian"),
    ] {
        let (status, created) = call(&app, Method::POST, path, Some(json!({ field: first }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created[field], first);
        let uri = format!("{}/{}", path, created["id"]);

        let (status, _) = call(&app, Method::PUT, &uri, Some(json!({ field: second }))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, fetched) = call(&app, Method::GET, &uri, None).await;
        assert_eq!(fetched[field], second);

        let (status, _) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, Method::PUT, &uri, Some(json!({ field: first }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL at DATABASE_DSN"]
async fn test_user_registration_and_lookup() {
    let (app, pool) = setup().await;
    let email = unique_email();

    let (status, user) = call(
        &app,
        Method::POST,
        "/api/users",
        Some(registration(&email, "admin", "qwERty12")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(user.get("password").is_none());
    assert_eq!(user["verified"], false);
    let registered_at = user["registeredAt"].as_str().unwrap();
    assert_eq!(registered_at.len(), 10);
    assert_eq!(&registered_at[2..3], "-");

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(stored, "qwERty12");
    assert!(stored.starts_with("$argon2id$"));

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/users",
        Some(registration(&email, "other", "qwERty12")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "email already taken");

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/api/users?email={}&password=wrong", email),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "wrong email or password");

    let (status, found) = call(
        &app,
        Method::GET,
        &format!("/api/users?email={}&password=qwERty12", email),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["id"], user["id"]);

    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/api/users?email=x{}&password=qwERty12", email),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL at DATABASE_DSN"]
async fn test_user_length_boundaries() {
    let (app, _pool) = setup().await;

    for (username, expected) in [
        ("a".repeat(2), StatusCode::BAD_REQUEST),
        ("a".repeat(3), StatusCode::CREATED),
        ("a".repeat(20), StatusCode::CREATED),
        ("a".repeat(21), StatusCode::BAD_REQUEST),
    ] {
        let body = registration(&unique_email(), &username, "qwERty12");
        let (status, _) = call(&app, Method::POST, "/api/users", Some(body)).await;
        assert_eq!(status, expected, "username of length {}", username.len());
    }

    for (password, expected) in [
        ("a".repeat(5), StatusCode::BAD_REQUEST),
        ("a".repeat(6), StatusCode::CREATED),
        ("a".repeat(24), StatusCode::CREATED),
        ("a".repeat(25), StatusCode::BAD_REQUEST),
    ] {
        let body = registration(&unique_email(), "admin", &password);
        let (status, _) = call(&app, Method::POST, "/api/users", Some(body)).await;
        assert_eq!(status, expected, "password of length {}", password.len());
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL at DATABASE_DSN"]
async fn test_user_updates_require_current_password() {
    let (app, _pool) = setup().await;
    let email = unique_email();

    let (_, user) = call(
        &app,
        Method::POST,
        "/api/users",
        Some(registration(&email, "admin", "qwERty12")),
    )
    .await;
    let uri = format!("/api/users/{}", user["id"]);

    let (status, body) = call(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({"oldPassword": "wrongPass1", "username": "admin2"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "wrong email or password");

    let (status, body) = call(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({"oldPassword": "qwERty12", "email": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "email: cannot be blank");
    let (_, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["email"], email.as_str());

    let (status, _) = call(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({"oldPassword": "qwERty12", "newPassword": "nEwPas5worD", "phoneNumber": "88005553535"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["username"], "admin");
    assert_eq!(fetched["phoneNumber"], "88005553535");

    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/api/users?email={}&password=nEwPas5worD", email),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let new_email = unique_email();
    let (status, _) = call(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "email": new_email,
            "username": "renamed",
            "address": "Russia, Moscow",
            "phoneNumber": "12345",
            "oldPassword": "nEwPas5worD",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["email"], new_email.as_str());
    assert_eq!(fetched["username"], "renamed");
    assert_eq!(fetched["address"], "Russia, Moscow");

    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/api/users?email={}&password=nEwPas5worD", new_email),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL at DATABASE_DSN"]
async fn test_concurrent_registrations_with_same_email() {
    let (app, _pool) = setup().await;
    let email = unique_email();

    let first = call(
        &app,
        Method::POST,
        "/api/users",
        Some(registration(&email, "first", "qwERty12")),
    );
    let second = call(
        &app,
        Method::POST,
        "/api/users",
        Some(registration(&email, "second", "qwERty12")),
    );
    let ((first, _), (second, _)) = tokio::join!(first, second);

    let mut statuses = [first.as_u16(), second.as_u16()];
    statuses.sort();
    assert_eq!(statuses, [201, 400]);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL at DATABASE_DSN"]
async fn test_user_lookup_by_username() {
    let config = DatabaseConfig::from_env().unwrap();
    let (app, pool) = setup().await;
    let state = AppState::new(pool, config.request_timeout());
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let username = format!("n{}", nanos % 1_000_000_000_000_000);

    let (status, user) = call(
        &app,
        Method::POST,
        "/api/users",
        Some(registration(&unique_email(), &username, "qwERty12")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let found = state.user_service.get_by_username(&username).await.unwrap();
    assert_eq!(json!(found.id), user["id"]);

    let missing = state.user_service.get_by_username("nobody0").await;
    assert!(matches!(missing, Err(crate::services::ServiceError::NotFound)));
}
