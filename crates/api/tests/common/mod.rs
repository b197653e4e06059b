//! Shared helpers for API integration tests.
//!
//! Each test binary compiles this module separately; not every binary
//! uses every helper.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use nippo_api::auth::csrf::{generate_csrf_token, sign_csrf_token};
use nippo_api::auth::password::hash_password;
use nippo_api::auth::token::{generate_token, AuthConfig};
use nippo_api::config::ServerConfig;
use nippo_api::routes;
use nippo_api::state::AppState;
use nippo_core::types::DbId;
use nippo_db::models::account::{Account, CreateAccount};
use nippo_db::models::user::{CreateUser, User};
use nippo_db::repositories::{AccountRepo, UserRepo};

/// Signing key shared by every test app, fixed so helpers can mint
/// session cookies without going through the login endpoints.
const TEST_SIGNING_KEY: &str = "integration-test-signing-key";

/// Password every seeded user gets.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        auth: AuthConfig {
            signing_key: TEST_SIGNING_KEY.to_string(),
            token_expiry_mins: 60,
            min_password_length: 8,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-csrf-token"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Plain GET without a session.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET carrying the session cookies.
pub async fn get_authed(app: Router, uri: &str, session: &Session) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(COOKIE, &session.cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body with session cookies and the CSRF header.
pub async fn post_json_authed(
    app: Router,
    uri: &str,
    session: &Session,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, &session.cookie)
        .header("x-csrf-token", &session.csrf_token)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// DELETE with a JSON body, session cookies and the CSRF header.
pub async fn delete_json_authed(
    app: Router,
    uri: &str,
    session: &Session,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, &session.cookie)
        .header("x-csrf-token", &session.csrf_token)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Pull one cookie's value out of the response's Set-Cookie headers.
pub fn extract_cookie(response: &Response, name: &str) -> Option<String> {
    response.headers().get_all(SET_COOKIE).iter().find_map(|v| {
        let first = v.to_str().ok()?.split(';').next()?.trim();
        let (key, value) = first.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

// ---------------------------------------------------------------------------
// Session helpers
// ---------------------------------------------------------------------------

/// A minted session: the Cookie header value plus the raw CSRF token
/// for the `x-csrf-token` header.
pub struct Session {
    pub user_id: DbId,
    pub account_id: Option<DbId>,
    pub cookie: String,
    pub csrf_token: String,
}

/// Mint session cookies for an existing user without calling the login
/// endpoints. Signed with the fixed test key, so the app accepts them.
pub fn mint_session(user_id: DbId, account_id: Option<DbId>) -> Session {
    let config = test_config();
    let token = generate_token(user_id, account_id, &config.auth).expect("token generation");
    let csrf_token = generate_csrf_token();
    let signature = sign_csrf_token(&csrf_token, &config.auth.signing_key);

    Session {
        user_id,
        account_id,
        cookie: format!("token={token}; csrf_token={signature}"),
        csrf_token,
    }
}

/// Create a user directly in the database with [`TEST_PASSWORD`].
pub async fn seed_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        fullname: format!("{username} Test"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Create an account directly in the database with `owner_id` as its
/// first member.
pub async fn seed_account(pool: &PgPool, code: &str, owner_id: DbId) -> Account {
    let input = CreateAccount {
        code: code.to_string(),
        fullname: format!("{code} Inc."),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    AccountRepo::create(pool, &input, owner_id)
        .await
        .expect("account creation should succeed")
}

/// Seed a user plus an account and mint an account-scoped session.
pub async fn account_session(pool: &PgPool, username: &str, code: &str) -> Session {
    let user = seed_user(pool, username).await;
    let account = seed_account(pool, code, user.id).await;
    mint_session(user.id, Some(account.id))
}

/// Seed a user and mint a session without account scope.
pub async fn plain_session(pool: &PgPool, username: &str) -> Session {
    let user = seed_user(pool, username).await;
    mint_session(user.id, None)
}

/// Fetch a CSRF pair through the API: the signature cookie value and
/// the raw token.
pub async fn fetch_csrf(app: Router) -> (String, String) {
    let response = get(app, "/csrftoken").await;
    assert_eq!(response.status(), StatusCode::OK);

    let signature = extract_cookie(&response, "csrf_token").expect("csrf cookie should be set");
    let json = body_json(response).await;
    let token = json["csrf_token"].as_str().unwrap().to_string();
    (signature, token)
}

/// POST a JSON body with a fresh CSRF pair but no session, for the
/// public mutating endpoints (signup).
pub async fn post_json_csrf(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let (signature, token) = fetch_csrf(app.clone()).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, format!("csrf_token={signature}"))
        .header("x-csrf-token", &token)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Log in through the API with a form body, fetching a CSRF pair first.
pub async fn login(app: Router, uri: &str, username: &str, password: &str) -> Response {
    let (signature, token) = fetch_csrf(app.clone()).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(COOKIE, format!("csrf_token={signature}"))
        .header("x-csrf-token", &token)
        .body(Body::from(format!("username={username}&password={password}")))
        .unwrap();
    app.oneshot(request).await.unwrap()
}
