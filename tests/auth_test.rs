use std::collections::HashMap;

use axum::{Form, Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};
use spotmix::{
    AuthError,
    spotify::{AuthSession, auth::AUTH_SCOPE},
    types::AuthState,
};

// Serves `app` on an ephemeral local port and returns its base URL
async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// Accounts service stand-in: grants a token for code "good", rejects anything else
async fn token_endpoint(Form(form): Form<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let well_formed = form.get("grant_type").map(String::as_str) == Some("authorization_code")
        && form.get("client_id").map(String::as_str) == Some("client-id")
        && form.get("client_secret").map(String::as_str) == Some("client-secret")
        && form.contains_key("redirect_uri");

    if well_formed && form.get("code").map(String::as_str) == Some("good") {
        (
            StatusCode::OK,
            Json(json!({
                "access_token": "token-123",
                "token_type": "Bearer",
                "scope": AUTH_SCOPE,
                "expires_in": 3600
            })),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid authorization code"
            })),
        )
    }
}

fn session() -> AuthSession {
    AuthSession::new("client-id", "client-secret", "http://127.0.0.1", 0)
}

#[test]
fn test_authorization_url() {
    let session = AuthSession::new("client-id", "client-secret", "http://localhost/", 8080);
    assert_eq!(session.redirect_uri(), "http://localhost:8080");

    let url = session
        .authorization_url("https://accounts.example/")
        .unwrap();
    assert_eq!(url.path(), "/authorize");

    let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
    assert_eq!(query["client_id"], "client-id");
    assert_eq!(query["scope"], "playlist-modify,playlist-modify-private");
    assert_eq!(query["redirect_uri"], "http://localhost:8080");
    assert_eq!(query["response_type"], "code");
}

#[test]
fn test_new_session_is_waiting() {
    let session = session();
    assert_eq!(session.state(), AuthState::Waiting);
    assert!(session.authorization_code().is_none());
    assert!(session.access_token().is_none());
}

#[tokio::test]
async fn test_callback_delivers_code_and_stops_listener() {
    let mut session = session();
    let listener = session.listen().await.unwrap();
    assert_ne!(session.port(), 0);
    assert_eq!(session.port(), listener.port());

    let redirect = format!("{}/?code=abc&state=xyz", session.redirect_uri());
    let browser = tokio::spawn(async move {
        let res = reqwest::get(&redirect).await.unwrap();
        (res.status(), res.text().await.unwrap())
    });

    let code = session.await_code(listener).await.unwrap();
    assert_eq!(code, "abc");
    assert_eq!(session.state(), AuthState::CodeReceived);
    assert_eq!(session.authorization_code(), Some("abc"));

    let (status, body) = browser.await.unwrap();
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains("Got the code"));

    // the listener is gone once the code is in
    assert!(reqwest::get(session.redirect_uri()).await.is_err());
}

#[tokio::test]
async fn test_callback_error_fails_fast() {
    let mut session = session();
    let listener = session.listen().await.unwrap();

    let redirect = format!("{}/?error=access_denied", session.redirect_uri());
    let browser = tokio::spawn(async move { reqwest::get(&redirect).await.unwrap().status() });

    let result = session.await_code(listener).await;
    assert!(matches!(result, Err(AuthError::Denied(ref reason)) if reason == "access_denied"));
    assert_eq!(session.state(), AuthState::Failed);
    assert_eq!(browser.await.unwrap(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_callback_without_code_keeps_waiting() {
    let mut session = session();
    let listener = session.listen().await.unwrap();
    let base = session.redirect_uri();

    let browser = tokio::spawn(async move {
        let client = reqwest::Client::new();
        let stray = client.get(format!("{}/", base)).send().await.unwrap();
        let health: Value = client
            .get(format!("{}/health", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        client
            .get(format!("{}/?code=late", base))
            .send()
            .await
            .unwrap();
        (stray.status(), health)
    });

    let code = session.await_code(listener).await.unwrap();
    assert_eq!(code, "late");

    let (stray_status, health) = browser.await.unwrap();
    assert_eq!(stray_status, reqwest::StatusCode::NOT_FOUND);
    assert_eq!(health["service"], "spotmix");
}

#[tokio::test]
async fn test_exchange_code_acquires_token() {
    let accounts = spawn_server(Router::new().route("/api/token", post(token_endpoint))).await;
    let mut session = session();
    let listener = session.listen().await.unwrap();

    let redirect = format!("{}/?code=good", session.redirect_uri());
    tokio::spawn(async move { reqwest::get(&redirect).await });
    session.await_code(listener).await.unwrap();

    let token = session.exchange_code(&accounts).await.unwrap();
    assert_eq!(token.access_token, "token-123");
    assert_eq!(token.expires_in, 3600);
    assert_eq!(session.state(), AuthState::TokenAcquired);
    assert_eq!(session.access_token().map(|t| t.as_str()), Some("token-123"));
}

#[tokio::test]
async fn test_exchange_code_rejected() {
    let accounts = spawn_server(Router::new().route("/api/token", post(token_endpoint))).await;
    let mut session = session();
    let listener = session.listen().await.unwrap();

    let redirect = format!("{}/?code=stale", session.redirect_uri());
    tokio::spawn(async move { reqwest::get(&redirect).await });
    session.await_code(listener).await.unwrap();

    let result = session.exchange_code(&accounts).await;
    match result {
        Err(AuthError::TokenExchange(reason)) => assert!(reason.contains("invalid_grant")),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(session.state(), AuthState::Failed);
    assert!(session.access_token().is_none());
}

#[tokio::test]
async fn test_exchange_without_code_fails() {
    let mut session = session();
    let result = session.exchange_code("http://127.0.0.1:9").await;
    assert!(matches!(result, Err(AuthError::TokenExchange(_))));
    assert_eq!(session.state(), AuthState::Failed);
}

#[test]
fn test_authorization_url_rejects_garbage_base() {
    let session = session();
    assert!(matches!(
        session.authorization_url("not a url"),
        Err(AuthError::InvalidUrl(_))
    ));
}
