use std::time::Duration;

use anyhow::Result;
use mockito::Matcher;
use reqwest::Method;
use reqwest::StatusCode;
use serde_json::json;
use test_utils::movie_fixture;
use test_utils::movies_fixture;

use super::is_login_endpoint;
use super::is_session_expired;
use super::ApiClient;
use crate::domain::models::ClientError;
use crate::domain::models::MovieInput;
use crate::domain::models::TokenStore;
use crate::infrastructure::storage::memory::MemoryTokenStore;
use crate::infrastructure::storage::TokenStoreBox;

impl ApiClient {
    fn with_url(url: String, store: TokenStoreBox) -> ApiClient {
        return ApiClient::new(&url, Duration::from_millis(2000), store);
    }
}

#[tokio::test]
async fn it_attaches_the_bearer_token() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/movies")
        .match_header("Authorization", "Bearer abc123")
        .match_header("Content-Type", "application/json")
        .with_status(200)
        .with_body(movies_fixture())
        .create_async()
        .await;

    let client = ApiClient::with_url(server.url(), MemoryTokenStore::with_token("abc123"));
    let movies = client.list_movies().await?;

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Dune");
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_omits_authorization_without_a_token() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/login")
        .match_header("Authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({
            "email": "ana@example.com",
            "password": "secret1"
        })))
        .with_status(200)
        .with_body(r#"{"token":"fresh"}"#)
        .create_async()
        .await;

    let client = ApiClient::with_url(server.url(), MemoryTokenStore::boxed());
    let token = client.login("ana@example.com", "secret1").await?;

    assert_eq!(token, "fresh");
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_reads_the_token_at_call_time() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/movies")
        .match_header("Authorization", "Bearer later")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let store = MemoryTokenStore::boxed();
    let client = ApiClient::with_url(server.url(), store.clone());
    store.set("later")?;

    let movies = client.list_movies().await?;
    assert!(movies.is_empty());
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_uses_the_server_error_message() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/movies")
        .with_status(400)
        .with_body(r#"{"error":"Title is required"}"#)
        .create_async()
        .await;

    let client = ApiClient::with_url(server.url(), MemoryTokenStore::with_token("abc123"));
    let res = client
        .create_movie(&MovieInput {
            title: "".to_string(),
            ..MovieInput::default()
        })
        .await;

    let err = res.unwrap_err();
    assert_eq!(
        err,
        ClientError::Api {
            status: 400,
            message: "Title is required".to_string()
        }
    );
    assert_eq!(err.to_string(), "Title is required");
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_falls_back_to_the_status_text() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let no_error_field = server
        .mock("GET", "/movies")
        .with_status(422)
        .with_body(r#"{"detail":"nope"}"#)
        .create_async()
        .await;
    let not_json = server
        .mock("DELETE", "/movies/1")
        .with_status(500)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let client = ApiClient::with_url(server.url(), MemoryTokenStore::with_token("abc123"));

    let err = client.list_movies().await.unwrap_err();
    assert_eq!(err.to_string(), "Unprocessable Entity");

    let err = client.delete_movie("1").await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Api {
            status: 500,
            message: "Internal Server Error".to_string()
        }
    );

    no_error_field.assert_async().await;
    not_json.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_expires_the_session_on_rejected_tokens() -> Result<()> {
    for status in [401, 403] {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/movies")
            .with_status(status)
            .with_body(r#"{"error":"jwt expired"}"#)
            .create_async()
            .await;

        let store = MemoryTokenStore::with_token("stale");
        let client = ApiClient::with_url(server.url(), store.clone());
        let res = client.list_movies().await;

        assert_eq!(res.unwrap_err(), ClientError::SessionExpired);
        assert_eq!(store.get(), None);
        mock.assert_async().await;
    }

    return Ok(());
}

#[tokio::test]
async fn it_never_expires_anonymous_requests() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/register")
        .with_status(403)
        .with_body(r#"{"error":"Registrations are closed"}"#)
        .create_async()
        .await;

    let store = MemoryTokenStore::boxed();
    let client = ApiClient::with_url(server.url(), store.clone());
    let res = client.register("Ana", "ana@example.com", "secret1").await;

    assert_eq!(
        res.unwrap_err(),
        ClientError::Api {
            status: 403,
            message: "Registrations are closed".to_string()
        }
    );
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_never_expires_the_login_endpoint() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/login")
        .match_header("Authorization", "Bearer stale")
        .with_status(401)
        .with_body(r#"{"error":"Invalid credentials"}"#)
        .create_async()
        .await;

    let store = MemoryTokenStore::with_token("stale");
    let client = ApiClient::with_url(server.url(), store.clone());
    let res = client.login("ana@example.com", "wrong").await;

    assert_eq!(
        res.unwrap_err(),
        ClientError::Api {
            status: 401,
            message: "Invalid credentials".to_string()
        }
    );
    // Not an expiry, so the stored token is left alone.
    assert_eq!(store.get(), Some("stale".to_string()));
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_accepts_empty_bodies() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/movies/1")
        .match_header("Authorization", "Bearer abc123")
        .with_status(204)
        .create_async()
        .await;

    let client = ApiClient::with_url(server.url(), MemoryTokenStore::with_token("abc123"));
    let value = client.request("/movies/1", Method::DELETE, None).await?;

    assert!(value.is_null());
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_sends_only_filled_movie_fields() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/movies")
        .match_body(Matcher::Json(json!({ "title": "Arrival" })))
        .with_status(201)
        .with_body(movie_fixture("2", "Arrival"))
        .create_async()
        .await;

    let client = ApiClient::with_url(server.url(), MemoryTokenStore::with_token("abc123"));
    let movie = client
        .create_movie(&MovieInput {
            title: "Arrival".to_string(),
            ..MovieInput::default()
        })
        .await?;

    assert_eq!(movie.id, "2");
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_updates_movies_by_id() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/movies/abc-1")
        .match_body(Matcher::Json(json!({ "title": "Dune", "releaseYear": 2021 })))
        .with_status(200)
        .with_body(movie_fixture("abc-1", "Dune"))
        .create_async()
        .await;

    let client = ApiClient::with_url(
        format!("{}/", server.url()),
        MemoryTokenStore::with_token("abc123"),
    );
    let movie = client
        .update_movie(
            "abc-1",
            &MovieInput {
                title: "Dune".to_string(),
                release_year: Some(2021),
                ..MovieInput::default()
            },
        )
        .await?;

    assert_eq!(movie.title, "Dune");
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_reports_invalid_json_on_success() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/movies")
        .with_status(200)
        .with_body("definitely not json")
        .create_async()
        .await;

    let client = ApiClient::with_url(server.url(), MemoryTokenStore::boxed());
    let res = client.list_movies().await;

    assert!(matches!(res, Err(ClientError::InvalidResponse(_))));
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_reports_transport_failures() {
    let client = ApiClient::with_url(
        "http://127.0.0.1:1".to_string(),
        MemoryTokenStore::with_token("abc123"),
    );
    let res = client.list_movies().await;

    assert!(matches!(res, Err(ClientError::TransportFailure(_))));
}

#[test]
fn it_only_matches_the_login_path() {
    assert!(is_login_endpoint("/login"));
    assert!(is_login_endpoint("/login/"));
    assert!(is_login_endpoint("/login?next=/dashboard"));
    assert!(!is_login_endpoint("/movies"));
    assert!(!is_login_endpoint("/register"));
}

#[test]
fn it_classifies_session_expiry() {
    assert!(is_session_expired(StatusCode::UNAUTHORIZED, true, "/movies"));
    assert!(is_session_expired(StatusCode::FORBIDDEN, true, "/movies/1"));
    assert!(!is_session_expired(StatusCode::UNAUTHORIZED, false, "/movies"));
    assert!(!is_session_expired(StatusCode::UNAUTHORIZED, true, "/login"));
    assert!(!is_session_expired(StatusCode::NOT_FOUND, true, "/movies"));
}
