use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::movie_fixture;
use test_utils::movies_fixture;
use tokio::sync::mpsc;

use super::run;
use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::ClientError;
use crate::domain::models::Event;
use crate::domain::models::MovieInput;
use crate::domain::models::TokenStore;
use crate::domain::services::AuthService;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::storage::memory::MemoryTokenStore;
use crate::infrastructure::storage::TokenStoreBox;

fn services(url: String, store: TokenStoreBox) -> (ApiClient, AuthService) {
    let client = ApiClient::new(&url, Duration::from_millis(2000), store.clone());
    let auth = AuthService::new(client.clone(), store);
    return (client, auth);
}

#[tokio::test]
async fn it_logs_in() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/login")
        .with_status(200)
        .with_body(r#"{"token":"abc123"}"#)
        .create_async()
        .await;

    let store = MemoryTokenStore::boxed();
    let (client, auth) = services(server.url(), store.clone());
    let action = Action::Login {
        email: "ana@example.com".to_string(),
        password: "secret1".to_string(),
    };

    match run(action, &client, &auth).await {
        Event::LoginCompleted(res) => assert_eq!(res, Ok("abc123".to_string())),
        _ => bail!("Wrong enum"),
    }
    assert_eq!(store.get(), Some("abc123".to_string()));
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_tags_movie_results_with_the_mount_id() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/movies")
        .with_status(200)
        .with_body(movies_fixture())
        .create_async()
        .await;

    let (client, auth) = services(server.url(), MemoryTokenStore::with_token("abc123"));

    match run(Action::ListMovies { mount_id: 7 }, &client, &auth).await {
        Event::MoviesLoaded { mount_id, result } => {
            assert_eq!(mount_id, 7);
            assert_eq!(result?.len(), 2);
        }
        _ => bail!("Wrong enum"),
    }
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_posts_new_movies() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/movies")
        .match_body(Matcher::Json(json!({ "title": "Arrival" })))
        .with_status(201)
        .with_body(movie_fixture("2", "Arrival"))
        .create_async()
        .await;

    let (client, auth) = services(server.url(), MemoryTokenStore::with_token("abc123"));
    let action = Action::CreateMovie {
        mount_id: 1,
        input: MovieInput {
            title: "Arrival".to_string(),
            ..MovieInput::default()
        },
    };

    match run(action, &client, &auth).await {
        Event::MovieSaved {
            updated, result, ..
        } => {
            assert!(!updated);
            assert_eq!(result?.title, "Arrival");
        }
        _ => bail!("Wrong enum"),
    }
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_reports_delete_failures() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/movies/9")
        .with_status(404)
        .with_body(r#"{"error":"not found"}"#)
        .create_async()
        .await;

    let (client, auth) = services(server.url(), MemoryTokenStore::with_token("abc123"));
    let action = Action::DeleteMovie {
        mount_id: 1,
        id: "9".to_string(),
    };

    match run(action, &client, &auth).await {
        Event::MovieDeleted { result, .. } => assert_eq!(
            result,
            Err(ClientError::Api {
                status: 404,
                message: "not found".to_string()
            })
        ),
        _ => bail!("Wrong enum"),
    }
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_replies_over_the_event_channel() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/movies")
        .with_status(401)
        .create_async()
        .await;

    let (client, auth) = services(server.url(), MemoryTokenStore::with_token("stale"));
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    action_tx.send(Action::ListMovies { mount_id: 3 })?;
    drop(action_tx);
    ActionsService::start(client, auth, event_tx, &mut action_rx).await?;

    let event = event_rx.recv().await;
    match event {
        Some(Event::MoviesLoaded { mount_id, result }) => {
            assert_eq!(mount_id, 3);
            assert_eq!(result, Err(ClientError::SessionExpired));
        }
        _ => bail!("Wrong enum"),
    }
    mock.assert_async().await;

    return Ok(());
}
