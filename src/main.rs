#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::Error;
use owo_colors::OwoColorize;
use tokio::sync::mpsc;
use tokio::task;

use crate::application::cli;
use crate::application::ui;
use crate::domain::models::Action;
use crate::domain::models::ClientError;
use crate::domain::models::Event;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::AuthService;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::storage::file::FileTokenStore;
use crate::infrastructure::storage::TokenStoreBox;

fn handle_error(err: Error) {
    // API failures from the headless commands are expected, so they get a
    // plain message rather than a bug report.
    if let Some(client_err) = err.downcast_ref::<ClientError>() {
        let msg = match client_err {
            ClientError::SessionExpired => {
                "Your session has expired. Run `marquee login` to sign in again.".to_string()
            }
            _ => client_err.to_string(),
        };
        eprintln!("{}", msg.red());
        process::exit(1);
    }

    eprintln!(
        "{}",
        format!(
            "Oh no! Marquee has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            env!("VERGEN_GIT_DESCRIBE"),
            err
        )
        .red()
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("MARQUEE_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("marquee")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("marquee")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let ready = match cli::parse().await {
        Ok(ready) => ready,
        Err(err) => {
            handle_error(err);
            return;
        }
    };
    if !ready {
        process::exit(0);
    }

    // One store shared by the UI and the API client, so a token cleared by
    // either is gone for both.
    let store: TokenStoreBox = Arc::new(FileTokenStore::default());
    let client = match ApiClient::from_config(store.clone()) {
        Ok(client) => client,
        Err(err) => {
            handle_error(err);
            return;
        }
    };
    let auth = AuthService::new(client.clone(), store.clone());

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::start(client, auth, event_tx, &mut action_rx).await;
    });

    let ui_future = ui::start(store, action_tx, event_rx);

    let res = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(err.into()),
            None => Ok(()),
        },
        res = ui_future => res,
    );

    if let Err(err) = res {
        ui::destruct_terminal_for_panic();
        handle_error(err);
    }

    process::exit(0);
}
