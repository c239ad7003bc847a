#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::AuthService;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::infrastructure::api::ApiClient;

/// Carries out a single action and returns the event reporting its result.
pub async fn run(action: Action, client: &ApiClient, auth: &AuthService) -> Event {
    match action {
        Action::Login { email, password } => {
            return Event::LoginCompleted(auth.login(&email, &password).await);
        }
        Action::Register {
            name,
            email,
            password,
        } => {
            return Event::RegisterCompleted(auth.register(&name, &email, &password).await);
        }
        Action::ListMovies { mount_id } => {
            return Event::MoviesLoaded {
                mount_id,
                result: client.list_movies().await,
            };
        }
        Action::CreateMovie { mount_id, input } => {
            return Event::MovieSaved {
                mount_id,
                updated: false,
                result: client.create_movie(&input).await,
            };
        }
        Action::UpdateMovie {
            mount_id,
            id,
            input,
        } => {
            return Event::MovieSaved {
                mount_id,
                updated: true,
                result: client.update_movie(&id, &input).await,
            };
        }
        Action::DeleteMovie { mount_id, id } => {
            return Event::MovieDeleted {
                mount_id,
                result: client.delete_movie(&id).await,
            };
        }
    }
}

pub struct ActionsService {}

impl ActionsService {
    /// Spawns one task per action so a slow request never holds up the
    /// others. Returns once the UI drops its sender.
    pub async fn start(
        client: ApiClient,
        auth: AuthService,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            let client = client.clone();
            let auth = auth.clone();

            tokio::spawn(async move {
                let event = run(action, &client, &auth).await;
                if worker_tx.send(event).is_err() {
                    tracing::debug!("UI closed before an action completed");
                }
            });
        }

        return Ok(());
    }
}
