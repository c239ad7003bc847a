#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::validate_login;
use super::validate_registration;
use super::Dashboard;
use super::Notifications;
use super::Router;
use super::Session;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Field;
use crate::domain::models::Form;
use crate::domain::models::Route;
use crate::infrastructure::storage::TokenStoreBox;

const EMAIL: usize = 0;
const PASSWORD: usize = 1;

const REGISTER_NAME: usize = 0;
const REGISTER_EMAIL: usize = 1;
const REGISTER_PASSWORD: usize = 2;
const REGISTER_CONFIRMATION: usize = 3;

fn login_form() -> Form {
    return Form::new(vec![Field::new("Email"), Field::masked("Password")]);
}

fn register_form() -> Form {
    return Form::new(vec![
        Field::new("Name"),
        Field::new("Email"),
        Field::masked("Password"),
        Field::masked("Confirm password"),
    ]);
}

pub struct AppState {
    pub session: Session,
    pub router: Router,
    pub route: Route,
    pub login_form: Form,
    pub register_form: Form,
    pub dashboard: Dashboard,
    pub notifications: Notifications,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(store: TokenStoreBox, start_path: &str, notification_timeout: Duration) -> AppState {
        let session = Session::new(store);
        let mut router = Router::new(start_path);
        let route = router.resolve(session.is_authenticated());

        return AppState {
            session,
            router,
            route,
            login_form: login_form(),
            register_form: register_form(),
            dashboard: Dashboard::default(),
            notifications: Notifications::new(notification_timeout),
            should_quit: false,
        };
    }

    /// Re-runs the guard and mounts or unmounts the dashboard when the
    /// rendered route changes.
    pub fn sync_route(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let route = self.router.resolve(self.session.is_authenticated());

        if route == Route::Dashboard && !self.dashboard.is_mounted() {
            self.dashboard.mount(tx)?;
        } else if route != Route::Dashboard && self.dashboard.is_mounted() {
            self.dashboard.unmount();
        }

        self.route = route;
        return Ok(());
    }

    pub fn handle_event(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        // The API client has already cleared the store. This is the only
        // place that reacts to an expired session.
        if event.is_session_expired() {
            tracing::debug!("Session expired, returning to login");
            self.session.expire();
            self.router.navigate(Route::Login);
            return self.sync_route(tx);
        }

        match event {
            Event::LoginCompleted(result) => {
                self.session.finish();
                match result {
                    Ok(token) => {
                        self.session.sign_in(token);
                        self.login_form.clear();
                        self.notifications.success("Login successful!");
                        self.router.navigate(Route::Dashboard);
                    }
                    Err(err) => {
                        self.notifications.error(&format!("Login failed: {err}"));
                    }
                }
            }
            Event::RegisterCompleted(result) => {
                self.session.finish();
                match result {
                    Ok(message) => {
                        self.register_form.clear();
                        self.notifications.success(&message);
                        self.router.navigate(Route::Login);
                    }
                    Err(err) => {
                        self.notifications
                            .error(&format!("Registration failed: {err}"));
                    }
                }
            }
            Event::MoviesLoaded { mount_id, result } => {
                self.dashboard
                    .handle_loaded(mount_id, result, &mut self.notifications);
            }
            Event::MovieSaved {
                mount_id,
                updated,
                result,
            } => {
                self.dashboard.handle_saved(
                    mount_id,
                    updated,
                    result,
                    tx,
                    &mut self.notifications,
                )?;
            }
            Event::MovieDeleted { mount_id, result } => {
                self.dashboard
                    .handle_deleted(mount_id, result, tx, &mut self.notifications)?;
            }
            Event::KeyboardCTRLC() => {
                self.should_quit = true;
            }
            Event::KeyboardInput(input) => {
                self.handle_input(input, tx)?;
            }
            Event::KeyboardPaste(text) => {
                self.handle_paste(&text);
            }
            Event::UIResize() => (),
            Event::UITick() => {
                self.notifications.prune();
            }
        }

        return self.sync_route(tx);
    }

    fn handle_paste(&mut self, text: &str) {
        if self.session.is_busy() {
            return;
        }

        match self.route {
            Route::Login => self.login_form.paste(text),
            Route::Register => self.register_form.paste(text),
            Route::Dashboard => self.dashboard.handle_paste(text),
        }
    }

    fn handle_input(&mut self, input: Input, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match self.route {
            Route::Login => match input {
                Input {
                    key: Key::Enter, ..
                } => self.submit_login(tx)?,
                Input {
                    key: Key::Char('r'),
                    ctrl: true,
                    ..
                } => self.router.navigate(Route::Register),
                input => {
                    if !self.session.is_busy() {
                        self.login_form.input(input);
                    }
                }
            },
            Route::Register => match input {
                Input {
                    key: Key::Enter, ..
                } => self.submit_register(tx)?,
                Input {
                    key: Key::Char('l'),
                    ctrl: true,
                    ..
                } => self.router.navigate(Route::Login),
                input => {
                    if !self.session.is_busy() {
                        self.register_form.input(input);
                    }
                }
            },
            Route::Dashboard => match input {
                Input {
                    key: Key::Char('x'),
                    ctrl: true,
                    ..
                } => self.logout(),
                input => {
                    self.dashboard
                        .handle_input(input, tx, &mut self.notifications)?;
                }
            },
        }

        return Ok(());
    }

    pub fn submit_login(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.session.is_busy() {
            return Ok(());
        }

        let email = self.login_form.value(EMAIL).trim().to_string();
        let password = self.login_form.value(PASSWORD).to_string();
        if let Err(err) = validate_login(&email, &password) {
            self.notifications.error(&err.to_string());
            return Ok(());
        }

        if self.session.begin() {
            tx.send(Action::Login { email, password })?;
        }

        return Ok(());
    }

    pub fn submit_register(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.session.is_busy() {
            return Ok(());
        }

        let name = self.register_form.value(REGISTER_NAME).trim().to_string();
        let email = self.register_form.value(REGISTER_EMAIL).trim().to_string();
        let password = self.register_form.value(REGISTER_PASSWORD).to_string();
        let confirmation = self.register_form.value(REGISTER_CONFIRMATION);

        if let Err(err) = validate_registration(&name, &email, &password, confirmation) {
            self.notifications.error(&err.to_string());
            return Ok(());
        }

        if self.session.begin() {
            tx.send(Action::Register {
                name,
                email,
                password,
            })?;
        }

        return Ok(());
    }

    /// Drops the session without navigating. The guard moves the user off
    /// the dashboard on the next sync.
    pub fn logout(&mut self) {
        if let Err(err) = self.session.logout() {
            tracing::error!(error = ?err, "Failed to clear the stored session token");
            self.notifications
                .error(&format!("Unable to clear the stored session: {err}"));
        }

        self.notifications.info("You have been signed out.");
    }
}
