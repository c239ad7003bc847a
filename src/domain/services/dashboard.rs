#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::Notifications;
use crate::domain::models::Action;
use crate::domain::models::ClientError;
use crate::domain::models::Form;
use crate::domain::models::Movie;
use crate::domain::models::MovieDraft;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Form,
    List,
}

/// State behind the movie dashboard. Every request it sends is tagged with
/// the current mount id, and results for any other id are dropped.
pub struct Dashboard {
    pub movies: Vec<Movie>,
    pub loading: bool,
    pub saving: bool,
    pub deleting: bool,
    pub form: Form,
    pub editing: Option<String>,
    pub pane: Pane,
    pub selected: usize,
    pub pending_delete: Option<String>,
    mount_id: u64,
    mounted: bool,
}

impl Default for Dashboard {
    fn default() -> Dashboard {
        return Dashboard {
            movies: vec![],
            loading: false,
            saving: false,
            deleting: false,
            form: MovieDraft::empty_form(),
            editing: None,
            pane: Pane::Form,
            selected: 0,
            pending_delete: None,
            mount_id: 0,
            mounted: false,
        };
    }
}

impl Dashboard {
    pub fn is_mounted(&self) -> bool {
        return self.mounted;
    }

    fn accepts(&self, mount_id: u64) -> bool {
        if !self.mounted || mount_id != self.mount_id {
            tracing::debug!(
                mount_id,
                current = self.mount_id,
                mounted = self.mounted,
                "Dropping stale dashboard result"
            );
            return false;
        }

        return true;
    }

    pub fn mount(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.mount_id += 1;
        self.mounted = true;
        return self.refresh(tx);
    }

    /// Drops all local state. The mount id is kept so in-flight results
    /// from this mount stay stale after the next one.
    pub fn unmount(&mut self) {
        let mount_id = self.mount_id;
        *self = Dashboard::default();
        self.mount_id = mount_id;
    }

    pub fn refresh(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.loading = true;
        tx.send(Action::ListMovies {
            mount_id: self.mount_id,
        })?;

        return Ok(());
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        return self.movies.get(self.selected);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.movies.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn edit_selected(&mut self) {
        if let Some(movie) = self.selected_movie() {
            let draft = MovieDraft::from_movie(movie);
            draft.write_to(&mut self.form);
            self.editing = draft.id;
            self.pane = Pane::Form;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form.clear();
        self.editing = None;
    }

    pub fn submit(
        &mut self,
        tx: &mpsc::UnboundedSender<Action>,
        notifications: &mut Notifications,
    ) -> Result<()> {
        if self.saving {
            return Ok(());
        }

        let draft = MovieDraft::from_form(&self.form, self.editing.clone());
        let input = match draft.to_input() {
            Ok(input) => input,
            Err(err) => {
                notifications.error(&err.to_string());
                return Ok(());
            }
        };

        self.saving = true;
        let mount_id = self.mount_id;
        match draft.id {
            Some(id) => tx.send(Action::UpdateMovie {
                mount_id,
                id,
                input,
            })?,
            None => tx.send(Action::CreateMovie { mount_id, input })?,
        }

        return Ok(());
    }

    pub fn request_delete(&mut self) {
        if self.deleting {
            return;
        }
        self.pending_delete = self.selected_movie().map(|movie| return movie.id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Sends the pending delete. Only one delete is in flight at a time.
    pub fn confirm_delete(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.deleting {
            self.pending_delete = None;
            return Ok(());
        }

        if let Some(id) = self.pending_delete.take() {
            self.deleting = true;
            tx.send(Action::DeleteMovie {
                mount_id: self.mount_id,
                id,
            })?;
        }

        return Ok(());
    }

    pub fn handle_loaded(
        &mut self,
        mount_id: u64,
        result: Result<Vec<Movie>, ClientError>,
        notifications: &mut Notifications,
    ) {
        if !self.accepts(mount_id) {
            return;
        }

        self.loading = false;
        match result {
            Ok(movies) => {
                self.movies = movies;
                if self.selected >= self.movies.len() {
                    self.selected = self.movies.len().saturating_sub(1);
                }
            }
            Err(err) => notifications.error(&format!("Failed to load movies: {err}")),
        }
    }

    pub fn handle_saved(
        &mut self,
        mount_id: u64,
        updated: bool,
        result: Result<Movie, ClientError>,
        tx: &mpsc::UnboundedSender<Action>,
        notifications: &mut Notifications,
    ) -> Result<()> {
        if !self.accepts(mount_id) {
            return Ok(());
        }

        self.saving = false;
        match result {
            Ok(_) => {
                self.cancel_edit();
                if updated {
                    notifications.success("Movie updated!");
                } else {
                    notifications.success("Movie created!");
                }
                self.refresh(tx)?;
            }
            Err(err) => notifications.error(&format!("Save failed: {err}")),
        }

        return Ok(());
    }

    pub fn handle_deleted(
        &mut self,
        mount_id: u64,
        result: Result<(), ClientError>,
        tx: &mpsc::UnboundedSender<Action>,
        notifications: &mut Notifications,
    ) -> Result<()> {
        if !self.accepts(mount_id) {
            return Ok(());
        }

        self.deleting = false;
        match result {
            Ok(_) => {
                notifications.success("Movie deleted!");
                self.refresh(tx)?;
            }
            Err(err) => notifications.error(&format!("Delete failed: {err}")),
        }

        return Ok(());
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.pane == Pane::Form && !self.saving {
            self.form.paste(text);
        }
    }

    pub fn handle_input(
        &mut self,
        input: Input,
        tx: &mpsc::UnboundedSender<Action>,
        notifications: &mut Notifications,
    ) -> Result<()> {
        if self.pending_delete.is_some() {
            match input.key {
                Key::Char('y') | Key::Char('Y') => self.confirm_delete(tx)?,
                Key::Char('n') | Key::Char('N') | Key::Esc => self.cancel_delete(),
                _ => (),
            }
            return Ok(());
        }

        // Plain arrows belong to the focused pane.
        match input {
            Input {
                key: Key::Left,
                ctrl: true,
                ..
            } => {
                self.pane = Pane::Form;
                return Ok(());
            }
            Input {
                key: Key::Right,
                ctrl: true,
                ..
            } => {
                self.pane = Pane::List;
                return Ok(());
            }
            _ => (),
        }

        match self.pane {
            Pane::Form => match input {
                Input {
                    key: Key::Enter, ..
                } => self.submit(tx, notifications)?,
                Input { key: Key::Esc, .. } => self.cancel_edit(),
                input => {
                    if !self.saving {
                        self.form.input(input);
                    }
                }
            },
            Pane::List => match input.key {
                Key::Left => self.pane = Pane::Form,
                Key::Up | Key::Char('k') => self.select_prev(),
                Key::Down | Key::Char('j') => self.select_next(),
                Key::Char('e') | Key::Enter => self.edit_selected(),
                Key::Char('d') | Key::Delete => self.request_delete(),
                Key::Char('r') if !self.loading => self.refresh(tx)?,
                _ => (),
            },
        }

        return Ok(());
    }
}
