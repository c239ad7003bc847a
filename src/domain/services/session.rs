#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use anyhow::Result;

use crate::infrastructure::storage::TokenStoreBox;

/// UI half of the session lifecycle. Authentication status is derived
/// solely from token presence.
pub struct Session {
    token: Option<String>,
    busy: bool,
    store: TokenStoreBox,
}

impl Session {
    pub fn new(store: TokenStoreBox) -> Session {
        return Session {
            token: store.get(),
            busy: false,
            store,
        };
    }

    pub fn is_authenticated(&self) -> bool {
        return self.token.is_some();
    }

    pub fn is_busy(&self) -> bool {
        return self.busy;
    }

    /// Marks a login or register call as in flight. Returns false when one
    /// already is, in which case the caller must not submit.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }

        self.busy = true;
        return true;
    }

    pub fn finish(&mut self) {
        self.busy = false;
    }

    /// Adopts a token the auth service has already persisted.
    pub fn sign_in(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn logout(&mut self) -> Result<()> {
        self.token = None;
        self.store.clear()?;

        return Ok(());
    }

    /// The API client clears the store before reporting an expiry, so only
    /// the in-memory copy is left to drop.
    pub fn expire(&mut self) {
        self.token = None;
        self.busy = false;
    }
}
