use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Result;

use super::TokenStoreBox;
use crate::domain::models::TokenStore;

#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn boxed() -> TokenStoreBox {
        return Arc::new(MemoryTokenStore::default());
    }

    pub fn with_token(token: &str) -> TokenStoreBox {
        return Arc::new(MemoryTokenStore {
            token: Mutex::new(Some(token.to_string())),
        });
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        return self.token.lock().unwrap().clone();
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        return Ok(());
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        return Ok(());
    }
}
