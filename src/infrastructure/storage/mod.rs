pub mod file;
#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use crate::domain::models::TokenStore;

pub type TokenStoreBox = Arc<dyn TokenStore + Send + Sync>;
