use anyhow::Result;

/// Persistent home of the session token. Reads and writes are synchronous
/// and every request reads the token afresh.
pub trait TokenStore {
    fn get(&self) -> Option<String>;

    fn set(&self, token: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}
