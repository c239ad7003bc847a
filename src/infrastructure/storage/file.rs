#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::TokenStore;

pub struct FileTokenStore {
    pub file_path: PathBuf,
}

impl Default for FileTokenStore {
    fn default() -> FileTokenStore {
        return FileTokenStore::new(PathBuf::from(Config::get(ConfigKey::TokenFile)));
    }
}

impl FileTokenStore {
    pub fn new(file_path: PathBuf) -> FileTokenStore {
        return FileTokenStore { file_path };
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.file_path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            return None;
        }

        return Some(token.to_string());
    }

    fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.file_path, token.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.file_path, fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = ?self.file_path, "Stored session token");
        return Ok(());
    }

    fn clear(&self) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.file_path)?;
        tracing::debug!(path = ?self.file_path, "Cleared session token");
        return Ok(());
    }
}
