#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use crate::domain::models::ClientError;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::storage::TokenStoreBox;

pub const MIN_PASSWORD_LENGTH: usize = 6;

fn required(value: &str, label: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::Validation(format!("{label} is required")));
    }

    return Ok(());
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ClientError> {
    required(email, "Email")?;
    required(password, "Password")?;

    return Ok(());
}

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), ClientError> {
    required(name, "Name")?;
    required(email, "Email")?;
    required(password, "Password")?;

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ClientError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    if password != confirmation {
        return Err(ClientError::Validation(
            "Passwords do not match".to_string(),
        ));
    }

    return Ok(());
}

/// Network half of the session lifecycle: exchanges credentials with the
/// API and persists the issued token.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    store: TokenStoreBox,
}

impl AuthService {
    pub fn new(client: ApiClient, store: TokenStoreBox) -> AuthService {
        return AuthService { client, store };
    }

    /// Returns the issued token once it has been written to the store.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let token = self.client.login(email, password).await?;
        if token.is_empty() {
            tracing::error!("Login response did not contain a token");
            return Err(ClientError::InvalidResponse(
                "login response did not contain a token".to_string(),
            ));
        }

        if let Err(err) = self.store.set(&token) {
            tracing::error!(error = ?err, "Failed to persist the session token");
            return Err(ClientError::Storage(err.to_string()));
        }

        return Ok(token);
    }

    /// Returns the confirmation message to show before heading to login.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let res = self.client.register(name, email, password).await?;

        let message = res
            .message
            .filter(|msg| return !msg.is_empty())
            .unwrap_or_else(|| return "Registration complete!".to_string());

        return Ok(message);
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        return self
            .store
            .clear()
            .map_err(|err| return ClientError::Storage(err.to_string()));
    }
}
