#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::configuration::validate_api_base_url;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ClientError;
use crate::domain::models::LoginRequest;
use crate::domain::models::LoginResponse;
use crate::domain::models::Movie;
use crate::domain::models::MovieInput;
use crate::domain::models::RegisterRequest;
use crate::domain::models::RegisterResponse;
use crate::infrastructure::storage::TokenStoreBox;

pub const LOGIN_ENDPOINT: &str = "/login";
pub const REGISTER_ENDPOINT: &str = "/register";
pub const MOVIES_ENDPOINT: &str = "/movies";

fn is_login_endpoint(endpoint: &str) -> bool {
    let path = endpoint.split('?').next().unwrap_or(endpoint);
    return path.trim_end_matches('/') == LOGIN_ENDPOINT;
}

/// A rejected credential only counts as an expired session when one was
/// actually sent, and never for the login call itself.
fn is_session_expired(status: StatusCode, sent_token: bool, endpoint: &str) -> bool {
    return (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN)
        && sent_token
        && !is_login_endpoint(endpoint);
}

fn status_text(status: StatusCode) -> String {
    return status
        .canonical_reason()
        .map(|reason| return reason.to_string())
        .unwrap_or_else(|| return status.as_u16().to_string());
}

fn error_message(body: &Value) -> Option<String> {
    return body
        .get("error")
        .and_then(Value::as_str)
        .filter(|msg| return !msg.is_empty())
        .map(|msg| return msg.to_string());
}

fn encode<T: Serialize>(value: &T) -> Result<Value, ClientError> {
    return serde_json::to_value(value)
        .map_err(|err| return ClientError::InvalidResponse(err.to_string()));
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    return serde_json::from_value(value).map_err(|err| {
        tracing::error!(error = ?err, "Failed to decode API response");
        return ClientError::InvalidResponse(err.to_string());
    });
}

/// Every call to the API goes through here.
#[derive(Clone)]
pub struct ApiClient {
    url: String,
    timeout: Duration,
    store: TokenStoreBox,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(url: &str, timeout: Duration, store: TokenStoreBox) -> ApiClient {
        return ApiClient {
            url: url.trim_end_matches('/').to_string(),
            timeout,
            store,
            client: reqwest::Client::new(),
        };
    }

    pub fn from_config(store: TokenStoreBox) -> Result<ApiClient> {
        let url = Config::get(ConfigKey::ApiBaseURL);
        validate_api_base_url(&url, &Config::get(ConfigKey::ConfigFile))?;

        return Ok(ApiClient::new(
            &url,
            Duration::from_millis(Config::millis(ConfigKey::RequestTimeout)),
            store,
        ));
    }

    /// Sends a request and returns the parsed JSON body. An empty body is
    /// returned as `Value::Null`.
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        // Read at call time so a logout elsewhere is seen by the next call.
        let token = self.store.get();

        let mut req = self
            .client
            .request(method.clone(), format!("{}{endpoint}", self.url))
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = &token {
            req = req.bearer_auth(token);
        }

        if let Some(body) = &body {
            req = req.json(body);
        }

        let res = match req.send().await {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, endpoint, method = %method, "API request failed");
                return Err(ClientError::TransportFailure(err.to_string()));
            }
        };

        let status = res.status();

        // Must run before the body is looked at, otherwise a bad login would
        // read as an expired session.
        if is_session_expired(status, token.is_some(), endpoint) {
            if let Err(err) = self.store.clear() {
                tracing::error!(error = ?err, "Failed to clear the stored session token");
            }
            tracing::error!(
                status = status.as_u16(),
                endpoint,
                method = %method,
                "API rejected the session token"
            );
            return Err(ClientError::SessionExpired);
        }

        let text = match res.text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = ?err, endpoint, method = %method, "Failed to read API response");
                return Err(ClientError::TransportFailure(err.to_string()));
            }
        };

        let parsed = if text.trim().is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_str::<Value>(&text)
        };

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .ok()
                .and_then(error_message)
                .unwrap_or_else(|| return status_text(status));

            tracing::error!(
                status = status.as_u16(),
                endpoint,
                method = %method,
                reason = %message,
                "API returned an error"
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        match parsed {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::error!(error = ?err, endpoint, method = %method, "API returned invalid JSON");
                return Err(ClientError::InvalidResponse(err.to_string()));
            }
        }
    }

    pub async fn get(&self, endpoint: &str) -> Result<Value, ClientError> {
        return self.request(endpoint, Method::GET, None).await;
    }

    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Value, ClientError> {
        return self
            .request(endpoint, Method::POST, Some(encode(body)?))
            .await;
    }

    pub async fn put<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Value, ClientError> {
        return self
            .request(endpoint, Method::PUT, Some(encode(body)?))
            .await;
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value, ClientError> {
        return self.request(endpoint, Method::DELETE, None).await;
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let res: LoginResponse = decode(self.post(LOGIN_ENDPOINT, &req).await?)?;
        return Ok(res.token);
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisterResponse, ClientError> {
        let req = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let value = self.post(REGISTER_ENDPOINT, &req).await?;
        if value.is_null() {
            return Ok(RegisterResponse::default());
        }

        return decode(value);
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>, ClientError> {
        return decode(self.get(MOVIES_ENDPOINT).await?);
    }

    pub async fn create_movie(&self, input: &MovieInput) -> Result<Movie, ClientError> {
        return decode(self.post(MOVIES_ENDPOINT, input).await?);
    }

    pub async fn update_movie(&self, id: &str, input: &MovieInput) -> Result<Movie, ClientError> {
        return decode(self.put(&format!("{MOVIES_ENDPOINT}/{id}"), input).await?);
    }

    pub async fn delete_movie(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("{MOVIES_ENDPOINT}/{id}")).await?;
        return Ok(());
    }
}
