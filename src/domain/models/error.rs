use thiserror::Error;

/// Failures surfaced by the API client and the client-side form checks.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Unable to reach the API: {0}")]
    TransportFailure(String),

    /// Non-2xx response. The message is the body's `error` field, or the
    /// status reason phrase when the body has none.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 401/403 on a request that carried a token. The stored token has
    /// already been cleared when this is returned.
    #[error("Session expired")]
    SessionExpired,

    #[error("{0}")]
    Validation(String),

    #[error("Unexpected response from the API: {0}")]
    InvalidResponse(String),

    #[error("Unable to store the session token: {0}")]
    Storage(String),
}

impl ClientError {
    pub fn is_session_expired(&self) -> bool {
        return *self == ClientError::SessionExpired;
    }
}
