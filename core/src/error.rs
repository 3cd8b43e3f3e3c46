//! Error types for the joke API client.
//!
//! # Design
//! The taxonomy is closed: a completed exchange with a non-2xx status is
//! `BadResponse`, a 2xx body that is not a joke is `Decoding`, and anything
//! that kept the exchange from completing is `Network`. Status is checked
//! before the body is looked at, so a 404 or 500 never surfaces as a decode
//! failure.

use thiserror::Error;

/// Shown for any non-2xx status, whatever the code.
pub const BAD_RESPONSE_MESSAGE: &str = "Invalid server response.";

/// Failure to complete an HTTP exchange (DNS, connect, TLS, timeout, reading
/// the body). A response with an error status is not a `TransportError`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Errors returned by `JokeClient::parse_fetch_joke` and
/// `JokeService::fetch_joke`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a status outside `200..300`.
    #[error("unexpected HTTP status {status}")]
    BadResponse { status: u16 },

    /// The body was not JSON, or not a joke-shaped JSON object.
    #[error("could not decode joke: {0}")]
    Decoding(#[from] serde_json::Error),

    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Network(#[from] TransportError),
}

impl FetchError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::BadResponse { .. } => BAD_RESPONSE_MESSAGE.to_string(),
            FetchError::Decoding(cause) => format!("Failed to process data: {cause}"),
            FetchError::Network(cause) => format!("Network error: {cause}"),
        }
    }
}
