//! Error types for the notification service client.

use notif_core::DecodeError;

use crate::config::ConfigError;

/// Errors from talking to the notification service.
///
/// A `CommandFailure` body is not an error at this layer: the service
/// answered with a well-formed result and [`crate::NotificationClient::execute`]
/// returns it as `Ok`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response body could not be read.
    #[error("HTTP request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not a command result.
    #[error("response from {endpoint} (status {status}) is not a command result: {source}")]
    Decode {
        endpoint: String,
        status: u16,
        body: String,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// HTTP status of the offending response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Decode { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            Self::Config(_) => None,
        }
    }
}
