//! # notif-client -- Typed Rust client for the notification service
//!
//! Sends [`NotificationCommand`]s to `POST {base_url}/notification` and
//! decodes every response body as a [`NotificationCommandResult`].
//!
//! ## Status Codes
//!
//! The service answers both success and failure with a tagged result body;
//! failures come back as HTTP 400 with a `CommandFailure`. The client
//! therefore decodes the body regardless of status and leaves the decision
//! to the caller. Only transport problems and bodies that are not results
//! surface as [`ClientError`].
//!
//! The [`scenario`] module drives a live service through the standard smoke
//! sequence.

pub mod config;
pub mod error;
pub mod scenario;

pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use scenario::{ScenarioError, ScenarioReport, SmokeScenario};

use std::time::Duration;

use notif_core::{Encode, Validate};
use notif_protocol::{NotificationCommand, NotificationCommandResult};
use url::Url;

/// Path segment of the command endpoint, relative to the base URL.
pub const NOTIFICATION_PATH: &str = "notification";

/// Client for the notification service.
#[derive(Debug, Clone)]
pub struct NotificationClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl NotificationClient {
    /// Create a new client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let endpoint = config.endpoint()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, endpoint })
    }

    /// The URL commands are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one command and decode the service's answer.
    ///
    /// Calls `POST {base_url}/notification` with the encoded command as a
    /// JSON body.
    pub async fn execute(
        &self,
        command: &NotificationCommand,
    ) -> Result<NotificationCommandResult, ClientError> {
        let endpoint = format!("POST /{NOTIFICATION_PATH} ({})", command.tag());
        tracing::debug!(command = %command.tag(), url = %self.endpoint, "sending command");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(command.encode())
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(|e| ClientError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        match NotificationCommandResult::decode(&body) {
            Ok(result) => {
                if let NotificationCommandResult::CommandFailure(failure) = &result {
                    tracing::warn!(
                        command = %command.tag(),
                        status,
                        failure = %failure.tag(),
                        "service reported failure: {failure}"
                    );
                } else {
                    tracing::debug!(command = %command.tag(), status, "command succeeded");
                }
                Ok(result)
            }
            Err(source) => {
                tracing::warn!(
                    command = %command.tag(),
                    status,
                    error = %source,
                    "response body is not a command result"
                );
                Err(ClientError::Decode {
                    endpoint,
                    status,
                    body: String::from_utf8_lossy(&body).into_owned(),
                    source,
                })
            }
        }
    }
}
