//! # Send Subcommand
//!
//! Builds one notification command from arguments and posts it to the
//! service, printing the encoded response body. With `--dry-run` the request
//! body is printed and nothing is sent.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use notif_client::{scenario::expiration_from_now, ClientConfig, NotificationClient};
use notif_core::{Encode, Optional};
use notif_protocol::{
    NotificationCommand, NotificationId, NotifyUserPayload, RemoveNotificationPayload, UserId,
};

/// Arguments for the `notif send` subcommand.
#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(subcommand)]
    pub command: SendCommand,

    /// Print the request body instead of sending it.
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SendCommand {
    /// List a user's notifications.
    Get { user: u64 },

    /// Store a notification for a user.
    Notify {
        user: u64,
        message: String,

        /// Absolute expiration, microseconds since the Unix epoch.
        #[arg(long, value_name = "MICROS", conflicts_with = "expires_in")]
        expires_at: Option<i64>,

        /// Expire this many seconds from now.
        #[arg(long, value_name = "SECS")]
        expires_in: Option<i64>,
    },

    /// Remove one notification of a user.
    Remove { user: u64, id: u64 },

    /// Drop every notification of a user.
    Clear { user: u64 },

    /// Drop every notification of every user.
    ClearAll,
}

impl SendCommand {
    /// Build the protocol command, resolving `--expires-in` against the
    /// current time.
    pub fn to_command(&self) -> Result<NotificationCommand> {
        let command = match self {
            Self::Get { user } => NotificationCommand::GetNotifications(UserId(*user)),
            Self::Notify {
                user,
                message,
                expires_at,
                expires_in,
            } => {
                let expiration = match (expires_at, expires_in) {
                    (Some(micros), _) => Optional::Present(*micros),
                    (None, Some(secs)) => {
                        let micros = expiration_from_now(*secs).ok_or_else(|| {
                            anyhow::anyhow!("--expires-in {secs} is outside the representable date range")
                        })?;
                        Optional::Present(micros)
                    }
                    (None, None) => Optional::Absent,
                };
                NotificationCommand::NotifyUser(NotifyUserPayload {
                    id: UserId(*user),
                    message: message.clone(),
                    expiration,
                })
            }
            Self::Remove { user, id } => {
                NotificationCommand::RemoveNotification(RemoveNotificationPayload {
                    user_id: UserId(*user),
                    id: NotificationId(*id),
                })
            }
            Self::Clear { user } => NotificationCommand::ClearNotifications(UserId(*user)),
            Self::ClearAll => NotificationCommand::ClearAllNotifications,
        };
        Ok(command)
    }
}

/// Execute the send subcommand.
///
/// Returns exit code: 0 when the service reports success (or on a dry run),
/// 1 when it answers with a `CommandFailure`.
pub async fn run_send(args: &SendArgs, config: ClientConfig) -> Result<u8> {
    let command = args.command.to_command()?;

    if args.dry_run {
        println!("{}", command.encode());
        return Ok(0);
    }

    let client = NotificationClient::new(config).context("failed to build HTTP client")?;
    tracing::info!(command = %command.tag(), endpoint = %client.endpoint(), "sending");

    let result = client
        .execute(&command)
        .await
        .with_context(|| format!("{} failed", command.tag()))?;

    println!("{}", result.encode());
    Ok(if result.is_success() { 0 } else { 1 })
}
