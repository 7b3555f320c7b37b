//! # notif-cli -- Command Line for the Notification Service
//!
//! Provides the `notif` command-line interface.
//!
//! ## Subcommands
//!
//! - `notif validate`: Check a command or result document and list every
//!   violation with its path.
//! - `notif send`: Build one command from arguments and send it, or print
//!   its body with `--dry-run`.
//! - `notif scenario`: Run the smoke scenario against a live service.
//!
//! ```bash
//! notif validate request.json --kind command
//! notif send notify 0 "Hello!" --expires-in 10
//! notif --base-url http://localhost:8080 scenario
//! ```

pub mod scenario;
pub mod send;
pub mod validate;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use notif_client::ClientConfig;

/// Connection options shared by the subcommands that talk to the service.
///
/// Unset options fall back to `NOTIF_BASE_URL` and `NOTIF_TIMEOUT_SECS`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Root URL of the notification service.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Environment configuration with command-line overrides applied.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_env().context("invalid client environment")?;
        if let Some(ref url) = self.base_url {
            config = config
                .with_base_url(url)
                .context("invalid --base-url")?;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        Ok(config)
    }
}

/// Read a whole document from `path`, or from standard input when the path
/// is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read standard input")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}
