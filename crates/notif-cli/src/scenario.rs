//! # Scenario Subcommand
//!
//! Runs the smoke scenario against a live service and prints one line per
//! completed step.

use anyhow::{Context, Result};
use clap::Args;

use notif_client::{
    scenario::DEFAULT_BATCH, ClientConfig, NotificationClient, ScenarioError, SmokeScenario,
};
use notif_protocol::UserId;

/// Arguments for the `notif scenario` subcommand.
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// User the scenario notifies and clears.
    #[arg(long, default_value_t = 0)]
    pub user: u64,

    /// Number of expiring notifications to send.
    #[arg(long, default_value_t = DEFAULT_BATCH)]
    pub batch: u64,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the scenario subcommand.
///
/// Returns exit code: 0 when every step passes, 1 at the first failing step.
pub async fn run_scenario(args: &ScenarioArgs, config: ClientConfig) -> Result<u8> {
    let client = NotificationClient::new(config).context("failed to build HTTP client")?;
    tracing::info!(endpoint = %client.endpoint(), user = args.user, "running smoke scenario");

    let scenario = SmokeScenario::new(UserId(args.user)).with_batch(args.batch);
    match scenario.run(&client).await {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for step in &report.steps {
                    println!("  PASS: {step}");
                }
                println!(
                    "Scenario passed: {} step(s), {} request(s).",
                    report.steps.len(),
                    report.requests
                );
            }
            Ok(0)
        }
        Err(e) => {
            println!("{}", failure_line(&e));
            Ok(1)
        }
    }
}

fn failure_line(e: &ScenarioError) -> String {
    match e {
        ScenarioError::Client { step, source } => format!("  FAIL: {step}: {source}"),
        ScenarioError::Failure { step, failure } => format!("  FAIL: {step}: {failure}"),
        ScenarioError::UnexpectedSuccess {
            step,
            expected,
            actual,
        } => format!("  FAIL: {step}: expected {expected}, got {actual}"),
        ScenarioError::Assertion { step, message } => format!("  FAIL: {step}: {message}"),
    }
}
