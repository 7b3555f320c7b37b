//! # Smoke Scenario
//!
//! Drives a live notification service through a fixed sequence of commands
//! and checks each answer:
//!
//! 1. clear every user's notifications
//! 2. the user starts with no notifications
//! 3. notify the user once, without expiration
//! 4. the user now has exactly that notification, unseen
//! 5. notify the user a few more times, expiring ten seconds from now
//! 6. clear the user's notifications
//! 7. the user is back to no notifications
//! 8. the same batch can be added again after the clear
//!
//! Steps run strictly in order and stop at the first mismatch.

use notif_core::Optional;
use notif_protocol::{
    Notification, NotificationAddedPayload, NotificationCommand, NotificationCommandFailure,
    NotificationCommandResult, NotificationCommandSuccess, NotificationCommandSuccessTag,
    NotifyUserPayload, UserId,
};
use serde::Serialize;

use crate::{ClientError, NotificationClient};

/// Message of the single notification sent in step 3.
pub const GREETING: &str = "Hello!";

/// Notifications sent in steps 5 and 8.
pub const DEFAULT_BATCH: u64 = 4;

/// How far in the future the batch notifications expire.
pub const EXPIRES_IN_SECS: i64 = 10;

/// Errors that stop the smoke scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("step '{step}': {source}")]
    Client {
        step: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("step '{step}': service reported failure: {failure}")]
    Failure {
        step: &'static str,
        failure: NotificationCommandFailure,
    },

    #[error("step '{step}': expected {expected}, got {actual}")]
    UnexpectedSuccess {
        step: &'static str,
        expected: NotificationCommandSuccessTag,
        actual: NotificationCommandSuccessTag,
    },

    #[error("step '{step}': {message}")]
    Assertion { step: &'static str, message: String },
}

impl ScenarioError {
    /// Name of the step that failed.
    pub fn step(&self) -> &'static str {
        match self {
            Self::Client { step, .. }
            | Self::Failure { step, .. }
            | Self::UnexpectedSuccess { step, .. }
            | Self::Assertion { step, .. } => step,
        }
    }
}

/// Steps completed by a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub user: u64,
    pub steps: Vec<String>,
    /// Commands sent, one per request.
    pub requests: usize,
}

/// Unwrap the success arm of a result, naming `step` on failure.
pub fn expect_success(
    step: &'static str,
    result: NotificationCommandResult,
) -> Result<NotificationCommandSuccess, ScenarioError> {
    result
        .into_result()
        .map_err(|failure| ScenarioError::Failure { step, failure })
}

fn unexpected(
    step: &'static str,
    expected: NotificationCommandSuccessTag,
    actual: &NotificationCommandSuccess,
) -> ScenarioError {
    ScenarioError::UnexpectedSuccess {
        step,
        expected,
        actual: actual.tag(),
    }
}

/// Expect `Notifications` and return the list.
pub fn expect_notifications(
    step: &'static str,
    result: NotificationCommandResult,
) -> Result<Vec<Notification>, ScenarioError> {
    match expect_success(step, result)? {
        NotificationCommandSuccess::Notifications(list) => Ok(list),
        other => Err(unexpected(step, NotificationCommandSuccessTag::Notifications, &other)),
    }
}

/// Expect `NotificationAdded` and return its payload.
pub fn expect_added(
    step: &'static str,
    result: NotificationCommandResult,
) -> Result<NotificationAddedPayload, ScenarioError> {
    match expect_success(step, result)? {
        NotificationCommandSuccess::NotificationAdded(payload) => Ok(payload),
        other => Err(unexpected(step, NotificationCommandSuccessTag::NotificationAdded, &other)),
    }
}

/// Expect `NotificationsCleared` and return the cleared user.
pub fn expect_cleared(
    step: &'static str,
    result: NotificationCommandResult,
) -> Result<UserId, ScenarioError> {
    match expect_success(step, result)? {
        NotificationCommandSuccess::NotificationsCleared(user) => Ok(user),
        other => Err(unexpected(step, NotificationCommandSuccessTag::NotificationsCleared, &other)),
    }
}

/// Expect `AllNotificationsCleared`.
pub fn expect_all_cleared(
    step: &'static str,
    result: NotificationCommandResult,
) -> Result<(), ScenarioError> {
    match expect_success(step, result)? {
        NotificationCommandSuccess::AllNotificationsCleared => Ok(()),
        other => Err(unexpected(
            step,
            NotificationCommandSuccessTag::AllNotificationsCleared,
            &other,
        )),
    }
}

fn ensure(step: &'static str, ok: bool, message: impl FnOnce() -> String) -> Result<(), ScenarioError> {
    if ok {
        Ok(())
    } else {
        Err(ScenarioError::Assertion {
            step,
            message: message(),
        })
    }
}

/// Microseconds since the Unix epoch, `secs` seconds from now.
///
/// `None` when the instant falls outside the representable date range.
pub fn expiration_from_now(secs: i64) -> Option<i64> {
    let offset = chrono::Duration::try_seconds(secs)?;
    chrono::Utc::now()
        .checked_add_signed(offset)
        .map(|at| at.timestamp_micros())
}

/// The smoke sequence for one user.
#[derive(Debug, Clone)]
pub struct SmokeScenario {
    user: UserId,
    batch: u64,
    expiration: Option<i64>,
}

impl SmokeScenario {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            batch: DEFAULT_BATCH,
            expiration: None,
        }
    }

    /// Number of expiring notifications sent in steps 5 and 8.
    pub fn with_batch(mut self, batch: u64) -> Self {
        self.batch = batch;
        self
    }

    /// Fixed expiration for steps 5 and 8, in microseconds since the Unix epoch.
    /// Without one, the expiration is computed when the step runs.
    pub fn with_expiration(mut self, micros: i64) -> Self {
        self.expiration = Some(micros);
        self
    }

    pub async fn run(&self, client: &NotificationClient) -> Result<ScenarioReport, ScenarioError> {
        let mut run = Run {
            client,
            report: ScenarioReport {
                user: self.user.0,
                steps: Vec::new(),
                requests: 0,
            },
        };
        let user = self.user;

        let step = "clear all notifications";
        let result = run.send(step, NotificationCommand::ClearAllNotifications).await?;
        expect_all_cleared(step, result)?;
        run.complete(step);

        let step = "no notifications initially";
        let result = run.send(step, NotificationCommand::GetNotifications(user)).await?;
        let list = expect_notifications(step, result)?;
        ensure(step, list.is_empty(), || {
            format!("expected no notifications for {user}, found {}", list.len())
        })?;
        run.complete(step);

        let step = "notify user";
        let command = NotificationCommand::NotifyUser(NotifyUserPayload {
            id: user,
            message: GREETING.to_string(),
            expiration: Optional::Absent,
        });
        let added = expect_added(step, run.send(step, command).await?)?;
        check_added(step, &added, user, GREETING, &Optional::Absent)?;
        run.complete(step);

        let step = "one notification stored";
        let result = run.send(step, NotificationCommand::GetNotifications(user)).await?;
        let list = expect_notifications(step, result)?;
        ensure(step, list.len() == 1, || {
            format!("expected 1 notification for {user}, found {}", list.len())
        })?;
        let stored = &list[0];
        ensure(step, stored.message == GREETING, || {
            format!("expected message {GREETING:?}, found {:?}", stored.message)
        })?;
        ensure(step, !stored.seen, || "stored notification is already seen".to_string())?;
        run.complete(step);

        let step = "notify user with expiration";
        let expiration = self
            .expiration
            .or_else(|| expiration_from_now(EXPIRES_IN_SECS))
            .ok_or_else(|| ScenarioError::Assertion {
                step,
                message: "expiration is outside the representable date range".to_string(),
            })?;
        let batch: Vec<NotifyUserPayload> = (1..=self.batch)
            .map(|i| NotifyUserPayload {
                id: user,
                message: format!("Hello: {i}!"),
                expiration: Optional::Present(expiration),
            })
            .collect();
        run.notify_batch(step, &batch).await?;
        run.complete(step);

        let step = "clear user notifications";
        let result = run.send(step, NotificationCommand::ClearNotifications(user)).await?;
        let cleared = expect_cleared(step, result)?;
        ensure(step, cleared == user, || format!("expected {user} cleared, got {cleared}"))?;
        run.complete(step);

        let step = "no notifications after clear";
        let result = run.send(step, NotificationCommand::GetNotifications(user)).await?;
        let list = expect_notifications(step, result)?;
        ensure(step, list.is_empty(), || {
            format!("expected no notifications for {user}, found {}", list.len())
        })?;
        run.complete(step);

        let step = "notify user again after clear";
        run.notify_batch(step, &batch).await?;
        run.complete(step);

        tracing::info!(%user, requests = run.report.requests, "smoke scenario passed");
        Ok(run.report)
    }
}

fn check_added(
    step: &'static str,
    added: &NotificationAddedPayload,
    user: UserId,
    message: &str,
    expiration: &Optional<i64>,
) -> Result<(), ScenarioError> {
    ensure(step, added.user_id == user, || {
        format!("notification added for {}, expected {user}", added.user_id)
    })?;
    let notification = &added.notification;
    ensure(step, notification.message == message, || {
        format!("expected message {message:?}, found {:?}", notification.message)
    })?;
    ensure(step, !notification.seen, || "new notification is already seen".to_string())?;
    ensure(step, &notification.expiration == expiration, || {
        format!(
            "expected expiration {:?}, found {:?}",
            expiration.into_option(),
            notification.expiration.into_option()
        )
    })
}

struct Run<'a> {
    client: &'a NotificationClient,
    report: ScenarioReport,
}

impl Run<'_> {
    async fn send(
        &mut self,
        step: &'static str,
        command: NotificationCommand,
    ) -> Result<NotificationCommandResult, ScenarioError> {
        self.report.requests += 1;
        self.client
            .execute(&command)
            .await
            .map_err(|source| ScenarioError::Client { step, source })
    }

    /// Send one `NotifyUser` per payload and check each `NotificationAdded`.
    async fn notify_batch(
        &mut self,
        step: &'static str,
        batch: &[NotifyUserPayload],
    ) -> Result<(), ScenarioError> {
        for payload in batch {
            let command = NotificationCommand::NotifyUser(payload.clone());
            let added = expect_added(step, self.send(step, command).await?)?;
            check_added(step, &added, payload.id, &payload.message, &payload.expiration)?;
        }
        Ok(())
    }

    fn complete(&mut self, step: &'static str) {
        tracing::info!(step, "step passed");
        self.report.steps.push(step.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notif_protocol::{NotificationId, RemoveNotificationResult};

    fn success(success: NotificationCommandSuccess) -> NotificationCommandResult {
        NotificationCommandResult::CommandSuccess(success)
    }

    fn hello() -> Notification {
        Notification {
            id: NotificationId(0),
            message: GREETING.into(),
            seen: false,
            expiration: Optional::Absent,
        }
    }

    #[test]
    fn expect_success_surfaces_failure() {
        let result = NotificationCommandResult::CommandFailure(
            NotificationCommandFailure::InvalidCommand("bad".into()),
        );
        let err = expect_success("lookup", result).unwrap_err();
        assert_eq!(err.step(), "lookup");
        assert_eq!(
            err.to_string(),
            "step 'lookup': service reported failure: invalid command: bad"
        );
    }

    #[test]
    fn typed_extraction_rejects_other_variant() {
        let result = success(NotificationCommandSuccess::AllNotificationsCleared);
        match expect_notifications("list", result) {
            Err(ScenarioError::UnexpectedSuccess { expected, actual, .. }) => {
                assert_eq!(expected, NotificationCommandSuccessTag::Notifications);
                assert_eq!(actual, NotificationCommandSuccessTag::AllNotificationsCleared);
            }
            other => panic!("expected UnexpectedSuccess, got: {other:?}"),
        }
    }

    #[test]
    fn typed_extraction_returns_payload() {
        let list = expect_notifications(
            "list",
            success(NotificationCommandSuccess::Notifications(vec![hello()])),
        )
        .unwrap();
        assert_eq!(list, vec![hello()]);

        let user = expect_cleared(
            "clear",
            success(NotificationCommandSuccess::NotificationsCleared(UserId(7))),
        )
        .unwrap();
        assert_eq!(user, UserId(7));

        let removed = success(NotificationCommandSuccess::NotificationRemoved(
            RemoveNotificationResult {
                remaining_notifications: vec![],
                removed_notification: hello(),
            },
        ));
        assert!(expect_added("add", removed).is_err());
    }

    #[test]
    fn check_added_compares_expiration() {
        let added = NotificationAddedPayload {
            user_id: UserId(0),
            notification: hello(),
        };
        assert!(check_added("s", &added, UserId(0), GREETING, &Optional::Absent).is_ok());
        let err = check_added("s", &added, UserId(0), GREETING, &Optional::Present(5)).unwrap_err();
        assert!(matches!(err, ScenarioError::Assertion { .. }));
        let err = check_added("s", &added, UserId(1), GREETING, &Optional::Absent).unwrap_err();
        assert!(err.to_string().contains("expected user:1"));
    }

    #[test]
    fn expiration_is_in_the_future() {
        let now = chrono::Utc::now().timestamp_micros();
        let later = expiration_from_now(EXPIRES_IN_SECS).unwrap();
        assert!(later - now >= 9_000_000);
    }

    #[test]
    fn expiration_out_of_range_is_none() {
        assert_eq!(expiration_from_now(i64::MAX), None);
        assert_eq!(expiration_from_now(i64::MAX / 1000), None);
        assert_eq!(expiration_from_now(i64::MIN / 1000), None);
    }
}
