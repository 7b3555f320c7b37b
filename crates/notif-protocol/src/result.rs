//! # Command Results
//!
//! Response bodies of `POST /notification`. A result is either a
//! `CommandSuccess` wrapping one of the success shapes, or a
//! `CommandFailure` wrapping one of the failure shapes.

use notif_core::{
    read_tag, tag_enum, tagged, validate_data, validate_string, Encode, Tag, Validate,
    ValidationResult, TAG_FIELD,
};
use serde_json::Value;

use crate::records::{
    AddNotificationError, Notification, NotificationAddedPayload, RemoveNotificationError,
    RemoveNotificationResult, UserId,
};

tag_enum! {
    /// Discriminant of [`NotificationCommandSuccess`].
    pub enum NotificationCommandSuccessTag {
        Notifications,
        NotificationAdded,
        NotificationRemoved,
        NotificationsCleared,
        AllNotificationsCleared,
    }
}

tag_enum! {
    /// Discriminant of [`NotificationCommandFailure`].
    pub enum NotificationCommandFailureTag {
        NotificationNotRemoved,
        NotificationNotAdded,
        InvalidCommand,
    }
}

tag_enum! {
    /// Discriminant of [`NotificationCommandResult`].
    pub enum NotificationCommandResultTag { CommandSuccess, CommandFailure }
}

/// Outcome of a command the service carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationCommandSuccess {
    /// Answer to `GetNotifications`.
    Notifications(Vec<Notification>),
    /// Answer to `NotifyUser`.
    NotificationAdded(NotificationAddedPayload),
    /// Answer to `RemoveNotification`.
    NotificationRemoved(RemoveNotificationResult),
    /// Answer to `ClearNotifications`.
    NotificationsCleared(UserId),
    /// Answer to `ClearAllNotifications`.
    AllNotificationsCleared,
}

/// Reason the service refused or could not carry out a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationCommandFailure {
    NotificationNotRemoved(RemoveNotificationError),
    NotificationNotAdded(AddNotificationError),
    /// The request body did not validate as a command. Carries the
    /// service's description of the problem.
    InvalidCommand(String),
}

/// Body of every response from `POST /notification`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationCommandResult {
    CommandSuccess(NotificationCommandSuccess),
    CommandFailure(NotificationCommandFailure),
}

impl NotificationCommandSuccess {
    pub fn tag(&self) -> NotificationCommandSuccessTag {
        match self {
            Self::Notifications(_) => NotificationCommandSuccessTag::Notifications,
            Self::NotificationAdded(_) => NotificationCommandSuccessTag::NotificationAdded,
            Self::NotificationRemoved(_) => NotificationCommandSuccessTag::NotificationRemoved,
            Self::NotificationsCleared(_) => NotificationCommandSuccessTag::NotificationsCleared,
            Self::AllNotificationsCleared => NotificationCommandSuccessTag::AllNotificationsCleared,
        }
    }

    fn data(&self) -> Option<Value> {
        match self {
            Self::Notifications(notifications) => Some(notifications.to_json()),
            Self::NotificationAdded(payload) => Some(payload.to_json()),
            Self::NotificationRemoved(payload) => Some(payload.to_json()),
            Self::NotificationsCleared(user_id) => Some(user_id.to_json()),
            Self::AllNotificationsCleared => None,
        }
    }
}

impl Validate for NotificationCommandSuccess {
    fn validate(value: &Value) -> ValidationResult<Self> {
        match read_tag::<NotificationCommandSuccessTag>(value, TAG_FIELD)? {
            NotificationCommandSuccessTag::Notifications => {
                validate_data(value, Vec::<Notification>::validate).map(Self::Notifications)
            }
            NotificationCommandSuccessTag::NotificationAdded => {
                validate_data(value, NotificationAddedPayload::validate)
                    .map(Self::NotificationAdded)
            }
            NotificationCommandSuccessTag::NotificationRemoved => {
                validate_data(value, RemoveNotificationResult::validate)
                    .map(Self::NotificationRemoved)
            }
            NotificationCommandSuccessTag::NotificationsCleared => {
                validate_data(value, UserId::validate).map(Self::NotificationsCleared)
            }
            NotificationCommandSuccessTag::AllNotificationsCleared => {
                Ok(Self::AllNotificationsCleared)
            }
        }
    }
}

impl Encode for NotificationCommandSuccess {
    fn to_json(&self) -> Value {
        tagged(self.tag().as_str(), self.data())
    }
}

impl NotificationCommandFailure {
    pub fn tag(&self) -> NotificationCommandFailureTag {
        match self {
            Self::NotificationNotRemoved(_) => NotificationCommandFailureTag::NotificationNotRemoved,
            Self::NotificationNotAdded(_) => NotificationCommandFailureTag::NotificationNotAdded,
            Self::InvalidCommand(_) => NotificationCommandFailureTag::InvalidCommand,
        }
    }

    fn data(&self) -> Value {
        match self {
            Self::NotificationNotRemoved(payload) => payload.to_json(),
            Self::NotificationNotAdded(payload) => payload.to_json(),
            Self::InvalidCommand(reason) => reason.to_json(),
        }
    }
}

impl std::fmt::Display for NotificationCommandFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotificationNotRemoved(e) => write!(
                f,
                "notification {} of {} not removed: {}",
                e.notification_id.0, e.user_id, e.error
            ),
            Self::NotificationNotAdded(e) => {
                write!(f, "notification for {} not added: {}", e.user_id, e.error)
            }
            Self::InvalidCommand(reason) => write!(f, "invalid command: {reason}"),
        }
    }
}

impl Validate for NotificationCommandFailure {
    fn validate(value: &Value) -> ValidationResult<Self> {
        match read_tag::<NotificationCommandFailureTag>(value, TAG_FIELD)? {
            NotificationCommandFailureTag::NotificationNotRemoved => {
                validate_data(value, RemoveNotificationError::validate)
                    .map(Self::NotificationNotRemoved)
            }
            NotificationCommandFailureTag::NotificationNotAdded => {
                validate_data(value, AddNotificationError::validate)
                    .map(Self::NotificationNotAdded)
            }
            NotificationCommandFailureTag::InvalidCommand => {
                validate_data(value, validate_string).map(Self::InvalidCommand)
            }
        }
    }
}

impl Encode for NotificationCommandFailure {
    fn to_json(&self) -> Value {
        tagged(self.tag().as_str(), Some(self.data()))
    }
}

impl NotificationCommandResult {
    pub fn tag(&self) -> NotificationCommandResultTag {
        match self {
            Self::CommandSuccess(_) => NotificationCommandResultTag::CommandSuccess,
            Self::CommandFailure(_) => NotificationCommandResultTag::CommandFailure,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::CommandSuccess(_))
    }

    /// Split into the standard library `Result`.
    pub fn into_result(self) -> Result<NotificationCommandSuccess, NotificationCommandFailure> {
        match self {
            Self::CommandSuccess(success) => Ok(success),
            Self::CommandFailure(failure) => Err(failure),
        }
    }
}

impl Validate for NotificationCommandResult {
    fn validate(value: &Value) -> ValidationResult<Self> {
        match read_tag::<NotificationCommandResultTag>(value, TAG_FIELD)? {
            NotificationCommandResultTag::CommandSuccess => {
                validate_data(value, NotificationCommandSuccess::validate)
                    .map(Self::CommandSuccess)
            }
            NotificationCommandResultTag::CommandFailure => {
                validate_data(value, NotificationCommandFailure::validate)
                    .map(Self::CommandFailure)
            }
        }
    }
}

impl Encode for NotificationCommandResult {
    fn to_json(&self) -> Value {
        let data = match self {
            Self::CommandSuccess(success) => success.to_json(),
            Self::CommandFailure(failure) => failure.to_json(),
        };
        tagged(self.tag().as_str(), Some(data))
    }
}
