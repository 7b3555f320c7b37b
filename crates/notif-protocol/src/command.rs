//! # Notification Commands
//!
//! Request bodies accepted by `POST /notification`.

use notif_core::{
    read_tag, tag_enum, tagged, validate_data, Encode, Tag, Validate, ValidationResult, TAG_FIELD,
};
use serde_json::Value;

use crate::records::{NotifyUserPayload, RemoveNotificationPayload, UserId};

tag_enum! {
    /// Discriminant of [`NotificationCommand`].
    pub enum NotificationCommandTag {
        GetNotifications,
        NotifyUser,
        RemoveNotification,
        ClearNotifications,
        ClearAllNotifications,
    }
}

/// A request to the notification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationCommand {
    /// List the notifications of a user.
    GetNotifications(UserId),
    /// Store a new notification for a user.
    NotifyUser(NotifyUserPayload),
    /// Remove one notification of a user.
    RemoveNotification(RemoveNotificationPayload),
    /// Drop every notification of a user.
    ClearNotifications(UserId),
    /// Drop every notification of every user.
    ClearAllNotifications,
}

impl NotificationCommand {
    pub fn tag(&self) -> NotificationCommandTag {
        match self {
            Self::GetNotifications(_) => NotificationCommandTag::GetNotifications,
            Self::NotifyUser(_) => NotificationCommandTag::NotifyUser,
            Self::RemoveNotification(_) => NotificationCommandTag::RemoveNotification,
            Self::ClearNotifications(_) => NotificationCommandTag::ClearNotifications,
            Self::ClearAllNotifications => NotificationCommandTag::ClearAllNotifications,
        }
    }

    fn data(&self) -> Option<Value> {
        match self {
            Self::GetNotifications(user_id) | Self::ClearNotifications(user_id) => {
                Some(user_id.to_json())
            }
            Self::NotifyUser(payload) => Some(payload.to_json()),
            Self::RemoveNotification(payload) => Some(payload.to_json()),
            Self::ClearAllNotifications => None,
        }
    }
}

impl Validate for NotificationCommand {
    fn validate(value: &Value) -> ValidationResult<Self> {
        match read_tag::<NotificationCommandTag>(value, TAG_FIELD)? {
            NotificationCommandTag::GetNotifications => {
                validate_data(value, UserId::validate).map(Self::GetNotifications)
            }
            NotificationCommandTag::NotifyUser => {
                validate_data(value, NotifyUserPayload::validate).map(Self::NotifyUser)
            }
            NotificationCommandTag::RemoveNotification => {
                validate_data(value, RemoveNotificationPayload::validate)
                    .map(Self::RemoveNotification)
            }
            NotificationCommandTag::ClearNotifications => {
                validate_data(value, UserId::validate).map(Self::ClearNotifications)
            }
            NotificationCommandTag::ClearAllNotifications => Ok(Self::ClearAllNotifications),
        }
    }
}

impl Encode for NotificationCommand {
    fn to_json(&self) -> Value {
        tagged(self.tag().as_str(), self.data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::NotificationId;
    use notif_core::{DecodeError, Optional, ValidationError};
    use serde_json::json;

    #[test]
    fn clear_all_has_no_data() {
        assert_eq!(
            NotificationCommand::ClearAllNotifications.encode(),
            r#"{"type":"ClearAllNotifications"}"#
        );
    }

    #[test]
    fn get_notifications_carries_user_id() {
        assert_eq!(
            NotificationCommand::GetNotifications(UserId(0)).encode(),
            r#"{"type":"GetNotifications","data":0}"#
        );
    }

    #[test]
    fn validates_every_variant() {
        let commands = vec![
            NotificationCommand::GetNotifications(UserId(1)),
            NotificationCommand::NotifyUser(NotifyUserPayload {
                id: UserId(1),
                message: "Hello: 1!".into(),
                expiration: Optional::Present(12),
            }),
            NotificationCommand::RemoveNotification(RemoveNotificationPayload {
                user_id: UserId(1),
                id: NotificationId(4),
            }),
            NotificationCommand::ClearNotifications(UserId(1)),
            NotificationCommand::ClearAllNotifications,
        ];
        for command in commands {
            let decoded = NotificationCommand::decode(command.encode()).unwrap();
            assert_eq!(decoded, command);
        }
    }

    #[test]
    fn unknown_command_lists_all_five_tags() {
        let err = NotificationCommand::validate(&json!({"type": "DeleteEverything"})).unwrap_err();
        match err {
            ValidationError::UnknownTag { allowed, .. } => {
                assert_eq!(allowed, NotificationCommandTag::names());
                assert_eq!(allowed.len(), 5);
            }
            other => panic!("expected UnknownTag, got: {other:?}"),
        }
    }

    #[test]
    fn nested_payload_error_has_full_path() {
        let err = NotificationCommand::validate(&json!({
            "type": "NotifyUser",
            "data": {"id": 0, "message": "hi", "expiration": {"type": "Present", "data": "soon"}}
        }))
        .unwrap_err();
        let violation = &err.violations()[0];
        assert_eq!(violation.path, "data.expiration.data");
        assert_eq!(violation.message, "expected integer, found string");
    }

    #[test]
    fn malformed_body_is_syntax_error() {
        let err = NotificationCommand::decode("{\"type\": \"GetNotifications\", ").unwrap_err();
        assert!(matches!(err, DecodeError::Syntax(_)));
    }
}
