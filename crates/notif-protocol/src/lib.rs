//! # notif-protocol -- Notification Service Wire Types
//!
//! Request and response bodies exchanged with the notification service at
//! `POST /notification`. Requests are [`NotificationCommand`]s; every
//! response body is a [`NotificationCommandResult`], including failures
//! answered with HTTP 400.
//!
//! All types validate and encode through the `notif-core` contract:
//! tagged unions carry `"type"` and `"data"`, records are plain objects with
//! camelCase keys, and unknown keys are ignored.
//!
//! ## Type Map
//!
//! | Union | Variants |
//! |-------|----------|
//! | [`NotificationCommand`] | `GetNotifications`, `NotifyUser`, `RemoveNotification`, `ClearNotifications`, `ClearAllNotifications` |
//! | [`NotificationCommandSuccess`] | `Notifications`, `NotificationAdded`, `NotificationRemoved`, `NotificationsCleared`, `AllNotificationsCleared` |
//! | [`NotificationCommandFailure`] | `NotificationNotRemoved`, `NotificationNotAdded`, `InvalidCommand` |
//! | [`NotificationCommandResult`] | `CommandSuccess`, `CommandFailure` |

pub mod command;
pub mod records;
pub mod result;

pub use command::{NotificationCommand, NotificationCommandTag};
pub use records::{
    AddNotificationError, Notification, NotificationAddedPayload, NotificationId, NotifyUserPayload,
    RemoveNotificationError, RemoveNotificationPayload, RemoveNotificationResult, UserId,
};
pub use result::{
    NotificationCommandFailure, NotificationCommandFailureTag, NotificationCommandResult,
    NotificationCommandResultTag, NotificationCommandSuccess, NotificationCommandSuccessTag,
};
