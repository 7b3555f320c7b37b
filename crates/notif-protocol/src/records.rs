//! # Payload Records
//!
//! Plain JSON objects carried inside the tagged unions. Every field is
//! required; `expiration` is itself a tagged `Optional` holding
//! microseconds since the Unix epoch.

use notif_core::{
    validate_bool, validate_i64, validate_string, validate_u64, Encode, ObjectFields, Optional,
    Validate, ValidationResult,
};
use serde_json::{json, Value};

/// Identifier of a notification recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

/// Identifier the service assigns to a stored notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification:{}", self.0)
    }
}

impl Validate for UserId {
    fn validate(value: &Value) -> ValidationResult<Self> {
        validate_u64(value).map(Self)
    }
}

impl Encode for UserId {
    fn to_json(&self) -> Value {
        self.0.to_json()
    }
}

impl Validate for NotificationId {
    fn validate(value: &Value) -> ValidationResult<Self> {
        validate_u64(value).map(Self)
    }
}

impl Encode for NotificationId {
    fn to_json(&self) -> Value {
        self.0.to_json()
    }
}

fn validate_expiration(value: &Value) -> ValidationResult<Optional<i64>> {
    Optional::validate(value, validate_i64)
}

/// Payload of `NotifyUser`: deliver `message` to user `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyUserPayload {
    /// Recipient. Serialized as `id`.
    pub id: UserId,
    pub message: String,
    pub expiration: Optional<i64>,
}

impl Validate for NotifyUserPayload {
    fn validate(value: &Value) -> ValidationResult<Self> {
        let mut fields = ObjectFields::new(value)?;
        let id = fields.field("id", UserId::validate);
        let message = fields.field("message", validate_string);
        let expiration = fields.field("expiration", validate_expiration);
        fields.finish(|| {
            Some(Self {
                id: id?,
                message: message?,
                expiration: expiration?,
            })
        })
    }
}

impl Encode for NotifyUserPayload {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id.to_json(),
            "message": self.message,
            "expiration": Encode::to_json(&self.expiration),
        })
    }
}

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub seen: bool,
    pub expiration: Optional<i64>,
}

impl Validate for Notification {
    fn validate(value: &Value) -> ValidationResult<Self> {
        let mut fields = ObjectFields::new(value)?;
        let id = fields.field("id", NotificationId::validate);
        let message = fields.field("message", validate_string);
        let seen = fields.field("seen", validate_bool);
        let expiration = fields.field("expiration", validate_expiration);
        fields.finish(|| {
            Some(Self {
                id: id?,
                message: message?,
                seen: seen?,
                expiration: expiration?,
            })
        })
    }
}

impl Encode for Notification {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id.to_json(),
            "message": self.message,
            "seen": self.seen,
            "expiration": Encode::to_json(&self.expiration),
        })
    }
}

/// Payload of `NotificationAdded`: the stored notification and its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAddedPayload {
    pub user_id: UserId,
    pub notification: Notification,
}

impl Validate for NotificationAddedPayload {
    fn validate(value: &Value) -> ValidationResult<Self> {
        let mut fields = ObjectFields::new(value)?;
        let user_id = fields.field("userId", UserId::validate);
        let notification = fields.field("notification", Notification::validate);
        fields.finish(|| {
            Some(Self {
                user_id: user_id?,
                notification: notification?,
            })
        })
    }
}

impl Encode for NotificationAddedPayload {
    fn to_json(&self) -> Value {
        json!({
            "userId": self.user_id.to_json(),
            "notification": self.notification.to_json(),
        })
    }
}

/// Payload of `NotificationNotAdded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddNotificationError {
    pub user_id: UserId,
    pub notification: Notification,
    pub error: String,
}

impl Validate for AddNotificationError {
    fn validate(value: &Value) -> ValidationResult<Self> {
        let mut fields = ObjectFields::new(value)?;
        let user_id = fields.field("userId", UserId::validate);
        let notification = fields.field("notification", Notification::validate);
        let error = fields.field("error", validate_string);
        fields.finish(|| {
            Some(Self {
                user_id: user_id?,
                notification: notification?,
                error: error?,
            })
        })
    }
}

impl Encode for AddNotificationError {
    fn to_json(&self) -> Value {
        json!({
            "userId": self.user_id.to_json(),
            "notification": self.notification.to_json(),
            "error": self.error,
        })
    }
}

/// Payload of `RemoveNotification`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveNotificationPayload {
    pub user_id: UserId,
    /// Notification to remove. Serialized as `id`.
    pub id: NotificationId,
}

impl Validate for RemoveNotificationPayload {
    fn validate(value: &Value) -> ValidationResult<Self> {
        let mut fields = ObjectFields::new(value)?;
        let user_id = fields.field("userId", UserId::validate);
        let id = fields.field("id", NotificationId::validate);
        fields.finish(|| {
            Some(Self {
                user_id: user_id?,
                id: id?,
            })
        })
    }
}

impl Encode for RemoveNotificationPayload {
    fn to_json(&self) -> Value {
        json!({
            "userId": self.user_id.to_json(),
            "id": self.id.to_json(),
        })
    }
}

/// Payload of `NotificationNotRemoved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveNotificationError {
    pub user_id: UserId,
    pub notification_id: NotificationId,
    pub error: String,
}

impl Validate for RemoveNotificationError {
    fn validate(value: &Value) -> ValidationResult<Self> {
        let mut fields = ObjectFields::new(value)?;
        let user_id = fields.field("userId", UserId::validate);
        let notification_id = fields.field("notificationId", NotificationId::validate);
        let error = fields.field("error", validate_string);
        fields.finish(|| {
            Some(Self {
                user_id: user_id?,
                notification_id: notification_id?,
                error: error?,
            })
        })
    }
}

impl Encode for RemoveNotificationError {
    fn to_json(&self) -> Value {
        json!({
            "userId": self.user_id.to_json(),
            "notificationId": self.notification_id.to_json(),
            "error": self.error,
        })
    }
}

/// Payload of `NotificationRemoved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveNotificationResult {
    pub remaining_notifications: Vec<Notification>,
    pub removed_notification: Notification,
}

impl Validate for RemoveNotificationResult {
    fn validate(value: &Value) -> ValidationResult<Self> {
        let mut fields = ObjectFields::new(value)?;
        let remaining = fields.field("remainingNotifications", Vec::<Notification>::validate);
        let removed = fields.field("removedNotification", Notification::validate);
        fields.finish(|| {
            Some(Self {
                remaining_notifications: remaining?,
                removed_notification: removed?,
            })
        })
    }
}

impl Encode for RemoveNotificationResult {
    fn to_json(&self) -> Value {
        json!({
            "remainingNotifications": self.remaining_notifications.to_json(),
            "removedNotification": self.removed_notification.to_json(),
        })
    }
}
