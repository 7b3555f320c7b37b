//! # Wire Contract Tests
//!
//! The JSON Schema in `schemas/notification-command.schema.json` documents
//! the request body format for other implementations of the service. These
//! tests keep it and the hand-written encoders in agreement:
//!
//! 1. Every command the encoder produces conforms to the schema.
//! 2. Documents the schema rejects for shape reasons are also rejected by
//!    the validator.
//! 3. Property-based round trip over generated commands.

use std::path::PathBuf;

use notif_core::{Encode, Optional, Validate};
use notif_protocol::{
    NotificationCommand, NotificationId, NotifyUserPayload, RemoveNotificationPayload, UserId,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn load_schema(name: &str) -> Value {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("schemas");
    path.push(format!("{name}.schema.json"));
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read schema {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse schema {}: {e}", path.display()))
}

fn command_validator() -> jsonschema::Validator {
    jsonschema::validator_for(&load_schema("notification-command"))
        .unwrap_or_else(|e| panic!("invalid command schema: {e}"))
}

fn sample_commands() -> Vec<NotificationCommand> {
    vec![
        NotificationCommand::GetNotifications(UserId(0)),
        NotificationCommand::NotifyUser(NotifyUserPayload {
            id: UserId(0),
            message: "Hello!".into(),
            expiration: Optional::Absent,
        }),
        NotificationCommand::NotifyUser(NotifyUserPayload {
            id: UserId(0),
            message: "Hello: 1!".into(),
            expiration: Optional::Present(1_767_225_600_000_000),
        }),
        NotificationCommand::RemoveNotification(RemoveNotificationPayload {
            user_id: UserId(0),
            id: NotificationId(2),
        }),
        NotificationCommand::ClearNotifications(UserId(0)),
        NotificationCommand::ClearAllNotifications,
    ]
}

#[test]
fn encoded_commands_conform_to_schema() {
    let validator = command_validator();
    for command in sample_commands() {
        let json = command.to_json();
        assert!(
            validator.is_valid(&json),
            "schema rejected encoded {:?}: {json}",
            command.tag()
        );
    }
}

#[test]
fn schema_rejections_are_validator_rejections() {
    let validator = command_validator();
    let rejected = [
        json!({"type": "GetNotifications"}),
        json!({"type": "GetNotifications", "data": "0"}),
        json!({"type": "NotifyUser", "data": {"id": 0, "message": "hi"}}),
        json!({"type": "NotifyUser", "data": {"id": 0, "message": "hi", "expiration": {"type": "Present"}}}),
        json!({"type": "RemoveNotification", "data": {"userId": 0}}),
        json!({"type": "Unknown"}),
        json!({"data": 0}),
        json!([]),
    ];
    for document in rejected {
        assert!(!validator.is_valid(&document), "schema accepted {document}");
        assert!(
            NotificationCommand::validate(&document).is_err(),
            "validator accepted {document}"
        );
    }
}

fn arb_command() -> impl Strategy<Value = NotificationCommand> {
    let user = any::<u64>().prop_map(UserId);
    prop_oneof![
        user.clone().prop_map(NotificationCommand::GetNotifications),
        (user.clone(), ".{0,24}", prop::option::of(any::<i64>())).prop_map(
            |(id, message, expiration)| {
                NotificationCommand::NotifyUser(NotifyUserPayload {
                    id,
                    message,
                    expiration: expiration.into(),
                })
            }
        ),
        (user.clone(), any::<u64>()).prop_map(|(user_id, id)| {
            NotificationCommand::RemoveNotification(RemoveNotificationPayload {
                user_id,
                id: NotificationId(id),
            })
        }),
        user.prop_map(NotificationCommand::ClearNotifications),
        Just(NotificationCommand::ClearAllNotifications),
    ]
}

proptest! {
    #[test]
    fn generated_commands_round_trip(command in arb_command()) {
        let decoded = NotificationCommand::decode(command.encode());
        prop_assert!(decoded.is_ok(), "decode failed: {:?}", decoded.err());
        prop_assert_eq!(decoded.unwrap(), command);
    }

    #[test]
    fn generated_commands_conform_to_schema(command in arb_command()) {
        let validator = command_validator();
        prop_assert!(validator.is_valid(&command.to_json()));
    }
}
