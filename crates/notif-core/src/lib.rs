//! # notif-core -- Tagged-Union JSON Contract
//!
//! This crate defines the wire contract shared by every payload the
//! notification stack sends or receives. A tagged union travels as a JSON
//! object with a string discriminant under `"type"` and, for variants that
//! carry a payload, the payload under `"data"`:
//!
//! ```text
//! {"type": "Present", "data": 42}
//! {"type": "Absent"}
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Validation returns values, not panics.** Every validator returns a
//!    [`ValidationError`] tree naming the field path and the reason. Field
//!    errors inside one object are collected in a batch rather than stopping
//!    at the first failure.
//!
//! 2. **Explicit discriminant enums.** Each tagged union has a [`Tag`] enum
//!    and validation is an exhaustive `match` on it. Adding a variant forces
//!    every dispatcher to handle it.
//!
//! 3. **Element codecs are arguments.** Generic unions take their element
//!    validator and encoder as closures, so arbitrary nesting needs no
//!    reflection. Types with a canonical codec implement [`Validate`] and
//!    [`Encode`] on top.
//!
//! 4. **Round-trip law.** Anything [`Encode`] produces is accepted by
//!    [`Validate`] and yields the original value.
//!
//! ## Crate Policy
//!
//! - No I/O, no shared state. Every operation is a pure function.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Unknown fields are ignored on every variant.

pub mod disjunction;
pub mod encode;
pub mod error;
pub mod optional;
pub mod tag;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use disjunction::{Disjunction, DisjunctionTag};
pub use encode::{encode_array, tagged, to_json_string, Encode};
pub use error::{
    DecodeError, ElementError, FieldError, FieldErrorReason, JsonKind, ValidationError, Violation,
};
pub use optional::{Optional, OptionalTag};
pub use tag::{read_tag, Tag};
pub use validate::{
    decode_with, validate_array, validate_array_of, validate_bool, validate_data, validate_f64,
    validate_i64, validate_string, validate_tagged, validate_u64, ObjectFields, TagRow, Validate,
    ValidationResult,
};

/// Name of the discriminant field carried by every tagged value.
pub const TAG_FIELD: &str = "type";

/// Name of the payload field carried by non-empty variants.
pub const DATA_FIELD: &str = "data";
