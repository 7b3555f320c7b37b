//! # Error Types -- Structured Validation Failures
//!
//! Validation failures form a tree that mirrors the shape of the rejected
//! document. Leaves describe what was wrong (type mismatch, unknown tag,
//! missing field); inner nodes carry the field name or array index that led
//! to the leaf.
//!
//! ## Design
//!
//! - Nothing is reduced to a bare string. Callers can match on the tree.
//! - [`ValidationError::violations`] flattens the tree into
//!   `(path, message)` pairs for display or logging.
//! - [`DecodeError`] separates text that is not JSON at all from JSON that
//!   fails structural validation.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// The JSON type of a value, as reported in type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classify a decoded JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lowercase name, as used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a decoded JSON value was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The value has the wrong JSON type, or a number outside the
    /// expected range.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Description of what was expected (`"object"`, `"integer"`, ...).
        expected: &'static str,
        /// The JSON type actually present.
        found: JsonKind,
    },

    /// The discriminant field is missing or names no declared variant.
    #[error("{}", unknown_tag_message(.field, .found.as_ref(), .allowed))]
    UnknownTag {
        /// Name of the discriminant field.
        field: String,
        /// Value found under the discriminant field, if any.
        found: Option<Value>,
        /// Variant names accepted at this position.
        allowed: Vec<String>,
    },

    /// One or more fields of an object failed validation.
    #[error("{}", render(.0, &[]))]
    InvalidFields(Vec<FieldError>),

    /// One or more elements of an array failed validation.
    #[error("{}", render(&[], .0))]
    InvalidElements(Vec<ElementError>),
}

/// A failure attached to a named object field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Name of the field.
    pub field: String,
    /// What was wrong with it.
    pub reason: FieldErrorReason,
}

/// Reason a single field was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrorReason {
    /// The field is not present.
    Missing,
    /// The field is present but its validator failed.
    Invalid(ValidationError),
}

/// A failure attached to an array element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementError {
    /// Position of the element within the array.
    pub index: usize,
    /// Why the element was rejected.
    pub error: ValidationError,
}

impl FieldError {
    /// The field is absent from the object.
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: FieldErrorReason::Missing,
        }
    }

    /// The field is present but failed nested validation.
    pub fn invalid(field: impl Into<String>, error: ValidationError) -> Self {
        Self {
            field: field.into(),
            reason: FieldErrorReason::Invalid(error),
        }
    }
}

impl ValidationError {
    /// Build a type mismatch for `value`.
    pub fn type_mismatch(expected: &'static str, value: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            found: JsonKind::of(value),
        }
    }

    /// Look up the failure recorded for a direct field of the rejected object.
    pub fn field(&self, name: &str) -> Option<&FieldError> {
        match self {
            Self::InvalidFields(fields) => fields.iter().find(|f| f.field == name),
            _ => None,
        }
    }

    /// Look up the failure recorded for an element of the rejected array.
    pub fn element(&self, index: usize) -> Option<&ElementError> {
        match self {
            Self::InvalidElements(elements) => elements.iter().find(|e| e.index == index),
            _ => None,
        }
    }

    /// Flatten the error tree into one violation per leaf.
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        collect(self, "", &mut out);
        out
    }
}

/// A single leaf of a validation error tree with its full path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path to the violating value (`data.notification.id`,
    /// `data[2].message`). Empty for the root.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Error from the text entry points: either the input is not JSON, or it is
/// JSON that does not have the expected shape.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Input text is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Input parsed but failed structural validation.
    #[error("invalid payload: {0}")]
    Invalid(#[from] ValidationError),
}

impl DecodeError {
    /// The structural failure, if the input was well-formed JSON.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(e) => Some(e),
            Self::Syntax(_) => None,
        }
    }
}

fn unknown_tag_message(field: &str, found: Option<&Value>, allowed: &[String]) -> String {
    let allowed = allowed
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ");
    match found {
        Some(value) => format!("unknown tag {value} in field \"{field}\"; expected one of {allowed}"),
        None => format!("missing tag field \"{field}\"; expected one of {allowed}"),
    }
}

fn join_field(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn collect(error: &ValidationError, path: &str, out: &mut Vec<Violation>) {
    match error {
        ValidationError::InvalidFields(fields) => collect_fields(fields, path, out),
        ValidationError::InvalidElements(elements) => collect_elements(elements, path, out),
        leaf => out.push(Violation {
            path: path.to_string(),
            message: leaf.to_string(),
        }),
    }
}

fn collect_fields(fields: &[FieldError], path: &str, out: &mut Vec<Violation>) {
    for field in fields {
        let field_path = join_field(path, &field.field);
        match &field.reason {
            FieldErrorReason::Missing => out.push(Violation {
                path: field_path,
                message: "missing field".to_string(),
            }),
            FieldErrorReason::Invalid(inner) => collect(inner, &field_path, out),
        }
    }
}

fn collect_elements(elements: &[ElementError], path: &str, out: &mut Vec<Violation>) {
    for element in elements {
        let element_path = format!("{path}[{}]", element.index);
        collect(&element.error, &element_path, out);
    }
}

fn render(fields: &[FieldError], elements: &[ElementError]) -> String {
    let mut out = Vec::new();
    collect_fields(fields, "", &mut out);
    collect_elements(elements, "", &mut out);
    out.iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
