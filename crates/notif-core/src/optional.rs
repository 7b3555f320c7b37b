//! # Optional -- Tagged "maybe" Value
//!
//! Wire shapes:
//!
//! ```text
//! {"type": "Absent"}
//! {"type": "Present", "data": <T>}
//! ```
//!
//! Any other field on the object is ignored, including a `data` field next
//! to `"Absent"`.
//!
//! A non-finite `f64` payload encodes as `null` and is rejected on the way
//! back, so `Optional<f64>` only round-trips finite values.

use serde_json::Value;

use crate::encode::{tagged, to_json_string, Encode};
use crate::error::DecodeError;
use crate::tag::{read_tag, Tag};
use crate::validate::{decode_with, validate_data, Validate, ValidationResult};
use crate::{tag_enum, TAG_FIELD};

tag_enum! {
    /// Discriminant of [`Optional`].
    pub enum OptionalTag { Absent, Present }
}

/// A value that may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Optional<T> {
    /// No value.
    Absent,
    /// A value of type `T`.
    Present(T),
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Optional<T> {
    /// Discriminant of this value.
    pub fn tag(&self) -> OptionalTag {
        match self {
            Self::Absent => OptionalTag::Absent,
            Self::Present(_) => OptionalTag::Present,
        }
    }

    /// Returns true for `Present`.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrow the wrapped value.
    pub fn as_ref(&self) -> Optional<&T> {
        match self {
            Self::Absent => Optional::Absent,
            Self::Present(data) => Optional::Present(data),
        }
    }

    /// Apply `f` to the wrapped value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Optional<U> {
        match self {
            Self::Absent => Optional::Absent,
            Self::Present(data) => Optional::Present(f(data)),
        }
    }

    /// Convert into the standard library `Option`.
    pub fn into_option(self) -> Option<T> {
        self.into()
    }

    /// Validate a decoded value, using `validate_t` for the payload.
    ///
    /// # Errors
    ///
    /// - `UnknownTag` if `"type"` is missing or not `"Absent"`/`"Present"`.
    /// - `InvalidFields` if `"Present"` has no `data` or `validate_t`
    ///   rejects it.
    pub fn validate<F>(value: &Value, validate_t: F) -> ValidationResult<Self>
    where
        F: Fn(&Value) -> ValidationResult<T>,
    {
        match read_tag::<OptionalTag>(value, TAG_FIELD)? {
            OptionalTag::Absent => Ok(Self::Absent),
            OptionalTag::Present => validate_data(value, validate_t).map(Self::Present),
        }
    }

    /// Build a reusable validator, for nesting inside other validators.
    pub fn validator<F>(validate_t: F) -> impl Fn(&Value) -> ValidationResult<Self>
    where
        F: Fn(&Value) -> ValidationResult<T>,
    {
        move |value: &Value| Self::validate(value, &validate_t)
    }

    /// Parse `input` as JSON and validate it.
    pub fn decode<F>(input: impl AsRef<[u8]>, validate_t: F) -> Result<Self, DecodeError>
    where
        F: Fn(&Value) -> ValidationResult<T>,
    {
        decode_with(input, |value| Self::validate(value, validate_t))
    }

    /// Encode to a JSON value, using `t_to_json` for the payload.
    pub fn to_json<F>(&self, t_to_json: F) -> Value
    where
        F: Fn(&T) -> Value,
    {
        match self {
            Self::Absent => tagged(OptionalTag::Absent.as_str(), None),
            Self::Present(data) => tagged(OptionalTag::Present.as_str(), Some(t_to_json(data))),
        }
    }

    /// Encode to compact JSON text.
    pub fn encode<F>(&self, t_to_json: F) -> String
    where
        F: Fn(&T) -> Value,
    {
        to_json_string(&self.to_json(t_to_json))
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(data) => Self::Present(data),
            None => Self::Absent,
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(optional: Optional<T>) -> Self {
        match optional {
            Optional::Present(data) => Some(data),
            Optional::Absent => None,
        }
    }
}

impl<T: Validate> Validate for Optional<T> {
    fn validate(value: &Value) -> ValidationResult<Self> {
        Optional::validate(value, T::validate)
    }
}

impl<T: Encode> Encode for Optional<T> {
    fn to_json(&self) -> Value {
        Optional::to_json(self, T::to_json)
    }
}
