//! # Disjunction -- Tagged Either-Or Value
//!
//! Wire shapes:
//!
//! ```text
//! {"type": "Left", "data": <L>}
//! {"type": "Right", "data": <R>}
//! ```
//!
//! By convention `Right` carries the success path and `Left` the failure,
//! which is how the conversions to and from `Result` map them.
//!
//! As with `Optional`, an `f64` side only round-trips finite values: NaN
//! and the infinities encode as `null`, which the `f64` validator rejects.

use serde_json::Value;

use crate::encode::{tagged, to_json_string, Encode};
use crate::error::DecodeError;
use crate::tag::{read_tag, Tag};
use crate::validate::{decode_with, validate_data, Validate, ValidationResult};
use crate::{tag_enum, TAG_FIELD};

tag_enum! {
    /// Discriminant of [`Disjunction`].
    pub enum DisjunctionTag { Left, Right }
}

/// One of two alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disjunction<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Disjunction<L, R> {
    /// Discriminant of this value.
    pub fn tag(&self) -> DisjunctionTag {
        match self {
            Self::Left(_) => DisjunctionTag::Left,
            Self::Right(_) => DisjunctionTag::Right,
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    pub fn left(self) -> Option<L> {
        match self {
            Self::Left(data) => Some(data),
            Self::Right(_) => None,
        }
    }

    pub fn right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(data) => Some(data),
        }
    }

    /// Convert into a `Result`, with `Right` as `Ok`.
    pub fn into_result(self) -> Result<R, L> {
        self.into()
    }

    /// Validate a decoded value, using `validate_l` / `validate_r` for the
    /// payload of the matching variant.
    ///
    /// # Errors
    ///
    /// - `UnknownTag` if `"type"` is missing or not `"Left"`/`"Right"`.
    /// - `InvalidFields` if `data` is missing or rejected.
    pub fn validate<FL, FR>(value: &Value, validate_l: FL, validate_r: FR) -> ValidationResult<Self>
    where
        FL: Fn(&Value) -> ValidationResult<L>,
        FR: Fn(&Value) -> ValidationResult<R>,
    {
        match read_tag::<DisjunctionTag>(value, TAG_FIELD)? {
            DisjunctionTag::Left => validate_data(value, validate_l).map(Self::Left),
            DisjunctionTag::Right => validate_data(value, validate_r).map(Self::Right),
        }
    }

    /// Build a reusable validator, for nesting inside other validators.
    pub fn validator<FL, FR>(
        validate_l: FL,
        validate_r: FR,
    ) -> impl Fn(&Value) -> ValidationResult<Self>
    where
        FL: Fn(&Value) -> ValidationResult<L>,
        FR: Fn(&Value) -> ValidationResult<R>,
    {
        move |value: &Value| Self::validate(value, &validate_l, &validate_r)
    }

    /// Parse `input` as JSON and validate it.
    pub fn decode<FL, FR>(
        input: impl AsRef<[u8]>,
        validate_l: FL,
        validate_r: FR,
    ) -> Result<Self, DecodeError>
    where
        FL: Fn(&Value) -> ValidationResult<L>,
        FR: Fn(&Value) -> ValidationResult<R>,
    {
        decode_with(input, |value| Self::validate(value, validate_l, validate_r))
    }

    /// Encode to a JSON value with the per-side payload encoders.
    pub fn to_json<FL, FR>(&self, l_to_json: FL, r_to_json: FR) -> Value
    where
        FL: Fn(&L) -> Value,
        FR: Fn(&R) -> Value,
    {
        match self {
            Self::Left(data) => tagged(DisjunctionTag::Left.as_str(), Some(l_to_json(data))),
            Self::Right(data) => tagged(DisjunctionTag::Right.as_str(), Some(r_to_json(data))),
        }
    }

    /// Encode to compact JSON text.
    pub fn encode<FL, FR>(&self, l_to_json: FL, r_to_json: FR) -> String
    where
        FL: Fn(&L) -> Value,
        FR: Fn(&R) -> Value,
    {
        to_json_string(&self.to_json(l_to_json, r_to_json))
    }
}

impl<L, R> From<Result<R, L>> for Disjunction<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(data) => Self::Right(data),
            Err(data) => Self::Left(data),
        }
    }
}

impl<L, R> From<Disjunction<L, R>> for Result<R, L> {
    fn from(disjunction: Disjunction<L, R>) -> Self {
        match disjunction {
            Disjunction::Right(data) => Ok(data),
            Disjunction::Left(data) => Err(data),
        }
    }
}

impl<L: Validate, R: Validate> Validate for Disjunction<L, R> {
    fn validate(value: &Value) -> ValidationResult<Self> {
        Disjunction::validate(value, L::validate, R::validate)
    }
}

impl<L: Encode, R: Encode> Encode for Disjunction<L, R> {
    fn to_json(&self) -> Value {
        Disjunction::to_json(self, L::to_json, R::to_json)
    }
}
