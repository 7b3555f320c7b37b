//! # Validation
//!
//! Validators map a decoded [`serde_json::Value`] to a typed value or a
//! [`ValidationError`] tree. A validator is any
//! `Fn(&Value) -> ValidationResult<T>`; generic containers take their
//! element validators as arguments and compose them.
//!
//! Object validation goes through [`ObjectFields`], which records every
//! failing field before reporting, so one pass over a malformed document
//! yields the complete list of problems.

use serde_json::{Map, Value};

use crate::error::{DecodeError, ElementError, FieldError, ValidationError};
use crate::DATA_FIELD;

/// Result of validating a decoded JSON value.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Types with a canonical validator.
pub trait Validate: Sized {
    /// Validate an already decoded JSON value.
    fn validate(value: &Value) -> ValidationResult<Self>;

    /// Parse `input` as JSON and validate the result.
    ///
    /// # Errors
    ///
    /// `DecodeError::Syntax` if the text is not JSON, `DecodeError::Invalid`
    /// if it is JSON of the wrong shape.
    fn decode(input: impl AsRef<[u8]>) -> Result<Self, DecodeError> {
        decode_with(input, Self::validate)
    }
}

/// Parse `input` as JSON, then run `validate` on the decoded value.
pub fn decode_with<T>(
    input: impl AsRef<[u8]>,
    validate: impl FnOnce(&Value) -> ValidationResult<T>,
) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_slice(input.as_ref())?;
    Ok(validate(&value)?)
}

/// Field-by-field validator for a JSON object.
///
/// Each call to [`field`](Self::field) either yields the validated value or
/// records a [`FieldError`]. [`finish`](Self::finish) reports all recorded
/// errors at once.
///
/// ```
/// use notif_core::{validate_string, validate_u64, ObjectFields};
/// use serde_json::json;
///
/// let value = json!({"id": 7, "message": "hi"});
/// let mut fields = ObjectFields::new(&value).unwrap();
/// let id = fields.field("id", validate_u64);
/// let message = fields.field("message", validate_string);
/// let pair = fields.finish(|| Some((id?, message?))).unwrap();
/// assert_eq!(pair, (7, "hi".to_string()));
/// ```
#[derive(Debug)]
pub struct ObjectFields<'a> {
    object: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> ObjectFields<'a> {
    /// Start validating `value` as an object.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if `value` is not an object.
    pub fn new(value: &'a Value) -> ValidationResult<Self> {
        value
            .as_object()
            .map(|object| Self {
                object,
                errors: Vec::new(),
            })
            .ok_or_else(|| ValidationError::type_mismatch("object", value))
    }

    /// Validate the required field `name`.
    ///
    /// Returns `None` and records the failure if the field is missing or
    /// rejected by `validate`.
    pub fn field<T>(
        &mut self,
        name: &str,
        validate: impl Fn(&Value) -> ValidationResult<T>,
    ) -> Option<T> {
        let Some(raw) = self.object.get(name) else {
            self.errors.push(FieldError::missing(name));
            return None;
        };
        match validate(raw) {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.push(FieldError::invalid(name, error));
                None
            }
        }
    }

    /// Whether any field has failed so far.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Assemble the validated value, or report every recorded field error.
    ///
    /// `build` is only called when no field failed; it is expected to
    /// return `Some` in that case since every `None` from
    /// [`field`](Self::field) records an error.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> ValidationResult<T> {
        if !self.errors.is_empty() {
            return Err(ValidationError::InvalidFields(self.errors));
        }
        build().ok_or(ValidationError::InvalidFields(self.errors))
    }
}

/// Validate the `data` payload of a tagged object.
pub fn validate_data<T>(
    value: &Value,
    validate: impl Fn(&Value) -> ValidationResult<T>,
) -> ValidationResult<T> {
    let mut fields = ObjectFields::new(value)?;
    let data = fields.field(DATA_FIELD, validate);
    fields.finish(|| data)
}

/// One row of a [`validate_tagged`] table: a variant name and the validator
/// for objects carrying it.
pub type TagRow<'a, T> = (&'a str, &'a dyn Fn(&Value) -> ValidationResult<T>);

/// Dispatch on the discriminant under `tag_field` through a table of
/// `(variant name, validator)` rows.
///
/// The matching row's validator receives the whole object, so it decides
/// which further fields to read. Tag enums built with
/// [`tag_enum!`](crate::tag_enum) and [`read_tag`](crate::read_tag) give an
/// exhaustive `match` instead; the table form suits unions assembled at run
/// time.
///
/// # Errors
///
/// - `TypeMismatch` if `value` is not an object.
/// - `UnknownTag` if the field is missing, not a string, or matches no row.
///   `allowed` lists the table's names in order.
pub fn validate_tagged<T>(
    value: &Value,
    tag_field: &str,
    table: &[TagRow<'_, T>],
) -> ValidationResult<T> {
    let object = value
        .as_object()
        .ok_or_else(|| ValidationError::type_mismatch("object", value))?;
    let found = object.get(tag_field);
    let row = found
        .and_then(Value::as_str)
        .and_then(|name| table.iter().find(|(tag, _)| *tag == name));
    match row {
        Some((_, validate)) => validate(value),
        None => Err(ValidationError::UnknownTag {
            field: tag_field.to_string(),
            found: found.cloned(),
            allowed: table.iter().map(|(tag, _)| tag.to_string()).collect(),
        }),
    }
}

/// Accept a JSON string.
pub fn validate_string(value: &Value) -> ValidationResult<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ValidationError::type_mismatch("string", value))
}

/// Accept a JSON boolean.
pub fn validate_bool(value: &Value) -> ValidationResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| ValidationError::type_mismatch("boolean", value))
}

/// Accept a JSON number that is an integer representable as `i64`.
pub fn validate_i64(value: &Value) -> ValidationResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| ValidationError::type_mismatch("integer", value))
}

/// Accept a JSON number that is a non-negative integer representable as `u64`.
pub fn validate_u64(value: &Value) -> ValidationResult<u64> {
    value
        .as_u64()
        .ok_or_else(|| ValidationError::type_mismatch("non-negative integer", value))
}

/// Accept any JSON number.
pub fn validate_f64(value: &Value) -> ValidationResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| ValidationError::type_mismatch("number", value))
}

/// Accept a JSON array whose elements all pass `validate_element`.
///
/// Every failing element is reported with its index.
pub fn validate_array_of<T>(
    value: &Value,
    validate_element: impl Fn(&Value) -> ValidationResult<T>,
) -> ValidationResult<Vec<T>> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::type_mismatch("array", value))?;

    let mut out = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match validate_element(item) {
            Ok(element) => out.push(element),
            Err(error) => errors.push(ElementError { index, error }),
        }
    }

    if errors.is_empty() {
        Ok(out)
    } else {
        Err(ValidationError::InvalidElements(errors))
    }
}

/// Build an array validator from an element validator.
pub fn validate_array<T, F>(validate_element: F) -> impl Fn(&Value) -> ValidationResult<Vec<T>>
where
    F: Fn(&Value) -> ValidationResult<T>,
{
    move |value: &Value| validate_array_of(value, &validate_element)
}

impl Validate for String {
    fn validate(value: &Value) -> ValidationResult<Self> {
        validate_string(value)
    }
}

impl Validate for bool {
    fn validate(value: &Value) -> ValidationResult<Self> {
        validate_bool(value)
    }
}

impl Validate for i64 {
    fn validate(value: &Value) -> ValidationResult<Self> {
        validate_i64(value)
    }
}

impl Validate for u64 {
    fn validate(value: &Value) -> ValidationResult<Self> {
        validate_u64(value)
    }
}

impl Validate for f64 {
    fn validate(value: &Value) -> ValidationResult<Self> {
        validate_f64(value)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(value: &Value) -> ValidationResult<Self> {
        validate_array_of(value, T::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FieldErrorReason, JsonKind};
    use serde_json::json;

    #[test]
    fn primitives_accept_matching_values() {
        assert_eq!(validate_string(&json!("a")).unwrap(), "a");
        assert!(validate_bool(&json!(true)).unwrap());
        assert_eq!(validate_i64(&json!(-3)).unwrap(), -3);
        assert_eq!(validate_u64(&json!(3)).unwrap(), 3);
        assert_eq!(validate_f64(&json!(1.5)).unwrap(), 1.5);
        assert_eq!(validate_f64(&json!(2)).unwrap(), 2.0);
    }

    #[test]
    fn integers_reject_fractions_and_strings() {
        assert!(validate_i64(&json!(1.5)).is_err());
        assert!(validate_i64(&json!("1")).is_err());
    }

    #[test]
    fn u64_rejects_negative() {
        let err = validate_u64(&json!(-1)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                expected: "non-negative integer",
                found: JsonKind::Number,
            }
        );
    }

    #[test]
    fn bool_does_not_coerce_numbers() {
        assert!(validate_bool(&json!(0)).is_err());
        assert!(validate_string(&json!(null)).is_err());
    }

    #[test]
    fn array_collects_every_bad_element() {
        let err = validate_array_of(&json!([1, "two", 3, null]), validate_i64).unwrap_err();
        let bad: Vec<usize> = match &err {
            ValidationError::InvalidElements(elements) => {
                elements.iter().map(|e| e.index).collect()
            }
            other => panic!("expected InvalidElements, got: {other:?}"),
        };
        assert_eq!(bad, vec![1, 3]);
        assert_eq!(err.violations()[0].path, "[1]");
    }

    #[test]
    fn array_validator_composes() {
        let validate = validate_array(validate_array(validate_bool));
        let nested = validate(&json!([[true], [], [false, true]])).unwrap();
        assert_eq!(nested, vec![vec![true], vec![], vec![false, true]]);
    }

    #[test]
    fn array_rejects_object() {
        let err = Vec::<u64>::validate(&json!({})).unwrap_err();
        assert_eq!(err, ValidationError::type_mismatch("array", &json!({})));
    }

    #[test]
    fn object_fields_collect_all_failures() {
        let value = json!({"id": "seven", "seen": false});
        let mut fields = ObjectFields::new(&value).unwrap();
        let id = fields.field("id", validate_u64);
        let message = fields.field("message", validate_string);
        let seen = fields.field("seen", validate_bool);
        assert!(fields.has_errors());

        let err = fields
            .finish(|| Some((id?, message?, seen?)))
            .unwrap_err();
        match &err {
            ValidationError::InvalidFields(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected InvalidFields, got: {other:?}"),
        }
        assert!(matches!(
            err.field("id").map(|f| &f.reason),
            Some(FieldErrorReason::Invalid(_))
        ));
        assert_eq!(
            err.field("message").map(|f| &f.reason),
            Some(&FieldErrorReason::Missing)
        );
    }

    #[test]
    fn object_fields_ignore_unknown_keys() {
        let value = json!({"id": 1, "extra": [1, 2, 3]});
        let mut fields = ObjectFields::new(&value).unwrap();
        let id = fields.field("id", validate_u64);
        assert_eq!(fields.finish(|| id).unwrap(), 1);
    }

    #[test]
    fn object_fields_reject_non_object() {
        let err = ObjectFields::new(&json!("x")).unwrap_err();
        assert_eq!(err, ValidationError::type_mismatch("object", &json!("x")));
    }

    #[test]
    fn data_payload_missing() {
        let err = validate_data(&json!({"type": "Present"}), validate_i64).unwrap_err();
        assert_eq!(
            err.field("data").map(|f| &f.reason),
            Some(&FieldErrorReason::Missing)
        );
    }

    #[test]
    fn decode_with_separates_syntax_from_shape() {
        let syntax = decode_with("{", validate_i64).unwrap_err();
        assert!(matches!(syntax, DecodeError::Syntax(_)));

        let shape = decode_with("\"x\"", validate_i64).unwrap_err();
        assert!(matches!(shape, DecodeError::Invalid(_)));

        assert_eq!(decode_with(b"12".as_slice(), validate_i64).unwrap(), 12);
    }

    #[test]
    fn trait_decode_uses_canonical_validator() {
        assert_eq!(Vec::<String>::decode(r#"["a","b"]"#).unwrap(), vec!["a", "b"]);
    }

    #[derive(Debug, PartialEq)]
    enum Shape {
        Circle(f64),
        Square(u64),
        Point,
    }

    fn validate_shape(value: &Value) -> ValidationResult<Shape> {
        let circle = |v: &Value| validate_data(v, validate_f64).map(Shape::Circle);
        let square = |v: &Value| validate_data(v, validate_u64).map(Shape::Square);
        let point = |_: &Value| -> ValidationResult<Shape> { Ok(Shape::Point) };
        let table: [TagRow<'_, Shape>; 3] =
            [("Circle", &circle), ("Square", &square), ("Point", &point)];
        validate_tagged(value, "type", &table)
    }

    #[test]
    fn tagged_table_dispatches_to_matching_row() {
        assert_eq!(
            validate_shape(&json!({"type": "Square", "data": 4})).unwrap(),
            Shape::Square(4)
        );
        assert_eq!(validate_shape(&json!({"type": "Point"})).unwrap(), Shape::Point);

        let err = validate_shape(&json!({"type": "Circle", "data": "wide"})).unwrap_err();
        assert_eq!(err.violations()[0].path, "data");
    }

    #[test]
    fn tagged_table_unknown_tag_lists_rows() {
        match validate_shape(&json!({"type": "Hexagon"})).unwrap_err() {
            ValidationError::UnknownTag { field, found, allowed } => {
                assert_eq!(field, "type");
                assert_eq!(found, Some(json!("Hexagon")));
                assert_eq!(allowed, vec!["Circle", "Square", "Point"]);
            }
            other => panic!("expected UnknownTag, got: {other:?}"),
        }
    }

    #[test]
    fn tagged_table_missing_tag() {
        match validate_shape(&json!({"data": 1})).unwrap_err() {
            ValidationError::UnknownTag { found, allowed, .. } => {
                assert_eq!(found, None);
                assert_eq!(allowed.len(), 3);
            }
            other => panic!("expected UnknownTag, got: {other:?}"),
        }
        assert!(matches!(
            validate_shape(&json!([])).unwrap_err(),
            ValidationError::TypeMismatch { .. }
        ));
    }
}
