//! # Encoding
//!
//! Encoders turn typed values into [`serde_json::Value`] trees in the shape
//! the validators accept. Tagged values emit the discriminant first; the
//! workspace enables `serde_json/preserve_order`, so key order in the
//! serialized text follows insertion order. Validators never depend on it.

use serde_json::{Map, Value};

use crate::{DATA_FIELD, TAG_FIELD};

/// Types with a canonical JSON encoder.
pub trait Encode {
    /// Produce the JSON value for `self`.
    fn to_json(&self) -> Value;

    /// Produce compact JSON text for `self`.
    fn encode(&self) -> String {
        to_json_string(&self.to_json())
    }
}

/// Build a tagged object: `{"type": tag}` or `{"type": tag, "data": data}`.
pub fn tagged(tag: &str, data: Option<Value>) -> Value {
    let mut object = Map::new();
    object.insert(TAG_FIELD.to_owned(), Value::String(tag.to_owned()));
    if let Some(data) = data {
        object.insert(DATA_FIELD.to_owned(), data);
    }
    Value::Object(object)
}

/// Encode a slice element by element.
pub fn encode_array<T>(items: &[T], element_to_json: impl Fn(&T) -> Value) -> Value {
    Value::Array(items.iter().map(element_to_json).collect())
}

/// Standard compact JSON serialization.
pub fn to_json_string(value: &Value) -> String {
    value.to_string()
}

impl Encode for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Encode for str {
    fn to_json(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl Encode for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Encode for i64 {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl Encode for u64 {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl Encode for f64 {
    /// Non-finite values have no JSON representation and encode as `null`.
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn to_json(&self) -> Value {
        encode_array(self.as_slice(), T::to_json)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn to_json(&self) -> Value {
        T::to_json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tagged_without_data_has_only_discriminant() {
        assert_eq!(tagged("Absent", None), json!({"type": "Absent"}));
    }

    #[test]
    fn tagged_emits_discriminant_first() {
        let text = to_json_string(&tagged("Present", Some(json!(1))));
        assert_eq!(text, r#"{"type":"Present","data":1}"#);
    }

    #[test]
    fn primitives_encode() {
        assert_eq!("hi".to_json(), json!("hi"));
        assert_eq!(true.to_json(), json!(true));
        assert_eq!((-4i64).to_json(), json!(-4));
        assert_eq!(9u64.to_json(), json!(9));
        assert_eq!(0.25f64.to_json(), json!(0.25));
    }

    #[test]
    fn non_finite_float_is_null() {
        assert_eq!(f64::NAN.to_json(), Value::Null);
    }

    #[test]
    fn vec_encodes_elements() {
        assert_eq!(vec![1u64, 2].encode(), "[1,2]");
        let words = vec!["a".to_string()];
        assert_eq!(encode_array(words.as_slice(), |w| json!(w.len())), json!([1]));
    }

    #[test]
    fn unicode_is_emitted_as_utf8() {
        assert_eq!("é".to_json().to_string(), "\"é\"");
    }
}
