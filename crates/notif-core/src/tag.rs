//! # Discriminant Tags
//!
//! Every tagged union has a companion `Tag` enum listing its variant names.
//! [`read_tag`] resolves the discriminant of a decoded object to that enum,
//! so dispatching on it is an exhaustive `match`:
//!
//! ```
//! use notif_core::{read_tag, tag_enum, TAG_FIELD};
//! use serde_json::json;
//!
//! tag_enum! {
//!     pub enum ShapeTag { Circle, Square }
//! }
//!
//! let value = json!({"type": "Square", "data": 2});
//! let tag = read_tag::<ShapeTag>(&value, TAG_FIELD).unwrap();
//! assert_eq!(tag, ShapeTag::Square);
//! ```

use serde_json::Value;

use crate::error::ValidationError;

/// A closed set of variant names for one tagged union.
pub trait Tag: Copy + Sized + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// The wire name of this variant.
    fn as_str(self) -> &'static str;

    /// Resolve a wire name to a variant.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.as_str() == name)
    }

    /// Every wire name, in declaration order.
    fn names() -> Vec<String> {
        Self::ALL.iter().map(|tag| tag.as_str().to_string()).collect()
    }
}

/// Read the discriminant of `value` under `tag_field`.
///
/// # Errors
///
/// - `TypeMismatch` if `value` is not an object.
/// - `UnknownTag` if the field is missing, not a string, or names no
///   variant of `K`. The error lists every name `K` accepts.
pub fn read_tag<K: Tag>(value: &Value, tag_field: &str) -> Result<K, ValidationError> {
    let object = value
        .as_object()
        .ok_or_else(|| ValidationError::type_mismatch("object", value))?;
    let found = object.get(tag_field);
    found
        .and_then(Value::as_str)
        .and_then(K::from_name)
        .ok_or_else(|| ValidationError::UnknownTag {
            field: tag_field.to_string(),
            found: found.cloned(),
            allowed: K::names(),
        })
}

/// Declare a discriminant enum whose variant names are the wire tags.
#[macro_export]
macro_rules! tag_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::Tag for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::Tag::as_str(*self))
            }
        }
    };
}
