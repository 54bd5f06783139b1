//! # KODA
//!
//! A data-interchange format with two surfaces over a single value model: a
//! relaxed superset of JSON for humans (unquoted identifier keys,
//! single-quoted strings, comments, optional commas, and a brace-less
//! implicit-root object form) and a canonical binary encoding whose object
//! keys are deduplicated through a sorted dictionary.
//!
//! # Example
//!
//! ```
//! use koda::prelude::*;
//!
//! // The textual surface is forgiving.
//! let value = parse(b"name: 'ada' age: 36 // a comment").unwrap();
//!
//! // The binary surface is canonical: insertion order of object keys does
//! // not affect the output bytes.
//! let frame = encode(&value).unwrap();
//! let back = decode(&frame).unwrap();
//! assert_eq!(back, value.normalise());
//! ```

use std::convert::TryFrom;
use std::fmt;

/// KODA binary encoder and decoder.
pub mod encoding;
/// Errors shared by both codecs.
pub mod errors;
/// Defence-in-depth bounds.
pub mod limits;
/// Prelude.
pub mod prelude;
/// Text lexer, parser, and stringifier.
pub mod text;
/// Helper macros.
pub mod util;
/// A map wrapper around a vector of pairs.
pub mod vecmap;

pub use bytes::Bytes;
pub use errors::Error;
pub use limits::Limits;
use vecmap::VecMap;

/// KODA values.
///
/// Exactly one variant is ever active. Strings and object keys are raw byte
/// sequences: the codecs never validate UTF-8 and preserve bytes exactly
/// across round trips. Objects remember insertion order in memory; the
/// binary encoder reorders keys only in its output.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Null type. Equivalent to `None`.
    Null,
    /// Boolean type.
    Bool(bool),
    /// Signed 64-bit integer type. Never silently converted to or from
    /// [`Float`](Value::Float).
    Int(i64),
    /// IEEE-754 binary64 type.
    Float(f64),
    /// Bytestring type.
    Str(Bytes),
    /// Array type.
    Array(Vec<Value>),
    /// Object type: key-value pairs in insertion order.
    Object(VecMap<Bytes, Value>),
}

use Value::*;

impl Value {
    /// Converts a bytestring literal to a `Value`.
    ///
    /// # Example
    ///
    /// ```
    /// use koda::Value;
    ///
    /// let greeting = Value::from_static(b"hello");
    /// assert_eq!(greeting.to_bytes().unwrap(), "hello".as_bytes());
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Value {
        Str(Bytes::from_static(bytes))
    }

    /// Indicates whether a value is `Null`.
    ///
    /// # Example
    ///
    /// ```
    /// use koda::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Bool(false).is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        matches!(self, Null)
    }

    /// Tries to convert the value to a `bool`.
    /// This will return `None` if the value is not a KODA bool.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Tries to convert the value to an `i64`.
    /// This will return `None` if the value is not a KODA integer.
    ///
    /// # Example
    ///
    /// ```
    /// use koda::Value;
    ///
    /// assert_eq!(Value::from(36i64).to_i64(), Some(36));
    /// assert_eq!(Value::from(1.5).to_i64(), None);
    /// ```
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Tries to convert the value to an `f64`.
    /// This will return `None` if the value is not a KODA float.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Tries to convert the value to `Bytes`.
    /// This will return `None` if the value is not a KODA string.
    pub fn to_bytes(&self) -> Option<&Bytes> {
        match self {
            Str(s) => Some(s),
            _ => None,
        }
    }

    /// Converts the value to a vector of `Value`.
    /// This will return `None` if the value is not a KODA array.
    pub fn to_vec(&self) -> Option<&Vec<Value>> {
        match self {
            Array(a) => Some(a),
            _ => None,
        }
    }

    /// Converts the value to a `VecMap`.
    /// This will return `None` if the value is not a KODA object.
    pub fn to_vecmap(&self) -> Option<&VecMap<Bytes, Value>> {
        match self {
            Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Consumes the value, converting it into a vector of `Value`.
    /// This will return `None` if the value is not a KODA array.
    pub fn into_vec(self) -> Option<Vec<Value>> {
        self.try_into().ok()
    }

    /// Consumes the value, converting it into a `VecMap`.
    /// This will return `None` if the value is not a KODA object.
    pub fn into_vecmap(self) -> Option<VecMap<Bytes, Value>> {
        self.try_into().ok()
    }

    /// Looks up an object entry by key bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use koda::text::parse;
    ///
    /// let doc = parse(b"name: 'ada' age: 36").unwrap();
    /// assert_eq!(doc.get("age").unwrap().to_i64(), Some(36));
    /// assert!(doc.get("missing").is_none());
    /// ```
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        match self {
            Object(entries) => entries
                .iter()
                .find(|(k, _)| k.as_ref() == key.as_ref())
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Reorders the entries of every object, at any depth, ascending by key
    /// bytes. Two values that differ only in object insertion order compare
    /// equal after normalisation, and [`encoding::decode`] returns values in
    /// this form.
    ///
    /// # Example
    ///
    /// ```
    /// use koda::text::parse;
    ///
    /// let a = parse(b"x: 1 y: 2").unwrap();
    /// let b = parse(b"y: 2 x: 1").unwrap();
    /// assert_ne!(a, b);
    /// assert_eq!(a.normalise(), b.normalise());
    /// ```
    pub fn normalise(mut self) -> Value {
        self.normalise_in_place();
        self
    }

    fn normalise_in_place(&mut self) {
        match self {
            Array(elements) => {
                for element in elements {
                    element.normalise_in_place();
                }
            }
            Object(entries) => {
                for (_, child) in entries.iter_mut() {
                    child.normalise_in_place();
                }
                entries.sort_keys();
            }
            _ => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&text::stringify(self)))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value {
        Array(v.into_iter().map(T::into).collect())
    }
}

impl<T: Into<Value>> From<VecMap<Bytes, T>> for Value {
    fn from(v: VecMap<Bytes, T>) -> Value {
        Object(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

macro_rules! try_from_ctor {
    ($from:ty, $to:ty, $ctor:tt) => {
        impl TryFrom<$from> for $to {
            type Error = $from;

            fn try_from(from: $from) -> Result<$to, $from> {
                match from {
                    $ctor(a) => Ok(a),
                    f => Err(f),
                }
            }
        }
    };
}

from_fn!(Value, bool, Bool);
try_from_ctor!(Value, bool, Bool);
from_fn!(Value, i64, Int);
try_from_ctor!(Value, i64, Int);
from_fn!(Value, f64, Float);
try_from_ctor!(Value, f64, Float);
from_fn!(Value, Bytes, Str);
try_from_ctor!(Value, Bytes, Str);

try_from_ctor!(Value, Vec<Value>, Array);
try_from_ctor!(Value, VecMap<Bytes, Value>, Object);

compose_from!(Value, i64, i8);
compose_from!(Value, i64, i16);
compose_from!(Value, i64, i32);
compose_from!(Value, i64, u8);
compose_from!(Value, i64, u16);
compose_from!(Value, i64, u32);
compose_from!(Value, f64, f32);
compose_from!(Value, Bytes, String);
compose_from!(Value, Bytes, &'static str);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert!(Null.is_null());

        assert_eq!(Value::from(5).to_i64(), Some(5));

        assert!(Value::from(true).to_bool().unwrap());

        assert_eq!(
            Value::from("word").to_bytes().unwrap(),
            &Bytes::from("word")
        );
    }

    #[test]
    fn from_vec() {
        let v: Vec<i64> = vec![0, 1, 2, 3, 4];
        let value = Value::from(v);
        let elements = value.to_vec().unwrap();
        assert_eq!(elements.len(), 5);
        assert_eq!(elements[3], Int(3));
    }

    #[test]
    fn normalise_sorts_nested_objects() {
        let inner = VecMap::from(vec![
            (Bytes::from("b"), Value::from(2)),
            (Bytes::from("a"), Value::from(1)),
        ]);
        let outer = VecMap::from(vec![
            (Bytes::from("z"), Value::from(inner)),
            (Bytes::from("a"), Null),
        ]);
        let normalised = Value::from(outer).normalise();

        let entries = normalised.to_vecmap().unwrap();
        let keys: Vec<&[u8]> = entries.iter().map(|(k, _)| k.as_ref()).collect();
        assert_eq!(keys, [b"a".as_ref(), b"z".as_ref()]);

        let inner_keys: Vec<&[u8]> = normalised
            .get("z")
            .unwrap()
            .to_vecmap()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_ref())
            .collect();
        assert_eq!(inner_keys, [b"a".as_ref(), b"b".as_ref()]);
    }

    #[test]
    fn display_is_compact_text() {
        let value = Value::from(vec![Value::Null, Value::from(true)]);
        assert_eq!(value.to_string(), "[null true]");
    }
}
