//! Runtime value type for observable properties.
//!
//! This module defines the `Value` enum which represents any value that can
//! be stored in an observable property, carried in a change event, or used
//! as observer user-context.

use crate::custom::CustomValue;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::fmt;

/// A value stored in an observable property.
///
/// Primitive variants serialize with the tags `"null"`, `"boolean"`,
/// `"number"` and `"string"`. Library-external types participate through
/// the `Custom` variant and carry their own type tag.
#[derive(Clone, Debug)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Library-external value participating via `CustomValue`
    Custom(Rc<dyn CustomValue>),
}

impl Value {
    /// Wraps a custom value.
    pub fn custom<T: CustomValue>(value: T) -> Self {
        Value::Custom(Rc::new(value))
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the i64 value if this is an Int, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the f64 value if this is a Number, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns the custom value downcast to `T`, None otherwise.
    pub fn as_custom<T: CustomValue>(&self) -> Option<&T> {
        match self {
            Value::Custom(v) => v.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Returns the serialization type tag for this value.
    ///
    /// Both `Int` and `Number` report `"number"`; custom values report
    /// their own tag.
    pub fn type_tag(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Custom(v) => v.type_tag(),
        }
    }

    /// Converts this value to its JSON representation.
    ///
    /// Non-finite numbers have no JSON form and become null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::Int(v) => serde_json::Value::Number((*v).into()),
            Value::Number(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(v) => serde_json::Value::String(v.clone()),
            Value::Custom(v) => v.to_json(),
        }
    }

    /// Reconstructs a primitive value from a tag and JSON payload.
    ///
    /// Handles only the primitive tags (`"null"`, `"boolean"`, `"number"`,
    /// `"string"`); returns None for any other tag or a mismatched payload.
    /// An integral JSON number reconstructs as `Int`, otherwise `Number`.
    pub fn from_tagged_json(tag: &str, payload: &serde_json::Value) -> Option<Value> {
        match tag {
            "null" => Some(Value::Null),
            "boolean" => payload.as_bool().map(Value::Bool),
            "number" => {
                if let Some(i) = payload.as_i64() {
                    Some(Value::Int(i))
                } else {
                    payload.as_f64().map(Value::Number)
                }
            }
            "string" => payload.as_str().map(|s| Value::String(s.into())),
            _ => None,
        }
    }

    /// Numeric view used for cross-variant comparison.
    fn numeric(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                // NaN compares equal to itself so rewriting NaN stays a no-op
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            // Cross-variant numeric comparison: 3 == 3.0
            (Value::Int(_), Value::Number(_)) | (Value::Number(_), Value::Int(_)) => {
                self.numeric() == other.numeric()
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => Rc::ptr_eq(a, b) || a.dyn_eq(b.as_ref()),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Number(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Custom(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
