//! Typed values handled by the engine
//!
//! [`Value`] is the tagged union over which every kind operates. Built-in
//! kinds work on one variant each; custom kinds may accept any variant.

use chrono::NaiveDateTime;
use serde_json::json;

/// Kind tag of the built-in text type
pub const TEXT_KIND: &str = "text";
/// Kind tag of the built-in number type
pub const NUMBER_KIND: &str = "number";
/// Kind tag of the built-in date type
pub const DATE_KIND: &str = "date";

/// A typed value: the engine's unit of parsing, formatting and validation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Name of the variant, used in wrong-type error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "string",
            Value::DateTime(_) => "date",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(d) => Some(*d),
            _ => None,
        }
    }

    /// Project the value into JSON for violation payloads and message params.
    ///
    /// Dates are rendered in RFC 3339 form without an offset.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Number(n) => json!(n),
            Value::Text(s) => json!(s),
            Value::DateTime(d) => json!(d.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}
