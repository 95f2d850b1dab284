//! Localizable message descriptors
//!
//! The engine never renders text. It only constructs message descriptors
//! (a key plus parameters) and hands them to the consumer's translator.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// A message declared on a type definition: a translation key plus optional
/// fixed parameters merged into every violation that uses the message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSpec {
    pub key: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Json>,
}

impl MessageSpec {
    /// Message with a bare translation key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            params: Map::new(),
        }
    }

    /// Message with fixed parameters
    pub fn with_params(key: impl Into<String>, params: Map<String, Json>) -> Self {
        Self {
            key: key.into(),
            params,
        }
    }
}

impl From<&str> for MessageSpec {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// A resolved message attached to a violation: the declared key plus the
/// violation payload merged with the message's fixed parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedMessage {
    pub key: String,
    pub params: Map<String, Json>,
}

impl LocalizedMessage {
    pub fn new(key: impl Into<String>, params: Map<String, Json>) -> Self {
        Self {
            key: key.into(),
            params,
        }
    }
}
