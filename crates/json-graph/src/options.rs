//! Codec configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DENIED_FIELDS, DEFAULT_MAX_DEPTH};

/// What the decoder does with a document field that the type's shape does
/// not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndeclaredFieldPolicy {
    /// Store it as a dynamic field.
    #[default]
    Set,
    /// Drop it.
    Ignore,
    /// Fail with [`UndeclaredField`](crate::DeserializationError::UndeclaredField).
    Reject,
}

/// Configuration of a [`GraphCodec`](crate::GraphCodec).
///
/// Every field has a default, so a partial TOML or JSON table is enough:
///
/// ```
/// use json_graph::{CodecOptions, UndeclaredFieldPolicy};
///
/// let options: CodecOptions = serde_json::from_str(r#"{"undeclared_fields": "reject"}"#).unwrap();
/// assert_eq!(options.undeclared_fields, UndeclaredFieldPolicy::Reject);
/// assert_eq!(options.denied_fields, ["connection", "resolver"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Fields the generic object walk never encodes.
    pub denied_fields: Vec<String>,
    pub undeclared_fields: UndeclaredFieldPolicy,
    /// Nesting limit for both directions.
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            denied_fields: DEFAULT_DENIED_FIELDS.iter().map(|s| s.to_string()).collect(),
            undeclared_fields: UndeclaredFieldPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecOptions {
    pub fn is_denied(&self, field: &str) -> bool {
        self.denied_fields.iter().any(|f| f == field)
    }
}
