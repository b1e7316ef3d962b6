//! The JSON-compatible tree exchanged between the walkers and the text
//! layer.
//!
//! Strings and keys are byte strings so that content which is not valid
//! UTF-8 can travel through the encoder and be handled in one place.

use bstr::BString;
use indexmap::IndexMap;
use serde_json::{Map, Number, Value as JsonValue};
use thiserror::Error;

pub type WireMap = IndexMap<BString, WireValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(BString),
    Array(Vec<WireValue>),
    Object(WireMap),
}

/// Reasons a tree has no JSON text form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("malformed UTF-8 characters, possibly incorrectly encoded")]
    InvalidUtf8,
    #[error("{0}")]
    Structural(String),
}

fn utf8(bytes: &BString) -> Result<String, TextError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| TextError::InvalidUtf8)
}

impl WireValue {
    pub fn str(s: impl Into<BString>) -> Self {
        WireValue::Str(s.into())
    }

    /// Strict conversion to a `serde_json` tree.
    pub fn to_json(&self) -> Result<JsonValue, TextError> {
        Ok(match self {
            WireValue::Null => JsonValue::Null,
            WireValue::Bool(b) => JsonValue::Bool(*b),
            WireValue::Int(n) => JsonValue::Number(Number::from(*n)),
            WireValue::Float(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .ok_or_else(|| TextError::Structural(format!("inf and NaN cannot be JSON encoded: {f}")))?,
            WireValue::Str(s) => JsonValue::String(utf8(s)?),
            WireValue::Array(items) => JsonValue::Array(
                items
                    .iter()
                    .map(WireValue::to_json)
                    .collect::<Result<_, _>>()?,
            ),
            WireValue::Object(map) => JsonValue::Object(map_to_json(map)?),
        })
    }

    /// JSON integers that fit in `i64` become [`WireValue::Int`]; every
    /// other number becomes [`WireValue::Float`].
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => WireValue::Null,
            JsonValue::Bool(b) => WireValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => WireValue::Int(i),
                None => n.as_f64().map_or(WireValue::Null, WireValue::Float),
            },
            JsonValue::String(s) => WireValue::Str(s.into()),
            JsonValue::Array(items) => {
                WireValue::Array(items.into_iter().map(WireValue::from_json).collect())
            }
            JsonValue::Object(map) => WireValue::Object(map_from_json(map)),
        }
    }
}

pub fn map_to_json(map: &WireMap) -> Result<Map<String, JsonValue>, TextError> {
    map.iter()
        .map(|(k, v)| Ok((utf8(k)?, v.to_json()?)))
        .collect()
}

pub fn map_from_json(map: Map<String, JsonValue>) -> WireMap {
    map.into_iter()
        .map(|(k, v)| (BString::from(k), WireValue::from_json(v)))
        .collect()
}
