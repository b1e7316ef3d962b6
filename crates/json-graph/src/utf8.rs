//! Reversible fallback for string content that is not valid UTF-8.
//!
//! [`transcode`] forces every offending key and string into text, byte for
//! code point, and records what it touched in an `@utf8encoded` map next to
//! them. A string with no parent map is wrapped as
//! `{"@scalar": ..., "@utf8encoded": 2}`. [`restore`] undoes both.

use bstr::{BStr, BString};
use json_graph_util::{force_utf8, is_utf8, restore_bytes};

use crate::constants::{KEY_UTF8_ENCODED, SCALAR_KEY, UTF8_ENCODED_KEY, VALUE_UTF8_ENCODED};
use crate::error::DeserializationError;
use crate::wire::{WireMap, WireValue};

fn forced(bytes: &BString) -> BString {
    BString::from(force_utf8(bytes))
}

fn invalid(message: impl Into<String>) -> DeserializationError {
    DeserializationError::InvalidDocument(message.into())
}

/// Rewrite every non-UTF-8 key and string of the tree.
pub fn transcode(tree: WireValue) -> WireValue {
    match tree {
        WireValue::Str(s) if !is_utf8(&s) => scalar(&s),
        other => transcode_node(other),
    }
}

fn scalar(bytes: &BString) -> WireValue {
    let mut map = WireMap::new();
    map.insert(SCALAR_KEY.into(), WireValue::Str(forced(bytes)));
    map.insert(UTF8_ENCODED_KEY.into(), WireValue::Int(VALUE_UTF8_ENCODED));
    WireValue::Object(map)
}

fn transcode_node(node: WireValue) -> WireValue {
    match node {
        WireValue::Array(items) => WireValue::Array(items.into_iter().map(transcode).collect()),
        WireValue::Object(map) => WireValue::Object(transcode_map(map)),
        other => other,
    }
}

fn transcode_map(map: WireMap) -> WireMap {
    let mut flags = WireMap::new();
    let mut out = WireMap::with_capacity(map.len());
    for (key, value) in map {
        let mut bits = 0;
        let key = if is_utf8(&key) {
            key
        } else {
            bits |= KEY_UTF8_ENCODED;
            forced(&key)
        };
        let value = match value {
            WireValue::Str(s) if !is_utf8(&s) => {
                bits |= VALUE_UTF8_ENCODED;
                WireValue::Str(forced(&s))
            }
            other => transcode_node(other),
        };
        if bits != 0 {
            flags.insert(key.clone(), WireValue::Int(bits));
        }
        out.insert(key, value);
    }
    if !flags.is_empty() {
        out.insert(UTF8_ENCODED_KEY.into(), WireValue::Object(flags));
    }
    out
}

/// Undo [`transcode`].
///
/// # Errors
///
/// Fails with [`DeserializationError::InvalidDocument`] on a malformed
/// marker or on transcoded text holding a character above U+00FF.
pub fn restore(tree: WireValue) -> Result<WireValue, DeserializationError> {
    match tree {
        WireValue::Array(items) => Ok(WireValue::Array(
            items.into_iter().map(restore).collect::<Result<_, _>>()?,
        )),
        WireValue::Object(map) => restore_map(map),
        other => Ok(other),
    }
}

fn restore_text(text: &BString) -> Result<BString, DeserializationError> {
    let text = std::str::from_utf8(text).map_err(|e| invalid(e.to_string()))?;
    Ok(BString::from(restore_bytes(text)?))
}

fn restore_map(mut map: WireMap) -> Result<WireValue, DeserializationError> {
    if let Some(scalar) = map.get(BStr::new(SCALAR_KEY)) {
        return match scalar {
            WireValue::Str(s) => Ok(WireValue::Str(restore_text(s)?)),
            _ => Err(invalid("`@scalar` must hold a string")),
        };
    }
    let flags = match map.shift_remove(BStr::new(UTF8_ENCODED_KEY)) {
        None => WireMap::new(),
        Some(WireValue::Object(flags)) => flags,
        Some(_) => return Err(invalid("`@utf8encoded` must hold an object")),
    };
    let mut out = WireMap::with_capacity(map.len());
    for (key, value) in map {
        let value = restore(value)?;
        let bits = match flags.get(&key) {
            None => 0,
            Some(WireValue::Int(bits)) => *bits,
            Some(_) => return Err(invalid("`@utf8encoded` flags must be integers")),
        };
        let key = if bits & KEY_UTF8_ENCODED != 0 {
            restore_text(&key)?
        } else {
            key
        };
        let value = if bits & VALUE_UTF8_ENCODED != 0 {
            match value {
                WireValue::Str(s) => WireValue::Str(restore_text(&s)?),
                _ => return Err(invalid("transcoded value is not a string")),
            }
        } else {
            value
        };
        out.insert(key, value);
    }
    Ok(WireValue::Object(out))
}
