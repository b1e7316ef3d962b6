//! `ObjectId`: a 12-byte identifier written as 24 hex digits.

use super::{str_field, wire_str, OBJECT_ID};
use crate::error::AdapterError;
use crate::graph::Object;
use crate::wire::{WireMap, WireValue};

fn normalize(oid: &str) -> Result<String, AdapterError> {
    if oid.len() != 24 || !oid.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AdapterError::invalid_field(
            "oid",
            format!("`{oid}` is not 24 hex digits"),
        ));
    }
    Ok(oid.to_ascii_lowercase())
}

/// Build an `ObjectId` object.
///
/// ```
/// let id = json_graph::well_known::object_id("5F2B6C1E9D3A4B0012345678").unwrap();
/// assert_eq!(id.get("oid").and_then(|v| v.as_str()), Some("5f2b6c1e9d3a4b0012345678"));
/// ```
pub fn object_id(hex: &str) -> Result<Object, AdapterError> {
    Ok(Object::new(OBJECT_ID).with_field("oid", normalize(hex)?))
}

pub(super) fn encode(object: &Object) -> Result<WireMap, AdapterError> {
    let mut fields = WireMap::new();
    fields.insert(
        "oid".into(),
        WireValue::str(normalize(str_field(object, "oid")?)?),
    );
    Ok(fields)
}

pub(super) fn decode(type_name: &str, fields: &WireMap) -> Result<Object, AdapterError> {
    Ok(Object::new(type_name).with_field("oid", normalize(wire_str(fields, "oid")?)?))
}
