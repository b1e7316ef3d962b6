//! `LinkedList`, `Queue` and `Stack`: ordered containers with iterator
//! mode flags. Items are full values and take part in identity tracking.

use bstr::BStr;

use super::{field, int_field, wire_int, DecodeFn, EncodeFn, LINKED_LIST, QUEUE, STACK};
use crate::error::{AdapterError, DeserializationError, SerializationError};
use crate::graph::Object;
use crate::value::Value;
use crate::wire::{WireMap, WireValue};

/// Iteration runs last to first.
pub const IT_MODE_LIFO: i64 = 2;
/// Iteration removes the visited item.
pub const IT_MODE_DELETE: i64 = 1;

fn container(type_name: &str, flags: i64, items: Vec<Value>) -> Object {
    Object::new(type_name)
        .with_field("flags", flags)
        .with_field("items", items)
}

pub fn linked_list(items: Vec<Value>) -> Object {
    container(LINKED_LIST, 0, items)
}

pub fn queue(items: Vec<Value>) -> Object {
    container(QUEUE, 0, items)
}

pub fn stack(items: Vec<Value>) -> Object {
    container(STACK, IT_MODE_LIFO, items)
}

pub(super) fn encode(
    object: &Object,
    encode: &mut EncodeFn<'_>,
) -> Result<WireMap, SerializationError> {
    let adapter = || SerializationError::adapter(&object.type_name);
    let flags = int_field(object, "flags").map_err(adapter())?;
    let items = field(object, "items")
        .and_then(|v| {
            v.as_list()
                .ok_or_else(|| AdapterError::invalid_field("items", "expected a list"))
        })
        .map_err(adapter())?;
    let mut fields = WireMap::new();
    fields.insert("flags".into(), WireValue::Int(flags));
    fields.insert(
        "value".into(),
        WireValue::Array(items.iter().map(|item| encode(item)).collect::<Result<_, _>>()?),
    );
    Ok(fields)
}

pub(super) fn decode(
    type_name: &str,
    mut fields: WireMap,
    decode: &mut DecodeFn<'_>,
) -> Result<Object, DeserializationError> {
    let adapter = || DeserializationError::adapter(type_name);
    let flags = wire_int(&fields, "flags").map_err(adapter())?;
    let items = match fields.shift_remove(BStr::new("value")) {
        Some(WireValue::Array(items)) => items,
        Some(_) => {
            return Err(adapter()(AdapterError::invalid_field(
                "value",
                "expected an array",
            )))
        }
        None => return Err(adapter()(AdapterError::MissingField("value".into()))),
    };
    let items = items
        .into_iter()
        .map(|item| decode(item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(container(type_name, flags, items))
}
