//! Adapters for well-known types with a fixed wire shape.
//!
//! | type | wire fields |
//! |---|---|
//! | `DateTime`, `DateTimeImmutable` | `date`, `timezone_type`, `timezone` |
//! | `UTCDateTime` | `milliseconds` |
//! | `ObjectId` | `oid` |
//! | `LinkedList`, `Queue`, `Stack` | `flags`, `value` |
//! | registered enumerations | `name`, optional `value` |

pub mod datetime;
pub mod enums;
pub mod object_id;
pub mod queue;

use std::collections::HashMap;
use std::rc::Rc;

use bstr::BStr;

pub use datetime::{date_time, to_offset_date_time, to_utc_offset_date_time, utc_date_time};
pub use enums::{Backing, EnumDef};
pub use object_id::object_id;
pub use queue::{linked_list, queue, stack};

use crate::error::{AdapterError, DeserializationError, SerializationError};
use crate::graph::Object;
use crate::value::Value;
use crate::wire::{WireMap, WireValue};

pub const DATE_TIME: &str = "DateTime";
pub const DATE_TIME_IMMUTABLE: &str = "DateTimeImmutable";
pub const UTC_DATE_TIME: &str = "UTCDateTime";
pub const OBJECT_ID: &str = "ObjectId";
pub const LINKED_LIST: &str = "LinkedList";
pub const QUEUE: &str = "Queue";
pub const STACK: &str = "Stack";

pub(crate) type EncodeFn<'e> = dyn FnMut(&Value) -> Result<WireValue, SerializationError> + 'e;
pub(crate) type DecodeFn<'d> = dyn FnMut(WireValue) -> Result<Value, DeserializationError> + 'd;

#[derive(Debug, Clone)]
pub enum WellKnown {
    DateTime,
    UtcDateTime,
    ObjectId,
    Queue,
    Enum(Rc<EnumDef>),
}

impl WellKnown {
    pub(crate) fn encode_fields(
        &self,
        object: &Object,
        encode: &mut EncodeFn<'_>,
    ) -> Result<WireMap, SerializationError> {
        let adapter = SerializationError::adapter(&object.type_name);
        match self {
            WellKnown::DateTime => datetime::encode(object).map_err(adapter),
            WellKnown::UtcDateTime => datetime::encode_utc(object).map_err(adapter),
            WellKnown::ObjectId => object_id::encode(object).map_err(adapter),
            WellKnown::Enum(def) => def.encode(object).map_err(adapter),
            WellKnown::Queue => queue::encode(object, encode),
        }
    }

    pub(crate) fn decode_fields(
        &self,
        type_name: &str,
        fields: WireMap,
        decode: &mut DecodeFn<'_>,
    ) -> Result<Object, DeserializationError> {
        let adapter = DeserializationError::adapter(type_name);
        match self {
            WellKnown::DateTime => datetime::decode(type_name, &fields).map_err(adapter),
            WellKnown::UtcDateTime => datetime::decode_utc(type_name, &fields).map_err(adapter),
            WellKnown::ObjectId => object_id::decode(type_name, &fields).map_err(adapter),
            WellKnown::Enum(def) => def.decode(&fields).map_err(adapter),
            WellKnown::Queue => queue::decode(type_name, fields, decode),
        }
    }
}

/// Well-known adapters keyed by type name.
#[derive(Debug, Clone)]
pub struct WellKnownTypes {
    by_type: HashMap<String, WellKnown>,
}

impl Default for WellKnownTypes {
    fn default() -> Self {
        let builtins = [
            (DATE_TIME, WellKnown::DateTime),
            (DATE_TIME_IMMUTABLE, WellKnown::DateTime),
            (UTC_DATE_TIME, WellKnown::UtcDateTime),
            (OBJECT_ID, WellKnown::ObjectId),
            (LINKED_LIST, WellKnown::Queue),
            (QUEUE, WellKnown::Queue),
            (STACK, WellKnown::Queue),
        ];
        Self {
            by_type: builtins
                .into_iter()
                .map(|(name, kind)| (name.to_string(), kind))
                .collect(),
        }
    }
}

impl WellKnownTypes {
    pub fn register_enum(&mut self, def: EnumDef) {
        self.by_type
            .insert(def.name().to_string(), WellKnown::Enum(Rc::new(def)));
    }

    pub fn get(&self, type_name: &str) -> Option<&WellKnown> {
        self.by_type.get(type_name)
    }
}

fn field<'a>(object: &'a Object, name: &str) -> Result<&'a Value, AdapterError> {
    object
        .get(name)
        .ok_or_else(|| AdapterError::MissingField(name.to_string()))
}

fn str_field<'a>(object: &'a Object, name: &str) -> Result<&'a str, AdapterError> {
    field(object, name)?
        .as_str()
        .ok_or_else(|| AdapterError::invalid_field(name, "expected a UTF-8 string"))
}

fn int_field(object: &Object, name: &str) -> Result<i64, AdapterError> {
    field(object, name)?
        .as_i64()
        .ok_or_else(|| AdapterError::invalid_field(name, "expected an integer"))
}

fn wire_field<'a>(fields: &'a WireMap, name: &str) -> Result<&'a WireValue, AdapterError> {
    fields
        .get(BStr::new(name))
        .ok_or_else(|| AdapterError::MissingField(name.to_string()))
}

fn wire_str<'a>(fields: &'a WireMap, name: &str) -> Result<&'a str, AdapterError> {
    match wire_field(fields, name)? {
        WireValue::Str(s) => std::str::from_utf8(s)
            .map_err(|_| AdapterError::invalid_field(name, "expected a UTF-8 string")),
        _ => Err(AdapterError::invalid_field(name, "expected a string")),
    }
}

fn wire_int(fields: &WireMap, name: &str) -> Result<i64, AdapterError> {
    match wire_field(fields, name)? {
        WireValue::Int(n) => Ok(*n),
        _ => Err(AdapterError::invalid_field(name, "expected an integer")),
    }
}
