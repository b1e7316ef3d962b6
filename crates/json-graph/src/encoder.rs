//! Value graph to wire tree.

use bstr::BString;
use indexmap::IndexSet;
use tracing::trace;

use crate::codec::GraphCodec;
use crate::constants::{
    is_reserved_key, BACK_REFERENCE_PREFIX, CLOSURE_KEY, CLOSURE_SERIALIZER_KEY,
    CLOSURE_VALUE_KEY, TYPE_KEY,
};
use crate::error::SerializationError;
use crate::graph::{Graph, ObjRef, Object};
use crate::identity::{IdentityTracker, Visit};
use crate::shape::check_type_name;
use crate::value::{Callable, Value};
use crate::wire::{WireMap, WireValue};

/// One encode call. Holds the identity tracker for the call.
pub(crate) struct Encoder<'a> {
    codec: &'a GraphCodec,
    graph: &'a Graph,
    identity: IdentityTracker,
    depth: usize,
}

fn unsupported(message: impl Into<String>) -> SerializationError {
    SerializationError::UnsupportedValue(message.into())
}

fn reserved_key(key: &[u8]) -> SerializationError {
    unsupported(format!(
        "key {} is reserved",
        json_graph_util::as_string(key)
    ))
}

fn back_reference(index: usize) -> WireValue {
    let mut map = WireMap::new();
    map.insert(
        TYPE_KEY.into(),
        WireValue::str(format!("{BACK_REFERENCE_PREFIX}{index}")),
    );
    WireValue::Object(map)
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(codec: &'a GraphCodec, graph: &'a Graph) -> Self {
        Self {
            codec,
            graph,
            identity: IdentityTracker::new(),
            depth: 0,
        }
    }

    pub(crate) fn encode(&mut self, value: &Value) -> Result<WireValue, SerializationError> {
        if self.depth >= self.codec.options.max_depth {
            return Err(unsupported(format!(
                "nesting deeper than {} levels",
                self.codec.options.max_depth
            )));
        }
        self.depth += 1;
        let result = self.encode_value(value);
        self.depth -= 1;
        result
    }

    fn encode_value(&mut self, value: &Value) -> Result<WireValue, SerializationError> {
        Ok(match value {
            Value::Null => WireValue::Null,
            Value::Bool(b) => WireValue::Bool(*b),
            Value::Int(n) => WireValue::Int(*n),
            Value::Float(f) => WireValue::Float(*f),
            Value::Str(s) => WireValue::Str(s.clone()),
            Value::List(items) => WireValue::Array(
                items
                    .iter()
                    .map(|item| self.encode(item))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Map(entries) => {
                let mut map = WireMap::with_capacity(entries.len());
                for (key, item) in entries {
                    if is_reserved_key(key) {
                        return Err(reserved_key(key));
                    }
                    map.insert(key.clone(), self.encode(item)?);
                }
                WireValue::Object(map)
            }
            Value::Object(r) => self.encode_object(*r)?,
            Value::Callable(callable) => self.encode_callable(callable)?,
            Value::Resource(resource) => {
                return Err(unsupported(format!(
                    "resource of kind `{}` cannot be encoded",
                    resource.kind()
                )))
            }
        })
    }

    fn encode_callable(&self, callable: &Callable) -> Result<WireValue, SerializationError> {
        let serializer = self
            .codec
            .callables
            .preferred()
            .ok_or(SerializationError::MissingSerializer)?;
        let kind = serializer.kind();
        let payload = serializer
            .serialize(callable)
            .map_err(SerializationError::adapter(kind))?;
        let mut map = WireMap::new();
        map.insert(CLOSURE_KEY.into(), WireValue::Bool(true));
        map.insert(CLOSURE_SERIALIZER_KEY.into(), WireValue::str(kind));
        map.insert(CLOSURE_VALUE_KEY.into(), WireValue::str(payload));
        Ok(WireValue::Object(map))
    }

    fn encode_object(&mut self, r: ObjRef) -> Result<WireValue, SerializationError> {
        let codec = self.codec;
        let graph = self.graph;
        let object = graph
            .get(r)
            .ok_or_else(|| unsupported(format!("object handle {} is not in the graph", r.index())))?;
        let index = match self.identity.assign(r) {
            Visit::Seen(index) => return Ok(back_reference(index)),
            Visit::First(index) => index,
        };
        let type_name = object.type_name.as_str();
        trace!(type_name, index, "encoding object");
        check_type_name(type_name).map_err(|e| unsupported(e.to_string()))?;

        let mut map = WireMap::new();
        map.insert(TYPE_KEY.into(), WireValue::str(type_name));

        if let Some(custom) = codec.custom.get(type_name) {
            let fields = custom
                .serialize(object)
                .map_err(SerializationError::adapter(type_name))?;
            for (key, value) in fields {
                if is_reserved_key(key.as_bytes()) {
                    return Err(reserved_key(key.as_bytes()));
                }
                self.check_payload(&value, self.depth)?;
                map.insert(key.into(), WireValue::from_json(value));
            }
            return Ok(WireValue::Object(map));
        }

        if let Some(kind) = codec.well_known.get(type_name) {
            let fields = kind.encode_fields(object, &mut |value| self.encode(value))?;
            map.extend(fields);
            return Ok(WireValue::Object(map));
        }

        for name in self.field_names(object) {
            if codec.options.is_denied(&name) {
                continue;
            }
            if is_reserved_key(name.as_bytes()) {
                return Err(reserved_key(name.as_bytes()));
            }
            let value = codec
                .accessor
                .read(object, &name)
                .map_err(SerializationError::adapter(type_name))?;
            let encoded = self.encode(&value)?;
            map.insert(BString::from(name), encoded);
        }
        Ok(WireValue::Object(map))
    }

    /// Custom payloads go out as plain JSON, so the reserved-key and depth
    /// rules of the walk are applied to them here. `level` counts like
    /// `depth` in [`Encoder::encode`].
    fn check_payload(
        &self,
        value: &serde_json::Value,
        level: usize,
    ) -> Result<(), SerializationError> {
        let max_depth = self.codec.options.max_depth;
        if level >= max_depth {
            return Err(unsupported(format!("nesting deeper than {max_depth} levels")));
        }
        match value {
            serde_json::Value::Array(items) => items
                .iter()
                .try_for_each(|item| self.check_payload(item, level + 1)),
            serde_json::Value::Object(entries) => entries.iter().try_for_each(|(key, item)| {
                if is_reserved_key(key.as_bytes()) {
                    return Err(reserved_key(key.as_bytes()));
                }
                self.check_payload(item, level + 1)
            }),
            _ => Ok(()),
        }
    }

    /// Declared fields, then dynamic ones, unless the type's hook names the
    /// fields itself.
    fn field_names(&self, object: &Object) -> IndexSet<String> {
        let shape = self.codec.types.get(&object.type_name);
        if let Some(names) = shape
            .and_then(|s| s.lifecycle())
            .and_then(|hooks| hooks.before_encode(object))
        {
            return names.into_iter().collect();
        }
        shape
            .into_iter()
            .flat_map(|s| s.declared_fields())
            .chain(object.fields.keys().map(String::as_str))
            .map(str::to_string)
            .collect()
    }
}
