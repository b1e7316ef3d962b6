//! Wire tree to value graph.

use bstr::{BStr, BString, ByteSlice};
use tracing::trace;

use crate::codec::GraphCodec;
use crate::constants::{
    BACK_REFERENCE_PREFIX, CLOSURE_KEY, CLOSURE_SERIALIZER_KEY, CLOSURE_VALUE_KEY, TYPE_KEY,
};
use crate::error::DeserializationError;
use crate::graph::{Graph, ObjRef, Object};
use crate::identity::IdentityTracker;
use crate::options::UndeclaredFieldPolicy;
use crate::value::Value;
use crate::wire::{map_to_json, WireMap, WireValue};

/// One decode call. Owns the graph under construction until the root value
/// is complete.
pub(crate) struct Decoder<'a> {
    codec: &'a GraphCodec,
    graph: Graph,
    identity: IdentityTracker,
    depth: usize,
}

fn invalid(message: impl Into<String>) -> DeserializationError {
    DeserializationError::InvalidDocument(message.into())
}

fn utf8_text(bytes: &BString, what: &str) -> Result<String, DeserializationError> {
    bytes
        .to_str()
        .map(str::to_string)
        .map_err(|_| invalid(format!("{what} is not valid UTF-8")))
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(codec: &'a GraphCodec) -> Self {
        Self {
            codec,
            graph: Graph::new(),
            identity: IdentityTracker::new(),
            depth: 0,
        }
    }

    pub(crate) fn into_graph(self) -> Graph {
        self.graph
    }

    pub(crate) fn decode(&mut self, value: WireValue) -> Result<Value, DeserializationError> {
        if self.depth >= self.codec.options.max_depth {
            return Err(invalid(format!(
                "nesting deeper than {} levels",
                self.codec.options.max_depth
            )));
        }
        self.depth += 1;
        let result = self.decode_value(value);
        self.depth -= 1;
        result
    }

    fn decode_value(&mut self, value: WireValue) -> Result<Value, DeserializationError> {
        Ok(match value {
            WireValue::Null => Value::Null,
            WireValue::Bool(b) => Value::Bool(b),
            WireValue::Int(n) => Value::Int(n),
            WireValue::Float(f) => Value::Float(f),
            WireValue::Str(s) => Value::Str(s),
            WireValue::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| self.decode(item))
                    .collect::<Result<_, _>>()?,
            ),
            WireValue::Object(mut map) => {
                if let Some(type_name) = map.shift_remove(BStr::new(TYPE_KEY)) {
                    return self.decode_object(type_name, map);
                }
                if map.get(BStr::new(CLOSURE_KEY)) == Some(&WireValue::Bool(true)) {
                    return self.decode_callable(&map);
                }
                Value::Map(
                    map.into_iter()
                        .map(|(key, item)| Ok((key, self.decode(item)?)))
                        .collect::<Result<_, DeserializationError>>()?,
                )
            }
        })
    }

    fn decode_callable(&self, map: &WireMap) -> Result<Value, DeserializationError> {
        let text = |key: &str| match map.get(BStr::new(key)) {
            Some(WireValue::Str(s)) => utf8_text(s, key),
            _ => Err(invalid(format!("callable entry has no string `{key}`"))),
        };
        let kind = text(CLOSURE_SERIALIZER_KEY)?;
        let serializer = self
            .codec
            .callables
            .get(&kind)
            .ok_or_else(|| DeserializationError::MissingSerializer(kind.clone()))?;
        let payload = text(CLOSURE_VALUE_KEY)?;
        serializer
            .deserialize(&payload)
            .map(Value::Callable)
            .map_err(DeserializationError::adapter(&kind))
    }

    fn decode_object(
        &mut self,
        type_name: WireValue,
        fields: WireMap,
    ) -> Result<Value, DeserializationError> {
        let type_name = match &type_name {
            WireValue::Str(s) => utf8_text(s, TYPE_KEY)?,
            _ => return Err(invalid("`@type` must hold a string")),
        };
        if let Some(index) = type_name.strip_prefix(BACK_REFERENCE_PREFIX) {
            let index = index
                .parse::<usize>()
                .map_err(|_| invalid(format!("malformed back-reference `{type_name}`")))?;
            return self.identity.lookup(index).map(Value::Object);
        }
        trace!(type_name = type_name.as_str(), index = self.identity.len(), "decoding object");

        let codec = self.codec;
        if let Some(custom) = codec.custom.get(&type_name) {
            let json = map_to_json(&fields).map_err(|e| invalid(e.to_string()))?;
            let object = custom
                .deserialize(&type_name, &json)
                .map_err(DeserializationError::adapter(&type_name))?;
            return Ok(Value::Object(self.allocate(object)));
        }

        if let Some(kind) = codec.well_known.get(&type_name) {
            let r = self.allocate(Object::new(type_name.as_str()));
            let object = kind.decode_fields(&type_name, fields, &mut |item| self.decode(item))?;
            self.graph[r] = object;
            return Ok(Value::Object(r));
        }

        let shape = codec
            .types
            .get(&type_name)
            .ok_or_else(|| DeserializationError::UnknownType(type_name.clone()))?;
        let r = self.allocate(shape.instantiate());
        for (key, item) in fields {
            let field = utf8_text(&key, "field name")?;
            if !shape.is_dynamic() && !shape.declares(&field) {
                match codec.options.undeclared_fields {
                    UndeclaredFieldPolicy::Set => {}
                    UndeclaredFieldPolicy::Ignore => {
                        // Objects inside still take their indices.
                        self.decode(item)?;
                        continue;
                    }
                    UndeclaredFieldPolicy::Reject => {
                        return Err(DeserializationError::UndeclaredField { type_name, field });
                    }
                }
            }
            let value = self.decode(item)?;
            codec
                .accessor
                .write(&mut self.graph[r], &field, value)
                .map_err(DeserializationError::adapter(&type_name))?;
        }
        if let Some(hooks) = shape.lifecycle() {
            hooks
                .after_decode(&mut self.graph[r])
                .map_err(DeserializationError::adapter(&type_name))?;
        }
        Ok(Value::Object(r))
    }

    /// Store an object and give it the next index.
    fn allocate(&mut self, object: Object) -> ObjRef {
        let r = self.graph.insert(object);
        self.identity.register(r);
        r
    }
}
