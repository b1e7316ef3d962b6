//! The public entry point.

use std::rc::Rc;

use serde::Deserialize;
use tracing::debug;

use crate::accessor::{FieldMapAccessor, PropertyAccessor};
use crate::callable::{CallableSerializer, CallableSerializerManager};
use crate::constants::UTF8_ENCODED_KEY;
use crate::custom::{CustomSerializers, ObjectSerializer};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{DeserializationError, RegistryError, SerializationError};
use crate::graph::{Decoded, Graph};
use crate::options::{CodecOptions, UndeclaredFieldPolicy};
use crate::shape::{check_type_name, TypeRegistry, TypeShape};
use crate::utf8;
use crate::value::Value;
use crate::well_known::{EnumDef, WellKnownTypes};
use crate::wire::{TextError, WireValue};

/// Converts value graphs to JSON text and back, preserving shared and
/// cyclic references.
///
/// Every call starts from fresh identity state, so a codec can be reused
/// for any number of documents. Adapters are held behind `Rc`; build one
/// codec per thread.
///
/// # Examples
///
/// ```
/// use json_graph::{Graph, GraphCodec, Object, TypeShape, Value};
///
/// let mut codec = GraphCodec::new();
/// codec.register_type(TypeShape::dynamic("stdClass")).unwrap();
///
/// let mut graph = Graph::new();
/// let node = graph.insert(Object::new("stdClass"));
/// graph[node].set("mirror", node);
///
/// let text = codec.encode(&graph, &Value::Object(node)).unwrap();
/// assert_eq!(text, r#"{"@type":"stdClass","mirror":{"@type":"@0"}}"#);
///
/// let decoded = codec.decode(&text).unwrap();
/// let root = decoded.root.as_object().unwrap();
/// assert_eq!(decoded.graph.field(root, "mirror"), Some(&Value::Object(root)));
/// ```
pub struct GraphCodec {
    pub(crate) options: CodecOptions,
    pub(crate) types: TypeRegistry,
    pub(crate) custom: CustomSerializers,
    pub(crate) well_known: WellKnownTypes,
    pub(crate) callables: CallableSerializerManager,
    pub(crate) accessor: Rc<dyn PropertyAccessor>,
}

impl Default for GraphCodec {
    fn default() -> Self {
        Self::with_options(CodecOptions::default())
    }
}

impl GraphCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self {
            options,
            types: TypeRegistry::new(),
            custom: CustomSerializers::default(),
            well_known: WellKnownTypes::default(),
            callables: CallableSerializerManager::new(),
            accessor: Rc::new(FieldMapAccessor),
        }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Encode `value`, whose objects live in `graph`.
    ///
    /// # Errors
    ///
    /// - [`SerializationError::UnsupportedValue`] for resources, reserved
    ///   keys and nesting beyond the configured depth.
    /// - [`SerializationError::MissingSerializer`] for a callable when no
    ///   callable serializer is registered.
    /// - [`SerializationError::EncodingFailure`] when the tree has no JSON
    ///   text form, such as a non-finite float.
    /// - [`SerializationError::Adapter`] for collaborator failures.
    pub fn encode(&self, graph: &Graph, value: &Value) -> Result<String, SerializationError> {
        debug!(kind = value.kind(), objects = graph.len(), "encode");
        let tree = Encoder::new(self, graph).encode(value)?;
        render(tree)
    }

    /// Encode a value that holds no objects.
    pub fn encode_value(&self, value: &Value) -> Result<String, SerializationError> {
        self.encode(&Graph::new(), value)
    }

    /// Decode a document into a fresh graph.
    ///
    /// # Errors
    ///
    /// - [`DeserializationError::InvalidDocument`] for malformed JSON and
    ///   malformed reserved entries.
    /// - [`DeserializationError::UnknownType`] for a type with no shape.
    /// - [`DeserializationError::MissingSerializer`] for a callable of an
    ///   unregistered kind.
    /// - [`DeserializationError::UndeclaredField`] under
    ///   [`UndeclaredFieldPolicy::Reject`].
    /// - [`DeserializationError::DanglingReference`] for a back-reference to
    ///   an object not yet decoded.
    /// - [`DeserializationError::Adapter`] for collaborator failures.
    pub fn decode(&self, text: &str) -> Result<Decoded, DeserializationError> {
        debug!(len = text.len(), "decode");
        let json = parse(text, self.options.max_depth)?;
        let mut tree = WireValue::from_json(json);
        if text.contains(UTF8_ENCODED_KEY) {
            tree = utf8::restore(tree)?;
        }
        let mut decoder = Decoder::new(self);
        let root = decoder.decode(tree)?;
        Ok(Decoded {
            graph: decoder.into_graph(),
            root,
        })
    }

    pub fn decode_slice(&self, bytes: &[u8]) -> Result<Decoded, DeserializationError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| DeserializationError::InvalidDocument(e.to_string()))?;
        self.decode(text)
    }

    /// Register the shape used to decode objects of its type.
    pub fn register_type(&mut self, shape: TypeShape) -> Result<(), RegistryError> {
        self.types.register(shape)
    }

    pub fn register_enum(&mut self, def: EnumDef) -> Result<(), RegistryError> {
        check_type_name(def.name())?;
        self.well_known.register_enum(def);
        Ok(())
    }

    /// Hand every object of `type_name` to `serializer`. The last
    /// registration for a type wins.
    pub fn register_custom_serializer(
        &mut self,
        type_name: impl Into<String>,
        serializer: impl ObjectSerializer + 'static,
    ) -> Result<(), RegistryError> {
        let type_name = type_name.into();
        check_type_name(&type_name)?;
        self.custom.register(type_name, Rc::new(serializer));
        Ok(())
    }

    pub fn add_callable_serializer(&mut self, serializer: impl CallableSerializer + 'static) {
        self.callables.add_serializer(Rc::new(serializer));
    }

    pub fn callable_serializer(&self, kind: &str) -> Option<Rc<dyn CallableSerializer>> {
        self.callables.get(kind).cloned()
    }

    pub fn set_denied_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.denied_fields = fields.into_iter().map(Into::into).collect();
    }

    pub fn denied_fields(&self) -> &[String] {
        &self.options.denied_fields
    }

    pub fn set_undeclared_field_policy(&mut self, policy: UndeclaredFieldPolicy) {
        self.options.undeclared_fields = policy;
    }

    pub fn set_accessor(&mut self, accessor: impl PropertyAccessor + 'static) {
        self.accessor = Rc::new(accessor);
    }
}

/// Strict JSON text for the tree, with a single transcoding retry when the
/// only obstacle is invalid UTF-8.
fn render(tree: WireValue) -> Result<String, SerializationError> {
    let json = match tree.to_json() {
        Ok(json) => json,
        Err(TextError::InvalidUtf8) => {
            debug!("invalid UTF-8 in tree, retrying with transcoded strings");
            utf8::transcode(tree)
                .to_json()
                .map_err(|e| SerializationError::EncodingFailure(e.to_string()))?
        }
        Err(e) => return Err(SerializationError::EncodingFailure(e.to_string())),
    };
    serde_json::to_string(&json).map_err(|e| SerializationError::EncodingFailure(e.to_string()))
}

/// Parses with the `serde_json` recursion limit lifted. The bracket scan
/// keeps the parser's recursion within `max_depth`, the same bound the
/// encoder honours.
fn parse(text: &str, max_depth: usize) -> Result<serde_json::Value, DeserializationError> {
    let invalid = |e: serde_json::Error| DeserializationError::InvalidDocument(e.to_string());
    if nesting_exceeds(text, max_depth) {
        return Err(DeserializationError::InvalidDocument(format!(
            "nesting deeper than {max_depth} levels"
        )));
    }
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let json = serde_json::Value::deserialize(&mut de).map_err(invalid)?;
    de.end().map_err(invalid)?;
    Ok(json)
}

/// True when brackets outside string literals nest deeper than `limit`.
fn nesting_exceeds(text: &str, limit: usize) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > limit {
                    return true;
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}
