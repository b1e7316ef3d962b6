mod common;

use std::borrow::Cow;

use common::codec;
use json_graph::{
    AdapterError, CodecOptions, DeserializationError, Graph, GraphCodec, Object, PropertyAccessor,
    RegistryError, Resource, SerializationError, TypeShape, UndeclaredFieldPolicy, Value,
};

#[test]
fn unknown_type() {
    let err = codec()
        .decode(r#"{"@type":"Ghost","x":1}"#)
        .expect_err("decode must fail");
    assert_eq!(err, DeserializationError::UnknownType("Ghost".into()));
}

#[test]
fn dangling_back_reference() {
    let err = codec()
        .decode(r#"[{"@type":"stdClass"},{"@type":"@3"}]"#)
        .expect_err("decode must fail");
    assert_eq!(err, DeserializationError::DanglingReference(3));
}

#[test]
fn malformed_back_reference() {
    for text in [r#"{"@type":"@"}"#, r#"{"@type":"@x"}"#, r#"{"@type":"@-1"}"#] {
        assert!(
            matches!(
                codec().decode(text),
                Err(DeserializationError::InvalidDocument(_))
            ),
            "{text}"
        );
    }
}

#[test]
fn type_must_be_a_string() {
    assert!(matches!(
        codec().decode(r#"{"@type":7}"#),
        Err(DeserializationError::InvalidDocument(_))
    ));
}

#[test]
fn not_json() {
    for text in ["", "{", "[1,]", "nope"] {
        assert!(
            matches!(
                codec().decode(text),
                Err(DeserializationError::InvalidDocument(_))
            ),
            "{text:?}"
        );
    }
    assert!(matches!(
        codec().decode_slice(&[0x22, 0xff, 0x22]),
        Err(DeserializationError::InvalidDocument(_))
    ));
}

#[test]
fn non_finite_float() {
    let codec = codec();
    for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let value = Value::map([("x", Value::Float(f))]);
        assert!(matches!(
            codec.encode_value(&value),
            Err(SerializationError::EncodingFailure(_))
        ));
    }
}

#[test]
fn non_finite_float_next_to_binary_still_fails() {
    let value = Value::List(vec![Value::from(vec![0xffu8]), Value::Float(f64::NAN)]);
    assert!(matches!(
        codec().encode_value(&value),
        Err(SerializationError::EncodingFailure(_))
    ));
}

#[test]
fn resource_is_unsupported() {
    let codec = codec();
    let mut graph = Graph::new();
    let holder = graph.insert(
        Object::new("stdClass").with_field("file", Resource::new("stream", 3i32)),
    );
    let err = codec
        .encode(&graph, &Value::Object(holder))
        .expect_err("encode must fail");
    assert!(matches!(err, SerializationError::UnsupportedValue(_)));
}

#[test]
fn reserved_map_key_is_unsupported() {
    let value = Value::map([("@type", Value::from("Forged"))]);
    assert!(matches!(
        codec().encode_value(&value),
        Err(SerializationError::UnsupportedValue(_))
    ));
}

#[test]
fn reserved_dynamic_field_is_unsupported() {
    let mut graph = Graph::new();
    let r = graph.insert(Object::new("stdClass").with_field("@closure", true));
    assert!(matches!(
        codec().encode(&graph, &Value::Object(r)),
        Err(SerializationError::UnsupportedValue(_))
    ));
}

#[test]
fn reserved_type_name_is_unsupported() {
    let mut graph = Graph::new();
    let r = graph.insert(Object::new("@0"));
    assert!(matches!(
        codec().encode(&graph, &Value::Object(r)),
        Err(SerializationError::UnsupportedValue(_))
    ));
}

#[test]
fn reserved_shape_field_is_rejected_at_registration() {
    let mut codec = codec();
    assert_eq!(
        codec.register_type(TypeShape::new("Bad").field("@scalar", Value::Null)),
        Err(RegistryError::ReservedField {
            type_name: "Bad".into(),
            field: "@scalar".into(),
        })
    );
}

#[test]
fn handle_from_another_graph_is_unsupported() {
    let mut other = Graph::new();
    other.insert(Object::new("stdClass"));
    let stray = other.insert(Object::new("stdClass"));
    assert!(matches!(
        codec().encode(&Graph::new(), &Value::Object(stray)),
        Err(SerializationError::UnsupportedValue(_))
    ));
}

#[test]
fn undeclared_field_rejected() {
    let mut codec = codec();
    codec.set_undeclared_field_policy(UndeclaredFieldPolicy::Reject);
    codec
        .register_type(TypeShape::new("Point").field("x", 0i64))
        .expect("registration must succeed");
    let err = codec
        .decode(r#"{"@type":"Point","x":1,"z":2}"#)
        .expect_err("decode must fail");
    assert_eq!(
        err,
        DeserializationError::UndeclaredField {
            type_name: "Point".into(),
            field: "z".into(),
        }
    );
}

#[test]
fn depth_limit_applies_both_ways() {
    let codec = GraphCodec::with_options(CodecOptions {
        max_depth: 4,
        ..CodecOptions::default()
    });
    let mut value = Value::Null;
    for _ in 0..5 {
        value = Value::List(vec![value]);
    }
    assert!(matches!(
        codec.encode_value(&value),
        Err(SerializationError::UnsupportedValue(_))
    ));
    assert!(matches!(
        codec.decode("[[[[[null]]]]]"),
        Err(DeserializationError::InvalidDocument(_))
    ));
    assert!(codec.decode("[[[null]]]").is_ok());
}

/// Refuses to read or write anything named `password`.
struct Guarded;

impl PropertyAccessor for Guarded {
    fn read<'a>(&self, object: &'a Object, field: &str) -> Result<Cow<'a, Value>, AdapterError> {
        if field == "password" {
            return Err(AdapterError::custom("field is write-only"));
        }
        Ok(object
            .get(field)
            .map_or(Cow::Owned(Value::Null), Cow::Borrowed))
    }

    fn write(&self, object: &mut Object, field: &str, value: Value) -> Result<(), AdapterError> {
        if field == "password" {
            return Err(AdapterError::custom("field is read-only"));
        }
        object.set(field, value);
        Ok(())
    }
}

#[test]
fn accessor_errors_propagate() {
    let mut codec = codec();
    codec.set_accessor(Guarded);
    let mut graph = Graph::new();
    let user = graph.insert(Object::new("stdClass").with_field("password", "x"));
    assert_eq!(
        codec.encode(&graph, &Value::Object(user)),
        Err(SerializationError::Adapter {
            subject: "stdClass".into(),
            source: AdapterError::Custom("field is write-only".into()),
        })
    );
    assert_eq!(
        codec
            .decode(r#"{"@type":"stdClass","password":"x"}"#)
            .expect_err("decode must fail"),
        DeserializationError::Adapter {
            subject: "stdClass".into(),
            source: AdapterError::Custom("field is read-only".into()),
        }
    );
}

#[test]
fn scalar_marker_with_wide_text_is_invalid() {
    assert!(matches!(
        codec().decode(r#"{"@scalar":"€","@utf8encoded":2}"#),
        Err(DeserializationError::InvalidDocument(_))
    ));
}

#[test]
fn deepest_encodable_document_decodes() {
    let max_depth = 300;
    let codec = GraphCodec::with_options(CodecOptions {
        max_depth,
        ..CodecOptions::default()
    });
    let leaf = Value::from(vec![0xc3u8, 0x28]);
    let mut value = leaf.clone();
    for _ in 1..max_depth {
        value = Value::List(vec![value]);
    }
    let text = codec.encode_value(&value).expect("encode must succeed");
    let decoded = codec.decode(&text).expect("decode must succeed");
    assert_eq!(decoded.root, value);

    let deeper = Value::List(vec![value]);
    assert!(matches!(
        codec.encode_value(&deeper),
        Err(SerializationError::UnsupportedValue(_))
    ));
    let text = format!("[{text}]");
    assert!(matches!(
        codec.decode(&text),
        Err(DeserializationError::InvalidDocument(_))
    ));
}
