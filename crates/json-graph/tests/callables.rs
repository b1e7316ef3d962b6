mod common;

use std::rc::Rc;

use common::{codec, json};
use json_graph::{
    AdapterError, Callable, CallableSerializer, DeserializationError, Graph, Object,
    SerializationError, SymbolTableSerializer, Value,
};
use serde_json::json;

/// Encodes every callable as a fixed tag; decodes to a no-op.
struct Tagged(&'static str);

impl CallableSerializer for Tagged {
    fn kind(&self) -> &str {
        self.0
    }

    fn serialize(&self, _callable: &Callable) -> Result<String, AdapterError> {
        Ok(format!("<{}>", self.0))
    }

    fn deserialize(&self, _payload: &str) -> Result<Callable, AdapterError> {
        Ok(Callable::new(|_| Value::Null))
    }
}

fn doubling_table() -> (SymbolTableSerializer, Callable) {
    let mut table = SymbolTableSerializer::new();
    let double = table.register("double", |args| {
        Value::Int(args.first().and_then(Value::as_i64).unwrap_or(0) * 2)
    });
    (table, double)
}

#[test]
fn callable_without_serializer_fails() {
    let codec = codec();
    let value = Value::Callable(Callable::new(|_| Value::Null));
    assert_eq!(
        codec.encode_value(&value),
        Err(SerializationError::MissingSerializer)
    );
}

#[test]
fn symbol_table_round_trip() {
    let mut codec = codec();
    let (table, double) = doubling_table();
    codec.add_callable_serializer(table);

    let mut graph = Graph::new();
    let task = graph.insert(Object::new("stdClass").with_field("run", double.clone()));
    let text = codec
        .encode(&graph, &Value::Object(task))
        .expect("encode must succeed");
    assert_eq!(
        json(&text),
        json!({
            "@type": "stdClass",
            "run": {"@closure": true, "serializer": "symbol-table", "value": "double"}
        })
    );

    let decoded = codec.decode(&text).expect("decode must succeed");
    let run = decoded
        .root_object()
        .and_then(|o| o.get("run"))
        .expect("run must be set");
    let Value::Callable(run) = run else {
        panic!("run must be a callable, got {run:?}");
    };
    assert_eq!(run, &double);
    assert_eq!(run.call(&[Value::Int(21)]), Value::Int(42));
}

#[test]
fn registering_a_preferred_kind_affects_later_encodes_only() {
    let mut codec = codec();
    codec.add_callable_serializer(Tagged("plain"));
    let (table, double) = doubling_table();
    let value = Value::Callable(double);

    let before = codec.encode_value(&value).expect("encode must succeed");
    codec.add_callable_serializer(table);
    let after = codec.encode_value(&value).expect("encode must succeed");

    assert_eq!(json(&before)["serializer"], "plain");
    assert_eq!(json(&after)["serializer"], "symbol-table");
    // Documents written before the change still decode.
    assert!(codec.decode(&before).is_ok());
}

#[test]
fn re_registering_a_kind_replaces_it() {
    let mut codec = codec();
    codec.add_callable_serializer(Tagged("plain"));
    let first = codec.callable_serializer("plain").expect("kind must be registered");
    codec.add_callable_serializer(Tagged("plain"));
    let second = codec.callable_serializer("plain").expect("kind must be registered");
    assert!(!Rc::ptr_eq(&first, &second));
    assert!(codec.callable_serializer("other").is_none());
}

#[test]
fn unknown_kind_fails_decode() {
    let codec = codec();
    let err = codec
        .decode(r#"{"@closure":true,"serializer":"opis","value":"x"}"#)
        .expect_err("decode must fail");
    assert_eq!(err, DeserializationError::MissingSerializer("opis".into()));
}

#[test]
fn closure_entry_without_serializer_is_invalid() {
    let mut codec = codec();
    codec.add_callable_serializer(Tagged("plain"));
    let err = codec
        .decode(r#"{"@closure":true,"value":"x"}"#)
        .expect_err("decode must fail");
    assert!(matches!(err, DeserializationError::InvalidDocument(_)));
}

#[test]
fn anonymous_callable_reports_adapter() {
    let mut codec = codec();
    codec.add_callable_serializer(SymbolTableSerializer::new());
    let err = codec
        .encode_value(&Value::Callable(Callable::new(|_| Value::Null)))
        .expect_err("encode must fail");
    assert_eq!(
        err,
        SerializationError::Adapter {
            subject: "symbol-table".into(),
            source: AdapterError::AnonymousCallable,
        }
    );
}
