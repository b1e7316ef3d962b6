mod common;

use bstr::BString;
use common::{codec, json, round_trip};
use json_graph::{Graph, Object, Value};
use serde_json::json;

#[test]
fn every_byte_survives_as_a_value() {
    let codec = codec();
    let bytes: Vec<u8> = (0..=255).collect();
    let value = Value::from(bytes.clone());
    let (_, decoded) = round_trip(&codec, &Graph::new(), &value);
    assert_eq!(decoded.root.as_bytes(), Some(bytes.as_slice()));
}

#[test]
fn every_nonzero_byte_survives_as_a_key() {
    let codec = codec();
    let value = Value::Map(
        (1..=255u8)
            .map(|b| (BString::from(vec![b]), Value::Int(i64::from(b))))
            .collect(),
    );
    let (_, decoded) = round_trip(&codec, &Graph::new(), &value);
    assert_eq!(decoded.root, value);
}

#[test]
fn root_string_is_wrapped() {
    let codec = codec();
    let text = codec
        .encode_value(&Value::from(vec![0xe9u8]))
        .expect("encode must succeed");
    assert_eq!(text, r#"{"@scalar":"é","@utf8encoded":2}"#);
    assert_eq!(
        codec.decode(&text).expect("decode must succeed").root,
        Value::from(vec![0xe9u8])
    );
}

#[test]
fn valid_text_is_left_alone() {
    let codec = codec();
    let text = codec
        .encode_value(&Value::from("naïve café"))
        .expect("encode must succeed");
    assert_eq!(text, r#""naïve café""#);
}

#[test]
fn object_fields_are_flagged_next_to_the_type() {
    let codec = codec();
    let mut graph = Graph::new();
    let blob = graph.insert(
        Object::new("stdClass")
            .with_field("name", "blob")
            .with_field("data", vec![0x00u8, 0xff, 0x80]),
    );
    let root = Value::List(vec![
        Value::Object(blob),
        Value::from(vec![0xfeu8]),
        Value::Object(blob),
    ]);

    let (text, decoded) = round_trip(&codec, &graph, &root);
    assert_eq!(
        json(&text),
        json!([
            {
                "@type": "stdClass",
                "name": "blob",
                "data": "\u{0}\u{ff}\u{80}",
                "@utf8encoded": {"data": 2}
            },
            {"@scalar": "\u{fe}", "@utf8encoded": 2},
            {"@type": "@0"}
        ])
    );
    assert!(json_graph::graph_equal(
        &graph,
        &root,
        &decoded.graph,
        &decoded.root
    ));
}

#[test]
fn literal_marker_text_in_values_is_harmless() {
    let codec = codec();
    let value = Value::map([("note", Value::from("@utf8encoded"))]);
    let (_, decoded) = round_trip(&codec, &Graph::new(), &value);
    assert_eq!(decoded.root, value);
}
