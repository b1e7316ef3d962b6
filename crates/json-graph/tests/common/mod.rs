#![allow(dead_code)]

use json_graph::{Decoded, Graph, GraphCodec, TypeShape, Value};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("json_graph=trace"))
        .with_test_writer()
        .try_init();
}

/// A codec that knows the dynamic `stdClass` type.
pub fn codec() -> GraphCodec {
    init_tracing();
    let mut codec = GraphCodec::new();
    codec
        .register_type(TypeShape::dynamic("stdClass"))
        .expect("stdClass registration must succeed");
    codec
}

pub fn round_trip(codec: &GraphCodec, graph: &Graph, value: &Value) -> (String, Decoded) {
    let text = codec.encode(graph, value).expect("encode must succeed");
    let decoded = codec.decode(&text).expect("decode must succeed");
    (text, decoded)
}

pub fn json(text: &str) -> serde_json::Value {
    serde_json::from_str(text).expect("encoded text must be JSON")
}
