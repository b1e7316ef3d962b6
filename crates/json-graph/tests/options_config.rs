use json_graph::{CodecOptions, Graph, GraphCodec, Object, UndeclaredFieldPolicy, Value};

#[test]
fn options_load_from_toml() {
    let options: CodecOptions = toml::from_str(
        r#"
        denied_fields = ["password"]
        undeclared_fields = "ignore"
        "#,
    )
    .expect("options must parse");
    assert_eq!(options.denied_fields, ["password"]);
    assert_eq!(options.undeclared_fields, UndeclaredFieldPolicy::Ignore);
    assert_eq!(options.max_depth, CodecOptions::default().max_depth);

    let codec = GraphCodec::with_options(options);
    let mut graph = Graph::new();
    let user = graph.insert(
        Object::new("User")
            .with_field("name", "ada")
            .with_field("password", "hunter2")
            .with_field("connection", "kept"),
    );
    let text = codec
        .encode(&graph, &Value::Object(user))
        .expect("encode must succeed");
    assert_eq!(text, r#"{"@type":"User","name":"ada","connection":"kept"}"#);
}

#[test]
fn empty_toml_gives_defaults() {
    let options: CodecOptions = toml::from_str("").expect("options must parse");
    assert_eq!(options, CodecOptions::default());
}

#[test]
fn unknown_policy_is_rejected() {
    assert!(toml::from_str::<CodecOptions>(r#"undeclared_fields = "maybe""#).is_err());
}

#[test]
fn options_serialize_back() {
    let text = toml::to_string(&CodecOptions::default()).expect("options must serialize");
    let back: CodecOptions = toml::from_str(&text).expect("options must parse");
    assert_eq!(back, CodecOptions::default());
}
