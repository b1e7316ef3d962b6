/// Render a byte string as a JSON string literal for diagnostics.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD, so the output is meant
/// for error messages and logs, never for the encoded document itself.
///
/// # Examples
///
/// ```
/// use json_graph_util::strings::as_string;
///
/// assert_eq!(as_string(b"hello"), "\"hello\"");
/// assert_eq!(as_string(b"say \"hi\""), "\"say \\\"hi\\\"\"");
/// assert_eq!(as_string(b"\xffok"), "\"\u{fffd}ok\"");
/// ```
pub fn as_string(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    serde_json::to_string(text.as_ref()).unwrap_or_else(|_| String::from("\"\""))
}
