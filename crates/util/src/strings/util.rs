/// Check whether a byte string is valid UTF-8.
///
/// # Examples
///
/// ```
/// use json_graph_util::strings::is_utf8;
///
/// assert!(is_utf8(b"plain"));
/// assert!(is_utf8("ßåö".as_bytes()));
/// assert!(!is_utf8(&[0xff, 0xfe]));
/// ```
pub fn is_utf8(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok()
}
