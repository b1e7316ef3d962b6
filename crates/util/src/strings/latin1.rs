//! Forced byte-to-text transcoding.
//!
//! Every byte is mapped to the code point with the same number
//! (U+0000..=U+00FF), which always yields valid UTF-8. The reverse mapping
//! only accepts text whose code points all fit in a byte.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeError {
    #[error("code point U+{0:04X} does not fit in a single byte")]
    CodePointOutOfRange(u32),
}

/// Map each byte onto the code point of the same value.
///
/// # Examples
///
/// ```
/// use json_graph_util::strings::force_utf8;
///
/// assert_eq!(force_utf8(b"abc"), "abc");
/// assert_eq!(force_utf8(&[0xe9]), "\u{e9}");
/// ```
pub fn force_utf8(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Reverse [`force_utf8`].
///
/// # Errors
///
/// Returns [`TranscodeError::CodePointOutOfRange`] when the text holds a
/// character above U+00FF, which [`force_utf8`] never produces.
///
/// # Examples
///
/// ```
/// use json_graph_util::strings::{force_utf8, restore_bytes};
///
/// let bytes = vec![0x00, 0x7f, 0x80, 0xff];
/// assert_eq!(restore_bytes(&force_utf8(&bytes)).unwrap(), bytes);
/// assert!(restore_bytes("\u{100}").is_err());
/// ```
pub fn restore_bytes(text: &str) -> Result<Vec<u8>, TranscodeError> {
    text.chars()
        .map(|ch| {
            u8::try_from(u32::from(ch)).map_err(|_| TranscodeError::CodePointOutOfRange(ch.into()))
        })
        .collect()
}
