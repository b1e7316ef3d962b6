//! json-graph-util - byte-string helpers for the json-graph codec.
//!
//! The codec carries strings as raw bytes until the very last moment, when
//! they have to fit into a JSON text. These helpers decide whether a byte
//! string is already valid text and, when it is not, map it onto text and
//! back without loss.

pub mod strings;

pub use strings::{as_string, force_utf8, is_utf8, restore_bytes, TranscodeError};
