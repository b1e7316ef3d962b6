//! String utilities.
//!
//! Provides byte-string validation, forced transcoding and diagnostics
//! formatting.

mod as_string;
mod latin1;
mod util;

pub use as_string::as_string;
pub use latin1::{force_utf8, restore_bytes, TranscodeError};
pub use util::is_utf8;
