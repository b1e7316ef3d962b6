//! Reserved document keys and defaults.

/// Type name of an encoded object, or `"@N"` for a back-reference.
pub const TYPE_KEY: &str = "@type";

/// Marks an encoded callable.
pub const CLOSURE_KEY: &str = "@closure";

/// Per-map bitmask of force-transcoded keys and values.
pub const UTF8_ENCODED_KEY: &str = "@utf8encoded";

/// Wraps a force-transcoded string that has no parent map.
pub const SCALAR_KEY: &str = "@scalar";

/// Callable entry field naming the adapter kind.
pub const CLOSURE_SERIALIZER_KEY: &str = "serializer";

/// Callable entry field holding the adapter payload.
pub const CLOSURE_VALUE_KEY: &str = "value";

/// Prefix of a back-reference type name.
pub const BACK_REFERENCE_PREFIX: char = '@';

/// Bit set in an `@utf8encoded` entry when the key was transcoded.
pub const KEY_UTF8_ENCODED: i64 = 1;

/// Bit set in an `@utf8encoded` entry when the value was transcoded.
pub const VALUE_UTF8_ENCODED: i64 = 2;

pub const RESERVED_KEYS: [&str; 4] = [TYPE_KEY, CLOSURE_KEY, UTF8_ENCODED_KEY, SCALAR_KEY];

/// Fields never written by the generic object walk unless reconfigured.
pub const DEFAULT_DENIED_FIELDS: [&str; 2] = ["connection", "resolver"];

/// Nesting limit shared by encode and decode.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Type name of the built-in shape with no declared fields.
pub const DYNAMIC_TYPE: &str = "Object";

pub fn is_reserved_key(key: &[u8]) -> bool {
    RESERVED_KEYS.iter().any(|reserved| reserved.as_bytes() == key)
}
