//! Error types for encoding, decoding and registration.

use thiserror::Error;

/// Failure raised by a pluggable collaborator: a custom serializer, a
/// well-known type adapter, a callable serializer, the property accessor
/// or a lifecycle hook.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
    #[error("callable has no symbol")]
    AnonymousCallable,
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),
    #[error("unknown case `{case}` for enum `{enum_name}`")]
    UnknownCase { enum_name: String, case: String },
    #[error("{0}")]
    Custom(String),
}

impl AdapterError {
    pub fn custom(message: impl std::fmt::Display) -> Self {
        AdapterError::Custom(message.to_string())
    }

    pub fn invalid_field(field: &str, reason: impl std::fmt::Display) -> Self {
        AdapterError::InvalidField {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SerializationError {
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),
    #[error("no callable serializer registered, unable to encode callable")]
    MissingSerializer,
    #[error("invalid data to encode as JSON: {0}")]
    EncodingFailure(String),
    #[error("adapter for `{subject}` failed: {source}")]
    Adapter { subject: String, source: AdapterError },
}

impl SerializationError {
    pub(crate) fn adapter(subject: &str) -> impl FnOnce(AdapterError) -> Self + '_ {
        move |source| SerializationError::Adapter {
            subject: subject.to_string(),
            source,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeserializationError {
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("unable to find type `{0}`")]
    UnknownType(String),
    #[error("callable serializer `{0}` is not registered")]
    MissingSerializer(String),
    #[error("undeclared field `{field}` on type `{type_name}`")]
    UndeclaredField { type_name: String, field: String },
    #[error("back-reference to unknown object index {0}")]
    DanglingReference(usize),
    #[error("adapter for `{subject}` failed: {source}")]
    Adapter { subject: String, source: AdapterError },
}

impl DeserializationError {
    pub(crate) fn adapter(subject: &str) -> impl FnOnce(AdapterError) -> Self + '_ {
        move |source| DeserializationError::Adapter {
            subject: subject.to_string(),
            source,
        }
    }
}

impl From<json_graph_util::TranscodeError> for DeserializationError {
    fn from(e: json_graph_util::TranscodeError) -> Self {
        DeserializationError::InvalidDocument(e.to_string())
    }
}

/// Errors raised while registering shapes and adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("type name `{0}` is reserved")]
    ReservedTypeName(String),
    #[error("type `{type_name}` declares reserved field `{field}`")]
    ReservedField { type_name: String, field: String },
}
