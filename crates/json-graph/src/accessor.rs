//! Reading and writing object fields.

use std::borrow::Cow;

use crate::error::AdapterError;
use crate::graph::Object;
use crate::value::Value;

/// Field access used by the generic object walk.
///
/// The encoder reads every candidate field through [`read`](Self::read), the
/// decoder binds every document field through [`write`](Self::write). An
/// implementation may compute fields, rename them or refuse them.
pub trait PropertyAccessor {
    fn read<'a>(&self, object: &'a Object, field: &str) -> Result<Cow<'a, Value>, AdapterError>;

    fn write(&self, object: &mut Object, field: &str, value: Value) -> Result<(), AdapterError>;
}

/// Reads and writes [`Object::fields`] directly. A field that is not set
/// reads as null.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapAccessor;

impl PropertyAccessor for FieldMapAccessor {
    fn read<'a>(&self, object: &'a Object, field: &str) -> Result<Cow<'a, Value>, AdapterError> {
        Ok(object
            .fields
            .get(field)
            .map_or(Cow::Owned(Value::Null), Cow::Borrowed))
    }

    fn write(&self, object: &mut Object, field: &str, value: Value) -> Result<(), AdapterError> {
        object.fields.insert(field.to_string(), value);
        Ok(())
    }
}
