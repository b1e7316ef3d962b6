//! Adapters for opaque callable values.

mod manager;
mod symbol_table;

pub use manager::{CallableSerializerManager, PREFERRED_KINDS};
pub use symbol_table::SymbolTableSerializer;

use crate::error::AdapterError;
use crate::value::Callable;

/// Turns a callable into a text payload and back.
pub trait CallableSerializer {
    /// Kind identifier written next to the payload.
    fn kind(&self) -> &str;

    fn serialize(&self, callable: &Callable) -> Result<String, AdapterError>;

    fn deserialize(&self, payload: &str) -> Result<Callable, AdapterError>;
}
