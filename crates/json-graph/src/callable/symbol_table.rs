use indexmap::IndexMap;

use super::CallableSerializer;
use crate::error::AdapterError;
use crate::value::{Callable, Value};

/// Encodes a callable as its symbol. Decoding looks the symbol up in the
/// same table, so both sides must register the same functions.
///
/// ```
/// use json_graph::callable::{CallableSerializer, SymbolTableSerializer};
/// use json_graph::Value;
///
/// let mut table = SymbolTableSerializer::new();
/// let double = table.register("double", |args: &[Value]| {
///     Value::Int(args[0].as_i64().unwrap_or(0) * 2)
/// });
/// assert_eq!(table.serialize(&double).unwrap(), "double");
///
/// let restored = table.deserialize("double").unwrap();
/// assert_eq!(restored.call(&[Value::Int(4)]), Value::Int(8));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SymbolTableSerializer {
    functions: IndexMap<String, Callable>,
}

impl SymbolTableSerializer {
    pub const KIND: &'static str = "symbol-table";

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function under `symbol` and return the callable to place in
    /// value graphs.
    pub fn register(
        &mut self,
        symbol: impl Into<String>,
        func: impl Fn(&[Value]) -> Value + 'static,
    ) -> Callable {
        let symbol = symbol.into();
        let callable = Callable::named(symbol.clone(), func);
        self.functions.insert(symbol, callable.clone());
        callable
    }

    pub fn get(&self, symbol: &str) -> Option<&Callable> {
        self.functions.get(symbol)
    }
}

impl CallableSerializer for SymbolTableSerializer {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn serialize(&self, callable: &Callable) -> Result<String, AdapterError> {
        let symbol = callable.symbol().ok_or(AdapterError::AnonymousCallable)?;
        if !self.functions.contains_key(symbol) {
            return Err(AdapterError::UnknownSymbol(symbol.to_string()));
        }
        Ok(symbol.to_string())
    }

    fn deserialize(&self, payload: &str) -> Result<Callable, AdapterError> {
        self.functions
            .get(payload)
            .cloned()
            .ok_or_else(|| AdapterError::UnknownSymbol(payload.to_string()))
    }
}
