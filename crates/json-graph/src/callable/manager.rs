//! Registry of callable serializers and the encoding preference.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::{CallableSerializer, SymbolTableSerializer};

/// Kinds picked for encoding ahead of any other registered kind, highest
/// priority first.
pub const PREFERRED_KINDS: [&str; 1] = [SymbolTableSerializer::KIND];

/// Registered callable serializers, in registration order.
#[derive(Clone, Default)]
pub struct CallableSerializerManager {
    serializers: IndexMap<String, Rc<dyn CallableSerializer>>,
}

impl CallableSerializerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a serializer under its kind. Registering a kind again
    /// replaces the earlier serializer and keeps its position.
    pub fn add_serializer(&mut self, serializer: Rc<dyn CallableSerializer>) {
        self.serializers
            .insert(serializer.kind().to_string(), serializer);
    }

    /// The serializer used for encoding: the first registered kind of
    /// [`PREFERRED_KINDS`], else the first registered serializer.
    pub fn preferred(&self) -> Option<&Rc<dyn CallableSerializer>> {
        PREFERRED_KINDS
            .iter()
            .find_map(|kind| self.serializers.get(*kind))
            .or_else(|| self.serializers.values().next())
    }

    pub fn get(&self, kind: &str) -> Option<&Rc<dyn CallableSerializer>> {
        self.serializers.get(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.serializers.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.serializers.is_empty()
    }
}

impl fmt::Debug for CallableSerializerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;
    use crate::value::Callable;

    struct Fixed(&'static str, &'static str);

    impl CallableSerializer for Fixed {
        fn kind(&self) -> &str {
            self.0
        }

        fn serialize(&self, _callable: &Callable) -> Result<String, AdapterError> {
            Ok(self.1.to_string())
        }

        fn deserialize(&self, _payload: &str) -> Result<Callable, AdapterError> {
            Err(AdapterError::custom("not supported"))
        }
    }

    fn payload(manager: &CallableSerializerManager) -> String {
        let callable = Callable::new(|_| crate::Value::Null);
        manager.preferred().unwrap().serialize(&callable).unwrap()
    }

    #[test]
    fn empty_manager_has_no_preference() {
        assert!(CallableSerializerManager::new().preferred().is_none());
    }

    #[test]
    fn falls_back_to_first_registered() {
        let mut manager = CallableSerializerManager::new();
        manager.add_serializer(Rc::new(Fixed("a", "from a")));
        manager.add_serializer(Rc::new(Fixed("b", "from b")));
        assert_eq!(manager.preferred().unwrap().kind(), "a");
    }

    #[test]
    fn preferred_kind_wins_regardless_of_order() {
        let mut manager = CallableSerializerManager::new();
        manager.add_serializer(Rc::new(Fixed("a", "from a")));
        manager.add_serializer(Rc::new(Fixed(SymbolTableSerializer::KIND, "symbol")));
        assert_eq!(manager.preferred().unwrap().kind(), SymbolTableSerializer::KIND);
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let mut manager = CallableSerializerManager::new();
        manager.add_serializer(Rc::new(Fixed("a", "old")));
        manager.add_serializer(Rc::new(Fixed("b", "other")));
        manager.add_serializer(Rc::new(Fixed("a", "new")));
        assert_eq!(manager.kinds().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(payload(&manager), "new");
    }
}
