//! Exact-type custom object serializers.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value as JsonValue};

use crate::error::AdapterError;
use crate::graph::Object;

/// Takes over encoding and decoding of one type. The returned field map is
/// written after the `@type` entry as plain JSON; nested values are not
/// identity tracked.
pub trait ObjectSerializer {
    fn serialize(&self, object: &Object) -> Result<Map<String, JsonValue>, AdapterError>;

    fn deserialize(
        &self,
        type_name: &str,
        fields: &Map<String, JsonValue>,
    ) -> Result<Object, AdapterError>;
}

#[derive(Clone, Default)]
pub struct CustomSerializers {
    by_type: HashMap<String, Rc<dyn ObjectSerializer>>,
}

impl CustomSerializers {
    /// Last registration per type wins.
    pub fn register(&mut self, type_name: String, serializer: Rc<dyn ObjectSerializer>) {
        self.by_type.insert(type_name, serializer);
    }

    pub fn get(&self, type_name: &str) -> Option<&Rc<dyn ObjectSerializer>> {
        self.by_type.get(type_name)
    }
}

impl fmt::Debug for CustomSerializers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.by_type.keys()).finish()
    }
}
