//! Arena of typed objects.

use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use crate::value::Value;

/// Handle to an [`Object`] stored in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjRef(usize);

impl ObjRef {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A typed object: a type name plus its fields in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub type_name: String,
    pub fields: IndexMap<String, Value>,
}

impl Object {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }
}

/// Owns every object of a value graph. Shared and cyclic references are
/// repeated [`ObjRef`] handles.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    objects: Vec<Object>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: Object) -> ObjRef {
        let r = ObjRef(self.objects.len());
        self.objects.push(object);
        r
    }

    pub fn get(&self, r: ObjRef) -> Option<&Object> {
        self.objects.get(r.0)
    }

    pub fn get_mut(&mut self, r: ObjRef) -> Option<&mut Object> {
        self.objects.get_mut(r.0)
    }

    /// Read a field of an object, `None` when the handle or field is unknown.
    pub fn field(&self, r: ObjRef, name: &str) -> Option<&Value> {
        self.get(r).and_then(|o| o.get(name))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjRef, &Object)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjRef(i), o))
    }
}

impl Index<ObjRef> for Graph {
    type Output = Object;

    fn index(&self, r: ObjRef) -> &Object {
        &self.objects[r.0]
    }
}

impl IndexMut<ObjRef> for Graph {
    fn index_mut(&mut self, r: ObjRef) -> &mut Object {
        &mut self.objects[r.0]
    }
}

/// Result of a decode call: the rebuilt arena and the root value.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub graph: Graph,
    pub root: Value,
}

impl Decoded {
    pub fn into_parts(self) -> (Graph, Value) {
        (self.graph, self.root)
    }

    /// The root object, when the document encoded one.
    pub fn root_object(&self) -> Option<&Object> {
        self.root.as_object().and_then(|r| self.graph.get(r))
    }
}
