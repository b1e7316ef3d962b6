//! Declared shapes of typed objects.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::constants::{is_reserved_key, BACK_REFERENCE_PREFIX, DYNAMIC_TYPE};
use crate::error::{AdapterError, RegistryError};
use crate::graph::Object;
use crate::value::Value;

/// Per-type hooks run by the generic object walk.
pub trait LifecycleHooks {
    /// Names of the fields to encode, replacing the default candidate list.
    /// `None` keeps the default.
    fn before_encode(&self, _object: &Object) -> Option<Vec<String>> {
        None
    }

    /// Runs once every document field has been bound.
    fn after_decode(&self, _object: &mut Object) -> Result<(), AdapterError> {
        Ok(())
    }
}

/// A type the decoder can instantiate: its name, declared fields with their
/// default values, and optional hooks.
#[derive(Clone)]
pub struct TypeShape {
    name: String,
    fields: IndexMap<String, Value>,
    dynamic: bool,
    hooks: Option<Rc<dyn LifecycleHooks>>,
}

impl TypeShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            dynamic: false,
            hooks: None,
        }
    }

    /// A shape whose instances accept any field, whatever the undeclared
    /// field policy.
    pub fn dynamic(name: impl Into<String>) -> Self {
        Self {
            dynamic: true,
            ..Self::new(name)
        }
    }

    /// Declare a field with its default value.
    pub fn field(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), default.into());
        self
    }

    pub fn hooks(mut self, hooks: impl LifecycleHooks + 'static) -> Self {
        self.hooks = Some(Rc::new(hooks));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn declared_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn declares(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub(crate) fn lifecycle(&self) -> Option<&dyn LifecycleHooks> {
        self.hooks.as_deref()
    }

    /// A blank instance holding the declared defaults. No hook runs.
    pub fn instantiate(&self) -> Object {
        Object {
            type_name: self.name.clone(),
            fields: self.fields.clone(),
        }
    }
}

impl fmt::Debug for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeShape")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("dynamic", &self.dynamic)
            .field("hooks", &self.hooks.is_some())
            .finish()
    }
}

/// Type names may not be empty and may not start with the back-reference
/// prefix.
pub(crate) fn check_type_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() || name.starts_with(BACK_REFERENCE_PREFIX) {
        return Err(RegistryError::ReservedTypeName(name.to_string()));
    }
    Ok(())
}

/// Shapes known to the decoder, keyed by type name.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    shapes: HashMap<String, TypeShape>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut shapes = HashMap::new();
        shapes.insert(DYNAMIC_TYPE.to_string(), TypeShape::dynamic(DYNAMIC_TYPE));
        Self { shapes }
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape, replacing any earlier shape of the same name.
    pub fn register(&mut self, shape: TypeShape) -> Result<(), RegistryError> {
        check_type_name(&shape.name)?;
        if let Some(field) = shape.declared_fields().find(|f| is_reserved_key(f.as_bytes())) {
            return Err(RegistryError::ReservedField {
                type_name: shape.name.clone(),
                field: field.to_string(),
            });
        }
        self.shapes.insert(shape.name.clone(), shape);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TypeShape> {
        self.shapes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }
}
