//! In-memory values handled by the codec.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use bstr::BString;
use indexmap::IndexMap;

use crate::graph::ObjRef;

/// A node of a value graph.
///
/// Typed objects live in a [`Graph`](crate::Graph) arena and are referenced
/// by handle, so the same object may appear any number of times, including
/// inside its own fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Arbitrary bytes. Content that is not valid UTF-8 survives a round
    /// trip through the codec.
    Str(BString),
    List(Vec<Value>),
    Map(IndexMap<BString, Value>),
    Object(ObjRef),
    Callable(Callable),
    Resource(Resource),
}

impl Value {
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<BString>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Str(s) => Some(s.as_slice()),
            _ => None,
        }
    }

    /// The string content, when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<ObjRef> {
        match self {
            Value::Object(r) => Some(*r),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::Callable(_) => "callable",
            Value::Resource(_) => "resource",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(BString::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(BString::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Str(BString::from(bytes))
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Str(BString::from(bytes))
    }
}

impl From<BString> for Value {
    fn from(s: BString) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<ObjRef> for Value {
    fn from(r: ObjRef) -> Self {
        Value::Object(r)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

impl From<Resource> for Value {
    fn from(r: Resource) -> Self {
        Value::Resource(r)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// An opaque function value.
///
/// Callables are encoded through a registered
/// [`CallableSerializer`](crate::callable::CallableSerializer). Two callables
/// are equal when they share the same function allocation.
#[derive(Clone)]
pub struct Callable {
    symbol: Option<String>,
    func: Rc<dyn Fn(&[Value]) -> Value>,
}

impl Callable {
    pub fn new(func: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self {
            symbol: None,
            func: Rc::new(func),
        }
    }

    pub fn named(symbol: impl Into<String>, func: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self {
            symbol: Some(symbol.into()),
            func: Rc::new(func),
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("symbol", &self.symbol)
            .finish_non_exhaustive()
    }
}

/// A live host handle (open file, socket, connection). Resources have no
/// encoded form.
#[derive(Clone)]
pub struct Resource {
    kind: String,
    handle: Rc<dyn Any>,
}

impl Resource {
    pub fn new(kind: impl Into<String>, handle: impl Any) -> Self {
        Self {
            kind: kind.into(),
            handle: Rc::new(handle),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref()
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.handle, &other.handle)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
