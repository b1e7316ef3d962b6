//! Identity-preserving object-graph codec over JSON text.
//!
//! [`GraphCodec`] turns a [`Value`] whose objects live in a [`Graph`] into
//! a JSON document and back. An object reached twice is written once; the
//! second visit becomes a back-reference `{"@type":"@N"}` to the Nth object
//! visited, so shared and cyclic structures decode to the same shape.
//!
//! Dispatch per object runs custom serializers first, then the
//! [well-known types](well_known), then the generic field walk driven by
//! registered [`TypeShape`]s. Strings that are not valid UTF-8 are
//! transcoded on the way out and restored on the way in.
//!
//! ```
//! use json_graph::{graph_equal, Graph, GraphCodec, Object, TypeShape, Value};
//!
//! let mut codec = GraphCodec::new();
//! codec
//!     .register_type(TypeShape::new("User").field("name", Value::Null).field("friend", Value::Null))
//!     .unwrap();
//!
//! let mut graph = Graph::new();
//! let alice = graph.insert(Object::new("User").with_field("name", "alice"));
//! let bob = graph.insert(Object::new("User").with_field("name", "bob").with_field("friend", alice));
//! graph[alice].set("friend", bob);
//! let root = Value::List(vec![Value::Object(alice), Value::Object(bob)]);
//!
//! let text = codec.encode(&graph, &root).unwrap();
//! let decoded = codec.decode(&text).unwrap();
//! assert!(graph_equal(&graph, &root, &decoded.graph, &decoded.root));
//! ```

pub mod accessor;
pub mod callable;
mod codec;
pub mod constants;
pub mod custom;
mod decoder;
mod encoder;
mod equal;
mod error;
mod graph;
pub mod identity;
mod options;
pub mod shape;
pub mod utf8;
mod value;
pub mod well_known;
pub mod wire;

pub use accessor::{FieldMapAccessor, PropertyAccessor};
pub use callable::{CallableSerializer, SymbolTableSerializer};
pub use codec::GraphCodec;
pub use custom::ObjectSerializer;
pub use equal::graph_equal;
pub use error::{AdapterError, DeserializationError, RegistryError, SerializationError};
pub use graph::{Decoded, Graph, ObjRef, Object};
pub use options::{CodecOptions, UndeclaredFieldPolicy};
pub use shape::{LifecycleHooks, TypeShape};
pub use value::{Callable, Resource, Value};
pub use well_known::{Backing, EnumDef};
