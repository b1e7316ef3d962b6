//! Identity-aware structural comparison of value graphs.

use std::collections::HashMap;

use crate::graph::{Graph, ObjRef};
use crate::value::Value;

/// Whether two graphs have the same shape, object identities included.
///
/// Objects are matched one-to-one: an object shared twice on the left must
/// be shared the same way on the right. Object fields compare regardless
/// of order; plain map entries compare in order. Callables compare by
/// allocation or by symbol, resources by allocation.
///
/// ```
/// use json_graph::{graph_equal, Graph, Object, Value};
///
/// let mut left = Graph::new();
/// let a = left.insert(Object::new("Leaf"));
/// let left_root = Value::List(vec![Value::Object(a), Value::Object(a)]);
///
/// let mut right = Graph::new();
/// let b = right.insert(Object::new("Leaf"));
/// let c = right.insert(Object::new("Leaf"));
/// let shared = Value::List(vec![Value::Object(b), Value::Object(b)]);
/// let copied = Value::List(vec![Value::Object(b), Value::Object(c)]);
///
/// assert!(graph_equal(&left, &left_root, &right, &shared));
/// assert!(!graph_equal(&left, &left_root, &right, &copied));
/// ```
pub fn graph_equal(left: &Graph, left_root: &Value, right: &Graph, right_root: &Value) -> bool {
    Matcher {
        left,
        right,
        forward: HashMap::new(),
        backward: HashMap::new(),
    }
    .values(left_root, right_root)
}

struct Matcher<'a> {
    left: &'a Graph,
    right: &'a Graph,
    forward: HashMap<ObjRef, ObjRef>,
    backward: HashMap<ObjRef, ObjRef>,
}

impl Matcher<'_> {
    fn values(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Int(x), Value::Int(y)) => x == y,
            (Value::Float(x), Value::Float(y)) => x == y,
            (Value::Str(x), Value::Str(y)) => x == y,
            (Value::List(x), Value::List(y)) => {
                x.len() == y.len() && x.iter().zip(y).all(|(x, y)| self.values(x, y))
            }
            (Value::Map(x), Value::Map(y)) => {
                x.len() == y.len()
                    && x
                        .iter()
                        .zip(y)
                        .all(|((kx, vx), (ky, vy))| kx == ky && self.values(vx, vy))
            }
            (Value::Object(x), Value::Object(y)) => self.objects(*x, *y),
            (Value::Callable(x), Value::Callable(y)) => {
                x == y || (x.symbol().is_some() && x.symbol() == y.symbol())
            }
            (Value::Resource(x), Value::Resource(y)) => x == y,
            _ => false,
        }
    }

    fn objects(&mut self, x: ObjRef, y: ObjRef) -> bool {
        match (self.forward.get(&x), self.backward.get(&y)) {
            (Some(&fx), Some(&by)) => return fx == y && by == x,
            (None, None) => {}
            _ => return false,
        }
        self.forward.insert(x, y);
        self.backward.insert(y, x);

        let (left, right) = (self.left, self.right);
        let (Some(a), Some(b)) = (left.get(x), right.get(y)) else {
            return false;
        };
        a.type_name == b.type_name
            && a.fields.len() == b.fields.len()
            && a.fields
                .iter()
                .all(|(name, va)| b.fields.get(name).is_some_and(|vb| self.values(va, vb)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Object;

    #[test]
    fn field_order_is_ignored() {
        let mut left = Graph::new();
        let a = left.insert(Object::new("P").with_field("x", 1i64).with_field("y", 2i64));
        let mut right = Graph::new();
        let b = right.insert(Object::new("P").with_field("y", 2i64).with_field("x", 1i64));
        assert!(graph_equal(&left, &a.into(), &right, &b.into()));
    }

    #[test]
    fn cycles_terminate() {
        let mut left = Graph::new();
        let a = left.insert(Object::new("Node"));
        left[a].set("next", a);
        let mut right = Graph::new();
        let b = right.insert(Object::new("Node"));
        let c = right.insert(Object::new("Node"));
        right[b].set("next", c);
        right[c].set("next", b);
        assert!(graph_equal(&left, &a.into(), &left, &a.into()));
        assert!(!graph_equal(&left, &a.into(), &right, &b.into()));
    }

    #[test]
    fn map_order_matters() {
        let graph = Graph::new();
        let ab = Value::map([("a", Value::Null), ("b", Value::Null)]);
        let ba = Value::map([("b", Value::Null), ("a", Value::Null)]);
        assert!(!graph_equal(&graph, &ab, &graph, &ba));
    }
}
