//! # Values
//!
//! [`Value`] is the type-erased currency of the object model. Closures receive and return it,
//! targets are dispatched with it, and keyword arguments are collapsed into it.
//!
//! `Null` is an ordinary value: it is never rejected by the bridge itself, only by a typed
//! parameter that cannot represent it (see [`FromValue`]).
//!
//! Scalars and maps compare structurally. Lists, closures and objects are reference values:
//! cloning shares the same instance and [`Value::same_instance`] observes that identity.
mod convert;
#[cfg(feature = "json")]
pub mod json;
mod keywords;

pub use convert::{FromValue, IntoValue};
pub use keywords::KeywordArguments;

use crate::{closure::Closure, object::Object, object::ObjectRef};
use std::{cell::RefCell, fmt, rc::Rc};

/// A shared, mutable list.
pub type ListRef = Rc<RefCell<Vec<Value>>>;

/// A dynamically typed, nullable value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(ListRef),
    Map(KeywordArguments),
    Closure(Closure),
    Object(ObjectRef),
}

impl Value {
    /// Wraps an object so it can be used as a dispatch target or passed as an argument.
    pub fn object<T: Object>(object: Rc<T>) -> Self {
        Value::Object(object)
    }

    /// Creates a new shared list holding `items`.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoValue,
    {
        let items = items.into_iter().map(IntoValue::into_value).collect();
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the name of the runtime type of this value (e.g. `map`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Closure(_) => "closure",
            Value::Object(_) => "object",
        }
    }

    /// Describes this value as a dispatch target: objects report their own type name.
    pub fn describe(&self) -> String {
        match self {
            Value::Object(object) => object.type_name().to_string(),
            other => other.type_name().to_string(),
        }
    }

    /// Identity comparison.
    ///
    /// Reference values (lists, closures and objects) are the same instance only if they point
    /// to the same allocation. Any other value is compared by equality.
    pub fn same_instance(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Closure(a), Value::Closure(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            (a, b) => a == b,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&KeywordArguments> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_closure(&self) -> Option<&Closure> {
        match self {
            Value::Closure(closure) => Some(closure),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Closure(_), Value::Closure(_)) | (Value::Object(_), Value::Object(_)) => {
                self.same_instance(other)
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(&items.borrow()).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Closure(closure) => f.debug_tuple("Closure").field(closure).finish(),
            Value::Object(object) => write!(f, "Object({})", object.type_name()),
        }
    }
}

/// Renders an argument list as a signature, e.g. `(map, closure)`.
pub(crate) fn describe_arguments(arguments: &[Value]) -> String {
    let types: Vec<&str> = arguments.iter().map(Value::type_name).collect();
    format!("({})", types.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kwargs;

    struct Opaque;

    impl Object for Opaque {}

    #[test]
    fn objects_compare_by_identity() {
        let object = Rc::new(Opaque);
        let a = Value::object(object.clone());
        let b = Value::object(object);
        let c = Value::object(Rc::new(Opaque));

        assert!(a.same_instance(&b));
        assert_eq!(a, b);
        assert!(!a.same_instance(&c));
        assert_ne!(a, c);
    }

    #[test]
    fn lists_are_equal_by_content_but_distinct_instances() {
        let a = Value::list([1, 2]);
        let b = Value::list([1, 2]);

        assert_eq!(a, b);
        assert!(!a.same_instance(&b));
        assert!(a.same_instance(&a.clone()));
    }

    #[test]
    fn maps_compare_structurally() {
        let a = Value::Map(kwargs! { "a" => 1, "b" => 2 });
        let b = Value::Map(kwargs! { "b" => 2, "a" => 1 });

        assert_eq!(a, b);
        assert!(a.same_instance(&b));
    }

    #[test]
    fn describes_arguments_by_type() {
        let arguments = [Value::Map(kwargs! {}), Value::Null, Value::from("x")];

        assert_eq!(describe_arguments(&arguments), "(map, null, string)");
    }
}
