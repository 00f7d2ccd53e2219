//! # Object Model
//!
//! Dispatch targets implement [`Object`]. An object can be driven in one of two ways:
//!
//! 1. **Natively**, by returning a [`DynamicObject`] from [`Object::as_dynamic`]. The object then
//!    resolves every method name itself, given the name and a positional argument array.
//! 2. **Reflectively**, by describing its methods and properties through [`Object::methods`] and
//!    [`Object::properties`]. A caller looks up a [`Method`] by name and argument types and
//!    invokes it directly.
//!
//! Objects that expose both are always driven natively.
mod reflect;

pub use reflect::{Method, Parameter, ParameterType, Property};

use crate::{error::InvokeError, value::Value};
use std::rc::Rc;

/// A shared handle to an object.
pub type ObjectRef = Rc<dyn Object>;

/// An object that can be the target of a dispatch.
pub trait Object: 'static {
    /// A human readable description of the object's type, used in error messages.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Exposes the native dynamic invocation capability, if the object has one.
    fn as_dynamic(&self) -> Option<&dyn DynamicObject> {
        None
    }

    /// The methods that can be found by reflective lookup.
    fn methods(&self) -> Vec<Method<'_>> {
        Vec::new()
    }

    /// The properties that can be found by reflective lookup.
    fn properties(&self) -> Vec<Property<'_>> {
        Vec::new()
    }
}

/// The native "invoke a named operation with an array of positional arguments" capability.
pub trait DynamicObject {
    fn invoke_method(&self, name: &str, arguments: Vec<Value>) -> Result<Value, InvokeError>;

    /// Reads a property. `Ok(None)` means the object has no property with that name.
    fn get_property(&self, _name: &str) -> Result<Option<Value>, InvokeError> {
        Ok(None)
    }

    /// Writes a property. `Ok(false)` means the object has no property with that name.
    fn set_property(&self, _name: &str, _value: Value) -> Result<bool, InvokeError> {
        Ok(false)
    }
}

/// Finds the method of `object` named `name` that accepts `arguments`.
///
/// When several overloads match, the first one declared wins.
pub fn find_method<'a>(
    object: &'a dyn Object,
    name: &str,
    arguments: &[Value],
) -> Option<Method<'a>> {
    object
        .methods()
        .into_iter()
        .find(|m| m.name() == name && m.accepts(arguments))
}

/// Finds the property of `object` named `name`.
pub fn find_property<'a>(object: &'a dyn Object, name: &str) -> Option<Property<'a>> {
    object.properties().into_iter().find(|p| p.name() == name)
}
