//! # Dispatch
//!
//! Capability detection and the two dispatch strategies a [`super::BuilderScope`] can use.
use crate::{
    error::InvokeError,
    object::{DynamicObject, Object, find_method, find_property},
    value::{Value, describe_arguments},
};
use std::fmt;

/// How a target's methods are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchCapability {
    /// The target resolves names itself through [`DynamicObject::invoke_method`].
    NativeDynamic,
    /// Methods are looked up in the target's reflective method table.
    Reflective,
}

impl DispatchCapability {
    /// Decides how `target` must be dispatched. Pure: it depends only on the target's shape.
    pub fn detect(target: &Value) -> Self {
        match target {
            Value::Object(object) if object.as_dynamic().is_some() => Self::NativeDynamic,
            _ => Self::Reflective,
        }
    }
}

impl fmt::Display for DispatchCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativeDynamic => f.write_str("native-dynamic"),
            Self::Reflective => f.write_str("reflective"),
        }
    }
}

/// A dispatch strategy resolved once against a borrowed target.
pub(crate) enum Dispatcher<'a> {
    NativeDynamic(&'a dyn DynamicObject),
    Reflective(Option<&'a dyn Object>),
}

impl<'a> Dispatcher<'a> {
    pub(crate) fn new(target: &'a Value) -> Self {
        match target {
            Value::Object(object) => match object.as_dynamic() {
                Some(dynamic) => Self::NativeDynamic(dynamic),
                None => Self::Reflective(Some(object.as_ref())),
            },
            // Only objects carry methods, anything else fails every lookup.
            _ => Self::Reflective(None),
        }
    }

    pub(crate) fn capability(&self) -> DispatchCapability {
        match self {
            Self::NativeDynamic(_) => DispatchCapability::NativeDynamic,
            Self::Reflective(_) => DispatchCapability::Reflective,
        }
    }

    pub(crate) fn invoke(
        &self,
        target: &Value,
        name: &str,
        arguments: Vec<Value>,
    ) -> Result<Value, InvokeError> {
        match self {
            Self::NativeDynamic(dynamic) => dynamic.invoke_method(name, arguments),
            Self::Reflective(object) => object
                .and_then(|object| find_method(object, name, &arguments))
                .ok_or_else(|| InvokeError::MethodNotFound {
                    method: name.to_string(),
                    arguments: describe_arguments(&arguments),
                    target: target.describe(),
                })?
                .invoke(arguments),
        }
    }

    pub(crate) fn get_property(&self, target: &Value, name: &str) -> Result<Value, InvokeError> {
        match self {
            Self::NativeDynamic(dynamic) => dynamic
                .get_property(name)?
                .ok_or_else(|| property_not_found(target, name)),
            Self::Reflective(object) => object
                .and_then(|object| find_property(object, name))
                .map(|property| property.get())
                .ok_or_else(|| property_not_found(target, name)),
        }
    }

    pub(crate) fn set_property(
        &self,
        target: &Value,
        name: &str,
        value: Value,
    ) -> Result<(), InvokeError> {
        match self {
            Self::NativeDynamic(dynamic) => {
                if dynamic.set_property(name, value)? {
                    Ok(())
                } else {
                    Err(property_not_found(target, name))
                }
            }
            Self::Reflective(object) => {
                let property = object
                    .and_then(|object| find_property(object, name))
                    .ok_or_else(|| property_not_found(target, name))?;

                if property.set(value)? {
                    Ok(())
                } else {
                    Err(InvokeError::ReadOnlyProperty {
                        property: name.to_string(),
                        target: target.describe(),
                    })
                }
            }
        }
    }
}

fn property_not_found(target: &Value, name: &str) -> InvokeError {
    InvokeError::PropertyNotFound {
        property: name.to_string(),
        target: target.describe(),
    }
}
