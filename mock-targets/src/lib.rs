//! # Mock Targets
//!
//! **INTERNAL USE ONLY**: This crate exists solely to provide recording dispatch targets for
//! integration testing `dynbridge-core`.
//! It is not intended for production use.
use dynbridge_core::{
    Closure, DynamicObject, InvokeError, KeywordArguments, Method, Object, ParameterType,
    Property, Value,
};
use std::{cell::RefCell, rc::Rc};

type Answer = dyn Fn(&str, &[Value]) -> Result<Value, InvokeError>;

/// A single recorded call.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub method: String,
    pub arguments: Vec<Value>,
}

impl Invocation {
    pub fn new(method: &str, arguments: Vec<Value>) -> Self {
        Self {
            method: method.to_string(),
            arguments,
        }
    }
}

/// An object with no capabilities, only an identity.
pub struct Opaque;

impl Opaque {
    pub fn value() -> Value {
        Value::object(Rc::new(Opaque))
    }
}

impl Object for Opaque {
    fn type_name(&self) -> &str {
        "Opaque"
    }
}

/// A [`DynamicObject`] test double.
///
/// Records every `invoke_method` call before answering it.
pub struct RecordingDynamicObject {
    answer: Box<Answer>,
    invocations: RefCell<Vec<Invocation>>,
    properties: RefCell<KeywordArguments>,
}

impl RecordingDynamicObject {
    /// Answers every call with `result`.
    pub fn returning(result: Value) -> Rc<Self> {
        Self::answering(move |_, _| Ok(result.clone()))
    }

    /// Answers every call with `answer(name, arguments)`.
    pub fn answering<F>(answer: F) -> Rc<Self>
    where
        F: Fn(&str, &[Value]) -> Result<Value, InvokeError> + 'static,
    {
        Rc::new(Self {
            answer: Box::new(answer),
            invocations: RefCell::new(Vec::new()),
            properties: RefCell::new(KeywordArguments::new()),
        })
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }
}

impl Object for RecordingDynamicObject {
    fn type_name(&self) -> &str {
        "RecordingDynamicObject"
    }

    fn as_dynamic(&self) -> Option<&dyn DynamicObject> {
        Some(self)
    }
}

impl DynamicObject for RecordingDynamicObject {
    fn invoke_method(&self, name: &str, arguments: Vec<Value>) -> Result<Value, InvokeError> {
        self.invocations
            .borrow_mut()
            .push(Invocation::new(name, arguments.clone()));

        (self.answer)(name, &arguments)
    }

    fn get_property(&self, name: &str) -> Result<Option<Value>, InvokeError> {
        Ok(self.properties.borrow().get(name).cloned())
    }

    fn set_property(&self, name: &str, value: Value) -> Result<bool, InvokeError> {
        self.properties.borrow_mut().insert(name, value);
        Ok(true)
    }
}

/// A reflective-only test double, resembling a plain object with a few methods.
///
/// Methods:
///
/// * `withKeywordArguments(map)` - Records the map and returns the configured result.
/// * `configure(closure)` - Runs the closure against the child object and returns the result.
/// * `configure(map, closure)` - Records the map, then behaves like `configure(closure)`.
/// * `concat(string, string)` - Returns both strings joined.
///
/// Properties: `name` (read-write) and `kind` (read-only).
pub struct ReflectiveRecorder {
    result: Value,
    child: Value,
    invocations: RefCell<Vec<Invocation>>,
    name: RefCell<Value>,
}

impl ReflectiveRecorder {
    pub fn new(result: Value) -> Rc<Self> {
        Self::with_child(result, Value::Null)
    }

    /// A recorder whose `configure` method runs nested blocks against `child`.
    pub fn with_child(result: Value, child: Value) -> Rc<Self> {
        Rc::new(Self {
            result,
            child,
            invocations: RefCell::new(Vec::new()),
            name: RefCell::new(Value::Null),
        })
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    fn record(&self, method: &str, arguments: &[Value]) {
        self.invocations
            .borrow_mut()
            .push(Invocation::new(method, arguments.to_vec()));
    }

    fn configure_child(&self, closure: Option<&Closure>) -> Result<Value, InvokeError> {
        if let Some(closure) = closure {
            closure.configure(self.child.clone())?;
        }
        Ok(self.result.clone())
    }
}

impl Object for ReflectiveRecorder {
    fn type_name(&self) -> &str {
        "ReflectiveRecorder"
    }

    fn methods(&self) -> Vec<Method<'_>> {
        vec![
            Method::new("withKeywordArguments", [ParameterType::Map], move |arguments| {
                self.record("withKeywordArguments", &arguments);
                Ok(self.result.clone())
            }),
            Method::new("configure", [ParameterType::Closure], move |arguments| {
                self.record("configure", &arguments);
                self.configure_child(arguments[0].as_closure())
            }),
            Method::new(
                "configure",
                [ParameterType::Map, ParameterType::Closure],
                move |arguments| {
                    self.record("configure", &arguments);
                    self.configure_child(arguments[1].as_closure())
                },
            ),
            Method::new(
                "concat",
                [ParameterType::Str, ParameterType::Str],
                move |arguments| {
                    self.record("concat", &arguments);
                    let joined: String = arguments.iter().filter_map(Value::as_str).collect();
                    Ok(Value::from(joined))
                },
            ),
        ]
    }

    fn properties(&self) -> Vec<Property<'_>> {
        vec![
            Property::read_write(
                "name",
                move || self.name.borrow().clone(),
                move |value| {
                    *self.name.borrow_mut() = value;
                    Ok(())
                },
            ),
            Property::read_only("kind", || Value::from("reflective")),
        ]
    }
}
