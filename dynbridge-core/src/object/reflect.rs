use crate::{
    error::InvokeError,
    value::{FromValue, IntoValue, Value},
};
use std::fmt;

type MethodBody<'a> = dyn Fn(Vec<Value>) -> Result<Value, InvokeError> + 'a;
type PropertyGetter<'a> = dyn Fn() -> Value + 'a;
type PropertySetter<'a> = dyn Fn(Value) -> Result<(), InvokeError> + 'a;

/// The declared type of a reflected method parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterType {
    Any,
    Bool,
    Int,
    Float,
    Str,
    List,
    Map,
    Closure,
    Object,
}

impl ParameterType {
    pub fn name(&self) -> &'static str {
        match self {
            ParameterType::Any => "any",
            ParameterType::Bool => "bool",
            ParameterType::Int => "int",
            ParameterType::Float => "float",
            ParameterType::Str => "string",
            ParameterType::List => "list",
            ParameterType::Map => "map",
            ParameterType::Closure => "closure",
            ParameterType::Object => "object",
        }
    }

    /// Returns `true` if a value of this runtime type can be bound to a parameter of this type.
    ///
    /// Only `Any` matches `Null`; whether other parameters take it is decided by [`Parameter`].
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ParameterType::Any, _)
                | (ParameterType::Bool, Value::Bool(_))
                | (ParameterType::Int, Value::Int(_))
                | (ParameterType::Float, Value::Float(_))
                | (ParameterType::Str, Value::Str(_))
                | (ParameterType::List, Value::List(_))
                | (ParameterType::Map, Value::Map(_))
                | (ParameterType::Closure, Value::Closure(_))
                | (ParameterType::Object, Value::Object(_))
        )
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A declared method parameter: its type and whether it takes `Null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parameter {
    kind: ParameterType,
    nullable: bool,
}

impl Parameter {
    pub fn required(kind: ParameterType) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn nullable(kind: ParameterType) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }

    /// The parameter a typed argument of type `A` is declared as.
    pub fn of<A: FromValue>() -> Self {
        Self {
            kind: A::PARAMETER_TYPE,
            nullable: A::NULLABLE,
        }
    }

    pub fn kind(&self) -> ParameterType {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::Null => self.nullable,
            value => self.kind.accepts(value),
        }
    }
}

/// Untyped declarations receive raw values, so they take `Null`.
impl From<ParameterType> for Parameter {
    fn from(kind: ParameterType) -> Self {
        Self::nullable(kind)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// A method of an object, bound to its receiver.
pub struct Method<'a> {
    name: &'static str,
    parameters: Vec<Parameter>,
    body: Box<MethodBody<'a>>,
}

impl<'a> Method<'a> {
    /// Declares a method working on raw arguments.
    ///
    /// `body` is only called with arguments that [`Method::accepts`]. Plain [`ParameterType`]s
    /// are declared nullable.
    pub fn new<P, F>(name: &'static str, parameters: P, body: F) -> Self
    where
        P: IntoIterator,
        P::Item: Into<Parameter>,
        F: Fn(Vec<Value>) -> Result<Value, InvokeError> + 'a,
    {
        Self {
            name,
            parameters: parameters.into_iter().map(Into::<Parameter>::into).collect(),
            body: Box::new(body),
        }
    }

    /// Declares a method without parameters.
    pub fn nullary<R, F>(name: &'static str, body: F) -> Self
    where
        R: IntoValue,
        F: Fn() -> Result<R, InvokeError> + 'a,
    {
        Self::new(name, std::iter::empty::<Parameter>(), move |_| {
            body().map(IntoValue::into_value)
        })
    }

    /// Declares a method of one typed parameter. The parameter type and its nullability follow
    /// `A`, so a `Null` argument only selects this method when `A` can hold it.
    pub fn unary<A, R, F>(name: &'static str, body: F) -> Self
    where
        A: FromValue,
        R: IntoValue,
        F: Fn(A) -> Result<R, InvokeError> + 'a,
    {
        Self::new(name, [Parameter::of::<A>()], move |arguments| {
            let value = arguments.into_iter().next().unwrap_or_default();
            let found = value.type_name();
            let argument = A::from_value(value).map_err(|_| InvokeError::ArgumentType {
                position: 0,
                expected: A::PARAMETER_TYPE.name(),
                found,
            })?;
            body(argument).map(IntoValue::into_value)
        })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Returns `true` if the method can be called with `arguments`.
    pub fn accepts(&self, arguments: &[Value]) -> bool {
        self.parameters.len() == arguments.len()
            && self
                .parameters
                .iter()
                .zip(arguments)
                .all(|(parameter, argument)| parameter.accepts(argument))
    }

    pub fn invoke(&self, arguments: Vec<Value>) -> Result<Value, InvokeError> {
        (self.body)(arguments)
    }
}

impl fmt::Debug for Method<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// A property of an object, bound to its receiver.
pub struct Property<'a> {
    name: &'static str,
    getter: Box<PropertyGetter<'a>>,
    setter: Option<Box<PropertySetter<'a>>>,
}

impl<'a> Property<'a> {
    pub fn read_only<G>(name: &'static str, getter: G) -> Self
    where
        G: Fn() -> Value + 'a,
    {
        Self {
            name,
            getter: Box::new(getter),
            setter: None,
        }
    }

    pub fn read_write<G, S>(name: &'static str, getter: G, setter: S) -> Self
    where
        G: Fn() -> Value + 'a,
        S: Fn(Value) -> Result<(), InvokeError> + 'a,
    {
        Self {
            name,
            getter: Box::new(getter),
            setter: Some(Box::new(setter)),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    pub fn get(&self) -> Value {
        (self.getter)()
    }

    /// Writes the property.
    ///
    /// Returns `Ok(false)` if the property is read-only; the setter's own errors are propagated.
    pub fn set(&self, value: Value) -> Result<bool, InvokeError> {
        match &self.setter {
            Some(setter) => setter(value).map(|_| true),
            None => Ok(false),
        }
    }
}

impl fmt::Debug for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("writable", &self.is_writable())
            .finish_non_exhaustive()
    }
}
