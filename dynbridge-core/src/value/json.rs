//! # JSON <-> Value
//!
//! Conversions between [`Value`] and `serde_json::Value`, so keyword arguments can be supplied
//! as a JSON object and plain results can be exported as JSON.
//!
//! Closures and objects have no JSON form. Object keys keep their order (`preserve_order`).
use super::{KeywordArguments, Value};
use serde_json::{Map, Number};

/// Errors that can occur when converting between [`Value`] and JSON.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum JsonConversionError {
    #[error("Values of type '{0}' cannot be represented as JSON")]
    Unrepresentable(&'static str),
    #[error("Float '{0}' cannot be represented as a JSON number")]
    NonFiniteNumber(f64),
    #[error("Keyword arguments must be a JSON object, got '{0}'")]
    NotAnObject(String),
    #[error("Integer '{0}' does not fit in a 64-bit signed integer")]
    IntegerOutOfRange(u64),
    #[error("Number '{0}' cannot be represented as a value")]
    UnsupportedNumber(String),
}

impl Value {
    /// Converts a JSON document into a [`Value`]. Arrays become fresh lists.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - If every number fits in `Int` or `Float` without changing its meaning.
    /// * `Err(JsonConversionError::IntegerOutOfRange)` - For integers above `i64::MAX`, which
    ///   would otherwise lose precision as a float.
    pub fn from_json(json: serde_json::Value) -> Result<Self, JsonConversionError> {
        let value = match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number(&n)?,
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(
                items
                    .into_iter()
                    .map(Value::from_json)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            serde_json::Value::Object(map) => Value::Map(KeywordArguments::from_json_object(map)?),
        };
        Ok(value)
    }

    /// Converts this value into JSON.
    ///
    /// # Returns
    ///
    /// * `Ok(serde_json::Value)` - For nulls, scalars, and lists or maps made only of those.
    /// * `Err(JsonConversionError)` - If a closure, an object or a non-finite float is reached.
    pub fn to_json(&self) -> Result<serde_json::Value, JsonConversionError> {
        match self {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Int(i) => Ok(serde_json::Value::Number((*i).into())),
            Value::Float(x) => Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .ok_or(JsonConversionError::NonFiniteNumber(*x)),
            Value::Str(s) => Ok(serde_json::Value::String(s.clone())),
            Value::List(items) => items
                .borrow()
                .iter()
                .map(Value::to_json)
                .collect::<Result<Vec<_>, _>>()
                .map(serde_json::Value::Array),
            Value::Map(map) => map
                .iter()
                .map(|(k, v)| Ok::<_, JsonConversionError>((k.to_string(), v.to_json()?)))
                .collect::<Result<Map<_, _>, _>>()
                .map(serde_json::Value::Object),
            other => Err(JsonConversionError::Unrepresentable(other.type_name())),
        }
    }
}

fn number(n: &Number) -> Result<Value, JsonConversionError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Int(i));
    }
    match (n.as_u64(), n.as_f64()) {
        (Some(u), _) => Err(JsonConversionError::IntegerOutOfRange(u)),
        (None, Some(x)) => Ok(Value::Float(x)),
        (None, None) => Err(JsonConversionError::UnsupportedNumber(n.to_string())),
    }
}

impl KeywordArguments {
    /// Builds keyword arguments from the entries of a JSON object, in document order.
    pub fn from_json_object(
        map: Map<String, serde_json::Value>,
    ) -> Result<Self, JsonConversionError> {
        map.into_iter()
            .map(|(k, v)| Ok::<_, JsonConversionError>((k, Value::from_json(v)?)))
            .collect()
    }
}

impl TryFrom<serde_json::Value> for KeywordArguments {
    type Error = JsonConversionError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Object(map) => Self::from_json_object(map),
            other => Err(JsonConversionError::NotAnObject(other.to_string())),
        }
    }
}
