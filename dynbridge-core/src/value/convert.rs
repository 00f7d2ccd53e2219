use super::{KeywordArguments, ListRef, Value};
use crate::{closure::Closure, object::ObjectRef, object::ParameterType};

/// Conversion from a [`Value`] into a typed parameter.
///
/// A conversion only fails when the target type cannot represent the value, in which case the
/// value is handed back untouched so the caller can report what was found.
/// `Option<T>` and `Value` accept `Null`; every other implementation rejects it.
pub trait FromValue: Sized {
    /// The parameter type this Rust type is declared as in a method table.
    const PARAMETER_TYPE: ParameterType;

    /// Whether `Null` converts successfully.
    const NULLABLE: bool = false;

    fn from_value(value: Value) -> Result<Self, Value>;
}

/// Conversion from a typed Rust value into a [`Value`]. Infallible.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl FromValue for Value {
    const PARAMETER_TYPE: ParameterType = ParameterType::Any;
    const NULLABLE: bool = true;

    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const PARAMETER_TYPE: ParameterType = T::PARAMETER_TYPE;
    const NULLABLE: bool = true;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

macro_rules! from_value {
    ($ty:ty, $parameter:ident, $pattern:pat => $out:expr) => {
        impl FromValue for $ty {
            const PARAMETER_TYPE: ParameterType = ParameterType::$parameter;

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    $pattern => Ok($out),
                    other => Err(other),
                }
            }
        }
    };
}

from_value!(bool, Bool, Value::Bool(b) => b);
from_value!(i64, Int, Value::Int(i) => i);
from_value!(f64, Float, Value::Float(x) => x);
from_value!(String, Str, Value::Str(s) => s);
from_value!(ListRef, List, Value::List(items) => items);
from_value!(KeywordArguments, Map, Value::Map(map) => map);
from_value!(Closure, Closure, Value::Closure(closure) => closure);
from_value!(ObjectRef, Object, Value::Object(object) => object);

impl FromValue for i32 {
    const PARAMETER_TYPE: ParameterType = ParameterType::Int;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(i) => i32::try_from(i).map_err(|_| Value::Int(i)),
            other => Err(other),
        }
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::list(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(self.to_string())
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::Int(self.into())
    }
}

macro_rules! into_value {
    ($ty:ty, $variant:ident) => {
        impl IntoValue for $ty {
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }

        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }
    };
}

into_value!(bool, Bool);
into_value!(i64, Int);
into_value!(f64, Float);
into_value!(String, Str);
into_value!(ListRef, List);
into_value!(KeywordArguments, Map);
into_value!(Closure, Closure);
into_value!(ObjectRef, Object);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_parameters_accept_null() {
        assert_eq!(Option::<String>::from_value(Value::Null), Ok(None));
        assert_eq!(
            Option::<String>::from_value(Value::from("crab")),
            Ok(Some("crab".to_string()))
        );
    }

    #[test]
    fn non_optional_parameters_reject_null() {
        assert_eq!(String::from_value(Value::Null), Err(Value::Null));
    }

    #[test]
    fn nullability_follows_the_rust_type() {
        assert!(!KeywordArguments::NULLABLE);
        assert!(Option::<KeywordArguments>::NULLABLE);
        assert!(Value::NULLABLE);
    }

    #[test]
    fn out_of_range_integers_are_rejected() {
        let big = Value::Int(i64::MAX);

        assert_eq!(i32::from_value(big.clone()), Err(big));
    }

    #[test]
    fn absent_results_become_null() {
        assert_eq!(None::<String>.into_value(), Value::Null);
        assert_eq!(().into_value(), Value::Null);
    }
}
