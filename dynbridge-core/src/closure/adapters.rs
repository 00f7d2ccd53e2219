//! # Typed Adapters
//!
//! Adapters that expose typed Rust functions of arity 0, 1 and 2 as [`Closure`]s.
//!
//! Arguments are converted with [`FromValue`] and results with [`IntoReturn`]. The adapters do
//! nothing else: a `Null` argument reaches an `Option<T>` or [`Value`] parameter as-is, and a
//! null result comes back as [`Value::Null`].
use super::Closure;
use crate::{
    error::InvokeError,
    value::{FromValue, IntoValue, Value},
};

/// Conversion of a typed function's result into the result of an untyped call.
///
/// Implemented for every [`IntoValue`] type and for `Result<T, E>`, whose error is propagated
/// as-is through `Into<InvokeError>`.
pub trait IntoReturn {
    fn into_return(self) -> Result<Value, InvokeError>;
}

impl<T: IntoValue> IntoReturn for T {
    fn into_return(self) -> Result<Value, InvokeError> {
        Ok(self.into_value())
    }
}

impl<T, E> IntoReturn for Result<T, E>
where
    T: IntoValue,
    E: Into<InvokeError>,
{
    fn into_return(self) -> Result<Value, InvokeError> {
        self.map(IntoValue::into_value).map_err(Into::into)
    }
}

impl Closure {
    /// Adapts a function taking no arguments.
    pub fn nullary<F, R>(function: F) -> Self
    where
        F: Fn() -> R + 'static,
        R: IntoReturn,
    {
        Closure::new(0, move |_, _| function().into_return())
    }

    /// Adapts a function taking one argument.
    ///
    /// Receiver-style functions (the argument is the value the function runs "as") use the same
    /// surface: the receiver is simply the single argument.
    pub fn unary<F, A, R>(function: F) -> Self
    where
        F: Fn(A) -> R + 'static,
        A: FromValue,
        R: IntoReturn,
    {
        Closure::new(1, move |_, arguments| {
            let [a] = exact(arguments)?;
            function(argument(0, a)?).into_return()
        })
    }

    /// Adapts a function taking two arguments.
    pub fn binary<F, A, B, R>(function: F) -> Self
    where
        F: Fn(A, B) -> R + 'static,
        A: FromValue,
        B: FromValue,
        R: IntoReturn,
    {
        Closure::new(2, move |_, arguments| {
            let [a, b] = exact(arguments)?;
            function(argument(0, a)?, argument(1, b)?).into_return()
        })
    }

    /// Adapts a receiver-style function that runs against the closure's delegate.
    ///
    /// The closure takes no positional arguments. Each call converts the delegate current at
    /// call time into `T`; with `T = Option<_>` or [`Value`] a null delegate is passed through and
    /// the function still runs.
    pub fn delegate_bound<F, T, R>(function: F) -> Self
    where
        F: Fn(T) -> R + 'static,
        T: FromValue,
        R: IntoReturn,
    {
        Closure::new(0, move |delegate, _| {
            let found = delegate.type_name();
            let receiver =
                T::from_value(delegate.clone()).map_err(|_| InvokeError::DelegateType {
                    expected: T::PARAMETER_TYPE.name(),
                    found,
                })?;
            function(receiver).into_return()
        })
    }
}

fn exact<const N: usize>(arguments: Vec<Value>) -> Result<[Value; N], InvokeError> {
    arguments
        .try_into()
        .map_err(|rejected: Vec<Value>| InvokeError::ArityMismatch {
            expected: N,
            actual: rejected.len(),
        })
}

fn argument<A: FromValue>(position: usize, value: Value) -> Result<A, InvokeError> {
    A::from_value(value).map_err(|rejected| InvokeError::ArgumentType {
        position,
        expected: A::PARAMETER_TYPE.name(),
        found: rejected.type_name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ListRef;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn adapts_parameterless_function() {
        let closure = Closure::nullary(|| "CRAB");

        assert_eq!(closure.parameter_count(), 0);
        assert_eq!(closure.call0().unwrap(), Value::from("CRAB"));
    }

    #[test]
    fn adapts_parameterless_null_returning_function() {
        let closure = Closure::nullary(|| None::<String>);

        assert_eq!(closure.call0().unwrap(), Value::Null);
    }

    #[test]
    fn adapts_unary_function() {
        let closure = Closure::unary(|s: String| s.to_uppercase());

        assert_eq!(closure.call1("crab").unwrap(), Value::from("CRAB"));
    }

    #[test]
    fn adapts_unary_null_receiving_function() {
        let closure = Closure::unary(|_: Option<String>| None::<String>);

        assert_eq!(closure.call1(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn adapts_binary_function() {
        let closure = Closure::binary(|x: String, y: String| x + &y);

        assert_eq!(closure.call2("foo", "bar").unwrap(), Value::from("foobar"));
    }

    #[test]
    fn adapts_binary_null_receiving_function() {
        let closure = Closure::binary(|_: Option<String>, _: Option<String>| None::<String>);

        assert_eq!(closure.call2(Value::Null, Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn unary_receiver_mutates_shared_list() {
        let list = Value::list(Vec::<i64>::new());
        let closure =
            Closure::unary(|items: ListRef| items.borrow_mut().push(Value::Int(42)));

        closure.call1(list.clone()).unwrap();

        assert_eq!(list, Value::list([42]));
    }

    #[test]
    fn unary_nullable_receiver_observes_null() {
        let passed = Rc::new(RefCell::new(Value::from("Something non null")));
        let slot = passed.clone();
        let closure = Closure::unary(move |receiver: Value| *slot.borrow_mut() = receiver);

        closure.call1(Value::Null).unwrap();

        assert_eq!(*passed.borrow(), Value::Null);
    }

    #[test]
    fn non_nullable_parameter_rejects_null() {
        let closure = Closure::unary(|s: String| s);

        let err = closure.call1(Value::Null).unwrap_err();

        assert!(matches!(
            err,
            InvokeError::ArgumentType {
                position: 0,
                expected: "string",
                found: "null"
            }
        ));
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let closure = Closure::binary(|x: i64, y: i64| x + y);

        assert!(matches!(
            closure.call1(1),
            Err(InvokeError::ArityMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn function_errors_propagate_unchanged() {
        let closure = Closure::nullary(|| -> Result<Value, InvokeError> {
            Err(InvokeError::custom("exploded"))
        });

        let err = closure.call0().unwrap_err();

        assert!(matches!(&err, InvokeError::Custom(_)));
        assert_eq!(err.to_string(), "exploded");
    }

    #[test]
    fn delegate_bound_runs_against_current_delegate() {
        let list = Value::list(Vec::<i64>::new());
        let closure = Closure::delegate_bound(|items: ListRef| {
            items.borrow_mut().push(Value::Int(42))
        });

        closure.set_delegate(list.clone());
        closure.call0().unwrap();

        assert_eq!(list, Value::list([42]));
    }

    #[test]
    fn delegate_bound_runs_with_null_delegate() {
        let passed = Rc::new(RefCell::new(Value::from("Something non null")));
        let slot = passed.clone();
        let closure = Closure::delegate_bound(move |receiver: Option<Value>| {
            *slot.borrow_mut() = receiver.unwrap_or_default()
        });

        closure.set_delegate(Value::Null);
        closure.call0().unwrap();

        assert_eq!(*passed.borrow(), Value::Null);
    }

    #[test]
    fn delegate_bound_rejects_delegate_of_the_wrong_type() {
        let closure = Closure::delegate_bound(|n: i64| n);

        closure.set_delegate("not a number");

        assert!(matches!(
            closure.call0(),
            Err(InvokeError::DelegateType {
                expected: "int",
                found: "string"
            })
        ));
    }
}
