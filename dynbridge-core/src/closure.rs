//! # Untyped Closures
//!
//! A [`Closure`] is the callable shape of the object model: it takes a fixed number of raw
//! [`Value`] arguments and returns a single, possibly null, [`Value`].
//!
//! Every closure also carries a **delegate**, a settable receiver that the closure body can read
//! at call time. Targets use it to hand a nested configuration block the object it should
//! configure (see [`Closure::configure`]).
//!
//! Typed Rust functions are turned into closures by the adapters in [`adapters`].
//!
//! ## Example
//!
//! ```rust
//! use dynbridge_core::{Closure, Value};
//!
//! let concat = Closure::binary(|x: String, y: String| x + &y);
//!
//! assert_eq!(concat.call2("foo", "bar")?, Value::from("foobar"));
//! assert!(concat.call1("foo").is_err());
//! # Ok::<(), dynbridge_core::InvokeError>(())
//! ```
pub mod adapters;

pub use adapters::IntoReturn;

use crate::{
    error::InvokeError,
    value::{IntoValue, Value},
};
use std::{cell::RefCell, fmt, rc::Rc};

type ClosureBody = dyn Fn(&Value, Vec<Value>) -> Result<Value, InvokeError>;

/// A shared handle to an untyped callable.
///
/// Cloning a `Closure` shares the same instance, including its delegate.
#[derive(Clone)]
pub struct Closure(Rc<ClosureState>);

struct ClosureState {
    parameter_count: usize,
    delegate: RefCell<Value>,
    body: Box<ClosureBody>,
}

impl Closure {
    /// Creates a closure written directly against the untyped calling convention.
    ///
    /// # Arguments
    ///
    /// * `parameter_count` - The exact number of arguments the closure accepts.
    /// * `body` - Receives the delegate current at call time and the positional arguments.
    pub fn new<F>(parameter_count: usize, body: F) -> Self
    where
        F: Fn(&Value, Vec<Value>) -> Result<Value, InvokeError> + 'static,
    {
        Self(Rc::new(ClosureState {
            parameter_count,
            delegate: RefCell::new(Value::Null),
            body: Box::new(body),
        }))
    }

    pub fn parameter_count(&self) -> usize {
        self.0.parameter_count
    }

    /// Returns the current delegate.
    pub fn delegate(&self) -> Value {
        self.0.delegate.borrow().clone()
    }

    /// Replaces the current delegate. `Null` is a valid delegate.
    pub fn set_delegate<T: IntoValue>(&self, delegate: T) {
        *self.0.delegate.borrow_mut() = delegate.into_value();
    }

    /// Invokes the closure.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - Whatever the body returned, `Null` included.
    /// * `Err(InvokeError::ArityMismatch)` - If `arguments` does not match the parameter count.
    /// * `Err(InvokeError)` - Any error raised by the body, unchanged.
    pub fn call(&self, arguments: Vec<Value>) -> Result<Value, InvokeError> {
        if arguments.len() != self.0.parameter_count {
            return Err(InvokeError::ArityMismatch {
                expected: self.0.parameter_count,
                actual: arguments.len(),
            });
        }

        tracing::trace!(
            parameters = self.0.parameter_count,
            delegate = self.0.delegate.borrow().type_name(),
            "invoking closure"
        );

        // The body may reassign the delegate, so it only sees a snapshot.
        let delegate = self.delegate();
        (self.0.body)(&delegate, arguments)
    }

    pub fn call0(&self) -> Result<Value, InvokeError> {
        self.call(Vec::new())
    }

    pub fn call1<A: IntoValue>(&self, a: A) -> Result<Value, InvokeError> {
        self.call(vec![a.into_value()])
    }

    pub fn call2<A: IntoValue, B: IntoValue>(&self, a: A, b: B) -> Result<Value, InvokeError> {
        self.call(vec![a.into_value(), b.into_value()])
    }

    /// Runs this closure against `target`.
    ///
    /// The delegate is set to `target`, then the closure is called with `target` as its only
    /// argument if it declares one, or with no arguments otherwise.
    pub fn configure(&self, target: Value) -> Result<Value, InvokeError> {
        self.set_delegate(target.clone());

        match self.0.parameter_count {
            0 => self.call0(),
            _ => self.call1(target),
        }
    }

    /// Returns `true` if both handles point to the same closure instance.
    pub fn ptr_eq(&self, other: &Closure) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("parameter_count", &self.0.parameter_count)
            .field("delegate", &self.0.delegate.borrow().type_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_closures_are_invoked_with_their_arguments() {
        let invocations = Rc::new(RefCell::new(Vec::new()));

        let log = invocations.clone();
        let c0 = Closure::new(0, move |_, _| {
            log.borrow_mut().push("c0".to_string());
            Ok(Value::Bool(true))
        });

        let log = invocations.clone();
        let c1 = Closure::new(1, move |_, arguments| {
            log.borrow_mut().push(format!("c1({:?})", arguments[0]));
            Ok(Value::Bool(true))
        });

        let log = invocations.clone();
        let c2 = Closure::new(2, move |_, arguments| {
            log.borrow_mut()
                .push(format!("c2({:?}, {:?})", arguments[0], arguments[1]));
            Ok(Value::Bool(true))
        });

        assert_eq!(c0.call0().unwrap(), Value::Bool(true));
        assert_eq!(c1.call1(42).unwrap(), Value::Bool(true));
        assert_eq!(c2.call2(11, 33).unwrap(), Value::Bool(true));

        assert_eq!(
            *invocations.borrow(),
            vec!["c0", "c1(Int(42))", "c2(Int(11), Int(33))"]
        );
    }

    #[test]
    fn wrong_arity_fails_before_the_body_runs() {
        let ran = Rc::new(RefCell::new(false));
        let flag = ran.clone();
        let closure = Closure::new(1, move |_, _| {
            *flag.borrow_mut() = true;
            Ok(Value::Null)
        });

        let err = closure.call2(1, 2).unwrap_err();

        assert!(matches!(
            err,
            InvokeError::ArityMismatch {
                expected: 1,
                actual: 2
            }
        ));
        assert!(!*ran.borrow());
    }

    #[test]
    fn body_observes_the_delegate_present_at_call_time() {
        let closure = Closure::new(0, |delegate, _| Ok(delegate.clone()));

        assert_eq!(closure.call0().unwrap(), Value::Null);

        closure.set_delegate("first");
        assert_eq!(closure.call0().unwrap(), Value::from("first"));

        closure.set_delegate(Value::Null);
        assert_eq!(closure.call0().unwrap(), Value::Null);
    }

    #[test]
    fn body_may_reassign_its_own_delegate() {
        let closure = Rc::new(RefCell::new(None::<Closure>));
        let handle = closure.clone();
        let inner = Closure::new(0, move |delegate, _| {
            if let Some(this) = handle.borrow().as_ref() {
                this.set_delegate("replaced");
            }
            Ok(delegate.clone())
        });
        *closure.borrow_mut() = Some(inner.clone());

        inner.set_delegate("original");

        assert_eq!(inner.call0().unwrap(), Value::from("original"));
        assert_eq!(inner.delegate(), Value::from("replaced"));
    }

    #[test]
    fn configure_sets_delegate_and_passes_target_when_declared() {
        let no_args = Closure::new(0, |delegate, _| Ok(delegate.clone()));
        let one_arg = Closure::new(1, |_, mut arguments| Ok(arguments.remove(0)));

        assert_eq!(no_args.configure(Value::from(7)).unwrap(), Value::Int(7));
        assert_eq!(no_args.delegate(), Value::Int(7));
        assert_eq!(one_arg.configure(Value::from(8)).unwrap(), Value::Int(8));
        assert_eq!(one_arg.delegate(), Value::Int(8));
    }
}
