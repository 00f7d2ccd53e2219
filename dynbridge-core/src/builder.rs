//! # Builder Scope
//!
//! A [`BuilderScope`] wraps a target (its **delegate**) and lets caller code invoke the target's
//! methods by name, without knowing how the target resolves them.
//!
//! The dispatch strategy is decided once, when the scope is created:
//!
//! * **[`DispatchCapability::NativeDynamic`]**: the target exposes a
//!   [`DynamicObject`](crate::object::DynamicObject). Every call
//!   becomes exactly one `invoke_method(name, arguments)`.
//! * **[`DispatchCapability::Reflective`]**: the target's method table is searched for a method
//!   with the same name whose parameters accept the arguments, and that method is called.
//!
//! ## Calling conventions
//!
//! | Call                                         | Arguments sent to the target |
//! |----------------------------------------------|------------------------------|
//! | [`invoke(name, args)`](BuilderScope::invoke)  | `args`                       |
//! | [`invoke_with(name, kwargs)`](BuilderScope::invoke_with) | `[map]`          |
//! | [`invoke_nested(name, block)`](BuilderScope::invoke_nested) | `[closure]`   |
//! | [`invoke_with_nested(name, kwargs, block)`](BuilderScope::invoke_with_nested) | `[map, closure]` |
//!
//! Nested blocks are sent as a zero-parameter [`Closure`]. When the target sets the closure's
//! delegate (usually through [`Closure::configure`]) and calls it, the block runs against a new
//! scope over that delegate. Every call returns the target's own result for that call; the
//! block's value is only returned to whoever invoked the closure.
//!
//! ## Example: nested blocks
//!
//! ```rust
//! use dynbridge_core::{Closure, Method, Object, Value, WithBuilder};
//! use std::rc::Rc;
//!
//! struct Child;
//!
//! impl Object for Child {
//!     fn methods(&self) -> Vec<Method<'_>> {
//!         vec![Method::nullary("ping", || Ok("pong"))]
//!     }
//! }
//!
//! struct Parent(Value);
//!
//! impl Object for Parent {
//!     fn methods(&self) -> Vec<Method<'_>> {
//!         vec![Method::unary("child", move |block: Closure| {
//!             block.configure(self.0.clone())?;
//!             Ok("configured")
//!         })]
//!     }
//! }
//!
//! let parent = Value::object(Rc::new(Parent(Value::object(Rc::new(Child)))));
//!
//! let result = parent.with_builder(|scope| {
//!     scope.invoke_nested("child", |child| {
//!         assert_eq!(child.invoke("ping", vec![])?, Value::from("pong"));
//!         Ok::<_, dynbridge_core::InvokeError>(())
//!     })
//! })?;
//!
//! assert_eq!(result, Value::from("configured"));
//! # Ok::<(), dynbridge_core::InvokeError>(())
//! ```
mod dispatch;

pub use dispatch::DispatchCapability;

use crate::{
    closure::{Closure, IntoReturn},
    error::InvokeError,
    object::ObjectRef,
    value::{IntoValue, KeywordArguments, Value},
};
use dispatch::Dispatcher;

/// A name-based invocation surface over a borrowed target.
pub struct BuilderScope<'a> {
    delegate: &'a Value,
    dispatcher: Dispatcher<'a>,
}

impl<'a> BuilderScope<'a> {
    /// Creates a scope over `delegate`, detecting its dispatch capability.
    pub fn new(delegate: &'a Value) -> Self {
        let dispatcher = Dispatcher::new(delegate);

        tracing::debug!(
            target_type = %delegate.describe(),
            capability = %dispatcher.capability(),
            "created builder scope"
        );

        Self {
            delegate,
            dispatcher,
        }
    }

    /// The target this scope dispatches against.
    pub fn delegate(&self) -> &'a Value {
        self.delegate
    }

    /// The dispatch strategy detected when this scope was created.
    pub fn capability(&self) -> DispatchCapability {
        self.dispatcher.capability()
    }

    /// Invokes `name` with positional arguments.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The target's result, unchanged.
    /// * `Err(InvokeError::MethodNotFound)` - If reflective lookup found no matching method.
    /// * `Err(InvokeError)` - Any error raised by the target, unchanged.
    pub fn invoke(&self, name: &str, arguments: Vec<Value>) -> Result<Value, InvokeError> {
        tracing::debug!(
            method = name,
            capability = %self.capability(),
            arguments = arguments.len(),
            "dispatching"
        );

        self.dispatcher.invoke(self.delegate, name, arguments)
    }

    /// Invokes `name` with a single keyword-argument map.
    pub fn invoke_with(
        &self,
        name: &str,
        keyword_arguments: KeywordArguments,
    ) -> Result<Value, InvokeError> {
        self.invoke(name, vec![Value::Map(keyword_arguments)])
    }

    /// Invokes `name` with a nested configuration block.
    ///
    /// The target receives a closure; whenever it is called, `block` runs against a new scope
    /// over the closure's delegate at that moment. The returned value is the target's result for
    /// `name`, not the block's.
    pub fn invoke_nested<F, R>(&self, name: &str, block: F) -> Result<Value, InvokeError>
    where
        F: Fn(&BuilderScope<'_>) -> R + 'static,
        R: IntoReturn,
    {
        self.invoke(name, vec![Value::Closure(nested(block))])
    }

    /// Invokes `name` with a keyword-argument map followed by a nested configuration block.
    pub fn invoke_with_nested<F, R>(
        &self,
        name: &str,
        keyword_arguments: KeywordArguments,
        block: F,
    ) -> Result<Value, InvokeError>
    where
        F: Fn(&BuilderScope<'_>) -> R + 'static,
        R: IntoReturn,
    {
        self.invoke(
            name,
            vec![Value::Map(keyword_arguments), Value::Closure(nested(block))],
        )
    }

    /// Invokes `name` with keyword arguments taken from a JSON object.
    #[cfg(feature = "json")]
    pub fn invoke_with_json(
        &self,
        name: &str,
        keyword_arguments: serde_json::Value,
    ) -> Result<Value, InvokeError> {
        let keyword_arguments =
            KeywordArguments::try_from(keyword_arguments).map_err(InvokeError::custom)?;
        self.invoke_with(name, keyword_arguments)
    }

    /// Reads a property of the target.
    pub fn property(&self, name: &str) -> Result<Value, InvokeError> {
        self.dispatcher.get_property(self.delegate, name)
    }

    /// Writes a property of the target.
    pub fn set_property<V: IntoValue>(&self, name: &str, value: V) -> Result<(), InvokeError> {
        self.dispatcher
            .set_property(self.delegate, name, value.into_value())
    }
}

/// Wraps a block into the closure sent to the target.
fn nested<F, R>(block: F) -> Closure
where
    F: Fn(&BuilderScope<'_>) -> R + 'static,
    R: IntoReturn,
{
    Closure::new(0, move |delegate, _| {
        let scope = BuilderScope::new(delegate);
        block(&scope).into_return()
    })
}

/// Runs `block` with a [`BuilderScope`] over `target` and returns the block's own value.
pub fn with_builder<F, R>(target: &Value, block: F) -> R
where
    F: FnOnce(&BuilderScope<'_>) -> R,
{
    let scope = BuilderScope::new(target);
    block(&scope)
}

/// Adds [`with_builder`] as a method to dispatch targets.
pub trait WithBuilder {
    fn with_builder<F, R>(&self, block: F) -> R
    where
        F: FnOnce(&BuilderScope<'_>) -> R;
}

impl WithBuilder for Value {
    fn with_builder<F, R>(&self, block: F) -> R
    where
        F: FnOnce(&BuilderScope<'_>) -> R,
    {
        with_builder(self, block)
    }
}

impl WithBuilder for ObjectRef {
    fn with_builder<F, R>(&self, block: F) -> R
    where
        F: FnOnce(&BuilderScope<'_>) -> R,
    {
        with_builder(&Value::Object(self.clone()), block)
    }
}

impl std::fmt::Debug for BuilderScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderScope")
            .field("delegate", self.delegate)
            .field("capability", &self.capability())
            .finish()
    }
}
