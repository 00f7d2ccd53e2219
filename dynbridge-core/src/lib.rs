//! # Dynbridge Core
//!
//! `dynbridge-core` bridges statically typed Rust functions and an object model whose
//! methods are resolved by name at call time.
//!
//! ## Key Components
//!
//! * **[`Closure`]:** The untyped callable of the object model. Typed functions of arity
//!   0, 1 and 2 are adapted into closures with [`Closure::nullary`], [`Closure::unary`] and
//!   [`Closure::binary`]. [`Closure::delegate_bound`] runs a function against a settable
//!   delegate instead of a positional argument.
//! * **[`Value`]:** The type-erased, nullable value passed through every call.
//! * **[`Object`] & [`DynamicObject`]:** The shape of a dispatch target. Objects either expose a
//!   native "invoke by name" entry point or a reflective table of [`Method`]s.
//! * **[`BuilderScope`]:** Wraps a target and exposes name-based invocation with positional
//!   arguments, keyword arguments or nested configuration blocks.
//!
//! ## Example
//!
//! ```rust
//! use dynbridge_core::{InvokeError, Method, Object, ParameterType, Value, WithBuilder, kwargs};
//! use std::rc::Rc;
//!
//! struct Greeter;
//!
//! impl Object for Greeter {
//!     fn methods(&self) -> Vec<Method<'_>> {
//!         vec![Method::new("greet", [ParameterType::Map], |arguments| {
//!             match arguments.first() {
//!                 Some(Value::Map(map)) => Ok(map.get("name").cloned().unwrap_or(Value::Null)),
//!                 _ => Ok(Value::Null),
//!             }
//!         })]
//!     }
//! }
//!
//! let target = Value::object(Rc::new(Greeter));
//! let greeted = target.with_builder(|scope| scope.invoke_with("greet", kwargs! { "name" => "crab" }));
//!
//! assert_eq!(greeted?, Value::from("crab"));
//! # Ok::<(), InvokeError>(())
//! ```
//!
//! ## Feature Flags
//!
//! * `json` (default): Conversions between [`Value`] and `serde_json::Value`, and JSON keyword
//!   arguments through [`BuilderScope::invoke_with_json`].
pub mod builder;
pub mod closure;
pub mod error;
pub mod object;
pub mod value;

pub use builder::{BuilderScope, DispatchCapability, WithBuilder, with_builder};
pub use closure::{Closure, IntoReturn};
pub use error::InvokeError;
pub use object::{DynamicObject, Method, Object, ObjectRef, Parameter, ParameterType, Property};
pub use value::{FromValue, IntoValue, KeywordArguments, ListRef, Value};

#[cfg(feature = "json")]
pub use serde_json;

/// Type alias for the standard boxed error carried by [`InvokeError::Custom`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
