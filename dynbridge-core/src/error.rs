//! # Invocation Errors
//!
//! Every layer of the bridge reports failures through [`InvokeError`].
//!
//! Errors raised by a wrapped function or by a target's own dynamic dispatch are returned to
//! the caller as they are: this crate never retries, wraps twice or swallows a failure.
use crate::BoxError;

/// Errors that can occur while invoking a closure or dispatching a method by name.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("Closure expects {expected} argument(s) but was called with {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("Argument {position} expected a value of type '{expected}' but got '{found}'")]
    ArgumentType {
        position: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Delegate expected a value of type '{expected}' but got '{found}'")]
    DelegateType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("No method '{method}{arguments}' found on '{target}'")]
    MethodNotFound {
        method: String,
        arguments: String,
        target: String,
    },
    #[error("Property '{property}' not found on '{target}'")]
    PropertyNotFound { property: String, target: String },
    #[error("Property '{property}' of '{target}' is read-only")]
    ReadOnlyProperty { property: String, target: String },
    #[error(transparent)]
    Custom(BoxError),
}

impl InvokeError {
    /// Carries an arbitrary error raised by a wrapped function or a target.
    pub fn custom<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Custom(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_not_found_names_method_and_target() {
        let err = InvokeError::MethodNotFound {
            method: "withKeywordArguments".to_string(),
            arguments: "(map)".to_string(),
            target: "Project".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "No method 'withKeywordArguments(map)' found on 'Project'"
        );
    }

    #[test]
    fn custom_errors_are_transparent() {
        let err = InvokeError::custom("boom");

        assert_eq!(err.to_string(), "boom");
    }
}
