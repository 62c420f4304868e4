//! # Type-Checked Callables
//!
//! Rust checks argument types at compile time, so this module is aimed at the
//! places where that guarantee stops: values that arrive dynamically typed
//! (deserialized JSON, plugin calls, scripted commands) and get handed to a
//! callable that expects a particular shape.
//!
//! A [`Signature`] declares the expected type of every positional parameter
//! and of the return value. [`type_check`] attaches it to a callable and
//! returns a [`TypeChecked`] wrapper with the same calling convention:
//!
//! - positional arguments are checked against the parameter at the same index
//! - keyword arguments are passed through untouched and are **not** checked
//! - arity is not enforced: fewer arguments than declared parameters is fine,
//!   only the supplied ones are checked, so the callable should read them
//!   with `args.get(i)`
//! - the return value is checked against the declared return type
//!
//! Any mismatch fails with [`GuardError::TypeMismatch`]; an incomplete
//! signature fails with [`GuardError::Configuration`].
//!
//! ## Example
//! ```rust
//! use guardkit::signature;
//! use guardkit::typecheck::{Kwargs, type_check};
//! use serde_json::{Value, json};
//!
//! let area = type_check(
//!     signature!(fn area(width: Number, height: Number) -> Number),
//!     |args: &[Value], _kwargs: &Kwargs| {
//!         let w = args.first().and_then(Value::as_f64).unwrap_or_default();
//!         let h = args.get(1).and_then(Value::as_f64).unwrap_or_default();
//!         json!(w * h)
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(area.call_positional(&[json!(2), json!(3.5)]).unwrap(), json!(7.0));
//! assert!(area.call_positional(&[json!("2"), json!(3.5)]).is_err());
//! // missing trailing arguments are not a mismatch
//! assert_eq!(area.call_positional(&[json!(2)]).unwrap(), json!(0.0));
//! ```
use crate::error::GuardError;
use serde_json::Value;
use tracing::debug;

mod declared;
pub use declared::{DeclaredType, runtime_type};
mod signature;
pub use signature::{Param, Signature};

/// Keyword arguments, passed to the wrapped callable as-is.
pub type Kwargs = serde_json::Map<String, Value>;

/// A callable bound to the [`Signature`] it is checked against.
///
/// Created by [`type_check`]. Calling it never mutates the arguments.
pub struct TypeChecked<F> {
    signature: Signature,
    func: F,
}

/// Wraps `func` so that every call is checked against `signature`.
///
/// Fails with [`GuardError::Configuration`] when the signature has no return
/// type or declares a parameter name twice.
pub fn type_check<F>(signature: Signature, func: F) -> Result<TypeChecked<F>, GuardError>
where
    F: Fn(&[Value], &Kwargs) -> Value,
{
    signature.validate()?;
    Ok(TypeChecked { signature, func })
}

impl<F> TypeChecked<F>
where
    F: Fn(&[Value], &Kwargs) -> Value,
{
    /// Checks the positional arguments, calls the wrapped function and checks its return value.
    pub fn call(&self, args: &[Value], kwargs: &Kwargs) -> Result<Value, GuardError> {
        debug!(
            function = self.signature.name(),
            positional = args.len(),
            keyword = kwargs.len(),
            "checking call"
        );

        self.signature.check_args(args)?;
        let result = (self.func)(args, kwargs);
        self.signature.check_return(&result)?;

        Ok(result)
    }

    /// Same as [`call`](Self::call) with no keyword arguments.
    pub fn call_positional(&self, args: &[Value]) -> Result<Value, GuardError> {
        self.call(args, &Kwargs::new())
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Returns the unchecked callable.
    pub fn into_inner(self) -> F {
        self.func
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    fn echo_len() -> TypeChecked<impl Fn(&[Value], &Kwargs) -> Value> {
        type_check(
            Signature::new("echo_len")
                .param("text", DeclaredType::String)
                .returns(DeclaredType::Integer),
            |args: &[Value], _: &Kwargs| {
                json!(args.first().and_then(Value::as_str).map(|s| s.chars().count()).unwrap_or(0))
            },
        )
        .unwrap()
    }

    #[test]
    fn test_call_success() {
        assert_eq!(echo_len().call_positional(&[json!("héllo")]).unwrap(), json!(5));
    }

    #[test]
    fn test_call_argument_mismatch_skips_function() {
        let calls = Cell::new(0);
        let checked = type_check(
            Signature::new("f")
                .param("a", DeclaredType::Integer)
                .param("b", DeclaredType::Integer)
                .returns(DeclaredType::Integer),
            |_: &[Value], _: &Kwargs| {
                calls.set(calls.get() + 1);
                json!(0)
            },
        )
        .unwrap();

        let err = checked.call_positional(&[json!(1), json!("two")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Variable `b` should be type (integer) but instead is type (string)"
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_call_return_mismatch() {
        let checked = type_check(
            Signature::new("test")
                .param("name", DeclaredType::String)
                .returns(DeclaredType::Number),
            |_: &[Value], _: &Kwargs| json!("not a number"),
        )
        .unwrap();

        let err = checked.call_positional(&[json!("asd")]).unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(
            err.to_string(),
            "Variable `return` should be type (number) but instead is type (string)"
        );
    }

    #[test]
    fn test_kwargs_pass_through_unchecked() {
        let checked = type_check(
            Signature::new("greet")
                .param("name", DeclaredType::String)
                .param("loud", DeclaredType::Bool)
                .returns(DeclaredType::String),
            |args: &[Value], kwargs: &Kwargs| {
                let name = args.first().and_then(Value::as_str).unwrap_or_default();
                let loud = kwargs.get("loud").and_then(Value::as_bool).unwrap_or(false);
                if loud {
                    json!(name.to_uppercase())
                } else {
                    json!(name)
                }
            },
        )
        .unwrap();

        let mut kwargs = Kwargs::new();
        kwargs.insert("loud".to_string(), json!(true));
        assert_eq!(checked.call(&[json!("ada")], &kwargs).unwrap(), json!("ADA"));

        // a keyword value of the wrong declared type is not checked
        kwargs.insert("loud".to_string(), json!("yes"));
        assert_eq!(checked.call(&[json!("ada")], &kwargs).unwrap(), json!("ada"));
    }

    #[test]
    fn test_fewer_arguments_than_declared() {
        let checked = type_check(
            Signature::new("f")
                .param("a", DeclaredType::Integer)
                .param("b", DeclaredType::Integer)
                .returns(DeclaredType::Integer),
            |args: &[Value], _: &Kwargs| json!(args.len()),
        )
        .unwrap();

        assert_eq!(checked.call_positional(&[json!(1)]).unwrap(), json!(1));
        assert_eq!(checked.call_positional(&[]).unwrap(), json!(0));
        // the supplied argument is still checked
        assert!(checked.call_positional(&[json!("1")]).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_wrap_without_return_type_fails() {
        let res = type_check(
            Signature::new("f").param("a", DeclaredType::Any),
            |_: &[Value], _: &Kwargs| Value::Null,
        );
        assert!(matches!(res, Err(GuardError::Configuration(_))));
    }

    #[test]
    fn test_too_many_positional_arguments() {
        let err = echo_len()
            .call_positional(&[json!("a"), json!("b")])
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_into_inner_is_unchecked() {
        let raw = echo_len().into_inner();
        assert_eq!(raw(&[json!(12)], &Kwargs::new()), json!(0));
    }
}
