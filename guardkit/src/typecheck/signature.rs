use super::declared::{DeclaredType, runtime_type};
use crate::error::GuardError;
use serde_json::Value;
use std::collections::HashSet;

/// One declared positional parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: DeclaredType,
}

/// The declared shape of a callable: its positional parameters in call order and its return type.
///
/// Built once when a callable is wrapped and reused on every call. Arguments
/// are matched to parameters purely by position: argument `i` is checked
/// against the `i`-th declared parameter.
///
/// ```rust
/// use guardkit::typecheck::{DeclaredType, Signature};
/// use serde_json::json;
///
/// let sig = Signature::new("greet")
///     .param("name", DeclaredType::String)
///     .param("times", DeclaredType::Integer)
///     .returns(DeclaredType::String);
///
/// assert!(sig.check_args(&[json!("Ada"), json!(2)]).is_ok());
/// assert!(sig.check_args(&[json!("Ada"), json!("2")]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    name: String,
    params: Vec<Param>,
    returns: Option<DeclaredType>,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Signature {
            name: name.into(),
            params: Vec::new(),
            returns: None,
        }
    }

    /// Appends a positional parameter.
    pub fn param(mut self, name: impl Into<String>, ty: DeclaredType) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty,
        });
        self
    }

    /// Declares the return type.
    pub fn returns(mut self, ty: DeclaredType) -> Self {
        self.returns = Some(ty);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn return_type(&self) -> Option<&DeclaredType> {
        self.returns.as_ref()
    }

    /// Checks that the signature is complete: a declared return type and unique parameter names.
    pub fn validate(&self) -> Result<(), GuardError> {
        if self.returns.is_none() {
            return Err(GuardError::Configuration(format!(
                "`{}` has no declared type for `return`",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for param in &self.params {
            if !seen.insert(param.name.as_str()) {
                return Err(GuardError::Configuration(format!(
                    "`{}` declares parameter `{}` more than once",
                    self.name, param.name
                )));
            }
        }

        Ok(())
    }

    /// Checks every positional argument against the parameter declared at the same position.
    ///
    /// Stops at the first failure. An argument beyond the last declared
    /// parameter is a configuration error, not a type mismatch.
    pub fn check_args(&self, args: &[Value]) -> Result<(), GuardError> {
        for (i, arg) in args.iter().enumerate() {
            let Some(param) = self.params.get(i) else {
                return Err(GuardError::Configuration(format!(
                    "`{}` has no declared type for positional argument {} ({} declared)",
                    self.name,
                    i,
                    self.params.len()
                )));
            };
            check_value(&param.name, &param.ty, arg)?;
        }
        Ok(())
    }

    /// Checks a return value against the declared return type.
    pub fn check_return(&self, value: &Value) -> Result<(), GuardError> {
        match &self.returns {
            Some(ty) => check_value("return", ty, value),
            None => Err(GuardError::Configuration(format!(
                "`{}` has no declared type for `return`",
                self.name
            ))),
        }
    }
}

fn check_value(name: &str, ty: &DeclaredType, value: &Value) -> Result<(), GuardError> {
    if ty.accepts(value) {
        Ok(())
    } else {
        Err(GuardError::TypeMismatch {
            parameter: name.to_string(),
            expected: ty.to_string(),
            actual: runtime_type(value).to_string(),
        })
    }
}

/// Builds a [`Signature`] from a function header.
///
/// Parameter and return types are [`DeclaredType`] expressions; the enum's
/// variants are in scope inside the macro, so bare names such as `Number`
/// work.
///
/// ```rust
/// use guardkit::signature;
/// use guardkit::typecheck::DeclaredType;
///
/// let sig = signature!(fn area(width: Number, height: Number) -> Number);
/// assert_eq!(sig.params().len(), 2);
/// assert_eq!(sig.return_type(), Some(&DeclaredType::Number));
///
/// let tags = signature!(fn tags(items: DeclaredType::array(String)) -> Integer);
/// assert_eq!(tags.params()[0].ty.to_string(), "array<string>");
/// ```
#[macro_export]
macro_rules! signature {
    (fn $name:ident ( $( $param:ident : $ty:expr ),* $(,)? ) -> $ret:expr) => {{
        #[allow(unused_imports)]
        use $crate::typecheck::DeclaredType::*;
        $crate::typecheck::Signature::new(stringify!($name))
            $( .param(stringify!($param), $ty) )*
            .returns($ret)
    }};
    (fn $name:ident ( $( $param:ident : $ty:expr ),* $(,)? )) => {{
        #[allow(unused_imports)]
        use $crate::typecheck::DeclaredType::*;
        $crate::typecheck::Signature::new(stringify!($name))
            $( .param(stringify!($param), $ty) )*
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sig() -> Signature {
        Signature::new("test")
            .param("name", DeclaredType::String)
            .returns(DeclaredType::Number)
    }

    #[test]
    fn test_check_args_success() {
        assert!(sig().check_args(&[json!("asd")]).is_ok());
        assert!(sig().check_args(&[]).is_ok());
    }

    #[test]
    fn test_check_args_mismatch_names_parameter() {
        let res = sig().check_args(&[json!(42)]);
        match res {
            Err(GuardError::TypeMismatch {
                parameter,
                expected,
                actual,
            }) => {
                assert_eq!(parameter, "name");
                assert_eq!(expected, "string");
                assert_eq!(actual, "integer");
            }
            other => panic!("expected a type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_positional_is_configuration_error() {
        let res = sig().check_args(&[json!("a"), json!("b")]);
        assert!(res.is_err());
        if let Err(e) = res {
            assert!(e.is_configuration());
            assert_eq!(
                e.to_string(),
                "Configuration error: `test` has no declared type for positional argument 1 (1 declared)"
            );
        }
    }

    #[test]
    fn test_check_return() {
        assert!(sig().check_return(&json!(3.0)).is_ok());
        let err = sig().check_return(&json!("3")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Variable `return` should be type (number) but instead is type (string)"
        );
    }

    #[test]
    fn test_validate_requires_return() {
        let incomplete = Signature::new("f").param("x", DeclaredType::Any);
        assert!(incomplete.validate().unwrap_err().is_configuration());
        assert!(incomplete.check_return(&json!(1)).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let dup = Signature::new("f")
            .param("x", DeclaredType::Any)
            .param("x", DeclaredType::Any)
            .returns(DeclaredType::Any);
        let err = dup.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: `f` declares parameter `x` more than once"
        );
    }

    #[test]
    fn test_signature_macro() {
        let built = signature!(fn test(name: String) -> Number);
        assert_eq!(built, sig());

        let no_ret = signature!(fn f(a: Integer, b: DeclaredType::optional(Bool)));
        assert_eq!(no_ret.name(), "f");
        assert_eq!(no_ret.params()[1].ty, DeclaredType::optional(DeclaredType::Bool));
        assert!(no_ret.return_type().is_none());
    }
}
