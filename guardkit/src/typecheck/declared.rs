use serde_json::Value;
use std::fmt::Display;

/// Represents the type a parameter (or the return slot) is declared with.
///
/// Runtime values are [`serde_json::Value`]s, so the declared types mirror the
/// JSON data model with two refinements:
/// - `Integer` is a subtype of `Number` (an integer value is accepted where a
///   number is declared, a fractional value is not accepted as an integer).
/// - `Optional(T)` accepts `null` as well as anything `T` accepts.
///
/// `Any` accepts every value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    Any,
    Null,
    Bool,
    Integer,
    Number,
    String,
    Array(Box<DeclaredType>),
    Object,
    Optional(Box<DeclaredType>),
}

impl DeclaredType {
    /// Shorthand for `Array(Box::new(elem))`.
    pub fn array(elem: DeclaredType) -> Self {
        DeclaredType::Array(Box::new(elem))
    }

    /// Shorthand for `Optional(Box::new(inner))`.
    pub fn optional(inner: DeclaredType) -> Self {
        DeclaredType::Optional(Box::new(inner))
    }

    /// Returns `true` when `value` is an instance of this type or of one of its subtypes.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            DeclaredType::Any => true,
            DeclaredType::Null => value.is_null(),
            DeclaredType::Bool => value.is_boolean(),
            DeclaredType::Integer => match value {
                Value::Number(n) => n.is_i64() || n.is_u64(),
                _ => false,
            },
            DeclaredType::Number => value.is_number(),
            DeclaredType::String => value.is_string(),
            DeclaredType::Array(elem) => match value {
                Value::Array(items) => items.iter().all(|item| elem.accepts(item)),
                _ => false,
            },
            DeclaredType::Object => value.is_object(),
            DeclaredType::Optional(inner) => value.is_null() || inner.accepts(value),
        }
    }
}

impl Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Integer => write!(f, "integer"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Array(elem) => write!(f, "array<{}>", elem),
            Self::Object => write!(f, "object"),
            Self::Optional(inner) => write!(f, "optional<{}>", inner),
        }
    }
}

/// Name of the most specific runtime type of `value`, as used in mismatch messages.
pub fn runtime_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
