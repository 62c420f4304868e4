//! # Prompt Options
//!
//! [`PromptOptions`] configures [`Terminal::ask`](super::Terminal::ask). It can
//! be built in code with the chained setters, or deserialized from JSON when
//! the configuration comes from outside the program. Missing fields fall back
//! to the defaults below; unknown fields are rejected.
//!
//! | option            | default | effect |
//! |-------------------|---------|--------|
//! | `allowed_values`  | `[]`    | answer must be one of these |
//! | `pattern`         | `""`    | regex that must match from the start of the answer |
//! | `required_length` | none    | exact number of characters |
//! | `case_sensitive`  | `true`  | case handling for `allowed_values` and `pattern` |
//! | `return_case`     | none    | `"upper"` or `"lower"` applied to the accepted answer |
//! | `trim`            | `true`  | strip surrounding whitespace before checking and returning |
//! | `max_retries`     | `3`     | retry ceiling |
//!
//! ```rust
//! use guardkit::utils::{PromptOptions, ReturnCase};
//!
//! let opts = PromptOptions::from_json_str(
//!     r#"{"allowed_values": ["y", "n"], "case_sensitive": false, "return_case": "lower"}"#,
//! )
//! .unwrap();
//! assert_eq!(opts.return_case, Some(ReturnCase::Lower));
//! assert_eq!(opts.max_retries, 3);
//!
//! // 3.3 cannot be used as a retry count
//! assert!(PromptOptions::from_json_str(r#"{"max_retries": 3.3}"#).is_err());
//! ```
use crate::error::GuardError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt::Display, str::FromStr};

/// Usage summary written next to a configuration diagnostic.
pub const USAGE: &str = "\
Expected prompt options:
  allowed_values  (list of strings)  answer must be one of these values
  pattern         (string)           regex the answer must match from its start
  required_length (integer)          exact number of characters in the answer
  case_sensitive  (bool)             case handling for allowed_values and pattern
  return_case     (\"upper\"|\"lower\")  convert the accepted answer
  trim            (bool)             strip surrounding whitespace
  max_retries     (integer)          maximum number of attempts
Only the first of allowed_values, pattern, required_length that is set is applied.";

/// Case conversion applied to an accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnCase {
    Upper,
    Lower,
}

impl ReturnCase {
    pub fn apply(&self, answer: &str) -> String {
        match self {
            ReturnCase::Upper => answer.to_uppercase(),
            ReturnCase::Lower => answer.to_lowercase(),
        }
    }
}

impl Display for ReturnCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upper => write!(f, "upper"),
            Self::Lower => write!(f, "lower"),
        }
    }
}

impl FromStr for ReturnCase {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upper" => Ok(ReturnCase::Upper),
            "lower" => Ok(ReturnCase::Lower),
            other => Err(GuardError::Configuration(format!(
                "return_case must be \"upper\" or \"lower\", got \"{}\"",
                other
            ))),
        }
    }
}

/// Options for a validated prompt. See the module docs for the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptOptions {
    pub allowed_values: Vec<String>,
    pub pattern: String,
    #[serde(deserialize_with = "coerce_optional_count")]
    pub required_length: Option<usize>,
    pub case_sensitive: bool,
    pub return_case: Option<ReturnCase>,
    pub trim: bool,
    #[serde(deserialize_with = "coerce_count")]
    pub max_retries: u32,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            allowed_values: Vec::new(),
            pattern: String::new(),
            required_length: None,
            case_sensitive: true,
            return_case: None,
            trim: true,
            max_retries: 3,
        }
    }
}

impl PromptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn required_length(mut self, len: usize) -> Self {
        self.required_length = Some(len);
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn return_case(mut self, return_case: ReturnCase) -> Self {
        self.return_case = Some(return_case);
        self
    }

    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Parses options from a JSON object.
    ///
    /// Any malformed field (a non-string in `allowed_values`, a fractional
    /// `max_retries`, an unknown `return_case`, an unknown key) fails with
    /// [`GuardError::Configuration`].
    pub fn from_json_str(raw: &str) -> Result<Self, GuardError> {
        serde_json::from_str(raw).map_err(invalid_options)
    }

    pub fn from_value(raw: Value) -> Result<Self, GuardError> {
        serde_json::from_value(raw).map_err(invalid_options)
    }
}

fn invalid_options(e: serde_json::Error) -> GuardError {
    GuardError::Configuration(format!("invalid prompt options: {}", e))
}

/// Coerces a JSON value to a non-negative integer count.
///
/// Accepts integers, floats without a fractional part and strings holding an
/// integer. Everything else is rejected with a message naming the value.
pub fn count_from_value(raw: &Value) -> Result<u64, String> {
    let parsed = match raw {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| format!("expected a non-negative integer, got {}", raw))
}

fn coerce_count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let raw = Value::deserialize(deserializer)?;
    let n = count_from_value(&raw).map_err(serde::de::Error::custom)?;
    T::try_from(n).map_err(|_| serde::de::Error::custom(format!("{} is out of range", n)))
}

fn coerce_optional_count<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    let n = count_from_value(&raw).map_err(serde::de::Error::custom)?;
    usize::try_from(n)
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("{} is out of range", n)))
}
