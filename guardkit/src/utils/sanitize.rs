//! # Input Validation Modes
//!
//! An answer typed at a prompt is checked against exactly one
//! [`ValidationMode`], chosen from the [`PromptOptions`] with the precedence
//! allowed values > pattern > required length. When none of the three is set
//! every answer is accepted.
//!
//! Validation never fails with an error: it returns a [`Verdict`], and a
//! rejected verdict carries a [`Rejection`] whose `Display` is the message
//! shown to the user before the next attempt.
//!
//! ## Examples
//!
//! ### Allowed values
//! ```rust
//! use guardkit::utils::{PromptOptions, Validate, ValidationMode, Verdict};
//!
//! let opts = PromptOptions::new().allowed_values(["A", "B"]).case_sensitive(false);
//! let mode = ValidationMode::from_options(&opts).unwrap();
//! assert_eq!(mode.check("a"), Verdict::Accepted);
//! ```
//!
//! ### Pattern (matched from the start of the answer)
//! ```rust
//! use guardkit::utils::{PromptOptions, Validate, ValidationMode};
//!
//! let opts = PromptOptions::new().pattern("[0-9]{3}");
//! let mode = ValidationMode::from_options(&opts).unwrap();
//! assert!(mode.check("1234").is_accepted());
//! assert!(!mode.check("x123").is_accepted());
//! ```
use super::options::PromptOptions;
use crate::error::GuardError;
use regex::{Regex, RegexBuilder};
use std::fmt::Display;

/// The single rule an answer must satisfy.
///
/// - `Unrestricted`: every answer is accepted.
/// - `AllowedValues`: the answer must equal one of the values.
/// - `Pattern`: the regex must match at position 0 (a prefix match, not a full match).
/// - `Length`: the answer must have exactly this many characters.
#[derive(Debug, Clone)]
pub enum ValidationMode {
    Unrestricted,
    AllowedValues {
        values: Vec<String>,
        case_sensitive: bool,
    },
    Pattern {
        source: String,
        regex: Regex,
        case_sensitive: bool,
    },
    Length(usize),
}

/// Outcome of checking one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Why an answer was rejected.
///
/// - [`NotAllowed`](Rejection::NotAllowed): not one of the allowed values.
/// - [`PatternMismatch`](Rejection::PatternMismatch): the pattern did not match from the start.
/// - [`WrongLength`](Rejection::WrongLength): wrong number of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotAllowed {
        values: Vec<String>,
        case_sensitive: bool,
    },
    PatternMismatch {
        pattern: String,
        case_sensitive: bool,
    },
    WrongLength(usize),
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAllowed {
                values,
                case_sensitive,
            } => write!(
                f,
                "Input should be a value in [{}], please try again. Case sensitive: {}",
                values.join(", "),
                case_sensitive
            ),
            Self::PatternMismatch {
                pattern,
                case_sensitive,
            } => write!(
                f,
                "Input does not match the required pattern '{}', please try again. Case sensitive: {}",
                pattern, case_sensitive
            ),
            Self::WrongLength(n) => write!(
                f,
                "Input does not match the required length of {}, please try again.",
                n
            ),
        }
    }
}

impl From<Rejection> for GuardError {
    fn from(rejection: Rejection) -> Self {
        GuardError::InputValidation(rejection.to_string())
    }
}

/// Anything that can judge a single, already trimmed answer.
pub trait Validate {
    fn check(&self, input: &str) -> Verdict;
}

impl ValidationMode {
    /// Selects the active mode from the options and compiles the pattern if needed.
    ///
    /// Fails with [`GuardError::Configuration`] when the pattern does not compile.
    pub fn from_options(options: &PromptOptions) -> Result<ValidationMode, GuardError> {
        if !options.allowed_values.is_empty() {
            return Ok(ValidationMode::AllowedValues {
                values: options.allowed_values.clone(),
                case_sensitive: options.case_sensitive,
            });
        }

        if !options.pattern.is_empty() {
            // \A anchors at the start only, the tail of the answer is free.
            let regex = RegexBuilder::new(&format!(r"\A(?:{})", options.pattern))
                .case_insensitive(!options.case_sensitive)
                .build()
                .map_err(|e| {
                    GuardError::Configuration(format!(
                        "pattern '{}' is not a valid regular expression: {}",
                        options.pattern, e
                    ))
                })?;
            return Ok(ValidationMode::Pattern {
                source: options.pattern.clone(),
                regex,
                case_sensitive: options.case_sensitive,
            });
        }

        match options.required_length {
            Some(n) => Ok(ValidationMode::Length(n)),
            None => Ok(ValidationMode::Unrestricted),
        }
    }
}

impl Validate for ValidationMode {
    fn check(&self, input: &str) -> Verdict {
        match self {
            ValidationMode::Unrestricted => Verdict::Accepted,
            ValidationMode::AllowedValues {
                values,
                case_sensitive,
            } => {
                let found = if *case_sensitive {
                    values.iter().any(|v| v == input)
                } else {
                    let lowered = input.to_lowercase();
                    values.iter().any(|v| v.to_lowercase() == lowered)
                };

                if found {
                    Verdict::Accepted
                } else {
                    Verdict::Rejected(Rejection::NotAllowed {
                        values: values.clone(),
                        case_sensitive: *case_sensitive,
                    })
                }
            }
            ValidationMode::Pattern {
                source,
                regex,
                case_sensitive,
            } => {
                if regex.is_match(input) {
                    Verdict::Accepted
                } else {
                    Verdict::Rejected(Rejection::PatternMismatch {
                        pattern: source.clone(),
                        case_sensitive: *case_sensitive,
                    })
                }
            }
            ValidationMode::Length(n) => {
                if input.chars().count() == *n {
                    Verdict::Accepted
                } else {
                    Verdict::Rejected(Rejection::WrongLength(*n))
                }
            }
        }
    }
}
