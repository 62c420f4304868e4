//! # Errors
//!
//! A single error enum shared by the type-checking wrapper and the input
//! prompt. Both helpers return `Result<T, GuardError>`; nothing in this crate
//! panics on bad configuration or bad input.
//!
//! ```rust
//! use guardkit::GuardError;
//!
//! let err = GuardError::RetriesExhausted { attempts: 3 };
//! assert!(err.is_input_validation());
//! assert_eq!(
//!     err.to_string(),
//!     "Input did not match the requirements after 3 attempts."
//! );
//! ```
use std::io;

/// Every failure the crate can report.
///
/// - [`TypeMismatch`](GuardError::TypeMismatch): a positional argument or the return value
///   does not conform to its declared type.
/// - [`Configuration`](GuardError::Configuration): a signature or prompt option set is
///   incomplete or malformed.
/// - [`InputValidation`](GuardError::InputValidation): a single answer was rejected.
/// - [`RetriesExhausted`](GuardError::RetriesExhausted): the retry ceiling was reached.
/// - [`Io`](GuardError::Io): the line channel failed or hit end of input.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("Variable `{parameter}` should be type ({expected}) but instead is type ({actual})")]
    TypeMismatch {
        parameter: String,
        expected: String,
        actual: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    InputValidation(String),

    #[error("Input did not match the requirements after {attempts} attempts.")]
    RetriesExhausted { attempts: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl GuardError {
    /// True for both the per-attempt rejection and the terminal exhausted-retries failure.
    pub fn is_input_validation(&self) -> bool {
        matches!(
            self,
            GuardError::InputValidation(_) | GuardError::RetriesExhausted { .. }
        )
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, GuardError::Configuration(_))
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, GuardError::TypeMismatch { .. })
    }
}
