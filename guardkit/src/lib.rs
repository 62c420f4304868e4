//! # guardkit
//!
//! Two small, independent guards for the edges of a program:
//!
//! - **Type-checked callables** ([`typecheck`]): wrap a callable that takes
//!   dynamically typed values with a declared [`Signature`](typecheck::Signature),
//!   and every call checks its positional arguments and its return value.
//! - **Validated prompts** ([`utils`]): ask for a line of input until it matches
//!   an allowed-value list, a regex pattern or a fixed length, with case
//!   handling, trimming and a retry ceiling.
//!
//! Both report failures through [`GuardError`].
//!
//! ## Feature Variants
//!
//! - **Default**: blocking prompt over any `BufRead`/`Write` pair or the console.
//! - **`tokio-dep`**: adds an async prompt over tokio's I/O (`Terminal::ask_async`).
//!
//! ## Quick Start
//!
//! ### Type-checked callable
//!
//! ```rust
//! use guardkit::signature;
//! use guardkit::typecheck::{Kwargs, type_check};
//! use serde_json::{Value, json};
//!
//! let test = type_check(signature!(fn test(name: String) -> Number), |_: &[Value], _: &Kwargs| {
//!     json!(3.0)
//! })
//! .unwrap();
//!
//! assert_eq!(test.call_positional(&[json!("asd")]).unwrap(), json!(3.0));
//!
//! let err = test.call_positional(&[json!(1)]).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Variable `name` should be type (string) but instead is type (integer)"
//! );
//! ```
//!
//! ### Validated prompt
//!
//! ```rust,no_run
//! use guardkit::utils::{PromptOptions, ReturnCase, get_user_input};
//!
//! let opts = PromptOptions::new()
//!     .required_length(3)
//!     .return_case(ReturnCase::Upper);
//!
//! match get_user_input("Enter prompt ", &opts) {
//!     Ok(answer) => println!("{}", answer),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use guardkit::GuardError;
//! use guardkit::utils::PromptOptions;
//!
//! match PromptOptions::from_json_str(r#"{"max_retries": 3.3}"#) {
//!     Err(GuardError::Configuration(msg)) => assert!(msg.contains("3.3")),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub use error::GuardError;

pub mod typecheck;

pub mod utils;
