//! # Prompt Utilities
//!
//! Everything needed to ask for a validated line of input:
//! - [`PromptOptions`]: what to accept and how to post-process it
//! - [`ValidationMode`]: the single rule selected from the options
//! - [`Terminal`] / [`get_user_input`]: the blocking prompt loop
//! - [`InputSession`]: the retry state machine behind the loop
//!
//! With the `tokio-dep` feature the loop is also available over tokio's async
//! I/O through `Terminal::ask_async` and `get_user_input_async`.

pub mod options;
pub use options::{PromptOptions, ReturnCase, USAGE};

pub mod sanitize;
pub use sanitize::{Rejection, Validate, ValidationMode, Verdict};

pub mod terminal;
pub use terminal::{Console, InputSession, IoChannel, LineChannel, Step, Terminal, get_user_input};

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio-dep")] {
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        pub mod async_terminal;
        pub use async_terminal::{AsyncLineChannel, TokioChannel, get_user_input_async};
    }
}
