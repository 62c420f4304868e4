//! # Terminal Input Helper
//!
//! Asks for a line of input until it passes the active
//! [`ValidationMode`](super::ValidationMode), or until the retry ceiling is
//! reached.
//!
//! The loop is split in two:
//! - [`InputSession`] holds the retry counter and judges each raw line,
//!   returning a [`Step`] that says whether to stop or ask again.
//! - [`Terminal::ask`] drives a session over a [`LineChannel`]: it shows the
//!   prompt, reads a line, writes the rejection reason and loops.
//!
//! ## Retry counting
//!
//! The counter starts at 1 and an answer is only checked while the counter is
//! strictly below `max_retries`. Once it reaches the ceiling the next line is
//! read but not checked, and the prompt fails with
//! [`GuardError::RetriesExhausted`]. With the default of 3, two answers are
//! checked and the third read ends the prompt.
//!
//! ## Example
//! ```rust
//! use guardkit::utils::{IoChannel, PromptOptions, ReturnCase, Terminal};
//! use std::io::Cursor;
//!
//! let mut channel = IoChannel::new(Cursor::new("maybe\n  y \n"), Vec::new());
//! let opts = PromptOptions::new()
//!     .allowed_values(["Y", "N"])
//!     .case_sensitive(false)
//!     .return_case(ReturnCase::Upper);
//!
//! let input = Terminal::ask(&mut channel, "Continue? (y/n) ", &opts).unwrap();
//! assert_eq!(input.answer, "Y");
//! assert_eq!(input.attempts, 2);
//! ```
use super::options::{PromptOptions, ReturnCase, USAGE};
use super::sanitize::{Rejection, Validate, ValidationMode, Verdict};
use crate::error::GuardError;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// A line-oriented input/output channel.
pub trait LineChannel {
    /// Shows `prompt` and reads one line. Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Writes one line of feedback.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Any buffered reader paired with any writer.
pub struct IoChannel<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> IoChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        IoChannel { reader, writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> LineChannel for IoChannel<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)
    }
}

/// The process console: prompts on stdout, reads stdin.
pub struct Console;

impl LineChannel for Console {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{}", line)
    }
}

/// What the driver should do after an answer was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The answer passed; it is trimmed and case-converted as configured.
    Accepted(String),
    /// The answer failed; show the reason and read again.
    Retry(Rejection),
    /// The retry ceiling was reached; stop without reading again.
    Exhausted { attempts: u32 },
}

/// Retry state of one prompt.
#[derive(Debug, Clone)]
pub struct InputSession {
    mode: ValidationMode,
    trim: bool,
    return_case: Option<ReturnCase>,
    max_retries: u32,
    attempt: u32,
    finished: Option<Step>,
}

impl InputSession {
    /// Builds a session from the options. No input is involved, so a
    /// configuration error is always reported before anything is read.
    pub fn new(options: &PromptOptions) -> Result<Self, GuardError> {
        Ok(InputSession {
            mode: ValidationMode::from_options(options)?,
            trim: options.trim,
            return_case: options.return_case,
            max_retries: options.max_retries,
            attempt: 1,
            finished: None,
        })
    }

    /// The current attempt number, starting at 1.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn mode(&self) -> &ValidationMode {
        &self.mode
    }

    /// The terminal step, once the session has accepted an answer or run out of retries.
    pub fn outcome(&self) -> Option<&Step> {
        self.finished.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Judges one raw line (line terminator included or not).
    ///
    /// Once an answer was accepted or the retries ran out, every later call
    /// returns that same terminal step and leaves the counter untouched.
    pub fn submit(&mut self, raw: &str) -> Step {
        if let Some(done) = &self.finished {
            return done.clone();
        }

        let line = strip_line_ending(raw);
        let candidate = if self.trim { line.trim() } else { line };

        if self.attempt >= self.max_retries {
            return self.finish(Step::Exhausted {
                attempts: self.max_retries,
            });
        }

        match self.mode.check(candidate) {
            Verdict::Accepted => {
                let answer = match self.return_case {
                    Some(case) => case.apply(candidate),
                    None => candidate.to_string(),
                };
                self.finish(Step::Accepted(answer))
            }
            Verdict::Rejected(reason) => {
                self.attempt += 1;
                Step::Retry(reason)
            }
        }
    }

    fn finish(&mut self, step: Step) -> Step {
        self.finished = Some(step.clone());
        step
    }
}

fn strip_line_ending(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Lines of the diagnostic written before a configuration error is returned.
pub(crate) fn configuration_diagnostic(err: &GuardError) -> Vec<String> {
    let mut lines = vec!["Incorrect argument specification".to_string(), err.to_string()];
    lines.extend(USAGE.lines().map(str::to_string));
    lines
}

/// An accepted answer.
///
/// Returned by [`Terminal::ask`]; `attempts` is the attempt on which the
/// answer was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    pub answer: String,
    pub attempts: u32,
}

impl Terminal {
    /// Shows `prompt` on `channel` and loops until an answer passes or the retries run out.
    ///
    /// - Malformed options: writes a diagnostic and returns
    ///   [`GuardError::Configuration`] without reading.
    /// - Rejected answer: writes the reason as one line and asks again.
    /// - Ceiling reached: writes the failure and returns [`GuardError::RetriesExhausted`].
    /// - End of input: returns [`GuardError::Io`] with `UnexpectedEof`.
    pub fn ask<C>(channel: &mut C, prompt: &str, options: &PromptOptions) -> Result<Terminal, GuardError>
    where
        C: LineChannel + ?Sized,
    {
        let mut session = match InputSession::new(options) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "rejected prompt options");
                for line in configuration_diagnostic(&e) {
                    channel.write_line(&line)?;
                }
                return Err(e);
            }
        };

        loop {
            let Some(raw) = channel.read_line(prompt)? else {
                return Err(closed_input());
            };

            match session.submit(&raw) {
                Step::Accepted(answer) => {
                    debug!(attempt = session.attempt(), "answer accepted");
                    return Ok(Terminal {
                        answer,
                        attempts: session.attempt(),
                    });
                }
                Step::Retry(reason) => {
                    debug!(attempt = session.attempt() - 1, %reason, "answer rejected");
                    channel.write_line(&reason.to_string())?;
                }
                Step::Exhausted { attempts } => {
                    let err = GuardError::RetriesExhausted { attempts };
                    warn!(attempts, "no valid answer before the retry ceiling");
                    channel.write_line(&err.to_string())?;
                    return Err(err);
                }
            }
        }
    }
}

pub(crate) fn closed_input() -> GuardError {
    GuardError::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "input closed before an answer was accepted",
    ))
}

/// Prompts on the process console. See [`Terminal::ask`].
///
/// ```rust,no_run
/// use guardkit::utils::{PromptOptions, get_user_input};
///
/// let code = get_user_input("Enter the 3 letter code: ", &PromptOptions::new().required_length(3));
/// match code {
///     Ok(code) => println!("code: {}", code),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn get_user_input(prompt: &str, options: &PromptOptions) -> Result<String, GuardError> {
    Terminal::ask(&mut Console, prompt, options).map(|input| input.answer)
}
