//! # Async Terminal Input Helper
//!
//! The same prompt loop as [`Terminal::ask`], driven over tokio's async I/O.
//! Only one attempt is ever in flight; the future simply yields while waiting
//! for a line instead of blocking the thread.
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), guardkit::GuardError> {
//! use guardkit::utils::{PromptOptions, get_user_input_async};
//!
//! let port = get_user_input_async("Port: ", &PromptOptions::new().pattern("[0-9]+$")).await?;
//! println!("port {}", port);
//! # Ok(())
//! # }
//! ```
use super::options::PromptOptions;
use super::terminal::{InputSession, Step, Terminal, closed_input, configuration_diagnostic};
use crate::error::GuardError;
use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::{debug, warn};

/// Async counterpart of [`LineChannel`](super::LineChannel).
#[async_trait]
pub trait AsyncLineChannel: Send {
    /// Shows `prompt` and reads one line. Returns `Ok(None)` at end of input.
    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Writes one line of feedback.
    async fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Any async buffered reader paired with any async writer.
pub struct TokioChannel<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> TokioChannel<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        TokioChannel { reader, writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl TokioChannel<BufReader<Stdin>, Stdout> {
    /// stdin/stdout of the process.
    pub fn console() -> Self {
        TokioChannel::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

#[async_trait]
impl<R, W> AsyncLineChannel for TokioChannel<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    async fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }
}

impl Terminal {
    /// Async version of [`Terminal::ask`], with identical outcomes.
    pub async fn ask_async<C>(
        channel: &mut C,
        prompt: &str,
        options: &PromptOptions,
    ) -> Result<Terminal, GuardError>
    where
        C: AsyncLineChannel + ?Sized,
    {
        let mut session = match InputSession::new(options) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "rejected prompt options");
                for line in configuration_diagnostic(&e) {
                    channel.write_line(&line).await?;
                }
                return Err(e);
            }
        };

        loop {
            let Some(raw) = channel.read_line(prompt).await? else {
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
                    channel.write_line(&reason.to_string()).await?;
                }
                Step::Exhausted { attempts } => {
                    let err = GuardError::RetriesExhausted { attempts };
                    warn!(attempts, "no valid answer before the retry ceiling");
                    channel.write_line(&err.to_string()).await?;
                    return Err(err);
                }
            }
        }
    }
}

/// Prompts on the process console without blocking the runtime thread.
pub async fn get_user_input_async(prompt: &str, options: &PromptOptions) -> Result<String, GuardError> {
    let mut console = TokioChannel::console();
    Terminal::ask_async(&mut console, prompt, options)
        .await
        .map(|input| input.answer)
}
