//! Terminal input and output
//!
//! User-facing status lines go through [`Console`]; logging stays on stderr
//! via tracing. Line input goes through the [`Prompt`] capability so the REPL
//! and the selection prompt share one stdin reader and tests can script it.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

use crate::error::CliError;

/// Writes status lines for the user
pub struct Console {
    out: Box<dyn Write + Send>,
}

impl Console {
    /// Console printing to stdout
    pub fn stdout() -> Self {
        Self {
            out: Box::new(io::stdout()),
        }
    }

    /// Console writing into a buffer that can be inspected afterwards
    pub fn capture() -> (Self, Captured) {
        let captured = Captured::default();
        let console = Self {
            out: Box::new(captured.clone()),
        };
        (console, captured)
    }

    /// Print one line. A closed stdout is not worth failing a command over.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}", text.as_ref());
    }

    /// Print a prompt without a trailing newline and flush it
    pub fn prompt(&mut self, text: &str) {
        let _ = write!(self.out, "{}", text);
        let _ = self.out.flush();
    }
}

/// Output captured by [`Console::capture`]
#[derive(Clone, Default)]
pub struct Captured {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Captured {
    /// Everything written so far
    pub fn text(&self) -> String {
        match self.buf.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }

    /// Captured output split into lines
    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_string).collect()
    }
}

impl Write for Captured {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .buf
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "capture buffer poisoned"))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// What came back from reading one line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    /// A line, without its terminator
    Line(String),
    /// The user pressed Ctrl-C
    Interrupted,
    /// Input reached end of file
    Closed,
}

/// Source of user input lines
#[async_trait]
pub trait Prompt: Send {
    async fn read_line(&mut self) -> PromptInput;
}

/// Reads lines from stdin, racing each read against Ctrl-C
pub struct StdinPrompt {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinPrompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompt for StdinPrompt {
    async fn read_line(&mut self) -> PromptInput {
        tokio::select! {
            line = self.lines.next_line() => match line {
                Ok(Some(line)) => PromptInput::Line(line),
                Ok(None) => PromptInput::Closed,
                Err(e) => {
                    CliError::from(e).log();
                    PromptInput::Closed
                }
            },
            // A failed signal listener disables this branch; keep reading
            Ok(()) = tokio::signal::ctrl_c() => PromptInput::Interrupted,
        }
    }
}

/// Notification that the user wants to stop whatever is running
#[async_trait]
pub trait Interrupt: Send + Sync {
    /// Resolves once an interrupt arrives
    async fn interrupted(&self);
}

/// Ctrl-C from the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct CtrlC;

#[async_trait]
impl Interrupt for CtrlC {
    async fn interrupted(&self) {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}
