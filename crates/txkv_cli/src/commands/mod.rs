//! CLI command implementations.

pub mod repl;
pub mod run;

use clap::ValueEnum;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::warn;
use txkv_core::{ConfirmationGate, CoreError, PendingConfirmation};

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Errors raised by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Engine error outside of a script line.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A script line could not be executed.
    #[error("line {line}: {source}")]
    Script {
        /// 1-based line number in the script.
        line: usize,
        /// The underlying engine error.
        source: CoreError,
    },

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How destructive commands are confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfirmPolicy {
    /// Prompt and read a yes/no answer.
    Ask,
    /// Approve every destructive command.
    Always,
    /// Decline every destructive command.
    Never,
}

/// Answers a confirmation prompt according to `policy`.
///
/// With [`ConfirmPolicy::Ask`] the prompt is written to `out` and one line
/// is read from `input`; `y` or `yes` approves, anything else (including
/// end of input) declines.
pub fn ask<R: BufRead, W: Write>(
    policy: ConfirmPolicy,
    prompt: &str,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    match policy {
        ConfirmPolicy::Always => Ok(true),
        ConfirmPolicy::Never => Ok(false),
        ConfirmPolicy::Ask => {
            write!(out, "{prompt} [y/N] ")?;
            out.flush()?;
            let mut answer = String::new();
            if input.read_line(&mut answer)? == 0 {
                return Ok(false);
            }
            let answer = answer.trim().to_ascii_lowercase();
            Ok(answer == "y" || answer == "yes")
        }
    }
}

/// A [`ConfirmationGate`] that asks on stdin/stderr.
///
/// Used when the command stream itself is not interactive (script replay),
/// so prompts go to stderr and stdout stays clean.
#[derive(Debug, Clone, Copy)]
pub struct PolicyGate {
    policy: ConfirmPolicy,
}

impl PolicyGate {
    /// Creates a gate for `policy`.
    pub fn new(policy: ConfirmPolicy) -> Self {
        Self { policy }
    }
}

impl ConfirmationGate for PolicyGate {
    fn confirm(&mut self, pending: &PendingConfirmation) -> bool {
        let stdin = io::stdin();
        let stderr = io::stderr();
        match ask(self.policy, pending.prompt(), &mut stdin.lock(), &mut stderr.lock()) {
            Ok(approved) => approved,
            Err(e) => {
                warn!("confirmation prompt failed, declining: {}", e);
                false
            }
        }
    }
}
