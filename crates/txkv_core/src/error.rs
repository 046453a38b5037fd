//! Error types for TxKV core.

use crate::command::CommandKind;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in TxKV core operations.
///
/// Every error is local to the command that produced it: the store and the
/// transaction stack are left exactly as they were before that command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input contained no command token.
    #[error("empty command")]
    EmptyCommand,

    /// The first token is not one of the known command names.
    #[error("unknown command: {token}")]
    UnknownCommand {
        /// The offending token, as typed.
        token: String,
    },

    /// A known command received the wrong number of arguments.
    #[error("{command} expects {expected}, got {actual} argument(s)")]
    InvalidArguments {
        /// The command whose arguments were rejected.
        command: CommandKind,
        /// Human-readable description of the expected arguments.
        expected: &'static str,
        /// Number of arguments actually supplied.
        actual: usize,
    },

    /// Lookup of a key that has no value in the effective store.
    #[error("key not set")]
    KeyNotSet {
        /// The key that was looked up.
        key: String,
    },

    /// COMMIT or ROLLBACK issued with no open transaction.
    #[error("no transaction")]
    NoActiveTransaction,

    /// A command was proposed while another one awaits confirmation.
    #[error("{command} is awaiting confirmation")]
    ConfirmationPending {
        /// The command currently awaiting confirmation.
        command: CommandKind,
    },

    /// A confirmation answer arrived with nothing pending.
    #[error("no command is awaiting confirmation")]
    NoPendingConfirmation,
}

impl CoreError {
    /// Creates an unknown command error.
    pub fn unknown_command(token: impl Into<String>) -> Self {
        Self::UnknownCommand {
            token: token.into(),
        }
    }

    /// Creates an invalid arguments error.
    pub fn invalid_arguments(command: CommandKind, expected: &'static str, actual: usize) -> Self {
        Self::InvalidArguments {
            command,
            expected,
            actual,
        }
    }

    /// Creates a key not set error.
    pub fn key_not_set(key: impl Into<String>) -> Self {
        Self::KeyNotSet { key: key.into() }
    }

    /// Returns true if this error was raised while parsing input text.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCommand | Self::UnknownCommand { .. } | Self::InvalidArguments { .. }
        )
    }
}
