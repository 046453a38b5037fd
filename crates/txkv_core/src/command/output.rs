//! Command output.

use std::fmt;

/// The result of dispatching one command.
///
/// `Display` renders the exact protocol text. Silent variants render as an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The command produced no text (SET, DELETE, BEGIN, successful COMMIT
    /// or ROLLBACK).
    Empty,
    /// GET found a value.
    Value(String),
    /// GET found nothing.
    KeyNotSet,
    /// COUNT result.
    Count(usize),
    /// COMMIT or ROLLBACK with no open transaction.
    NoTransaction,
    /// A destructive command was refused at confirmation and discarded.
    Declined,
}

impl Output {
    /// Returns the text to show the user, or `None` for silent outputs.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Empty | Self::Declined => None,
            other => Some(other.to_string()),
        }
    }

    /// Returns true if the output carries no text.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Empty | Self::Declined)
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty | Self::Declined => Ok(()),
            Self::Value(value) => f.write_str(value),
            Self::KeyNotSet => f.write_str("key not set"),
            Self::Count(count) => write!(f, "{count}"),
            Self::NoTransaction => f.write_str("no transaction"),
        }
    }
}
