//! Command type definitions.

use std::fmt;

/// The seven command names of the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `SET <key> <value>`
    Set,
    /// `GET <key>`
    Get,
    /// `DELETE <key>`
    Delete,
    /// `COUNT <value>`
    Count,
    /// `BEGIN`
    Begin,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
}

impl CommandKind {
    /// All command kinds, in protocol order.
    pub const ALL: [CommandKind; 7] = [
        Self::Set,
        Self::Get,
        Self::Delete,
        Self::Count,
        Self::Begin,
        Self::Commit,
        Self::Rollback,
    ];

    /// Looks up a command by its exact (case-sensitive) name.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == token)
    }

    /// Returns the protocol name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Set => "SET",
            Self::Get => "GET",
            Self::Delete => "DELETE",
            Self::Count => "COUNT",
            Self::Begin => "BEGIN",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
        }
    }

    /// Returns true for destructive commands (DELETE, COMMIT, ROLLBACK).
    #[must_use]
    pub const fn requires_confirmation(self) -> bool {
        matches!(self, Self::Delete | Self::Commit | Self::Rollback)
    }

    /// Returns the confirmation prompt for destructive commands.
    #[must_use]
    pub const fn confirmation_prompt(self) -> Option<&'static str> {
        match self {
            Self::Delete => Some("DELETE item?"),
            Self::Commit => Some("Do you want to COMMIT?"),
            Self::Rollback => Some("Do you want to ROLLBACK?"),
            _ => None,
        }
    }

    /// Describes the arguments this command takes.
    #[must_use]
    pub const fn usage(self) -> &'static str {
        match self {
            Self::Set => "<key> <value>",
            Self::Get | Self::Delete => "<key>",
            Self::Count => "<value>",
            Self::Begin | Self::Commit | Self::Rollback => "no arguments",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed, validated command.
///
/// Commands are immutable once parsed and are consumed by dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set a key to a value in the effective store.
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// Read a key from the effective store.
    Get {
        /// Key to read.
        key: String,
    },
    /// Remove a key from the effective store.
    Delete {
        /// Key to remove.
        key: String,
    },
    /// Count keys whose value matches exactly.
    Count {
        /// Value to match.
        value: String,
    },
    /// Open a (possibly nested) transaction.
    Begin,
    /// Fold the innermost transaction into its parent.
    Commit,
    /// Discard the innermost transaction.
    Rollback,
}

impl Command {
    /// Returns the command kind.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Set { .. } => CommandKind::Set,
            Self::Get { .. } => CommandKind::Get,
            Self::Delete { .. } => CommandKind::Delete,
            Self::Count { .. } => CommandKind::Count,
            Self::Begin => CommandKind::Begin,
            Self::Commit => CommandKind::Commit,
            Self::Rollback => CommandKind::Rollback,
        }
    }

    /// Returns true if the command must be confirmed before dispatch.
    #[must_use]
    pub fn requires_confirmation(&self) -> bool {
        self.kind().requires_confirmation()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { key, value } => write!(f, "SET {key} {value}"),
            Self::Get { key } => write!(f, "GET {key}"),
            Self::Delete { key } => write!(f, "DELETE {key}"),
            Self::Count { value } => write!(f, "COUNT {value}"),
            Self::Begin | Self::Commit | Self::Rollback => f.write_str(self.kind().name()),
        }
    }
}
