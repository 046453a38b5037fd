//! Transaction status reporting.

use serde::Serialize;
use std::fmt;

/// Whether a transaction is currently open.
///
/// There is no terminal "committed" state: once the last layer is committed
/// or rolled back the status is `None` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransactionStatus {
    /// No transaction is open.
    None,
    /// At least one transaction layer is open.
    InProgress,
}

impl TransactionStatus {
    /// Derives the status from a stack depth.
    #[must_use]
    pub const fn from_depth(depth: usize) -> Self {
        if depth == 0 {
            Self::None
        } else {
            Self::InProgress
        }
    }

    /// Returns the status name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::InProgress => "InProgress",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
