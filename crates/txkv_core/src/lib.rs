//! # TxKV Core
//!
//! In-memory key-value engine with nested transactions.
//!
//! This crate provides:
//! - [`Store`], the ordered key/value map used at every transaction layer
//! - [`TransactionStack`], layered BEGIN/COMMIT/ROLLBACK over a base store
//! - [`CommandEngine`], parsing and dispatch of the text command protocol
//! - [`Session`], which owns a stack and gates destructive commands behind a
//!   [`ConfirmationGate`]
//!
//! ## Example
//!
//! ```rust
//! use txkv_core::{AutoApprove, Session};
//!
//! let mut session = Session::default();
//! for line in ["SET foo 123", "SET bar 456", "BEGIN", "SET foo 456", "BEGIN"] {
//!     session.execute_with(line, &mut AutoApprove).unwrap();
//! }
//! let count = session.execute_with("COUNT 456", &mut AutoApprove).unwrap();
//! assert_eq!(count.to_string(), "2");
//!
//! session.execute_with("ROLLBACK", &mut AutoApprove).unwrap();
//! session.execute_with("ROLLBACK", &mut AutoApprove).unwrap();
//! let foo = session.execute_with("GET foo", &mut AutoApprove).unwrap();
//! assert_eq!(foo.to_string(), "123");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
mod config;
mod confirm;
mod error;
mod session;
mod store;
pub mod transaction;

pub use command::{Command, CommandEngine, CommandKind, Output};
pub use config::{Config, ValueParsing};
pub use confirm::{AutoApprove, AutoDecline, ConfirmationGate, PendingConfirmation};
pub use error::{CoreError, CoreResult};
pub use session::{Proposal, Session};
pub use store::Store;
pub use transaction::{TransactionStack, TransactionStatus};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
