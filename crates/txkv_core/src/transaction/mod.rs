//! Nested transactions over an in-memory store.
//!
//! TxKV transactions are layered snapshots:
//! - **BEGIN** pushes a full copy of the current innermost state
//! - **COMMIT** folds the innermost layer into its parent
//! - **ROLLBACK** discards the innermost layer
//!
//! Commands always observe and mutate the innermost layer. Nesting depth is
//! unbounded, and a COMMIT is final the moment it executes: once a nested
//! layer has been folded into its parent, rolling back the parent discards
//! both.

mod stack;
mod status;

pub use stack::TransactionStack;
pub use status::TransactionStatus;
