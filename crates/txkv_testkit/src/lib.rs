//! # TxKV Testkit
//!
//! Test utilities for TxKV.
//!
//! This crate provides:
//! - Session fixtures that auto-approve confirmations
//! - Property-based test generators using proptest
//! - An undo-log reference model for differential testing
//! - Transcript tests replaying recorded terminal sessions
//!
//! ## Usage
//!
//! ```rust
//! use txkv_testkit::prelude::*;
//!
//! let mut s = TestSession::new();
//! let out = s.run_all(&["SET foo 1", "BEGIN", "SET foo 2", "ROLLBACK", "GET foo"]);
//! assert_eq!(out, vec!["1"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;
pub mod transcript;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use crate::transcript::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
pub use transcript::*;
