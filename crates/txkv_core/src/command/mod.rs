//! Command protocol: parsing, dispatch and output formatting.
//!
//! One command per line:
//!
//! ```text
//! SET <key> <value>   -> no output
//! GET <key>           -> <value> | key not set
//! DELETE <key>        -> no output (requires confirmation)
//! COUNT <value>       -> <integer>
//! BEGIN               -> no output
//! COMMIT              -> no output | no transaction (requires confirmation)
//! ROLLBACK            -> no output | no transaction (requires confirmation)
//! ```

mod engine;
mod output;
mod parse;
mod types;

pub use engine::CommandEngine;
pub use output::Output;
pub use parse::parse_command;
pub use types::{Command, CommandKind};
