//! Command engine: parse and dispatch.

use crate::command::{parse_command, Command, Output};
use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::transaction::TransactionStack;
use tracing::debug;

/// Parses protocol lines and applies commands to a transaction stack.
///
/// The engine is stateless apart from its configuration; the stack it acts
/// on is passed in explicitly. The engine does not enforce confirmation of
/// destructive commands; use [`Session`](crate::Session) for that.
#[derive(Debug, Clone, Default)]
pub struct CommandEngine {
    config: Config,
}

impl CommandEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parses one protocol line.
    pub fn parse(&self, line: &str) -> CoreResult<Command> {
        parse_command(line, self.config.value_parsing)
    }

    /// Returns true for DELETE, COMMIT and ROLLBACK.
    #[must_use]
    pub fn requires_confirmation(&self, command: &Command) -> bool {
        command.requires_confirmation()
    }

    /// Applies `command` to `stack` and formats the result.
    ///
    /// `KeyNotSet` and `NoActiveTransaction` are reported as output text,
    /// not as errors.
    pub fn dispatch(&self, command: Command, stack: &mut TransactionStack) -> CoreResult<Output> {
        debug!(%command, depth = stack.depth(), "dispatch");
        let output = match command {
            Command::Set { key, value } => {
                stack.set(key, value);
                Output::Empty
            }
            Command::Get { key } => match stack.effective_store().try_get(&key) {
                Ok(value) => Output::Value(value.to_string()),
                Err(CoreError::KeyNotSet { .. }) => Output::KeyNotSet,
                Err(e) => return Err(e),
            },
            Command::Delete { key } => {
                stack.delete(&key);
                Output::Empty
            }
            Command::Count { value } => Output::Count(stack.count_values(&value)),
            Command::Begin => {
                stack.begin();
                Output::Empty
            }
            Command::Commit => Self::finish(stack.commit())?,
            Command::Rollback => Self::finish(stack.rollback())?,
        };
        Ok(output)
    }

    /// Parses and dispatches one line without any confirmation step.
    pub fn execute(&self, line: &str, stack: &mut TransactionStack) -> CoreResult<Output> {
        let command = self.parse(line)?;
        self.dispatch(command, stack)
    }

    fn finish(result: CoreResult<()>) -> CoreResult<Output> {
        match result {
            Ok(()) => Ok(Output::Empty),
            Err(CoreError::NoActiveTransaction) => Ok(Output::NoTransaction),
            Err(e) => Err(e),
        }
    }
}
