//! Confirmation of destructive commands.

use crate::command::Command;

/// A destructive command awaiting an answer from a [`ConfirmationGate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    command: Command,
    prompt: &'static str,
}

impl PendingConfirmation {
    /// Wraps `command` if it requires confirmation.
    ///
    /// Returns the command back unchanged if it does not.
    pub fn for_command(command: Command) -> Result<Self, Command> {
        match command.kind().confirmation_prompt() {
            Some(prompt) => Ok(Self { command, prompt }),
            None => Err(command),
        }
    }

    /// Returns the pending command.
    #[must_use]
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Returns the prompt to show the user.
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        self.prompt
    }

    pub(crate) fn into_command(self) -> Command {
        self.command
    }
}

/// Decides whether a pending destructive command may run.
///
/// Implemented by whatever sits in front of the engine: an interactive
/// prompt, a scripted policy, or a test closure.
pub trait ConfirmationGate {
    /// Returns true to approve the pending command.
    fn confirm(&mut self, pending: &PendingConfirmation) -> bool;
}

/// Approves every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl ConfirmationGate for AutoApprove {
    fn confirm(&mut self, _pending: &PendingConfirmation) -> bool {
        true
    }
}

/// Declines every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDecline;

impl ConfirmationGate for AutoDecline {
    fn confirm(&mut self, _pending: &PendingConfirmation) -> bool {
        false
    }
}

impl<F> ConfirmationGate for F
where
    F: FnMut(&PendingConfirmation) -> bool,
{
    fn confirm(&mut self, pending: &PendingConfirmation) -> bool {
        self(pending)
    }
}
