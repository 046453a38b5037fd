//! Interactive session with two-phase confirmation.

use crate::command::{Command, CommandEngine, Output};
use crate::config::Config;
use crate::confirm::{ConfirmationGate, PendingConfirmation};
use crate::error::{CoreError, CoreResult};
use crate::store::Store;
use crate::transaction::{TransactionStack, TransactionStatus};
use tracing::debug;

/// Result of proposing a command to a [`Session`].
#[derive(Debug, PartialEq, Eq)]
pub enum Proposal<'a> {
    /// The command ran immediately.
    Executed(Output),
    /// The command is destructive and is waiting for [`Session::resolve`].
    NeedsConfirmation(&'a PendingConfirmation),
}

/// A single-user session over one transaction stack.
///
/// The session owns the stack and enforces the confirmation protocol:
/// destructive commands are held as pending until [`resolve`](Self::resolve)
/// is called, and no other command is accepted in the meantime.
///
/// # Example
///
/// ```rust
/// use txkv_core::{AutoApprove, Output, Session};
///
/// let mut session = Session::default();
/// session.execute_with("SET foo 123", &mut AutoApprove).unwrap();
/// session.execute_with("DELETE foo", &mut AutoApprove).unwrap();
///
/// let output = session.execute_with("GET foo", &mut AutoApprove).unwrap();
/// assert_eq!(output, Output::KeyNotSet);
/// ```
#[derive(Debug, Default)]
pub struct Session {
    engine: CommandEngine,
    stack: TransactionStack,
    pending: Option<PendingConfirmation>,
}

impl Session {
    /// Creates a session with an empty store.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_stack(config, TransactionStack::new())
    }

    /// Creates a session over an existing stack.
    #[must_use]
    pub fn with_stack(config: Config, stack: TransactionStack) -> Self {
        Self {
            engine: CommandEngine::new(config),
            stack,
            pending: None,
        }
    }

    /// Parses `line` and proposes the resulting command.
    pub fn submit(&mut self, line: &str) -> CoreResult<Proposal<'_>> {
        self.ensure_idle()?;
        let command = self.engine.parse(line)?;
        self.propose(command)
    }

    /// Proposes a parsed command.
    ///
    /// Non-destructive commands run immediately. Destructive ones are held
    /// until [`resolve`](Self::resolve). Fails with
    /// [`CoreError::ConfirmationPending`] while another command is held.
    pub fn propose(&mut self, command: Command) -> CoreResult<Proposal<'_>> {
        self.ensure_idle()?;
        match PendingConfirmation::for_command(command) {
            Ok(pending) => {
                debug!(command = %pending.command(), "awaiting confirmation");
                Ok(Proposal::NeedsConfirmation(self.pending.insert(pending)))
            }
            Err(command) => {
                let output = self.engine.dispatch(command, &mut self.stack)?;
                Ok(Proposal::Executed(output))
            }
        }
    }

    /// Answers the pending confirmation.
    ///
    /// On approval the held command is dispatched and its output returned.
    /// On refusal it is discarded with no state change and
    /// [`Output::Declined`] is returned.
    pub fn resolve(&mut self, approved: bool) -> CoreResult<Output> {
        let pending = self.pending.take().ok_or(CoreError::NoPendingConfirmation)?;
        if approved {
            self.engine.dispatch(pending.into_command(), &mut self.stack)
        } else {
            debug!(command = %pending.command(), "confirmation declined");
            Ok(Output::Declined)
        }
    }

    /// Runs one line to completion, asking `gate` when confirmation is needed.
    pub fn execute_with<G>(&mut self, line: &str, gate: &mut G) -> CoreResult<Output>
    where
        G: ConfirmationGate + ?Sized,
    {
        let approved = match self.submit(line)? {
            Proposal::Executed(output) => return Ok(output),
            Proposal::NeedsConfirmation(pending) => gate.confirm(pending),
        };
        self.resolve(approved)
    }

    /// Returns the command awaiting confirmation, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    /// Returns the number of open transaction layers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Returns whether a transaction is open.
    #[must_use]
    pub fn status(&self) -> TransactionStatus {
        self.stack.status()
    }

    /// Returns the store commands currently act on.
    #[must_use]
    pub fn effective_store(&self) -> &Store {
        self.stack.effective_store()
    }

    /// Returns the underlying transaction stack.
    #[must_use]
    pub fn stack(&self) -> &TransactionStack {
        &self.stack
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        self.engine.config()
    }

    fn ensure_idle(&self) -> CoreResult<()> {
        match &self.pending {
            Some(pending) => Err(CoreError::ConfirmationPending {
                command: pending.command().kind(),
            }),
            None => Ok(()),
        }
    }
}
