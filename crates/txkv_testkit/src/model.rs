//! Reference model for differential testing.
//!
//! [`UndoLogModel`] implements the same command protocol as the engine but
//! with a different strategy: a single live map plus one undo log per open
//! transaction. Commands run against both and their outputs are compared.

use std::collections::BTreeMap;
use txkv_core::{Command, Output};

/// A reversible write: the key and the value it held before.
#[derive(Debug, Clone)]
struct Undo {
    key: String,
    previous: Option<String>,
}

/// Undo-log implementation of the command protocol.
#[derive(Debug, Clone, Default)]
pub struct UndoLogModel {
    live: BTreeMap<String, String>,
    logs: Vec<Vec<Undo>>,
}

impl UndoLogModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open transactions.
    pub fn depth(&self) -> usize {
        self.logs.len()
    }

    /// The live key/value pairs.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.live
    }

    /// Applies `command` and returns its output.
    ///
    /// `approved` is the confirmation answer for destructive commands and is
    /// ignored for the rest.
    pub fn apply(&mut self, command: &Command, approved: bool) -> Output {
        if command.requires_confirmation() && !approved {
            return Output::Declined;
        }
        match command {
            Command::Set { key, value } => {
                let previous = self.live.insert(key.clone(), value.clone());
                self.record(key, previous);
                Output::Empty
            }
            Command::Get { key } => match self.live.get(key) {
                Some(value) => Output::Value(value.clone()),
                None => Output::KeyNotSet,
            },
            Command::Delete { key } => {
                if let Some(previous) = self.live.remove(key) {
                    self.record(key, Some(previous));
                }
                Output::Empty
            }
            Command::Count { value } => {
                Output::Count(self.live.values().filter(|v| *v == value).count())
            }
            Command::Begin => {
                self.logs.push(Vec::new());
                Output::Empty
            }
            Command::Commit => match self.logs.pop() {
                Some(log) => {
                    // The parent must still be able to undo the child's writes.
                    if let Some(parent) = self.logs.last_mut() {
                        parent.extend(log);
                    }
                    Output::Empty
                }
                None => Output::NoTransaction,
            },
            Command::Rollback => match self.logs.pop() {
                Some(log) => {
                    for undo in log.into_iter().rev() {
                        match undo.previous {
                            Some(value) => self.live.insert(undo.key, value),
                            None => self.live.remove(&undo.key),
                        };
                    }
                    Output::Empty
                }
                None => Output::NoTransaction,
            },
        }
    }

    fn record(&mut self, key: &str, previous: Option<String>) {
        if let Some(log) = self.logs.last_mut() {
            log.push(Undo {
                key: key.to_string(),
                previous,
            });
        }
    }
}
