//! Property-based test generators using proptest.
//!
//! Keys and values are drawn from deliberately tiny alphabets so that random
//! scripts collide on keys and values often enough to exercise overwrites,
//! deletes of live keys and non-trivial counts.

use proptest::prelude::*;
use txkv_core::Command;

/// Strategy for keys from a small alphabet.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]").expect("Invalid regex")
}

/// Strategy for values from a small alphabet.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-3]").expect("Invalid regex")
}

/// Strategy for any single command, weighted towards writes.
pub fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => (key_strategy(), value_strategy()).prop_map(|(key, value)| Command::Set { key, value }),
        2 => key_strategy().prop_map(|key| Command::Get { key }),
        2 => key_strategy().prop_map(|key| Command::Delete { key }),
        1 => value_strategy().prop_map(|value| Command::Count { value }),
        2 => Just(Command::Begin),
        1 => Just(Command::Commit),
        1 => Just(Command::Rollback),
    ]
}

/// Strategy for a sequence of commands.
pub fn script_strategy(max_len: usize) -> impl Strategy<Value = Vec<Command>> {
    prop::collection::vec(command_strategy(), 0..max_len)
}

/// Strategy for a sequence of commands that never closes a transaction.
pub fn mutation_strategy(max_len: usize) -> impl Strategy<Value = Vec<Command>> {
    let mutation = prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| Command::Set { key, value }),
        key_strategy().prop_map(|key| Command::Delete { key }),
    ];
    prop::collection::vec(mutation, 0..max_len)
}

/// Renders commands as protocol lines.
pub fn render_script(commands: &[Command]) -> String {
    commands.iter().map(|c| format!("{c}\n")).collect()
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl PropTestConfig {
    /// Quick config for CI.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 64,
            max_shrink_iters: 1000,
        }
    }

    /// Thorough config for local runs.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self::quick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txkv_core::command::parse_command;
    use txkv_core::{CommandKind, ValueParsing};

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn rendered_commands_parse_back(cmd in command_strategy()) {
            let line = render_script(std::slice::from_ref(&cmd));
            prop_assert_eq!(parse_command(line.trim(), ValueParsing::SingleToken).unwrap(), cmd);
        }

        #[test]
        fn mutations_never_touch_transactions(script in mutation_strategy(16)) {
            for cmd in &script {
                prop_assert!(matches!(cmd.kind(), CommandKind::Set | CommandKind::Delete));
            }
        }
    }
}
