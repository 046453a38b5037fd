//! Command line parsing.

use crate::command::{Command, CommandKind};
use crate::config::ValueParsing;
use crate::error::{CoreError, CoreResult};

/// Parses one protocol line into a [`Command`].
///
/// The first whitespace-delimited token selects the command (case-sensitive).
/// The remaining tokens must match the command's arity exactly.
pub fn parse_command(line: &str, value_parsing: ValueParsing) -> CoreResult<Command> {
    let (token, rest) = split_token(line).ok_or(CoreError::EmptyCommand)?;
    let kind = CommandKind::from_token(token).ok_or_else(|| CoreError::unknown_command(token))?;

    if kind == CommandKind::Set && value_parsing == ValueParsing::Remainder {
        return parse_set_remainder(rest);
    }

    let args: Vec<&str> = rest.split_whitespace().collect();
    let command = match (kind, args.as_slice()) {
        (CommandKind::Set, [key, value]) => Command::Set {
            key: (*key).to_string(),
            value: (*value).to_string(),
        },
        (CommandKind::Get, [key]) => Command::Get {
            key: (*key).to_string(),
        },
        (CommandKind::Delete, [key]) => Command::Delete {
            key: (*key).to_string(),
        },
        (CommandKind::Count, [value]) => Command::Count {
            value: (*value).to_string(),
        },
        (CommandKind::Begin, []) => Command::Begin,
        (CommandKind::Commit, []) => Command::Commit,
        (CommandKind::Rollback, []) => Command::Rollback,
        (kind, args) => return Err(CoreError::invalid_arguments(kind, kind.usage(), args.len())),
    };
    Ok(command)
}

fn parse_set_remainder(rest: &str) -> CoreResult<Command> {
    let usage = CommandKind::Set.usage();
    let (key, value) = split_token(rest)
        .ok_or_else(|| CoreError::invalid_arguments(CommandKind::Set, usage, 0))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::invalid_arguments(CommandKind::Set, usage, 1));
    }
    Ok(Command::Set {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Splits off the first whitespace-delimited token.
fn split_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], &input[end..])),
        None => Some((input, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> CoreResult<Command> {
        parse_command(line, ValueParsing::SingleToken)
    }

    #[test]
    fn parses_every_command() {
        assert_eq!(
            parse("SET foo 123").unwrap(),
            Command::Set {
                key: "foo".into(),
                value: "123".into()
            }
        );
        assert_eq!(parse("GET foo").unwrap(), Command::Get { key: "foo".into() });
        assert_eq!(
            parse("DELETE foo").unwrap(),
            Command::Delete { key: "foo".into() }
        );
        assert_eq!(
            parse("COUNT 123").unwrap(),
            Command::Count {
                value: "123".into()
            }
        );
        assert_eq!(parse("BEGIN").unwrap(), Command::Begin);
        assert_eq!(parse("COMMIT").unwrap(), Command::Commit);
        assert_eq!(parse("ROLLBACK").unwrap(), Command::Rollback);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(
            parse("  GET \t foo  ").unwrap(),
            Command::Get { key: "foo".into() }
        );
        assert_eq!(parse("BEGIN\n").unwrap(), Command::Begin);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse(""), Err(CoreError::EmptyCommand));
        assert_eq!(parse("   \t"), Err(CoreError::EmptyCommand));
    }

    #[test]
    fn rejects_unknown_and_lowercase_commands() {
        assert_eq!(parse("PUT foo 1"), Err(CoreError::unknown_command("PUT")));
        assert_eq!(parse("get foo"), Err(CoreError::unknown_command("get")));
    }

    #[test]
    fn rejects_wrong_arity() {
        assert_eq!(
            parse("SET foo"),
            Err(CoreError::invalid_arguments(CommandKind::Set, "<key> <value>", 1))
        );
        assert_eq!(
            parse("SET foo 1 2"),
            Err(CoreError::invalid_arguments(CommandKind::Set, "<key> <value>", 3))
        );
        assert_eq!(
            parse("GET"),
            Err(CoreError::invalid_arguments(CommandKind::Get, "<key>", 0))
        );
        assert_eq!(
            parse("COUNT 1 2"),
            Err(CoreError::invalid_arguments(CommandKind::Count, "<value>", 2))
        );
        assert_eq!(
            parse("COMMIT now"),
            Err(CoreError::invalid_arguments(CommandKind::Commit, "no arguments", 1))
        );
    }

    #[test]
    fn remainder_mode_keeps_multi_word_values() {
        let cmd = parse_command("SET greeting hello  big world ", ValueParsing::Remainder).unwrap();
        assert_eq!(
            cmd,
            Command::Set {
                key: "greeting".into(),
                value: "hello  big world".into()
            }
        );
    }

    #[test]
    fn remainder_mode_still_requires_a_value() {
        assert_eq!(
            parse_command("SET key   ", ValueParsing::Remainder),
            Err(CoreError::invalid_arguments(CommandKind::Set, "<key> <value>", 1))
        );
        assert_eq!(
            parse_command("SET", ValueParsing::Remainder),
            Err(CoreError::invalid_arguments(CommandKind::Set, "<key> <value>", 0))
        );
    }

    #[test]
    fn remainder_mode_leaves_other_commands_strict() {
        assert_eq!(
            parse_command("GET a b", ValueParsing::Remainder),
            Err(CoreError::invalid_arguments(CommandKind::Get, "<key>", 2))
        );
    }
}
