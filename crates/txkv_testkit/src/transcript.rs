//! Transcript tests.
//!
//! A transcript is a recorded terminal session:
//!
//! ```text
//! # comment
//! > SET foo 123
//! > GET foo
//! 123
//! > DELETE foo
//! ? n
//! > GET foo
//! 123
//! ```
//!
//! Lines starting with `> ` are commands. A `? y` or `? n` line answers the
//! confirmation of the command above it (destructive commands are approved
//! when no answer is given). Any other non-empty line is the expected output
//! of the command above it; `error: ...` expects the command to fail with
//! that message.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use txkv_core::{Config, CoreError, Proposal, Session};

/// Errors raised while loading or checking a transcript.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// The transcript file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The transcript text is malformed.
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// A command failed where output was expected.
    #[error("line {line}: `{command}` failed: {source}")]
    Command {
        /// 1-based line number of the command.
        line: usize,
        /// The command text.
        command: String,
        /// The engine error.
        source: CoreError,
    },

    /// A command printed something other than what was recorded.
    #[error("line {line}: `{command}` printed {actual:?}, expected {expected:?}")]
    Mismatch {
        /// 1-based line number of the command.
        line: usize,
        /// The command text.
        command: String,
        /// Recorded output.
        expected: Option<String>,
        /// Actual output.
        actual: Option<String>,
    },
}

/// One command of a transcript with its recorded answer and output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptStep {
    /// 1-based line number of the command.
    pub line: usize,
    /// Command text after the `> ` marker.
    pub command: String,
    /// Recorded confirmation answer.
    pub answer: Option<bool>,
    /// Recorded output line.
    pub expected: Option<String>,
}

/// A parsed transcript.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    /// Steps in order.
    pub steps: Vec<TranscriptStep>,
}

impl Transcript {
    /// Parses transcript text.
    pub fn parse(text: &str) -> Result<Self, TranscriptError> {
        let mut steps: Vec<TranscriptStep> = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim_end();
            if trimmed.trim().is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(command) = trimmed.strip_prefix("> ") {
                steps.push(TranscriptStep {
                    line,
                    command: command.trim().to_string(),
                    answer: None,
                    expected: None,
                });
                continue;
            }

            let step = steps.last_mut().ok_or_else(|| TranscriptError::Syntax {
                line,
                message: "output before the first command".into(),
            })?;

            if let Some(answer) = trimmed.strip_prefix("? ") {
                if step.answer.is_some() || step.expected.is_some() {
                    return Err(syntax(line, "answer must directly follow its command"));
                }
                step.answer = Some(parse_answer(answer).ok_or_else(|| {
                    syntax(line, format!("answer must be y or n, got {answer:?}"))
                })?);
            } else if step.expected.is_some() {
                return Err(syntax(line, "a command prints at most one line"));
            } else {
                step.expected = Some(trimmed.to_string());
            }
        }
        Ok(Self { steps })
    }

    /// Loads a transcript file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TranscriptError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TranscriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Replays the transcript against a fresh session with `config`.
    ///
    /// Returns the session so callers can inspect the final state.
    pub fn replay(&self, config: Config) -> Result<Session, TranscriptError> {
        let mut session = Session::new(config);
        for step in &self.steps {
            let actual = run_step(&mut session, step);
            let actual = match (actual, step.expected.as_deref()) {
                (Ok(text), _) => text,
                (Err(e), Some(expected)) if expects_error(expected, &e) => continue,
                (Err(source), _) => {
                    return Err(TranscriptError::Command {
                        line: step.line,
                        command: step.command.clone(),
                        source,
                    })
                }
            };
            if actual != step.expected {
                return Err(TranscriptError::Mismatch {
                    line: step.line,
                    command: step.command.clone(),
                    expected: step.expected.clone(),
                    actual,
                });
            }
        }
        Ok(session)
    }
}

fn run_step(session: &mut Session, step: &TranscriptStep) -> Result<Option<String>, CoreError> {
    let output = match session.submit(&step.command)? {
        Proposal::Executed(output) => output,
        Proposal::NeedsConfirmation(_) => session.resolve(step.answer.unwrap_or(true))?,
    };
    Ok(output.text())
}

fn expects_error(expected: &str, error: &CoreError) -> bool {
    expected.strip_prefix("error: ") == Some(error.to_string().as_str())
}

fn syntax(line: usize, message: impl Into<String>) -> TranscriptError {
    TranscriptError::Syntax {
        line,
        message: message.into(),
    }
}

fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Directory holding the bundled transcript files.
pub fn transcripts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("transcripts")
}

/// Loads and replays `path`, panicking with the first discrepancy.
pub fn assert_transcript(path: impl AsRef<Path>) -> Session {
    let path = path.as_ref();
    Transcript::load(path)
        .and_then(|t| t.replay(Config::default()))
        .unwrap_or_else(|e| panic!("transcript {:?}: {}", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_answers_and_output() {
        let t = Transcript::parse("# c\n> SET a 1\n> DELETE a\n? n\n> GET a\n1\n").unwrap();
        assert_eq!(t.steps.len(), 3);
        assert_eq!(t.steps[1].answer, Some(false));
        assert_eq!(t.steps[2].expected.as_deref(), Some("1"));
        assert_eq!(t.steps[2].line, 5);
    }

    #[test]
    fn rejects_output_before_commands() {
        let err = Transcript::parse("123\n> GET a\n").unwrap_err();
        assert!(matches!(err, TranscriptError::Syntax { line: 1, .. }));
    }

    #[test]
    fn rejects_two_output_lines() {
        let err = Transcript::parse("> GET a\nkey not set\nagain\n").unwrap_err();
        assert!(matches!(err, TranscriptError::Syntax { line: 3, .. }));
    }

    #[test]
    fn rejects_bad_answer() {
        assert!(Transcript::parse("> DELETE a\n? maybe\n").is_err());
    }

    #[test]
    fn replay_reports_mismatch() {
        let t = Transcript::parse("> SET a 1\n> GET a\n2\n").unwrap();
        match t.replay(Config::default()).unwrap_err() {
            TranscriptError::Mismatch {
                line,
                expected,
                actual,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected.as_deref(), Some("2"));
                assert_eq!(actual.as_deref(), Some("1"));
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn replay_checks_expected_errors() {
        let t = Transcript::parse("> FROB\nerror: unknown command: FROB\n> GET\n").unwrap();
        let err = t.replay(Config::default()).unwrap_err();
        assert!(matches!(err, TranscriptError::Command { line: 3, .. }));
    }

    #[test]
    fn missing_output_is_a_mismatch() {
        let t = Transcript::parse("> SET a 1\n> GET a\n").unwrap();
        assert!(matches!(
            t.replay(Config::default()),
            Err(TranscriptError::Mismatch { line: 2, .. })
        ));
    }
}
