//! Script replay command.

use crate::commands::{CliError, CliResult, ConfirmPolicy, PolicyGate};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;
use txkv_core::{
    Config, ConfirmationGate, CoreError, Proposal, Session, Store, TransactionStatus,
};

/// One executed script line.
#[derive(Debug, Serialize)]
pub struct StepRecord {
    /// 1-based line number in the script.
    pub line: usize,
    /// The command text as written.
    pub command: String,
    /// Output text, if the command produced any.
    pub output: Option<String>,
    /// Confirmation answer for destructive commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
}

/// Result of replaying a whole script.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// Executed lines, in order.
    pub steps: Vec<StepRecord>,
    /// Transaction status after the last line.
    pub status: TransactionStatus,
    /// Open transaction layers after the last line.
    pub depth: usize,
    /// Effective store after the last line.
    pub store: &'a Store,
}

/// Runs the script at `path`.
pub fn run(path: &Path, config: Config, confirm: ConfirmPolicy, format: &str) -> CliResult<()> {
    info!("Running script {:?}", path);
    let script = fs::read_to_string(path)?;

    let mut session = Session::new(config);
    let mut gate = PolicyGate::new(confirm);
    let steps = replay(&mut session, &script, &mut gate)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        "json" => {
            let report = RunReport {
                steps,
                status: session.status(),
                depth: session.depth(),
                store: session.effective_store(),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        _ => print_text_output(&mut out, &steps)?,
    }
    Ok(())
}

/// Executes every command line of `script` against `session`.
///
/// Blank lines and lines starting with `#` are skipped. The first failing
/// line aborts the replay with its line number.
pub fn replay<G>(session: &mut Session, script: &str, gate: &mut G) -> CliResult<Vec<StepRecord>>
where
    G: ConfirmationGate + ?Sized,
{
    let mut steps = Vec::new();
    for (idx, raw) in script.lines().enumerate() {
        let line = idx + 1;
        let command = raw.trim();
        if command.is_empty() || command.starts_with('#') {
            continue;
        }

        let at_line = |source: CoreError| CliError::Script { line, source };
        let proposal = session.submit(command).map_err(at_line)?;
        let (output, confirmed) = match proposal {
            Proposal::Executed(output) => (output, None),
            Proposal::NeedsConfirmation(pending) => {
                let approved = gate.confirm(pending);
                (session.resolve(approved).map_err(at_line)?, Some(approved))
            }
        };

        steps.push(StepRecord {
            line,
            command: command.to_string(),
            output: output.text(),
            confirmed,
        });
    }
    Ok(steps)
}

fn print_text_output<W: Write>(out: &mut W, steps: &[StepRecord]) -> io::Result<()> {
    for text in steps.iter().filter_map(|step| step.output.as_deref()) {
        writeln!(out, "{text}")?;
    }
    Ok(())
}
