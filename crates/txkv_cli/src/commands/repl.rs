//! Interactive REPL.

use crate::commands::{ask, CliResult, ConfirmPolicy};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::info;
use txkv_core::{Config, Output, Proposal, Session};

/// Options for the REPL loop.
#[derive(Debug, Clone, Copy)]
pub struct ReplOptions {
    /// How destructive commands are confirmed.
    pub confirm: ConfirmPolicy,
    /// Whether to print the `> ` prompt.
    pub show_prompt: bool,
}

/// Runs the REPL on stdin/stdout.
pub fn run(config: Config, confirm: ConfirmPolicy) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let options = ReplOptions {
        confirm,
        show_prompt: stdin.is_terminal(),
    };

    let mut session = Session::new(config);
    info!(?confirm, value_parsing = ?session.config().value_parsing, "starting REPL");
    run_loop(&mut session, &mut stdin.lock(), &mut stdout.lock(), options)
}

/// Reads commands from `input` until end of input or `.quit`.
///
/// Engine errors are printed and the loop continues. Only I/O failures end
/// the loop early.
pub fn run_loop<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    out: &mut W,
    options: ReplOptions,
) -> CliResult<()> {
    let mut line = String::new();
    loop {
        if options.show_prompt {
            write!(out, "> ")?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            ".quit" | ".exit" => break,
            ".help" => {
                print_help(out)?;
                continue;
            }
            ".status" => {
                writeln!(
                    out,
                    "Transaction status: {} (depth {})",
                    session.status(),
                    session.depth()
                )?;
                continue;
            }
            ".dump" => {
                print_store(session, out)?;
                continue;
            }
            _ => {}
        }

        let prompt = match session.submit(trimmed) {
            Ok(Proposal::Executed(output)) => {
                print_output(out, &output)?;
                continue;
            }
            Ok(Proposal::NeedsConfirmation(pending)) => pending.prompt(),
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        let approved = ask(options.confirm, prompt, input, out)?;
        let output = session.resolve(approved)?;
        print_output(out, &output)?;
    }

    info!(depth = session.depth(), "REPL finished");
    Ok(())
}

fn print_output<W: Write>(out: &mut W, output: &Output) -> io::Result<()> {
    if output.is_silent() {
        return Ok(());
    }
    writeln!(out, "{output}")
}

fn print_store<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let store = session.effective_store();
    if store.is_empty() {
        return writeln!(out, "(empty)");
    }
    for (key, value) in store.iter() {
        writeln!(out, "{key}: {value}")?;
    }
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  SET <key> <value>   Set a value")?;
    writeln!(out, "  GET <key>           Print a value")?;
    writeln!(out, "  DELETE <key>        Remove a key (asks for confirmation)")?;
    writeln!(out, "  COUNT <value>       Count keys holding a value")?;
    writeln!(out, "  BEGIN               Open a (nested) transaction")?;
    writeln!(out, "  COMMIT              Commit the innermost transaction (asks)")?;
    writeln!(out, "  ROLLBACK            Discard the innermost transaction (asks)")?;
    writeln!(out)?;
    writeln!(out, "Meta commands:")?;
    writeln!(out, "  .status             Show transaction status")?;
    writeln!(out, "  .dump               Show the current store")?;
    writeln!(out, "  .help               Show this help")?;
    writeln!(out, "  .quit               Exit")
}
