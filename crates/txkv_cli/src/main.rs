//! TxKV CLI
//!
//! Command-line front-end for the TxKV nested-transaction key-value store.
//!
//! # Commands
//!
//! - `repl` - Interactive shell
//! - `run` - Replay a script of protocol commands
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use commands::ConfirmPolicy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use txkv_core::{Config, ValueParsing};

/// TxKV in-memory transactional key-value store.
#[derive(Parser)]
#[command(name = "txkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Treat everything after the key as the SET value
    #[arg(global = true, long)]
    multi_word_values: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shell
    Repl {
        /// How DELETE, COMMIT and ROLLBACK are confirmed
        #[arg(short, long, value_enum, default_value_t = ConfirmPolicy::Ask)]
        confirm: ConfirmPolicy,
    },

    /// Replay a script, one command per line
    Run {
        /// Path to the script file
        script: PathBuf,

        /// How DELETE, COMMIT and ROLLBACK are confirmed
        #[arg(short, long, value_enum, default_value_t = ConfirmPolicy::Always)]
        confirm: ConfirmPolicy,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays clean.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let value_parsing = if cli.multi_word_values {
        ValueParsing::Remainder
    } else {
        ValueParsing::SingleToken
    };
    let config = Config::new().value_parsing(value_parsing);

    match cli.command {
        Commands::Repl { confirm } => {
            commands::repl::run(config, confirm)?;
        }
        Commands::Run {
            script,
            confirm,
            format,
        } => {
            commands::run::run(&script, config, confirm, &format)?;
        }
        Commands::Version => {
            println!("TxKV CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("TxKV Core v{}", txkv_core::VERSION);
        }
    }

    Ok(())
}
