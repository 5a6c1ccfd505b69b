//! typex CLI - live example rendering for Typst documents.
//!
//! Provides commands for:
//! - `compile`: Render every example referenced by the host document
//! - `list`: Show the examples referenced by the host document

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CompileArgs, ListArgs};
use output::Output;

/// typex - Render example snippets next to their source.
#[derive(Parser)]
#[command(name = "typex", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile all examples referenced by the host document.
    Compile(CompileArgs),
    /// List examples referenced by the host document without rendering.
    List(ListArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Compile(args) => args.common.verbose,
        Commands::List(args) => args.common.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Compile(args) => args.execute(),
        Commands::List(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
