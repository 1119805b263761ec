//! Taproot CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "taproot")]
#[command(about = "Heuristic code navigator: definitions, wrappers and caller trees", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Pattern whose enclosing functions to show
    pattern: Option<String>,

    /// Folder to search (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    folder: PathBuf,

    /// Print bare line contents without location prefixes or color
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the definition a pattern names
    Def {
        /// The pattern to search for
        pattern: String,
    },
    /// Show every line matching a pattern
    Grep {
        /// The pattern to search for
        pattern: String,
    },
    /// Show the tree of functions that call a symbol
    Tree {
        /// The symbol whose callers to follow
        pattern: String,

        /// Maximum caller depth to follow
        #[arg(short = 'l', long = "level", default_value_t = 5)]
        level: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Results go to stdout; logging stays on stderr.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(folder = %cli.folder.display(), "taproot v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Def { pattern }) => commands::def(&pattern, &cli.folder, cli.quiet),
        Some(Commands::Grep { pattern }) => commands::grep(&pattern, &cli.folder, cli.quiet),
        Some(Commands::Tree { pattern, level }) => {
            commands::tree(&pattern, &cli.folder, level, cli.quiet)
        }
        None => match cli.pattern {
            Some(pattern) => commands::wrapper(&pattern, &cli.folder, cli.quiet),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        },
    }
}
