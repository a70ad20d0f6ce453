use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod dn;
mod error;
mod key;
mod output;
mod utils;

use error::Result;

use dn::DnCommands;
use key::KeyCommands;

#[derive(Parser)]
#[command(name = "tokencert")]
#[command(
    about = "Subject names and public keys for token-backed certificates",
    long_about = None
)]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors to stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distinguished name operations
    Dn {
        #[command(subcommand)]
        command: DnCommands,
    },
    /// Public key operations
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
}

/// `-v` and `-q` win over `RUST_LOG`, which defaults to `warn`.
fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new(LevelFilter::DEBUG.to_string())
    } else if quiet {
        EnvFilter::new(LevelFilter::ERROR.to_string())
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Dn { command } => match command {
            DnCommands::Check { config } => {
                dn::check::execute(config)?;
            }
            DnCommands::Parse { config } => {
                dn::parse::execute(config)?;
            }
        },
        Commands::Key { command } => match command {
            KeyCommands::Spki { config } => {
                key::spki::execute(config)?;
            }
        },
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
