pub(crate) mod check;
pub(crate) mod parse;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum DnCommands {
    /// Check that a subject string parses
    Check {
        #[command(flatten)]
        config: check::Config,
    },
    /// Parse a subject string into a distinguished name
    Parse {
        #[command(flatten)]
        config: parse::Config,
    },
}
