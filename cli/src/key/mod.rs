pub(crate) mod spki;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum KeyCommands {
    /// Build a SubjectPublicKeyInfo from a token attribute dump
    Spki {
        #[command(flatten)]
        config: spki::Config,
    },
}
