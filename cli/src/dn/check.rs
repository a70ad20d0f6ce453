use clap::Args;
use tokencert_pkix_types::CharacterEncoding;
use tokencert_pkix_types::name::parse_dn;

use crate::error::Result;

#[derive(Args)]
pub(crate) struct Config {
    /// Subject string, e.g. `/C=US/O=Example/CN=server`
    #[arg(allow_hyphen_values = true)]
    subject: String,
}

/// Same rules as `validate_dn`, but reports why a subject is rejected.
pub(crate) fn execute(config: Config) -> Result<()> {
    parse_dn(&config.subject, CharacterEncoding::Utf8, false, false)?;
    println!("valid");
    Ok(())
}
