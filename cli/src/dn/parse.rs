use clap::Args;
use tokencert_pkix_types::CharacterEncoding;
use tokencert_pkix_types::name::parse_dn;

use crate::error::Result;
use crate::output::NameFormat;

#[derive(Args)]
pub(crate) struct Config {
    /// Subject string, e.g. `/C=US/O=Example/CN=server`
    #[arg(allow_hyphen_values = true)]
    subject: String,

    /// Treat `+` as the separator between members of one RDN
    #[arg(long)]
    multi_rdn: bool,

    /// Keep RDNs in the order written instead of reversing them
    #[arg(long)]
    legacy_order: bool,

    /// String type for attributes without a fixed ASN.1 type
    #[arg(long, value_enum, default_value = "utf8")]
    encoding: Encoding,

    /// Output format (text, slash, json, der)
    #[arg(short, long, value_enum, default_value = "text")]
    output: NameFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Encoding {
    Utf8,
    Printable,
    Ia5,
}

impl From<Encoding> for CharacterEncoding {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Utf8 => CharacterEncoding::Utf8,
            Encoding::Printable => CharacterEncoding::Printable,
            Encoding::Ia5 => CharacterEncoding::Ia5,
        }
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let name = parse_dn(
        &config.subject,
        config.encoding.into(),
        config.multi_rdn,
        config.legacy_order,
    )?;

    match config.output {
        NameFormat::Text => println!("{name}"),
        NameFormat::Slash => println!("{}", name.to_slash_string()),
        NameFormat::Json => println!("{}", serde_json::to_string_pretty(&name)?),
        NameFormat::Der => println!("{}", hex::encode(name.to_der()?)),
    }

    Ok(())
}
