use std::fmt::Write;

use clap::Args;
use tokencert_keys::{
    DsaPublicKey, EcPublicKey, KeyAlgorithm, PublicKey, RsaPublicKey, build_public_key,
};
use tokencert_pkix_types::algorithm::parameters::EcParameters;

use crate::error::Result;
use crate::output::KeyFormat;
use crate::utils::{format_colon_hex, format_hex_dump, parse_attribute_dump, read_input};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the attribute dump (JSON). If not specified, reads from stdin
    file: Option<String>,

    /// Key algorithm. Taken from KEY_TYPE in the dump when omitted
    #[arg(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Output format (text, json, der)
    #[arg(short, long, value_enum, default_value = "text")]
    output: KeyFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Algorithm {
    Rsa,
    Dsa,
    Ec,
}

impl From<Algorithm> for KeyAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Rsa => KeyAlgorithm::Rsa,
            Algorithm::Dsa => KeyAlgorithm::Dsa,
            Algorithm::Ec => KeyAlgorithm::Ec,
        }
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let attrs = parse_attribute_dump(&input)?;

    let algorithm = match config.algorithm {
        Some(algorithm) => algorithm.into(),
        None => KeyAlgorithm::from_attributes(&attrs)?,
    };
    let key = build_public_key(algorithm, &attrs)?;

    match config.output {
        KeyFormat::Text => print!("{}", format_text(&key)?),
        KeyFormat::Json => println!("{}", serde_json::to_string_pretty(&key)?),
        KeyFormat::Der => println!("{}", hex::encode(key.to_spki_der()?)),
    }

    Ok(())
}

fn format_text(key: &PublicKey) -> Result<String> {
    let mut output = String::new();
    writeln!(output, "Public Key Algorithm: {}", key.algorithm())?;
    writeln!(output, "Public-Key: ({} bit)", key.key_size())?;

    match key {
        PublicKey::Rsa(rsa) => write_rsa(&mut output, rsa)?,
        PublicKey::Dsa(dsa) => write_dsa(&mut output, dsa)?,
        PublicKey::Ec(ec) => write_ec(&mut output, ec)?,
    }

    writeln!(output, "SubjectPublicKeyInfo:")?;
    output.push_str(&format_hex_dump(&key.to_spki_der()?));
    Ok(output)
}

fn write_rsa(output: &mut String, key: &RsaPublicKey) -> Result<()> {
    writeln!(output, "Modulus:")?;
    output.push_str(&format_colon_hex(&key.modulus().to_bytes_be(), 4)?);
    let exponent = key.public_exponent();
    writeln!(output, "Exponent: {} (0x{:x})", exponent, exponent)?;
    Ok(())
}

fn write_dsa(output: &mut String, key: &DsaPublicKey) -> Result<()> {
    writeln!(output, "pub:")?;
    output.push_str(&format_colon_hex(&key.public_value().to_bytes_be(), 4)?);
    let domain = key.parameters();
    for (label, value) in [("P", &domain.p), ("Q", &domain.q), ("G", &domain.g)] {
        writeln!(output, "{label}:")?;
        output.push_str(&format_colon_hex(&value.to_bytes_be(), 4)?);
    }
    Ok(())
}

fn write_ec(output: &mut String, key: &EcPublicKey) -> Result<()> {
    writeln!(output, "pub:")?;
    output.push_str(&format_colon_hex(&key.point().to_uncompressed(), 4)?);
    match key.group() {
        EcParameters::Named(curve) => {
            let name = key.curve_name().unwrap_or("unknown");
            writeln!(output, "ASN1 OID: {} ({})", name, curve.oid_str())?;
        }
        EcParameters::Specified(curve) => {
            writeln!(output, "Field Type: prime-field")?;
            writeln!(output, "Prime: {}", curve.prime)?;
        }
    }
    Ok(())
}
