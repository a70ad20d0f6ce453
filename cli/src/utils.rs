use std::collections::BTreeMap;
use std::fmt::Write;
use std::fs;
use std::io::{self, Read};

use serde_json::Value;
use tokencert_keys::{AttributeList, AttributeType};

use crate::error::{Error, Result};

/// Read input from a file or stdin
///
/// If `file` is `Some`, reads from the specified file path.
/// If `file` is `None`, reads from stdin.
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Parse an attribute dump
///
/// The dump is a JSON object mapping attribute names (`MODULUS`,
/// `CKA_EC_POINT`, ...) to hex strings. Hex may contain whitespace and `:`
/// separators. A JSON number is taken as a 64-bit big-endian value, which
/// is how `KEY_TYPE` is usually written.
pub(crate) fn parse_attribute_dump(input: &[u8]) -> Result<AttributeList> {
    let dump: BTreeMap<String, Value> = serde_json::from_slice(input)?;

    let mut attrs = AttributeList::new();
    for (name, value) in dump {
        let attribute: AttributeType = name.parse()?;
        let bytes = match value {
            Value::String(s) => decode_hex(&name, &s)?,
            Value::Number(n) => n
                .as_u64()
                .map(|v| v.to_be_bytes().to_vec())
                .ok_or_else(|| {
                    Error::InvalidInput(format!("{name}: expected an unsigned integer"))
                })?,
            _ => {
                return Err(Error::InvalidInput(format!(
                    "{name}: expected a hex string"
                )));
            }
        };
        attrs.insert(attribute, bytes);
    }
    tracing::debug!(count = attrs.len(), "read attribute dump");

    Ok(attrs)
}

fn decode_hex(attribute: &str, value: &str) -> Result<Vec<u8>> {
    let digits: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':')
        .collect();
    hex::decode(digits).map_err(|source| Error::Hex {
        attribute: attribute.to_string(),
        source,
    })
}

/// Format bytes as colon-separated hex, 15 bytes per line (OpenSSL style)
pub(crate) fn format_colon_hex(data: &[u8], indent: usize) -> Result<String> {
    const BYTES_PER_LINE: usize = 15;
    let mut output = String::new();
    let pad = " ".repeat(indent);

    let lines = data.chunks(BYTES_PER_LINE).count();
    for (line, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        let hex = chunk
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(":");
        let sep = if line + 1 < lines { ":" } else { "" };
        writeln!(output, "{pad}{hex}{sep}")?;
    }

    Ok(output)
}

/// Format binary data as hexadecimal dump
///
/// Returns a string formatted in hexdump style (similar to `xxd` command):
/// - 16 bytes per line
/// - Offset in hexadecimal
/// - Hex bytes with space separator
/// - ASCII representation on the right
pub(crate) fn format_hex_dump(data: &[u8]) -> String {
    const BYTES_PER_LINE: usize = 16;
    let mut output = String::new();

    for (offset, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        output.push_str(&format!("{:08x}  ", offset * BYTES_PER_LINE));

        for (i, byte) in chunk.iter().enumerate() {
            output.push_str(&format!("{:02x} ", byte));
            if i == 7 {
                output.push(' ');
            }
        }

        // Padding for incomplete lines
        for i in chunk.len()..BYTES_PER_LINE {
            output.push_str("   ");
            if i == 7 {
                output.push(' ');
            }
        }

        output.push_str(" |");
        for byte in chunk {
            if byte.is_ascii_graphic() || *byte == b' ' {
                output.push(*byte as char);
            } else {
                output.push('.');
            }
        }
        output.push_str("|\n");
    }

    output
}
