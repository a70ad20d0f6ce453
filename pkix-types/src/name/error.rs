//! Distinguished name errors

use thiserror::Error;

use crate::directory_string::StringKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Structural problems in a `/type=value/...` subject string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Malformed {
    #[error("subject must start with '/'")]
    MissingLeadingSlash,
    #[error("escape character at end of input")]
    DanglingEscape,
    #[error("element {index}: no '=' after attribute type")]
    UnterminatedType { index: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed subject: {0}")]
    MalformedInput(#[from] Malformed),
    #[error("subject has no usable attributes")]
    EmptyResult,
    #[error("invalid value for {attribute}: {reason}")]
    InvalidValue { attribute: String, reason: String },

    // DirectoryString errors
    #[error("DirectoryString: expected string type")]
    DirectoryStringExpectedStringType,
    #[error("DirectoryString: characters not allowed in {0}")]
    DirectoryStringInvalidCharacters(StringKind),

    // Name errors
    #[error("Name: expected SEQUENCE")]
    NameExpectedSequence,
    #[error("Name: expected exactly one DER element")]
    NameTrailingData,

    // RelativeDistinguishedName errors
    #[error("RelativeDistinguishedName: expected SET")]
    RdnExpectedSet,
    #[error("RelativeDistinguishedName: empty SET")]
    RdnEmpty,

    // AttributeTypeAndValue errors
    #[error("AttributeTypeAndValue: expected SEQUENCE")]
    AttributeTypeAndValueExpectedSequence,
    #[error("AttributeTypeAndValue: expected OBJECT IDENTIFIER for attribute type")]
    AttributeTypeAndValueExpectedOid,
    #[error("AttributeTypeAndValue: expected 2 elements")]
    AttributeTypeAndValueInvalidElementCount,

    /// ASN.1 encoding/decoding error
    #[error("ASN.1 error: {0}")]
    ASN1Error(#[from] tokencert_asn1::error::Error),
}
