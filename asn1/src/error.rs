//! Error types for ASN.1 parsing and encoding.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors that can occur during ASN.1 parsing and encoding operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Boolean errors
    #[error("invalid boolean")]
    InvalidBoolean,

    // Integer errors
    #[error("INTEGER: no data")]
    IntegerNoData,
    #[error("INTEGER: value out of range for u64")]
    IntegerOutOfRangeU64,

    // ObjectIdentifier errors
    #[error("OBJECT IDENTIFIER: no data")]
    ObjectIdentifierNoData,
    #[error("OBJECT IDENTIFIER: incomplete encoding")]
    ObjectIdentifierIncompleteEncoding,
    #[error("OBJECT IDENTIFIER: subidentifier not minimally encoded")]
    ObjectIdentifierNonMinimalEncoding,
    #[error("OBJECT IDENTIFIER: subidentifier does not fit in 64 bits")]
    ObjectIdentifierComponentOverflow,
    #[error("OBJECT IDENTIFIER: too few components (need at least 2)")]
    ObjectIdentifierTooFewComponents,
    #[error("OBJECT IDENTIFIER: first arcs out of range")]
    ObjectIdentifierArcOutOfRange,
    #[error("OBJECT IDENTIFIER: invalid component '{0}'")]
    ObjectIdentifierInvalidComponent(String),
    #[error("parse int error: {0}")]
    ParseInt(ParseIntError),

    // BitString errors
    #[error("BIT STRING: no data")]
    BitStringNoData,
    #[error("BIT STRING: unused bits {0} out of range (must be 0-7)")]
    BitStringUnusedBitsOutOfRange(u8),

    // String type errors
    #[error("UTF8String: invalid UTF-8")]
    Utf8StringInvalidUtf8,
    #[error("PrintableString: invalid encoding")]
    PrintableStringInvalidEncoding,
    #[error("IA5String: invalid encoding")]
    Ia5StringInvalidEncoding,

    // Context-specific errors
    #[error("invalid context-specific value: {slot}, {msg}")]
    InvalidContextSpecific { slot: u8, msg: String },

    // DER errors
    #[error("invalid DER encoding: {0}")]
    FailedToDecodeDer(#[source] tokencert_der::error::Error),

    // Element errors
    #[error("element: cannot encode {0}")]
    ElementCannotEncode(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
