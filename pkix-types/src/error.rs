//! Error types for PKIX types

use thiserror::Error;

/// Result type for PKIX types operations
pub type Result<T> = std::result::Result<T, Error>;

/// PKIX types error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // SubjectPublicKeyInfo errors
    #[error("SubjectPublicKeyInfo: expected SEQUENCE")]
    SubjectPublicKeyInfoExpectedSequence,
    #[error("SubjectPublicKeyInfo: expected BIT STRING for subject public key")]
    SubjectPublicKeyInfoExpectedBitString,
    #[error("SubjectPublicKeyInfo: expected 2 elements, got {0}")]
    SubjectPublicKeyInfoInvalidElementCount(usize),
    #[error("SubjectPublicKeyInfo: expected exactly one DER element")]
    SubjectPublicKeyInfoTrailingData,

    /// Distinguished name error
    #[error(transparent)]
    NameError(#[from] crate::name::Error),

    /// Algorithm error
    #[error(transparent)]
    AlgorithmError(#[from] crate::algorithm::Error),

    /// ASN.1 encoding/decoding error
    #[error("ASN.1 error: {0}")]
    ASN1Error(#[from] tokencert_asn1::error::Error),
}
