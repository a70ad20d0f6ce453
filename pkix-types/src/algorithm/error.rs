//! Algorithm Error Types

use thiserror::Error;

/// Algorithm Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("AlgorithmIdentifier: expected SEQUENCE")]
    ExpectedSequence,
    #[error("AlgorithmIdentifier: empty SEQUENCE")]
    EmptyAlgorithmIdentifier,
    #[error("AlgorithmIdentifier: expected OBJECT IDENTIFIER for algorithm")]
    ExpectedOidForAlgorithm,
    #[error("AlgorithmIdentifier: too many elements")]
    TooManyElements,
    #[error("AlgorithmIdentifier: NULL parameters cannot be converted to a typed parameter")]
    NullParameterNotSupported,

    /// Algorithm parameter error
    #[error(transparent)]
    ParameterError(#[from] super::parameters::Error),

    /// ASN.1 error
    #[error(transparent)]
    ASN1Error(#[from] tokencert_asn1::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
