//! Algorithm Parameters Error Types

use thiserror::Error;

/// Algorithm Parameters Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid EC parameter
    #[error("Invalid EC parameter: {0}")]
    InvalidEcParameter(String),

    /// Invalid DSA parameter
    #[error("Invalid DSA parameter: {0}")]
    InvalidDsaParameter(String),

    /// Curve OID not in the supported list
    #[error("unknown named curve {0}")]
    UnknownCurve(String),

    /// `implicitCurve` inherits parameters from a CA and cannot stand alone
    #[error("implicitCurve parameters are not supported")]
    ImplicitCurve,

    /// Only prime fields are supported for explicit curves
    #[error("characteristic-two field curves are not supported")]
    CharacteristicTwoField,

    #[error("unsupported SpecifiedECDomain version {0}")]
    UnsupportedVersion(String),

    #[error("trailing data after parameters")]
    TrailingData,

    /// Element type mismatch
    #[error("Expected {expected} but got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Invalid element count
    #[error("Expected {expected} elements but got {actual}")]
    InvalidElementCount { expected: usize, actual: usize },

    /// Cannot convert NULL to typed parameter
    #[error("Cannot convert NULL to typed parameter")]
    NullConversion,

    #[error(transparent)]
    ASN1Error(#[from] tokencert_asn1::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
