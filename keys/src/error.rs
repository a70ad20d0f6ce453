//! Key builder error types

use thiserror::Error;

use crate::attribute::AttributeType;

/// Why a present attribute could not be turned into key material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    #[error("empty integer value")]
    EmptyInteger,

    #[error("expected exactly one DER element")]
    TrailingData,

    #[error("expected OCTET STRING, got {0}")]
    ExpectedOctetString(String),

    #[error("unsupported curve {0}")]
    UnsupportedCurve(String),

    #[error("invalid curve domain: {0}")]
    InvalidDomain(String),

    #[error("generator is not on the curve")]
    GeneratorNotOnCurve,

    #[error("invalid point encoding: {0}")]
    InvalidPointEncoding(String),

    #[error("point is not on the curve")]
    PointNotOnCurve,

    #[error("point at infinity is not a valid public key")]
    IdentityPoint,

    #[error("unsupported key type {0}")]
    UnsupportedKeyType(String),

    #[error(transparent)]
    Parameters(#[from] tokencert_pkix_types::algorithm::parameters::Error),

    #[error(transparent)]
    Asn1(#[from] tokencert_asn1::error::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Displays the bare attribute name, e.g. `PUBLIC_EXPONENT`.
    #[error("{0}")]
    MissingAttribute(AttributeType),

    #[error("failed to decode {attribute}: {source}")]
    DecodeError {
        attribute: AttributeType,
        #[source]
        source: DecodeFailure,
    },

    #[error("unknown attribute name {0:?}")]
    UnknownAttribute(String),

    #[error("unknown key algorithm {0:?}")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Algorithm(#[from] tokencert_pkix_types::algorithm::Error),

    #[error(transparent)]
    PkixTypes(#[from] tokencert_pkix_types::Error),

    #[error(transparent)]
    Asn1(#[from] tokencert_asn1::error::Error),
}

impl Error {
    pub(crate) fn decode(attribute: AttributeType, source: impl Into<DecodeFailure>) -> Self {
        Error::DecodeError {
            attribute,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
