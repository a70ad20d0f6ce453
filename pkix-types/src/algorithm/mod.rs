//! AlgorithmIdentifier type
//!
//! Defined in [RFC 5280 Section 4.1.1.2](https://datatracker.ietf.org/doc/html/rfc5280#section-4.1.1.2)

use serde::{Serialize, ser::SerializeStruct};
use tokencert::decoder::{DecodableFrom, Decoder};
use tokencert::encoder::{EncodableTo, Encoder};
use tokencert_asn1::{Element, ObjectIdentifier};

use crate::OidName;
use crate::algorithm::parameters::{DsaParameters, EcParameters, element_kind};

pub mod error;
pub mod parameters;

pub use error::{Error, Result};
pub use parameters::{AlgorithmParameter, RawAlgorithmParameter};

/// Parameters field in AlgorithmIdentifier
///
/// Wrapped in Option:
/// - None: Field not present
/// - Some(AlgorithmParameters::Null): Explicit NULL value (RSA)
/// - Some(AlgorithmParameters::Other(RawAlgorithmParameter)): Any other ASN.1 element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmParameters {
    /// Explicit NULL (05 00)
    Null,
    /// Any other ASN.1 element wrapped in RawAlgorithmParameter
    Other(RawAlgorithmParameter),
}

impl Serialize for AlgorithmParameters {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            AlgorithmParameters::Null => serializer.serialize_str("NULL"),
            AlgorithmParameters::Other(raw) => match raw.element() {
                Element::ObjectIdentifier(oid) => {
                    let name = EcParameters::try_from(raw.element())
                        .ok()
                        .and_then(|params| params.oid_name());
                    match name {
                        Some(name) => serializer.serialize_str(name),
                        None => serializer.serialize_str(&oid.to_string()),
                    }
                }
                Element::Sequence(elements) => {
                    let mut state = serializer.serialize_struct("Sequence", 1)?;
                    state.serialize_field("element_count", &elements.len())?;
                    state.end()
                }
                other => serializer.serialize_str(element_kind(other)),
            },
        }
    }
}

/// Algorithm Identifier
///
/// [RFC 5280 Section 4.1.1.2](https://datatracker.ietf.org/doc/html/rfc5280#section-4.1.1.2):
/// ```asn1
/// AlgorithmIdentifier ::= SEQUENCE {
///     algorithm   OBJECT IDENTIFIER,
///     parameters  ANY DEFINED BY algorithm OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    /// Algorithm OID
    pub algorithm: ObjectIdentifier,
    /// Optional parameters
    /// - None: Field not present
    /// - Some(AlgorithmParameters::Null): RSA (NULL parameters)
    /// - Some(AlgorithmParameters::Other(...)): EC (ECParameters) or DSA (Dss-Parms)
    pub parameters: Option<AlgorithmParameters>,
}

impl AlgorithmIdentifier {
    // Public key algorithm OIDs (RFC 3279, RFC 5480)
    pub const OID_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.1";
    pub const OID_ID_DSA: &'static str = "1.2.840.10040.4.1";
    pub const OID_EC_PUBLIC_KEY: &'static str = "1.2.840.10045.2.1";

    /// Create a new AlgorithmIdentifier with algorithm OID only
    pub fn new(algorithm: ObjectIdentifier) -> Self {
        Self {
            algorithm,
            parameters: None,
        }
    }

    /// Create a new AlgorithmIdentifier with parameters
    pub fn new_with_params(algorithm: ObjectIdentifier, parameters: AlgorithmParameters) -> Self {
        Self {
            algorithm,
            parameters: Some(parameters),
        }
    }

    /// `rsaEncryption` with explicit NULL parameters (RFC 3279 Section 2.3.1).
    pub fn rsa_encryption() -> Result<Self> {
        Ok(Self::new_with_params(
            Self::OID_RSA_ENCRYPTION.parse()?,
            AlgorithmParameters::Null,
        ))
    }

    /// `id-dsa` carrying `Dss-Parms` (RFC 3279 Section 2.3.2).
    pub fn dsa(params: &DsaParameters) -> Result<Self> {
        Ok(Self::new_with_params(
            Self::OID_ID_DSA.parse()?,
            AlgorithmParameters::Other(RawAlgorithmParameter::from(params)),
        ))
    }

    /// `id-ecPublicKey` carrying `ECParameters` (RFC 5480 Section 2.1.1).
    pub fn ec_public_key(params: &EcParameters) -> Result<Self> {
        Ok(Self::new_with_params(
            Self::OID_EC_PUBLIC_KEY.parse()?,
            AlgorithmParameters::Other(RawAlgorithmParameter::try_from(params)?),
        ))
    }

    /// Get the algorithm OID
    pub fn algorithm(&self) -> &ObjectIdentifier {
        &self.algorithm
    }

    /// Get the parameters
    pub fn parameters(&self) -> &Option<AlgorithmParameters> {
        &self.parameters
    }

    /// Get typed parameters
    pub fn parameter<P: AlgorithmParameter>(&self) -> crate::error::Result<Option<P>> {
        match &self.parameters {
            None => Ok(None),
            Some(AlgorithmParameters::Null) => Err(Error::NullParameterNotSupported.into()),
            Some(AlgorithmParameters::Other(raw)) => {
                Ok(Some(P::parse(raw).map_err(Error::ParameterError)?))
            }
        }
    }
}

impl OidName for AlgorithmIdentifier {
    fn oid_name(&self) -> Option<&'static str> {
        match self.algorithm.to_string().as_str() {
            AlgorithmIdentifier::OID_RSA_ENCRYPTION => Some("rsaEncryption"),
            AlgorithmIdentifier::OID_ID_DSA => Some("id-dsa"),
            AlgorithmIdentifier::OID_EC_PUBLIC_KEY => Some("id-ecPublicKey"),
            _ => None,
        }
    }
}

impl Serialize for AlgorithmIdentifier {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AlgorithmIdentifier", 2)?;

        let oid_string = self.algorithm.to_string();
        let algorithm_display = self.oid_name().unwrap_or(&oid_string);
        state.serialize_field("algorithm", &algorithm_display)?;

        if let Some(ref params) = self.parameters {
            state.serialize_field("parameters", params)?;
        }
        state.end()
    }
}

impl DecodableFrom<Element> for AlgorithmIdentifier {}

impl Decoder<Element, AlgorithmIdentifier> for Element {
    type Error = crate::error::Error;

    fn decode(&self) -> crate::error::Result<AlgorithmIdentifier> {
        match self {
            Element::Sequence(elements) => {
                let algorithm = match elements.first() {
                    Some(Element::ObjectIdentifier(oid)) => oid.clone(),
                    Some(_) => {
                        return Err(Error::ExpectedOidForAlgorithm.into());
                    }
                    None => {
                        return Err(Error::EmptyAlgorithmIdentifier.into());
                    }
                };

                if elements.len() > 2 {
                    return Err(Error::TooManyElements.into());
                }

                let parameters = match elements.get(1) {
                    Some(Element::Null) => Some(AlgorithmParameters::Null),
                    Some(other) => Some(AlgorithmParameters::Other(RawAlgorithmParameter::new(
                        other.clone(),
                    ))),
                    None => None,
                };

                Ok(AlgorithmIdentifier {
                    algorithm,
                    parameters,
                })
            }
            _ => Err(Error::ExpectedSequence.into()),
        }
    }
}

impl EncodableTo<AlgorithmIdentifier> for Element {}

impl Encoder<AlgorithmIdentifier, Element> for AlgorithmIdentifier {
    type Error = crate::error::Error;

    fn encode(&self) -> crate::error::Result<Element> {
        let params_elem = self.parameters.as_ref().map(|params| match params {
            AlgorithmParameters::Null => Element::Null,
            AlgorithmParameters::Other(raw) => raw.element().clone(),
        });

        let elements: Vec<_> = std::iter::once(Element::ObjectIdentifier(self.algorithm.clone()))
            .chain(params_elem)
            .collect();

        Ok(Element::Sequence(elements))
    }
}
