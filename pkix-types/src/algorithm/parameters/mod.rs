//! Algorithm Parameters
//!
//! Provides type-safe wrappers for algorithm-specific parameters
//! defined in various RFCs:
//! - [RFC 3279](https://datatracker.ietf.org/doc/html/rfc3279) - DSA, RSA
//! - [RFC 5480](https://datatracker.ietf.org/doc/html/rfc5480) - Elliptic Curve Cryptography
//! - [SEC 1](https://www.secg.org/sec1-v2.pdf) - explicit curve domains

use tokencert_asn1::Element;

pub mod dsa;
pub mod ec;
pub mod error;

pub use dsa::DsaParameters;
pub use ec::{EcParameters, NamedCurve, SpecifiedCurve};
pub use error::{Error, Result};

/// Trait for algorithm-specific parameters
pub trait AlgorithmParameter: Sized {
    /// Parse from RawAlgorithmParameter
    fn parse(raw: &RawAlgorithmParameter) -> Result<Self>;
}

/// Raw algorithm parameter wrapper
///
/// Wraps the ASN.1 element found in an AlgorithmIdentifier so typed
/// parameters can be recovered through `TryFrom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAlgorithmParameter {
    element: Element,
}

impl RawAlgorithmParameter {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl From<Element> for RawAlgorithmParameter {
    fn from(element: Element) -> Self {
        Self::new(element)
    }
}

impl From<RawAlgorithmParameter> for Element {
    fn from(raw: RawAlgorithmParameter) -> Self {
        raw.element
    }
}

/// Short name of an element's ASN.1 type, for error messages.
pub(crate) fn element_kind(element: &Element) -> &'static str {
    match element {
        Element::Boolean(_) => "BOOLEAN",
        Element::Integer(_) => "INTEGER",
        Element::BitString(_) => "BIT STRING",
        Element::OctetString(_) => "OCTET STRING",
        Element::Null => "NULL",
        Element::ObjectIdentifier(_) => "OBJECT IDENTIFIER",
        Element::UTF8String(_) => "UTF8String",
        Element::Sequence(_) => "SEQUENCE",
        Element::Set(_) => "SET",
        Element::PrintableString(_) => "PrintableString",
        Element::IA5String(_) => "IA5String",
        Element::ContextSpecific { .. } => "context-specific",
        Element::Unimplemented(_) => "unknown",
    }
}
