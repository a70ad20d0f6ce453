//! DSA Parameters
//!
//! Defined in [RFC 3279 Section 2.3.2](https://datatracker.ietf.org/doc/html/rfc3279#section-2.3.2)

use tokencert_asn1::{Element, Integer};

use super::{AlgorithmParameter, Error, RawAlgorithmParameter, Result, element_kind};
use crate::AlgorithmParameters;

/// DSA domain parameters
///
/// [RFC 3279 Section 2.3.2](https://datatracker.ietf.org/doc/html/rfc3279#section-2.3.2):
/// ```asn1
/// Dss-Parms ::= SEQUENCE {
///     p   INTEGER,
///     q   INTEGER,
///     g   INTEGER
/// }
/// ```
///
/// A token stores these as `CKA_PRIME`, `CKA_SUBPRIME` and `CKA_BASE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaParameters {
    /// Prime modulus p
    pub p: Integer,
    /// Prime divisor q of p-1
    pub q: Integer,
    /// Generator g
    pub g: Integer,
}

impl DsaParameters {
    pub fn new(p: Integer, q: Integer, g: Integer) -> Self {
        Self { p, q, g }
    }

    pub fn to_element(&self) -> Element {
        Element::Sequence(vec![
            Element::Integer(self.p.clone()),
            Element::Integer(self.q.clone()),
            Element::Integer(self.g.clone()),
        ])
    }
}

impl AlgorithmParameter for DsaParameters {
    fn parse(raw: &RawAlgorithmParameter) -> Result<Self> {
        raw.try_into()
    }
}

impl From<&DsaParameters> for RawAlgorithmParameter {
    fn from(params: &DsaParameters) -> Self {
        Self::new(params.to_element())
    }
}

impl TryFrom<&RawAlgorithmParameter> for DsaParameters {
    type Error = Error;

    fn try_from(raw: &RawAlgorithmParameter) -> Result<Self> {
        let Element::Sequence(elements) = raw.element() else {
            return Err(Error::InvalidDsaParameter(format!(
                "Dss-Parms must be a SEQUENCE, got {}",
                element_kind(raw.element())
            )));
        };
        let [p, q, g] = elements.as_slice() else {
            return Err(Error::InvalidElementCount {
                expected: 3,
                actual: elements.len(),
            });
        };

        let integer = |element: &Element, field: &str| match element {
            Element::Integer(i) => Ok(i.clone()),
            other => Err(Error::TypeMismatch {
                expected: format!("INTEGER ({})", field),
                actual: element_kind(other).to_string(),
            }),
        };

        Ok(Self {
            p: integer(p, "p")?,
            q: integer(q, "q")?,
            g: integer(g, "g")?,
        })
    }
}

impl From<&DsaParameters> for AlgorithmParameters {
    fn from(params: &DsaParameters) -> Self {
        Self::Other(RawAlgorithmParameter::from(params))
    }
}

impl TryFrom<AlgorithmParameters> for DsaParameters {
    type Error = Error;

    fn try_from(params: AlgorithmParameters) -> Result<Self> {
        match params {
            AlgorithmParameters::Null => Err(Error::NullConversion),
            AlgorithmParameters::Other(raw) => Self::try_from(&raw),
        }
    }
}
