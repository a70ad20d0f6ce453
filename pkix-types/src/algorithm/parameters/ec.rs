//! Elliptic Curve Parameters
//!
//! Defined in [RFC 5480 Section 2.1.1](https://datatracker.ietf.org/doc/html/rfc5480#section-2.1.1)
//! and [SEC 1 Appendix C.2](https://www.secg.org/sec1-v2.pdf)

use serde::{Deserialize, Serialize};
use tokencert_asn1::{ASN1Object, BitString, Element, Integer, ObjectIdentifier, OctetString};

use super::{AlgorithmParameter, Error, RawAlgorithmParameter, Result, element_kind};
use crate::{AlgorithmParameters, OidName};

/// Well-known elliptic curves defined in [RFC 5480 Section 2.1.1.1](https://datatracker.ietf.org/doc/html/rfc5480#section-2.1.1.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedCurve {
    /// secp192r1 (also known as prime192v1 or P-192)
    /// OID: 1.2.840.10045.3.1.1
    Secp192r1,
    /// secp224r1 (also known as P-224)
    /// OID: 1.3.132.0.33
    Secp224r1,
    /// secp256r1 (also known as prime256v1 or P-256)
    /// OID: 1.2.840.10045.3.1.7
    Secp256r1,
    /// secp384r1 (also known as P-384)
    /// OID: 1.3.132.0.34
    Secp384r1,
    /// secp521r1 (also known as P-521)
    /// OID: 1.3.132.0.35
    Secp521r1,
    /// secp256k1
    /// OID: 1.3.132.0.10
    Secp256k1,
    /// sect163k1
    /// OID: 1.3.132.0.1
    Sect163k1,
    /// sect163r2
    /// OID: 1.3.132.0.15
    Sect163r2,
    /// sect233k1
    /// OID: 1.3.132.0.26
    Sect233k1,
    /// sect233r1
    /// OID: 1.3.132.0.27
    Sect233r1,
    /// sect283k1
    /// OID: 1.3.132.0.16
    Sect283k1,
    /// sect283r1
    /// OID: 1.3.132.0.17
    Sect283r1,
    /// sect409k1
    /// OID: 1.3.132.0.36
    Sect409k1,
    /// sect409r1
    /// OID: 1.3.132.0.37
    Sect409r1,
    /// sect571k1
    /// OID: 1.3.132.0.38
    Sect571k1,
    /// sect571r1
    /// OID: 1.3.132.0.39
    Sect571r1,
}

impl NamedCurve {
    // Elliptic curve OID constants (RFC 5480 Section 2.1.1.1)
    pub const OID_SECP192R1: &'static str = "1.2.840.10045.3.1.1";
    pub const OID_SECP224R1: &'static str = "1.3.132.0.33";
    pub const OID_SECP256R1: &'static str = "1.2.840.10045.3.1.7";
    pub const OID_SECP384R1: &'static str = "1.3.132.0.34";
    pub const OID_SECP521R1: &'static str = "1.3.132.0.35";
    pub const OID_SECP256K1: &'static str = "1.3.132.0.10";
    pub const OID_SECT163K1: &'static str = "1.3.132.0.1";
    pub const OID_SECT163R2: &'static str = "1.3.132.0.15";
    pub const OID_SECT233K1: &'static str = "1.3.132.0.26";
    pub const OID_SECT233R1: &'static str = "1.3.132.0.27";
    pub const OID_SECT283K1: &'static str = "1.3.132.0.16";
    pub const OID_SECT283R1: &'static str = "1.3.132.0.17";
    pub const OID_SECT409K1: &'static str = "1.3.132.0.36";
    pub const OID_SECT409R1: &'static str = "1.3.132.0.37";
    pub const OID_SECT571K1: &'static str = "1.3.132.0.38";
    pub const OID_SECT571R1: &'static str = "1.3.132.0.39";

    /// Get the OID string for this named curve.
    ///
    /// ```
    /// use tokencert_pkix_types::algorithm::parameters::ec::NamedCurve;
    ///
    /// assert_eq!(NamedCurve::Secp256r1.oid_str(), "1.2.840.10045.3.1.7");
    /// assert_eq!(NamedCurve::Secp256k1.oid_str(), "1.3.132.0.10");
    /// ```
    pub const fn oid_str(&self) -> &'static str {
        match self {
            Self::Secp192r1 => Self::OID_SECP192R1,
            Self::Secp224r1 => Self::OID_SECP224R1,
            Self::Secp256r1 => Self::OID_SECP256R1,
            Self::Secp384r1 => Self::OID_SECP384R1,
            Self::Secp521r1 => Self::OID_SECP521R1,
            Self::Secp256k1 => Self::OID_SECP256K1,
            Self::Sect163k1 => Self::OID_SECT163K1,
            Self::Sect163r2 => Self::OID_SECT163R2,
            Self::Sect233k1 => Self::OID_SECT233K1,
            Self::Sect233r1 => Self::OID_SECT233R1,
            Self::Sect283k1 => Self::OID_SECT283K1,
            Self::Sect283r1 => Self::OID_SECT283R1,
            Self::Sect409k1 => Self::OID_SECT409K1,
            Self::Sect409r1 => Self::OID_SECT409R1,
            Self::Sect571k1 => Self::OID_SECT571K1,
            Self::Sect571r1 => Self::OID_SECT571R1,
        }
    }

    /// Get the OID for this named curve.
    pub fn oid(&self) -> Result<ObjectIdentifier> {
        Ok(self.oid_str().parse()?)
    }
}

impl OidName for NamedCurve {
    fn oid_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Secp192r1 => "secp192r1",
            Self::Secp224r1 => "secp224r1",
            Self::Secp256r1 => "secp256r1",
            Self::Secp384r1 => "secp384r1",
            Self::Secp521r1 => "secp521r1",
            Self::Secp256k1 => "secp256k1",
            Self::Sect163k1 => "sect163k1",
            Self::Sect163r2 => "sect163r2",
            Self::Sect233k1 => "sect233k1",
            Self::Sect233r1 => "sect233r1",
            Self::Sect283k1 => "sect283k1",
            Self::Sect283r1 => "sect283r1",
            Self::Sect409k1 => "sect409k1",
            Self::Sect409r1 => "sect409r1",
            Self::Sect571k1 => "sect571k1",
            Self::Sect571r1 => "sect571r1",
        };
        Some(name)
    }
}

impl TryFrom<&ObjectIdentifier> for NamedCurve {
    type Error = Error;

    fn try_from(oid: &ObjectIdentifier) -> Result<Self> {
        let oid_str = oid.to_string();
        match oid_str.as_str() {
            Self::OID_SECP192R1 => Ok(Self::Secp192r1),
            Self::OID_SECP224R1 => Ok(Self::Secp224r1),
            Self::OID_SECP256R1 => Ok(Self::Secp256r1),
            Self::OID_SECP384R1 => Ok(Self::Secp384r1),
            Self::OID_SECP521R1 => Ok(Self::Secp521r1),
            Self::OID_SECP256K1 => Ok(Self::Secp256k1),
            Self::OID_SECT163K1 => Ok(Self::Sect163k1),
            Self::OID_SECT163R2 => Ok(Self::Sect163r2),
            Self::OID_SECT233K1 => Ok(Self::Sect233k1),
            Self::OID_SECT233R1 => Ok(Self::Sect233r1),
            Self::OID_SECT283K1 => Ok(Self::Sect283k1),
            Self::OID_SECT283R1 => Ok(Self::Sect283r1),
            Self::OID_SECT409K1 => Ok(Self::Sect409k1),
            Self::OID_SECT409R1 => Ok(Self::Sect409r1),
            Self::OID_SECT571K1 => Ok(Self::Sect571k1),
            Self::OID_SECT571R1 => Ok(Self::Sect571r1),
            _ => Err(Error::UnknownCurve(oid_str)),
        }
    }
}

/// Explicit prime-field curve domain.
///
/// [SEC 1 Appendix C.2](https://www.secg.org/sec1-v2.pdf):
/// ```asn1
/// SpecifiedECDomain ::= SEQUENCE {
///     version   SpecifiedECDomainVersion(ecdpVer1 | ecdpVer2 | ecdpVer3, ...),
///     fieldID   FieldID {{FieldTypes}},
///     curve     Curve,
///     base      ECPoint,
///     order     INTEGER,
///     cofactor  INTEGER OPTIONAL,
///     hash      HashAlgorithm OPTIONAL,
///     ...
/// }
///
/// Curve ::= SEQUENCE {
///     a         FieldElement,
///     b         FieldElement,
///     seed      BIT STRING OPTIONAL
/// }
/// ```
///
/// Only `prime-field` is accepted. The generator is kept in its encoded
/// form; checking it lies on the curve needs field arithmetic and is left to
/// the key layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifiedCurve {
    pub version: Integer,
    pub prime: Integer,
    pub a: Vec<u8>,
    pub b: Vec<u8>,
    pub seed: Option<BitString>,
    /// SEC1-encoded generator point.
    pub base: Vec<u8>,
    pub order: Integer,
    pub cofactor: Option<Integer>,
    pub hash: Option<Element>,
}

impl SpecifiedCurve {
    pub const OID_PRIME_FIELD: &'static str = "1.2.840.10045.1.1";
    pub const OID_CHARACTERISTIC_TWO_FIELD: &'static str = "1.2.840.10045.1.2";

    fn decode_elements(elements: &[Element]) -> Result<Self> {
        let (version, field_id, curve, base, order, rest) = match elements {
            [version, field_id, curve, base, order, rest @ ..] if rest.len() <= 2 => {
                (version, field_id, curve, base, order, rest)
            }
            _ => {
                return Err(Error::InvalidElementCount {
                    expected: 5,
                    actual: elements.len(),
                });
            }
        };

        let version = expect_integer(version, "version")?;
        match version.to_u64() {
            Some(1..=3) => {}
            _ => return Err(Error::UnsupportedVersion(version.to_string())),
        }

        let prime = match field_id {
            Element::Sequence(field) => match field.as_slice() {
                [Element::ObjectIdentifier(oid), Element::Integer(p)]
                    if *oid == Self::OID_PRIME_FIELD =>
                {
                    p.clone()
                }
                [Element::ObjectIdentifier(oid), ..] if *oid == Self::OID_CHARACTERISTIC_TWO_FIELD => {
                    return Err(Error::CharacteristicTwoField);
                }
                _ => {
                    return Err(Error::InvalidEcParameter(
                        "fieldID must be prime-field with an INTEGER prime".into(),
                    ));
                }
            },
            other => return Err(mismatch("SEQUENCE (fieldID)", other)),
        };

        let (a, b, seed) = match curve {
            Element::Sequence(curve) => match curve.as_slice() {
                [Element::OctetString(a), Element::OctetString(b)] => {
                    (a.as_bytes().to_vec(), b.as_bytes().to_vec(), None)
                }
                [
                    Element::OctetString(a),
                    Element::OctetString(b),
                    Element::BitString(seed),
                ] => (
                    a.as_bytes().to_vec(),
                    b.as_bytes().to_vec(),
                    Some(seed.clone()),
                ),
                _ => {
                    return Err(Error::InvalidEcParameter(
                        "Curve must be SEQUENCE { a, b, seed OPTIONAL }".into(),
                    ));
                }
            },
            other => return Err(mismatch("SEQUENCE (curve)", other)),
        };

        let base = match base {
            Element::OctetString(os) => os.as_bytes().to_vec(),
            other => return Err(mismatch("OCTET STRING (base)", other)),
        };
        let order = expect_integer(order, "order")?;

        let (cofactor, hash) = match rest {
            [] => (None, None),
            [Element::Integer(h)] => (Some(h.clone()), None),
            [Element::Integer(h), hash] => (Some(h.clone()), Some(hash.clone())),
            [other, ..] => return Err(mismatch("INTEGER (cofactor)", other)),
        };

        Ok(Self {
            version,
            prime,
            a,
            b,
            seed,
            base,
            order,
            cofactor,
            hash,
        })
    }

    fn to_element(&self) -> Result<Element> {
        let mut curve = vec![
            Element::OctetString(OctetString::from(self.a.clone())),
            Element::OctetString(OctetString::from(self.b.clone())),
        ];
        curve.extend(self.seed.clone().map(Element::BitString));

        let mut elements = vec![
            Element::Integer(self.version.clone()),
            Element::Sequence(vec![
                Element::ObjectIdentifier(Self::OID_PRIME_FIELD.parse()?),
                Element::Integer(self.prime.clone()),
            ]),
            Element::Sequence(curve),
            Element::OctetString(OctetString::from(self.base.clone())),
            Element::Integer(self.order.clone()),
        ];
        elements.extend(self.cofactor.clone().map(Element::Integer));
        elements.extend(self.hash.clone());
        Ok(Element::Sequence(elements))
    }
}

fn expect_integer(element: &Element, field: &str) -> Result<Integer> {
    match element {
        Element::Integer(i) => Ok(i.clone()),
        other => Err(mismatch(&format!("INTEGER ({})", field), other)),
    }
}

fn mismatch(expected: &str, actual: &Element) -> Error {
    Error::TypeMismatch {
        expected: expected.to_string(),
        actual: element_kind(actual).to_string(),
    }
}

/// ECParameters for Elliptic Curve algorithms
///
/// [RFC 5480 Section 2.1.1](https://datatracker.ietf.org/doc/html/rfc5480#section-2.1.1):
/// ```asn1
/// ECParameters ::= CHOICE {
///     namedCurve      OBJECT IDENTIFIER,
///     implicitCurve   NULL,
///     specifiedCurve  SpecifiedECDomain
/// }
/// ```
///
/// Tokens report `CKA_EC_PARAMS` in this form. `implicitCurve` is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcParameters {
    Named(NamedCurve),
    Specified(Box<SpecifiedCurve>),
}

impl EcParameters {
    pub fn new(named_curve: NamedCurve) -> Self {
        Self::Named(named_curve)
    }

    pub fn named_curve(&self) -> Option<NamedCurve> {
        match self {
            Self::Named(curve) => Some(*curve),
            Self::Specified(_) => None,
        }
    }

    /// Decodes DER `ECParameters`; the buffer must hold exactly one element.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let object = ASN1Object::from_der(bytes)?;
        match object.elements() {
            [element] => Self::try_from(element),
            _ => Err(Error::TrailingData),
        }
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(self.to_element()?.to_der()?)
    }

    pub fn to_element(&self) -> Result<Element> {
        match self {
            Self::Named(curve) => Ok(Element::ObjectIdentifier(curve.oid()?)),
            Self::Specified(curve) => curve.to_element(),
        }
    }
}

impl OidName for EcParameters {
    fn oid_name(&self) -> Option<&'static str> {
        self.named_curve().and_then(|curve| curve.oid_name())
    }
}

impl TryFrom<&Element> for EcParameters {
    type Error = Error;

    fn try_from(element: &Element) -> Result<Self> {
        match element {
            Element::ObjectIdentifier(oid) => Ok(Self::Named(NamedCurve::try_from(oid)?)),
            Element::Null => Err(Error::ImplicitCurve),
            Element::Sequence(elements) => Ok(Self::Specified(Box::new(
                SpecifiedCurve::decode_elements(elements)?,
            ))),
            other => Err(mismatch(
                "OBJECT IDENTIFIER, NULL or SEQUENCE (ECParameters)",
                other,
            )),
        }
    }
}

impl AlgorithmParameter for EcParameters {
    fn parse(raw: &RawAlgorithmParameter) -> Result<Self> {
        raw.try_into()
    }
}

impl TryFrom<&EcParameters> for RawAlgorithmParameter {
    type Error = Error;

    fn try_from(params: &EcParameters) -> Result<Self> {
        Ok(Self::new(params.to_element()?))
    }
}

impl TryFrom<&RawAlgorithmParameter> for EcParameters {
    type Error = Error;

    fn try_from(raw: &RawAlgorithmParameter) -> Result<Self> {
        Self::try_from(raw.element())
    }
}

impl TryFrom<&EcParameters> for AlgorithmParameters {
    type Error = Error;

    fn try_from(params: &EcParameters) -> Result<Self> {
        Ok(Self::Other(RawAlgorithmParameter::try_from(params)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // secp256r1 domain parameters, SEC 2 section 2.4.2
    const P256_P: &str = "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff";
    const P256_A: &str = "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc";
    const P256_B: &str = "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b";
    const P256_GX: &str = "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";
    const P256_GY: &str = "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5";
    const P256_N: &str = "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551";

    fn unhex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn p256_specified() -> SpecifiedCurve {
        let mut base = vec![0x04];
        base.extend(unhex(P256_GX));
        base.extend(unhex(P256_GY));
        SpecifiedCurve {
            version: Integer::from(1u64),
            prime: Integer::from_unsigned_bytes_be(&unhex(P256_P)),
            a: unhex(P256_A),
            b: unhex(P256_B),
            seed: None,
            base,
            order: Integer::from_unsigned_bytes_be(&unhex(P256_N)),
            cofactor: Some(Integer::from(1u64)),
            hash: None,
        }
    }

    #[rstest]
    #[case(NamedCurve::Secp192r1)]
    #[case(NamedCurve::Secp224r1)]
    #[case(NamedCurve::Secp256r1)]
    #[case(NamedCurve::Secp384r1)]
    #[case(NamedCurve::Secp521r1)]
    #[case(NamedCurve::Secp256k1)]
    #[case(NamedCurve::Sect571r1)]
    fn test_named_curve_from_oid(#[case] expected: NamedCurve) {
        let oid = expected.oid().unwrap();
        let curve = NamedCurve::try_from(&oid).unwrap();
        assert_eq!(curve, expected);
    }

    #[test]
    fn test_named_curve_unknown_oid() {
        let oid = "1.2.3.4.5".parse::<ObjectIdentifier>().unwrap();
        let result = NamedCurve::try_from(&oid);
        assert_eq!(result.unwrap_err(), Error::UnknownCurve("1.2.3.4.5".into()));
    }

    #[rstest]
    #[case(vec![0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07], NamedCurve::Secp256r1)]
    #[case(vec![0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x22], NamedCurve::Secp384r1)]
    #[case(vec![0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a], NamedCurve::Secp256k1)]
    fn test_ec_parameters_named_der(#[case] der: Vec<u8>, #[case] curve: NamedCurve) {
        let params = EcParameters::from_der(&der).unwrap();
        assert_eq!(params, EcParameters::Named(curve));
        assert_eq!(params.to_der().unwrap(), der);
    }

    #[test]
    fn test_ec_parameters_implicit_curve() {
        let der = vec![0x05, 0x00];
        assert_eq!(EcParameters::from_der(&der).unwrap_err(), Error::ImplicitCurve);
    }

    #[test]
    fn test_ec_parameters_truncated() {
        let der = vec![0x06, 0x05, 0x2b, 0x81, 0x04];
        assert!(matches!(
            EcParameters::from_der(&der),
            Err(Error::ASN1Error(_))
        ));
    }

    #[test]
    fn test_ec_parameters_trailing_element() {
        let der = vec![0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x22, 0x05, 0x00];
        assert_eq!(EcParameters::from_der(&der).unwrap_err(), Error::TrailingData);
    }

    #[test]
    fn test_specified_curve_round_trip() {
        let params = EcParameters::Specified(Box::new(p256_specified()));
        let der = params.to_der().unwrap();
        let decoded = EcParameters::from_der(&der).unwrap();
        assert_eq!(decoded, params);
        assert_eq!(decoded.oid_name(), None);
    }

    #[test]
    fn test_specified_curve_rejects_char2() {
        let element = Element::Sequence(vec![
            Element::Integer(Integer::from(1u64)),
            Element::Sequence(vec![
                Element::ObjectIdentifier(SpecifiedCurve::OID_CHARACTERISTIC_TWO_FIELD.parse().unwrap()),
                Element::Sequence(vec![]),
            ]),
            Element::Sequence(vec![]),
            Element::OctetString(OctetString::from(vec![0x04])),
            Element::Integer(Integer::from(1u64)),
        ]);
        assert_eq!(
            EcParameters::try_from(&element).unwrap_err(),
            Error::CharacteristicTwoField
        );
    }

    #[test]
    fn test_specified_curve_rejects_version() {
        let mut curve = p256_specified();
        curve.version = Integer::from(4u64);
        let element = curve.to_element().unwrap();
        assert_eq!(
            EcParameters::try_from(&element).unwrap_err(),
            Error::UnsupportedVersion("4".into())
        );
    }

    #[rstest]
    #[case(Element::Integer(Integer::from(vec![0x01])))]
    #[case(Element::OctetString(OctetString::from(vec![0x01, 0x02])))]
    fn test_ec_parameters_invalid_element(#[case] element: Element) {
        let raw = RawAlgorithmParameter::new(element);
        let result: Result<EcParameters> = (&raw).try_into();
        assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    }

    #[rstest]
    #[case(NamedCurve::Secp256r1)]
    #[case(NamedCurve::Secp384r1)]
    #[case(NamedCurve::Secp521r1)]
    fn test_ec_parameters_via_raw(#[case] curve: NamedCurve) {
        let params = EcParameters::new(curve);
        let raw = RawAlgorithmParameter::try_from(&params).unwrap();
        let decoded = EcParameters::parse(&raw).unwrap();
        assert_eq!(params, decoded);
        assert_eq!(decoded.oid_name(), curve.oid_name());
    }
}
