//! EC public keys from `CKA_EC_PARAMS` and `CKA_EC_POINT`
//!
//! `CKA_EC_PARAMS` is DER `ECParameters` (RFC 5480). `CKA_EC_POINT` is a DER
//! OCTET STRING wrapping the SEC1 point octets.

use serde::{Serialize, Serializer, ser::SerializeStruct};
use tokencert_asn1::{ASN1Object, BitString, Element};
use tokencert_pkix_types::algorithm::parameters::{EcParameters, NamedCurve};
use tokencert_pkix_types::{AlgorithmIdentifier, OidName, SubjectPublicKeyInfo};

use crate::attribute::{AttributeType, KeyAttributes, require};
use crate::error::{DecodeFailure, Error, Result};
use crate::public_key::PublicKey;

mod point;
mod prime_field;

pub use point::EcPoint;
use prime_field::PrimeCurve;

/// EC public key: the curve group and a point validated against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPublicKey {
    group: EcParameters,
    point: EcPoint,
}

impl EcPublicKey {
    pub fn group(&self) -> &EcParameters {
        &self.group
    }

    pub fn point(&self) -> &EcPoint {
        &self.point
    }

    /// Field size of the curve in bits.
    pub fn key_size(&self) -> u32 {
        match &self.group {
            EcParameters::Named(curve) => point::named_field_bits(*curve).unwrap_or(0),
            EcParameters::Specified(curve) => curve
                .prime
                .to_biguint()
                .and_then(|p| u32::try_from(p.bits()).ok())
                .unwrap_or(0),
        }
    }

    /// Curve name, or `None` for an explicit domain.
    pub fn curve_name(&self) -> Option<&'static str> {
        self.group.oid_name()
    }

    /// `id-ecPublicKey` with the group parameters and the uncompressed point.
    pub fn to_spki(&self) -> Result<SubjectPublicKeyInfo> {
        Ok(SubjectPublicKeyInfo::new(
            AlgorithmIdentifier::ec_public_key(&self.group)?,
            BitString::new(0, self.point.to_uncompressed()),
        ))
    }
}

impl Serialize for EcPublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("EcPublicKey", 3)?;
        match &self.group {
            EcParameters::Named(curve) => {
                state.serialize_field("curve", &self.curve_name())?;
                state.serialize_field("curve_oid", curve.oid_str())?;
            }
            EcParameters::Specified(_) => {
                state.serialize_field("curve", "explicit")?;
                state.serialize_field("curve_oid", &Option::<&str>::None)?;
            }
        }
        state.serialize_field("point", &self.point)?;
        state.end()
    }
}

/// Builds an EC key from `EC_PARAMS` and `EC_POINT`.
///
/// The group is decoded first, then the point is unwrapped and checked
/// against it. Any failure leaves nothing behind.
pub fn build_ec_key<A>(attrs: &A) -> Result<PublicKey>
where
    A: KeyAttributes + ?Sized,
{
    let params = require(attrs, AttributeType::EcParams)?;
    let point = require(attrs, AttributeType::EcPoint)?;

    let group = decode_group(params)?;
    let octets = unwrap_octet_string(point)
        .map_err(|source| Error::decode(AttributeType::EcPoint, source))?;

    let point = match &group {
        Group::Named(curve) => point::decode_named(*curve, &octets),
        Group::Explicit(_, curve) => point::decode_explicit(curve, &octets),
    }
    .map_err(|source| Error::decode(AttributeType::EcPoint, source))?;

    let group = group.into_parameters();
    tracing::debug!(
        curve = group.oid_name().unwrap_or("explicit"),
        field_size = point.field_size(),
        "built EC public key"
    );
    Ok(PublicKey::Ec(EcPublicKey { group, point }))
}

enum Group {
    Named(NamedCurve),
    Explicit(EcParameters, PrimeCurve),
}

impl Group {
    fn into_parameters(self) -> EcParameters {
        match self {
            Group::Named(curve) => EcParameters::Named(curve),
            Group::Explicit(params, _) => params,
        }
    }
}

fn decode_group(bytes: &[u8]) -> Result<Group> {
    let fail = |source: DecodeFailure| Error::decode(AttributeType::EcParams, source);

    let params = EcParameters::from_der(bytes).map_err(|e| fail(e.into()))?;
    match params {
        EcParameters::Named(curve) => {
            if point::named_field_size(curve).is_none() {
                let name = curve.oid_name().unwrap_or(curve.oid_str());
                return Err(fail(DecodeFailure::UnsupportedCurve(name.to_string())));
            }
            Ok(Group::Named(curve))
        }
        EcParameters::Specified(specified) => {
            let curve = PrimeCurve::from_specified(&specified).map_err(fail)?;
            tracing::debug!(prime_bits = curve.prime().bits(), "explicit curve domain");
            Ok(Group::Explicit(EcParameters::Specified(specified), curve))
        }
    }
}

/// `CKA_EC_POINT` holds `ECPoint ::= OCTET STRING`; exactly one element.
fn unwrap_octet_string(bytes: &[u8]) -> std::result::Result<Vec<u8>, DecodeFailure> {
    let object = ASN1Object::from_der(bytes)?;
    match object.elements() {
        [Element::OctetString(octets)] => Ok(octets.as_bytes().to_vec()),
        [other] => Err(DecodeFailure::ExpectedOctetString(other.to_string())),
        _ => Err(DecodeFailure::TrailingData),
    }
}

#[cfg(test)]
mod tests {
    use super::point::tests::{
        K256_GX, K256_GY, P192_GX, P192_GY, P224_GX, P224_GY, P256_GX, P256_GY, P384_GX, P384_GY,
        uncompressed,
    };
    use super::*;
    use crate::attribute::AttributeList;
    use num_bigint::BigUint;
    use rstest::rstest;
    use tokencert_asn1::{Integer, OctetString};
    use tokencert_pkix_types::algorithm::parameters::SpecifiedCurve;

    fn wrap(octets: Vec<u8>) -> Vec<u8> {
        Element::OctetString(OctetString::from(octets))
            .to_der()
            .unwrap()
    }

    fn ec_attrs(curve: NamedCurve, octets: Vec<u8>) -> AttributeList {
        AttributeList::new()
            .with(
                AttributeType::EcParams,
                EcParameters::Named(curve).to_der().unwrap(),
            )
            .with(AttributeType::EcPoint, wrap(octets))
    }

    // y^2 = x^3 + 2x + 3 over F_97 with generator (3, 6)
    fn toy_domain(base: Vec<u8>) -> EcParameters {
        EcParameters::Specified(Box::new(SpecifiedCurve {
            version: Integer::from(1u64),
            prime: Integer::from(97u64),
            a: vec![0x02],
            b: vec![0x03],
            seed: None,
            base,
            order: Integer::from(5u64),
            cofactor: Some(Integer::from(1u64)),
            hash: None,
        }))
    }

    #[rstest]
    #[case::p256(NamedCurve::Secp256r1, P256_GX, P256_GY, 256)]
    #[case::k256(NamedCurve::Secp256k1, K256_GX, K256_GY, 256)]
    #[case::p384(NamedCurve::Secp384r1, P384_GX, P384_GY, 384)]
    #[case::p192(NamedCurve::Secp192r1, P192_GX, P192_GY, 192)]
    #[case::p224(NamedCurve::Secp224r1, P224_GX, P224_GY, 224)]
    fn test_build_ec_key_named(
        #[case] curve: NamedCurve,
        #[case] x: &str,
        #[case] y: &str,
        #[case] bits: u32,
    ) {
        let PublicKey::Ec(key) = build_ec_key(&ec_attrs(curve, uncompressed(x, y))).unwrap() else {
            panic!("expected EC key");
        };
        assert_eq!(key.group(), &EcParameters::Named(curve));
        assert_eq!(key.point().x(), &BigUint::from_bytes_be(&hex::decode(x).unwrap()));
        assert_eq!(key.key_size(), bits);
        assert_eq!(key.curve_name(), curve.oid_name());
    }

    #[test]
    fn test_build_ec_key_off_curve() {
        let mut octets = uncompressed(P256_GX, P256_GY);
        octets[10] ^= 0xff;
        let err = build_ec_key(&ec_attrs(NamedCurve::Secp256r1, octets)).unwrap_err();
        assert_eq!(
            err,
            Error::DecodeError {
                attribute: AttributeType::EcPoint,
                source: DecodeFailure::PointNotOnCurve,
            }
        );
    }

    #[test]
    fn test_build_ec_key_is_idempotent() {
        let attrs = ec_attrs(NamedCurve::Secp256k1, uncompressed(K256_GX, K256_GY));
        let first = build_ec_key(&attrs).unwrap();
        let second = build_ec_key(&attrs).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    #[case::no_params(AttributeType::EcParams)]
    #[case::no_point(AttributeType::EcPoint)]
    fn test_build_ec_key_missing(#[case] missing: AttributeType) {
        let mut attrs = ec_attrs(NamedCurve::Secp256r1, uncompressed(P256_GX, P256_GY));
        attrs.remove(missing);
        assert_eq!(
            build_ec_key(&attrs).unwrap_err(),
            Error::MissingAttribute(missing)
        );
    }

    #[test]
    fn test_build_ec_key_unsupported_curve() {
        let attrs = ec_attrs(NamedCurve::Sect283k1, uncompressed(P256_GX, P256_GY));
        assert_eq!(
            build_ec_key(&attrs).unwrap_err(),
            Error::DecodeError {
                attribute: AttributeType::EcParams,
                source: DecodeFailure::UnsupportedCurve("sect283k1".into()),
            }
        );
    }

    #[rstest]
    #[case::implicit_curve(vec![0x05, 0x00])]
    #[case::trailing_bytes(vec![0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x22, 0x05, 0x00])]
    #[case::unknown_curve(vec![0x06, 0x03, 0x2a, 0x03, 0x04])]
    fn test_build_ec_key_bad_params(#[case] params: Vec<u8>) {
        let attrs = AttributeList::new()
            .with(AttributeType::EcParams, params)
            .with(AttributeType::EcPoint, wrap(uncompressed(P256_GX, P256_GY)));
        assert!(matches!(
            build_ec_key(&attrs),
            Err(Error::DecodeError {
                attribute: AttributeType::EcParams,
                source: DecodeFailure::Parameters(_),
            })
        ));
    }

    // 05 00 wrapped in `levels` SEQUENCEs
    fn nested_params(levels: usize) -> Vec<u8> {
        let mut der = vec![0x05, 0x00];
        for _ in 0..levels {
            let len = der.len();
            let mut outer = vec![0x30];
            match len {
                0..=0x7f => outer.push(len as u8),
                0x80..=0xff => outer.extend([0x81, len as u8]),
                _ => outer.extend([0x82, (len >> 8) as u8, len as u8]),
            }
            outer.extend(der);
            der = outer;
        }
        der
    }

    #[rstest]
    #[case::shallow(3)]
    #[case::deep(800)]
    #[case::very_deep(10_000)]
    fn test_build_ec_key_nested_params(#[case] levels: usize) {
        let attrs = AttributeList::new()
            .with(AttributeType::EcParams, nested_params(levels))
            .with(AttributeType::EcPoint, wrap(uncompressed(P256_GX, P256_GY)));
        assert!(matches!(
            build_ec_key(&attrs),
            Err(Error::DecodeError {
                attribute: AttributeType::EcParams,
                source: DecodeFailure::Parameters(_),
            })
        ));
    }

    #[test]
    fn test_build_ec_key_nested_point() {
        let attrs = ec_attrs(NamedCurve::Secp256r1, Vec::new())
            .with(AttributeType::EcPoint, nested_params(800));
        assert!(matches!(
            build_ec_key(&attrs),
            Err(Error::DecodeError {
                attribute: AttributeType::EcPoint,
                source: DecodeFailure::Asn1(_),
            })
        ));
    }

    #[rstest]
    #[case::raw_point(uncompressed(P256_GX, P256_GY))]
    #[case::trailing(
        {
            let mut der = wrap(uncompressed(P256_GX, P256_GY));
            der.extend([0x05, 0x00]);
            der
        }
    )]
    #[case::not_octet_string(vec![0x05, 0x00])]
    fn test_build_ec_key_bad_point_wrapper(#[case] point: Vec<u8>) {
        let attrs = ec_attrs(NamedCurve::Secp256r1, Vec::new()).with(AttributeType::EcPoint, point);
        assert!(matches!(
            build_ec_key(&attrs),
            Err(Error::DecodeError {
                attribute: AttributeType::EcPoint,
                ..
            })
        ));
    }

    #[rstest]
    #[case::compressed(vec![0x02, 0x03])]
    #[case::uncompressed(vec![0x04, 0x03, 0x06])]
    fn test_build_ec_key_explicit(#[case] octets: Vec<u8>) {
        let group = toy_domain(vec![0x04, 0x03, 0x06]);
        let attrs = AttributeList::new()
            .with(AttributeType::EcParams, group.to_der().unwrap())
            .with(AttributeType::EcPoint, wrap(octets));

        let PublicKey::Ec(key) = build_ec_key(&attrs).unwrap() else {
            panic!("expected EC key");
        };
        assert_eq!(key.group(), &group);
        assert_eq!(key.point().y(), &BigUint::from(6u32));
        assert_eq!(key.key_size(), 7);
        assert_eq!(key.curve_name(), None);
    }

    #[test]
    fn test_build_ec_key_explicit_bad_generator() {
        let group = toy_domain(vec![0x04, 0x03, 0x07]);
        let attrs = AttributeList::new()
            .with(AttributeType::EcParams, group.to_der().unwrap())
            .with(AttributeType::EcPoint, wrap(vec![0x04, 0x03, 0x06]));
        assert_eq!(
            build_ec_key(&attrs).unwrap_err(),
            Error::DecodeError {
                attribute: AttributeType::EcParams,
                source: DecodeFailure::GeneratorNotOnCurve,
            }
        );
    }

    #[test]
    fn test_ec_spki_der() {
        let attrs = ec_attrs(NamedCurve::Secp256r1, uncompressed(P256_GX, P256_GY));
        let PublicKey::Ec(key) = build_ec_key(&attrs).unwrap() else {
            panic!("expected EC key");
        };
        let der = key.to_spki().unwrap().to_der().unwrap();
        let mut expected = vec![
            0x30, 0x59, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06,
            0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00,
        ];
        expected.extend(uncompressed(P256_GX, P256_GY));
        assert_eq!(der, expected);
    }
}
