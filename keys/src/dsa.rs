//! DSA public keys from `CKA_PRIME`, `CKA_SUBPRIME`, `CKA_BASE` and `CKA_VALUE`

use num_bigint::BigUint;
use serde::Serialize;
use tokencert_asn1::{BitString, Element, Integer};
use tokencert_pkix_types::algorithm::parameters::DsaParameters;
use tokencert_pkix_types::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use crate::attribute::{AttributeType, KeyAttributes, decode_unsigned, require};
use crate::error::Result;
use crate::public_key::PublicKey;

/// DSA domain parameters (p, q, g).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DsaDomain {
    #[serde(serialize_with = "crate::serde_hex::biguint")]
    pub p: BigUint,
    #[serde(serialize_with = "crate::serde_hex::biguint")]
    pub q: BigUint,
    #[serde(serialize_with = "crate::serde_hex::biguint")]
    pub g: BigUint,
}

impl DsaDomain {
    pub fn to_parameters(&self) -> DsaParameters {
        DsaParameters::new(
            Integer::from(self.p.clone()),
            Integer::from(self.q.clone()),
            Integer::from(self.g.clone()),
        )
    }
}

/// DSA public key: domain parameters plus the public value y.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DsaPublicKey {
    parameters: DsaDomain,
    #[serde(serialize_with = "crate::serde_hex::biguint")]
    public_value: BigUint,
}

impl DsaPublicKey {
    pub fn new(parameters: DsaDomain, public_value: BigUint) -> Self {
        Self {
            parameters,
            public_value,
        }
    }

    pub fn parameters(&self) -> &DsaDomain {
        &self.parameters
    }

    pub fn public_value(&self) -> &BigUint {
        &self.public_value
    }

    /// Length of p in bits.
    pub fn key_size(&self) -> u32 {
        u32::try_from(self.parameters.p.bits()).unwrap_or(u32::MAX)
    }

    /// `id-dsa` with `Dss-Parms`; the key is `DSAPublicKey ::= INTEGER`.
    pub fn to_spki(&self) -> Result<SubjectPublicKeyInfo> {
        let y = Element::Integer(Integer::from(self.public_value.clone())).to_der()?;
        Ok(SubjectPublicKeyInfo::new(
            AlgorithmIdentifier::dsa(&self.parameters.to_parameters())?,
            BitString::new(0, y),
        ))
    }
}

/// Builds a DSA key. `PRIME`, `SUBPRIME`, `BASE` and `VALUE` are required;
/// the first one missing, in that order, is reported.
pub fn build_dsa_key<A>(attrs: &A) -> Result<PublicKey>
where
    A: KeyAttributes + ?Sized,
{
    let prime = require(attrs, AttributeType::Prime)?;
    let subprime = require(attrs, AttributeType::Subprime)?;
    let base = require(attrs, AttributeType::Base)?;
    let value = require(attrs, AttributeType::Value)?;

    let parameters = DsaDomain {
        p: decode_unsigned(AttributeType::Prime, prime)?,
        q: decode_unsigned(AttributeType::Subprime, subprime)?,
        g: decode_unsigned(AttributeType::Base, base)?,
    };
    let key = DsaPublicKey::new(parameters, decode_unsigned(AttributeType::Value, value)?);
    tracing::debug!(bits = key.key_size(), "built DSA public key");
    Ok(PublicKey::Dsa(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeList;
    use crate::error::Error;
    use rstest::rstest;

    fn dsa_attrs() -> AttributeList {
        AttributeList::new()
            .with(AttributeType::Prime, vec![0x17])
            .with(AttributeType::Subprime, vec![0x0b])
            .with(AttributeType::Base, vec![0x04])
            .with(AttributeType::Value, vec![0x08])
    }

    #[test]
    fn test_build_dsa_key() {
        let PublicKey::Dsa(key) = build_dsa_key(&dsa_attrs()).unwrap() else {
            panic!("expected DSA key");
        };
        assert_eq!(key.parameters().p, BigUint::from(23u32));
        assert_eq!(key.parameters().q, BigUint::from(11u32));
        assert_eq!(key.parameters().g, BigUint::from(4u32));
        assert_eq!(key.public_value(), &BigUint::from(8u32));
        assert_eq!(key.key_size(), 5);
    }

    #[rstest]
    #[case(AttributeType::Prime)]
    #[case(AttributeType::Subprime)]
    #[case(AttributeType::Base)]
    #[case(AttributeType::Value)]
    fn test_build_dsa_key_missing(#[case] missing: AttributeType) {
        let mut attrs = dsa_attrs();
        attrs.remove(missing);
        assert_eq!(
            build_dsa_key(&attrs).unwrap_err(),
            Error::MissingAttribute(missing)
        );
    }

    #[test]
    fn test_build_dsa_key_is_idempotent() {
        let attrs = dsa_attrs();
        let first = build_dsa_key(&attrs).unwrap();
        let second = build_dsa_key(&attrs).unwrap();
        assert_eq!(first, second);
        assert_eq!(attrs.len(), 4);
    }

    #[test]
    fn test_build_dsa_key_first_missing_wins() {
        let attrs = AttributeList::new().with(AttributeType::Value, vec![0x08]);
        assert_eq!(
            build_dsa_key(&attrs).unwrap_err(),
            Error::MissingAttribute(AttributeType::Prime)
        );
    }

    #[test]
    fn test_dsa_spki_der() {
        let PublicKey::Dsa(key) = build_dsa_key(&dsa_attrs()).unwrap() else {
            panic!("expected DSA key");
        };
        let der = key.to_spki().unwrap().to_der().unwrap();
        let expected = vec![
            0x30, 0x1c, // SubjectPublicKeyInfo
            0x30, 0x14, // AlgorithmIdentifier
            0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x38, 0x04, 0x01, // id-dsa
            0x30, 0x09, 0x02, 0x01, 0x17, 0x02, 0x01, 0x0b, 0x02, 0x01, 0x04, // Dss-Parms
            0x03, 0x04, 0x00, 0x02, 0x01, 0x08, // BIT STRING { INTEGER 8 }
        ];
        assert_eq!(der, expected);
    }
}
