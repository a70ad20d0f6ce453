//! RSA public keys from `CKA_MODULUS` and `CKA_PUBLIC_EXPONENT`

use num_bigint::BigUint;
use serde::Serialize;
use tokencert_asn1::{BitString, Element, Integer};
use tokencert_pkix_types::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use crate::attribute::{AttributeType, KeyAttributes, decode_unsigned, require};
use crate::error::Result;
use crate::public_key::PublicKey;

/// RSA public key (n, e).
///
/// No primality or range checks are applied; the values are exactly what
/// the token reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsaPublicKey {
    #[serde(serialize_with = "crate::serde_hex::biguint")]
    modulus: BigUint,
    #[serde(serialize_with = "crate::serde_hex::biguint")]
    public_exponent: BigUint,
}

impl RsaPublicKey {
    pub fn new(modulus: BigUint, public_exponent: BigUint) -> Self {
        Self {
            modulus,
            public_exponent,
        }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn public_exponent(&self) -> &BigUint {
        &self.public_exponent
    }

    /// Modulus length in bits.
    pub fn key_size(&self) -> u32 {
        u32::try_from(self.modulus.bits()).unwrap_or(u32::MAX)
    }

    /// PKCS#1 `RSAPublicKey ::= SEQUENCE { modulus INTEGER, publicExponent INTEGER }`
    pub fn to_pkcs1_der(&self) -> Result<Vec<u8>> {
        let element = Element::Sequence(vec![
            Element::Integer(Integer::from(self.modulus.clone())),
            Element::Integer(Integer::from(self.public_exponent.clone())),
        ]);
        Ok(element.to_der()?)
    }

    pub fn to_spki(&self) -> Result<SubjectPublicKeyInfo> {
        Ok(SubjectPublicKeyInfo::new(
            AlgorithmIdentifier::rsa_encryption()?,
            BitString::new(0, self.to_pkcs1_der()?),
        ))
    }
}

/// Builds an RSA key from `MODULUS` and `PUBLIC_EXPONENT`.
///
/// Both attributes are checked for presence, in that order, before either
/// is decoded.
pub fn build_rsa_key<A>(attrs: &A) -> Result<PublicKey>
where
    A: KeyAttributes + ?Sized,
{
    let modulus = require(attrs, AttributeType::Modulus)?;
    let public_exponent = require(attrs, AttributeType::PublicExponent)?;

    let key = RsaPublicKey::new(
        decode_unsigned(AttributeType::Modulus, modulus)?,
        decode_unsigned(AttributeType::PublicExponent, public_exponent)?,
    );
    tracing::debug!(bits = key.key_size(), "built RSA public key");
    Ok(PublicKey::Rsa(key))
}
