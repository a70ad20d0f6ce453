//! Public key dispatch and SubjectPublicKeyInfo conversion
//!
//! [`build_public_key`] picks the builder for a [`KeyAlgorithm`]. The
//! algorithm can come from the caller or from the token's `CKA_KEY_TYPE`.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::Serialize;
use tokencert_pkix_types::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use crate::attribute::{AttributeType, KeyAttributes, require};
use crate::dsa::{DsaPublicKey, build_dsa_key};
use crate::ec::{EcPublicKey, build_ec_key};
use crate::error::{DecodeFailure, Error, Result};
use crate::rsa::{RsaPublicKey, build_rsa_key};

/// Key algorithms a public key can be rebuilt for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAlgorithm {
    Rsa,
    Dsa,
    Ec,
}

impl KeyAlgorithm {
    pub const CKK_RSA: u64 = 0x0;
    pub const CKK_DSA: u64 = 0x1;
    pub const CKK_EC: u64 = 0x3;

    /// Maps a `CKK_*` key type.
    pub fn from_key_type(key_type: u64) -> Option<Self> {
        match key_type {
            Self::CKK_RSA => Some(KeyAlgorithm::Rsa),
            Self::CKK_DSA => Some(KeyAlgorithm::Dsa),
            Self::CKK_EC => Some(KeyAlgorithm::Ec),
            _ => None,
        }
    }

    /// Reads `KEY_TYPE` as a big-endian unsigned integer.
    pub fn from_attributes<A>(attrs: &A) -> Result<Self>
    where
        A: KeyAttributes + ?Sized,
    {
        let raw = require(attrs, AttributeType::KeyType)?;
        let fail = |source: DecodeFailure| Error::decode(AttributeType::KeyType, source);
        if raw.is_empty() {
            return Err(fail(DecodeFailure::EmptyInteger));
        }
        let value = BigUint::from_bytes_be(raw);
        value
            .to_u64()
            .and_then(Self::from_key_type)
            .ok_or_else(|| fail(DecodeFailure::UnsupportedKeyType(format!("0x{:x}", value))))
    }

    pub fn oid(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => AlgorithmIdentifier::OID_RSA_ENCRYPTION,
            KeyAlgorithm::Dsa => AlgorithmIdentifier::OID_ID_DSA,
            KeyAlgorithm::Ec => AlgorithmIdentifier::OID_EC_PUBLIC_KEY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "RSA",
            KeyAlgorithm::Dsa => "DSA",
            KeyAlgorithm::Ec => "EC",
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for KeyAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rsa" => Ok(KeyAlgorithm::Rsa),
            "dsa" => Ok(KeyAlgorithm::Dsa),
            "ec" | "ecdsa" => Ok(KeyAlgorithm::Ec),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A public key rebuilt from token attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    Dsa(DsaPublicKey),
    Ec(EcPublicKey),
}

impl PublicKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PublicKey::Rsa(_) => KeyAlgorithm::Rsa,
            PublicKey::Dsa(_) => KeyAlgorithm::Dsa,
            PublicKey::Ec(_) => KeyAlgorithm::Ec,
        }
    }

    /// Key size in bits: modulus for RSA, p for DSA, field size for EC.
    pub fn key_size(&self) -> u32 {
        match self {
            PublicKey::Rsa(key) => key.key_size(),
            PublicKey::Dsa(key) => key.key_size(),
            PublicKey::Ec(key) => key.key_size(),
        }
    }

    pub fn as_rsa(&self) -> Option<&RsaPublicKey> {
        match self {
            PublicKey::Rsa(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_dsa(&self) -> Option<&DsaPublicKey> {
        match self {
            PublicKey::Dsa(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_ec(&self) -> Option<&EcPublicKey> {
        match self {
            PublicKey::Ec(key) => Some(key),
            _ => None,
        }
    }

    pub fn to_spki(&self) -> Result<SubjectPublicKeyInfo> {
        match self {
            PublicKey::Rsa(key) => key.to_spki(),
            PublicKey::Dsa(key) => key.to_spki(),
            PublicKey::Ec(key) => key.to_spki(),
        }
    }

    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        Ok(self.to_spki()?.to_der()?)
    }
}

/// Builds a public key of `algorithm` from `attrs`.
pub fn build_public_key<A>(algorithm: KeyAlgorithm, attrs: &A) -> Result<PublicKey>
where
    A: KeyAttributes + ?Sized,
{
    tracing::debug!(%algorithm, "building public key");
    match algorithm {
        KeyAlgorithm::Rsa => build_rsa_key(attrs),
        KeyAlgorithm::Dsa => build_dsa_key(attrs),
        KeyAlgorithm::Ec => build_ec_key(attrs),
    }
}
