//! Key attribute identifiers and the attribute store seam
//!
//! Values are the raw buffers a token returns for `C_GetAttributeValue`:
//! big-endian unsigned integers for RSA and DSA components, DER for
//! `CKA_EC_PARAMS` and `CKA_EC_POINT`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Serialize, Serializer};

use crate::error::{DecodeFailure, Error, Result};

/// PKCS#11 attribute types used to rebuild public keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeType {
    /// CKA_VALUE (DSA public value y)
    Value,
    /// CKA_KEY_TYPE
    KeyType,
    /// CKA_MODULUS
    Modulus,
    /// CKA_PUBLIC_EXPONENT
    PublicExponent,
    /// CKA_PRIME
    Prime,
    /// CKA_SUBPRIME
    Subprime,
    /// CKA_BASE
    Base,
    /// CKA_EC_PARAMS
    EcParams,
    /// CKA_EC_POINT
    EcPoint,
}

impl AttributeType {
    pub const ALL: [AttributeType; 9] = [
        AttributeType::Value,
        AttributeType::KeyType,
        AttributeType::Modulus,
        AttributeType::PublicExponent,
        AttributeType::Prime,
        AttributeType::Subprime,
        AttributeType::Base,
        AttributeType::EcParams,
        AttributeType::EcPoint,
    ];

    /// The `CKA_*` numeric code.
    pub const fn code(&self) -> u64 {
        match self {
            AttributeType::Value => 0x0011,
            AttributeType::KeyType => 0x0100,
            AttributeType::Modulus => 0x0120,
            AttributeType::PublicExponent => 0x0122,
            AttributeType::Prime => 0x0130,
            AttributeType::Subprime => 0x0131,
            AttributeType::Base => 0x0132,
            AttributeType::EcParams => 0x0180,
            AttributeType::EcPoint => 0x0181,
        }
    }

    /// Name without the `CKA_` prefix.
    pub const fn name(&self) -> &'static str {
        match self {
            AttributeType::Value => "VALUE",
            AttributeType::KeyType => "KEY_TYPE",
            AttributeType::Modulus => "MODULUS",
            AttributeType::PublicExponent => "PUBLIC_EXPONENT",
            AttributeType::Prime => "PRIME",
            AttributeType::Subprime => "SUBPRIME",
            AttributeType::Base => "BASE",
            AttributeType::EcParams => "EC_PARAMS",
            AttributeType::EcPoint => "EC_POINT",
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.code() == code)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AttributeType {
    type Err = Error;

    /// Accepts `MODULUS` or `CKA_MODULUS`.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.strip_prefix("CKA_").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|ty| ty.name() == name)
            .ok_or_else(|| Error::UnknownAttribute(s.to_string()))
    }
}

impl Serialize for AttributeType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

/// Read-only view of a key's attributes.
///
/// Builders only borrow the store; values are never copied out except into
/// the decoded key.
pub trait KeyAttributes {
    fn get_attribute(&self, attribute: AttributeType) -> Option<&[u8]>;

    fn has_attribute(&self, attribute: AttributeType) -> bool {
        self.get_attribute(attribute).is_some()
    }
}

/// In-memory attribute store keeping insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    entries: Vec<(AttributeType, Vec<u8>)>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `attribute`, replacing an existing value in place.
    pub fn insert(&mut self, attribute: AttributeType, value: impl Into<Vec<u8>>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(ty, _)| *ty == attribute) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((attribute, value)),
        }
    }

    pub fn with(mut self, attribute: AttributeType, value: impl Into<Vec<u8>>) -> Self {
        self.insert(attribute, value);
        self
    }

    pub fn remove(&mut self, attribute: AttributeType) -> Option<Vec<u8>> {
        let index = self.entries.iter().position(|(ty, _)| *ty == attribute)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeType, &[u8])> {
        self.entries.iter().map(|(ty, value)| (*ty, value.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyAttributes for AttributeList {
    fn get_attribute(&self, attribute: AttributeType) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(ty, _)| *ty == attribute)
            .map(|(_, value)| value.as_slice())
    }
}

impl<V: Into<Vec<u8>>> FromIterator<(AttributeType, V)> for AttributeList {
    fn from_iter<I: IntoIterator<Item = (AttributeType, V)>>(iter: I) -> Self {
        let mut list = AttributeList::new();
        for (ty, value) in iter {
            list.insert(ty, value);
        }
        list
    }
}

impl KeyAttributes for BTreeMap<AttributeType, Vec<u8>> {
    fn get_attribute(&self, attribute: AttributeType) -> Option<&[u8]> {
        self.get(&attribute).map(Vec::as_slice)
    }
}

impl KeyAttributes for HashMap<AttributeType, Vec<u8>> {
    fn get_attribute(&self, attribute: AttributeType) -> Option<&[u8]> {
        self.get(&attribute).map(Vec::as_slice)
    }
}

pub(crate) fn require<A>(attrs: &A, attribute: AttributeType) -> Result<&[u8]>
where
    A: KeyAttributes + ?Sized,
{
    attrs
        .get_attribute(attribute)
        .ok_or(Error::MissingAttribute(attribute))
}

/// Reads a big-endian unsigned integer. Leading zero bytes are allowed.
pub(crate) fn decode_unsigned(attribute: AttributeType, bytes: &[u8]) -> Result<BigUint> {
    if bytes.is_empty() {
        return Err(Error::decode(attribute, DecodeFailure::EmptyInteger));
    }
    tracing::debug!(attribute = %attribute, len = bytes.len(), "read integer attribute");
    Ok(BigUint::from_bytes_be(bytes))
}
