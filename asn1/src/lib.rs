use std::{fmt::Display, str::FromStr};

use error::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tokencert::decoder::{DecodableFrom, Decoder};
use tokencert::encoder::{EncodableTo, Encoder};
use tokencert_der::{Der, PrimitiveTag, Tag, Tlv};

pub mod error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ASN1Object {
    elements: Vec<Element>,
}

impl ASN1Object {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn new(elements: Vec<Element>) -> Self {
        ASN1Object { elements }
    }
}

impl DecodableFrom<Der> for ASN1Object {}

impl Decoder<Der, ASN1Object> for Der {
    type Error = Error;
    fn decode(&self) -> Result<ASN1Object> {
        let mut elements = Vec::new();
        for tlv in self.elements() {
            let element = Element::try_from(tlv)?;
            elements.push(element);
        }
        Ok(ASN1Object { elements })
    }
}

impl EncodableTo<ASN1Object> for Der {}

impl Encoder<ASN1Object, Der> for ASN1Object {
    type Error = Error;

    fn encode(&self) -> Result<Der> {
        let mut tlvs = Vec::new();
        for element in &self.elements {
            tlvs.push(element.encode()?);
        }
        Ok(Der::new(tlvs))
    }
}

impl ASN1Object {
    /// Decodes a complete DER buffer.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let der: Der = bytes.decode().map_err(Error::FailedToDecodeDer)?;
        der.decode()
    }

    /// Encodes every top-level element back to DER bytes.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let der: Der = self.encode()?;
        der.encode().map_err(Error::FailedToDecodeDer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Boolean(bool),
    Integer(Integer),
    BitString(BitString),
    OctetString(OctetString),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    UTF8String(String),
    Sequence(Vec<Element>),
    Set(Vec<Element>),
    PrintableString(String),
    IA5String(String),
    ContextSpecific {
        slot: u8,
        constructed: bool,
        element: Box<Element>,
    },
    Unimplemented(Tlv),
}

impl TryFrom<&Tlv> for Element {
    type Error = Error;

    fn try_from(tlv: &Tlv) -> Result<Self> {
        match tlv.tag() {
            Tag::Primitive(primitive_tag, _raw) => match primitive_tag {
                PrimitiveTag::Boolean => match tlv.data() {
                    Some([0x00]) => Ok(Element::Boolean(false)),
                    Some([0xff]) => Ok(Element::Boolean(true)),
                    _ => Err(Error::InvalidBoolean),
                },
                PrimitiveTag::Integer => match tlv.data() {
                    Some(data) if !data.is_empty() => Ok(Element::Integer(Integer::from(data))),
                    _ => Err(Error::IntegerNoData),
                },
                PrimitiveTag::BitString => {
                    let data = tlv.data().ok_or(Error::BitStringNoData)?;
                    Ok(Element::BitString(BitString::try_from(data)?))
                }
                PrimitiveTag::OctetString => Ok(Element::OctetString(OctetString::from(
                    tlv.data().unwrap_or_default(),
                ))),
                PrimitiveTag::Null => Ok(Element::Null),
                PrimitiveTag::ObjectIdentifier => {
                    let data = tlv.data().ok_or(Error::ObjectIdentifierNoData)?;
                    Ok(Element::ObjectIdentifier(ObjectIdentifier::try_from(data)?))
                }
                PrimitiveTag::UTF8String => {
                    let data = tlv.data().unwrap_or_default();
                    let s = String::from_utf8(data.to_vec())
                        .map_err(|_| Error::Utf8StringInvalidUtf8)?;
                    Ok(Element::UTF8String(s))
                }
                PrimitiveTag::Sequence => Ok(Element::Sequence(decode_children(tlv)?)),
                PrimitiveTag::Set => Ok(Element::Set(decode_children(tlv)?)),
                PrimitiveTag::PrintableString => {
                    let data = tlv.data().unwrap_or_default();
                    let s = String::from_utf8(data.to_vec())
                        .ok()
                        .filter(|s| is_printable_string(s))
                        .ok_or(Error::PrintableStringInvalidEncoding)?;
                    Ok(Element::PrintableString(s))
                }
                PrimitiveTag::IA5String => {
                    let data = tlv.data().unwrap_or_default();
                    if !data.is_ascii() {
                        return Err(Error::Ia5StringInvalidEncoding);
                    }
                    let s = String::from_utf8(data.to_vec())
                        .map_err(|_| Error::Ia5StringInvalidEncoding)?;
                    Ok(Element::IA5String(s))
                }
                PrimitiveTag::Unimplemented(_) => Ok(Element::Unimplemented(tlv.clone())),
            },
            Tag::ContextSpecific { slot, constructed } => {
                if *constructed {
                    // EXPLICIT tagging: exactly one inner TLV
                    match tlv.tlvs() {
                        Some([inner]) => Ok(Element::ContextSpecific {
                            slot: *slot,
                            constructed: true,
                            element: Box::new(Element::try_from(inner)?),
                        }),
                        _ => Err(Error::InvalidContextSpecific {
                            slot: *slot,
                            msg: "context-specific constructed must have exactly one sub-tlv"
                                .to_string(),
                        }),
                    }
                } else {
                    // IMPLICIT tagging: the caller interprets the raw bytes
                    let data = tlv.data().unwrap_or_default();
                    Ok(Element::ContextSpecific {
                        slot: *slot,
                        constructed: false,
                        element: Box::new(Element::OctetString(OctetString::from(data))),
                    })
                }
            }
        }
    }
}

fn decode_children(tlv: &Tlv) -> Result<Vec<Element>> {
    tlv.tlvs()
        .unwrap_or_default()
        .iter()
        .map(Element::try_from)
        .collect()
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Boolean(b) => write!(f, "Boolean({})", b),
            Element::Integer(i) => write!(f, "Integer({})", i),
            Element::BitString(bs) => write!(f, "BitString({})", bs),
            Element::OctetString(os) => write!(f, "OctetString({})", os),
            Element::Null => write!(f, "Null"),
            Element::ObjectIdentifier(oid) => write!(f, "ObjectIdentifier({})", oid),
            Element::UTF8String(s) => write!(f, "UTF8String({})", s),
            Element::Sequence(seq) => write!(f, "Sequence({:?})", seq),
            Element::Set(set) => write!(f, "Set({:?})", set),
            Element::PrintableString(s) => write!(f, "PrintableString({})", s),
            Element::IA5String(s) => write!(f, "IA5String({})", s),
            Element::ContextSpecific {
                slot,
                constructed,
                element,
            } => write!(
                f,
                "ContextSpecific(slot: {}, constructed: {}, element: {})",
                slot, constructed, element
            ),
            Element::Unimplemented(tlv) => write!(f, "Unimplemented({:?})", tlv),
        }
    }
}

impl TryFrom<&Element> for Tlv {
    type Error = Error;

    fn try_from(element: &Element) -> Result<Self> {
        match element {
            Element::Boolean(b) => Ok(Tlv::new_primitive(
                Tag::from(PrimitiveTag::Boolean),
                vec![if *b { 0xff } else { 0x00 }],
            )),
            Element::Integer(i) => Ok(Tlv::new_primitive(
                Tag::from(PrimitiveTag::Integer),
                i.as_bigint().to_signed_bytes_be(),
            )),
            Element::BitString(bs) => Ok(Tlv::new_primitive(
                Tag::from(PrimitiveTag::BitString),
                Vec::from(bs.clone()),
            )),
            Element::OctetString(os) => Ok(Tlv::new_primitive(
                Tag::from(PrimitiveTag::OctetString),
                os.as_bytes().to_vec(),
            )),
            Element::Null => Ok(Tlv::new_primitive(Tag::from(PrimitiveTag::Null), vec![])),
            Element::ObjectIdentifier(oid) => Ok(Tlv::new_primitive(
                Tag::from(PrimitiveTag::ObjectIdentifier),
                Vec::try_from(oid.clone())?,
            )),
            Element::UTF8String(s) => Ok(Tlv::new_primitive(
                Tag::from(PrimitiveTag::UTF8String),
                s.as_bytes().to_vec(),
            )),
            Element::Sequence(elements) => Ok(Tlv::new_constructed(
                Tag::from(PrimitiveTag::Sequence),
                encode_children(elements)?,
            )),
            Element::Set(elements) => Ok(Tlv::new_constructed(
                Tag::from(PrimitiveTag::Set),
                encode_children(elements)?,
            )),
            Element::PrintableString(s) => {
                if !is_printable_string(s) {
                    return Err(Error::PrintableStringInvalidEncoding);
                }
                Ok(Tlv::new_primitive(
                    Tag::from(PrimitiveTag::PrintableString),
                    s.as_bytes().to_vec(),
                ))
            }
            Element::IA5String(s) => {
                if !s.is_ascii() {
                    return Err(Error::Ia5StringInvalidEncoding);
                }
                Ok(Tlv::new_primitive(
                    Tag::from(PrimitiveTag::IA5String),
                    s.as_bytes().to_vec(),
                ))
            }
            Element::ContextSpecific {
                slot,
                constructed,
                element,
            } => {
                let tag = Tag::ContextSpecific {
                    slot: *slot,
                    constructed: *constructed,
                };
                let inner = Tlv::try_from(element.as_ref())?;
                if *constructed {
                    Ok(Tlv::new_constructed(tag, vec![inner]))
                } else {
                    let data = inner
                        .data()
                        .ok_or(Error::ElementCannotEncode("implicit constructed element"))?;
                    Ok(Tlv::new_primitive(tag, data.to_vec()))
                }
            }
            Element::Unimplemented(tlv) => Ok(tlv.clone()),
        }
    }
}

fn encode_children(elements: &[Element]) -> Result<Vec<Tlv>> {
    elements.iter().map(Tlv::try_from).collect()
}

impl EncodableTo<Element> for Tlv {}

impl Encoder<Element, Tlv> for Element {
    type Error = Error;

    fn encode(&self) -> Result<Tlv> {
        Tlv::try_from(self)
    }
}

impl Element {
    /// DER encoding of this single element.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let tlv: Tlv = self.encode()?;
        tlv.encode().map_err(Error::FailedToDecodeDer)
    }
}

/// PrintableString alphabet: letters, digits, space and `'()+,-./:=?`.
pub fn is_printable_string(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                ' ' | '\'' | '(' | ')' | '+' | ',' | '-' | '.' | '/' | ':' | '=' | '?'
            )
    })
}

pub fn is_ia5_string(s: &str) -> bool {
    s.is_ascii()
}

// ASN1 integer is possible to be a positive and negative value.
// This can be arbitrary sized values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer {
    inner: BigInt,
}

impl Integer {
    /// Interprets `bytes` as an unsigned big-endian magnitude.
    pub fn from_unsigned_bytes_be(bytes: &[u8]) -> Self {
        Integer {
            inner: BigInt::from_bytes_be(Sign::Plus, bytes),
        }
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.inner
    }

    /// Returns the value as an unsigned integer, or `None` if it is negative.
    pub fn to_biguint(&self) -> Option<BigUint> {
        self.inner.to_biguint()
    }

    pub fn is_negative(&self) -> bool {
        self.inner.is_negative()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.inner.to_u64()
    }
}

impl Serialize for Integer {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.inner.to_string())
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let inner = s.parse::<BigInt>().map_err(serde::de::Error::custom)?;
        Ok(Integer { inner })
    }
}

impl From<&[u8]> for Integer {
    fn from(value: &[u8]) -> Self {
        Integer {
            inner: BigInt::from_signed_bytes_be(value),
        }
    }
}

impl From<Vec<u8>> for Integer {
    fn from(value: Vec<u8>) -> Self {
        Integer::from(value.as_slice())
    }
}

impl From<BigInt> for Integer {
    fn from(inner: BigInt) -> Self {
        Integer { inner }
    }
}

impl From<BigUint> for Integer {
    fn from(value: BigUint) -> Self {
        Integer {
            inner: BigInt::from(value),
        }
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Integer {
            inner: BigInt::from(value),
        }
    }
}

impl TryFrom<&Integer> for u64 {
    type Error = Error;

    fn try_from(value: &Integer) -> Result<Self> {
        value.inner.to_u64().ok_or(Error::IntegerOutOfRangeU64)
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectIdentifier {
    inner: Vec<u64>,
}

impl ObjectIdentifier {
    pub fn components(&self) -> &[u64] {
        &self.inner
    }
}

impl Serialize for ObjectIdentifier {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectIdentifier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObjectIdentifier::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::ObjectIdentifierNoData);
        }

        let mut values = Vec::new();
        let mut val = 0u64;
        let mut pending = false;
        for v in value {
            // DER subidentifiers are minimal: no leading 0x80 groups.
            if !pending && *v == 0x80 {
                return Err(Error::ObjectIdentifierNonMinimalEncoding);
            }
            if val > u64::MAX >> 7 {
                return Err(Error::ObjectIdentifierComponentOverflow);
            }
            val = (val << 7) | (*v as u64 & 0x7f);
            pending = true;
            if *v & 0x80 == 0 {
                values.push(val);
                val = 0;
                pending = false;
            }
        }
        if pending {
            return Err(Error::ObjectIdentifierIncompleteEncoding);
        }

        // The first subidentifier packs the first two arcs.
        let head = values[0];
        let (a, b) = match head {
            0..=39 => (0, head),
            40..=79 => (1, head - 40),
            _ => (2, head - 80),
        };
        let mut inner = Vec::with_capacity(values.len() + 1);
        inner.push(a);
        inner.push(b);
        inner.extend_from_slice(&values[1..]);

        Ok(ObjectIdentifier { inner })
    }
}

impl TryFrom<Vec<u8>> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: Vec<u8>) -> Result<Self> {
        Self::try_from(value.as_slice())
    }
}

impl TryFrom<ObjectIdentifier> for Vec<u8> {
    type Error = Error;

    fn try_from(oid: ObjectIdentifier) -> Result<Self> {
        if oid.inner.len() < 2 {
            return Err(Error::ObjectIdentifierTooFewComponents);
        }
        if oid.inner[0] > 2 || (oid.inner[0] < 2 && oid.inner[1] >= 40) {
            return Err(Error::ObjectIdentifierArcOutOfRange);
        }

        let mut result = Vec::new();
        let first = oid.inner[0] * 40 + oid.inner[1];
        for v in std::iter::once(first).chain(oid.inner[2..].iter().copied()) {
            push_base128(v, &mut result);
        }

        Ok(result)
    }
}

fn push_base128(mut value: u64, out: &mut Vec<u8>) {
    let mut encoded = vec![value as u8 & 0x7f];
    value >>= 7;
    while value > 0 {
        encoded.push(value as u8 & 0x7f | 0x80);
        value >>= 7;
    }
    out.extend(encoded.iter().rev());
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self
            .inner
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", s)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split('.')
            .map(|c| {
                if c.is_empty() || !c.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::ObjectIdentifierInvalidComponent(c.to_string()));
                }
                c.parse::<u64>().map_err(Error::ParseInt)
            })
            .collect::<Result<Vec<u64>>>()?;
        if values.len() < 2 {
            return Err(Error::ObjectIdentifierTooFewComponents);
        }
        Ok(ObjectIdentifier { inner: values })
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl PartialEq<ObjectIdentifier> for &str {
    fn eq(&self, other: &ObjectIdentifier) -> bool {
        *self == other.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    unused: u8,
    data: Vec<u8>,
}

impl Serialize for BitString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            use serde::ser::SerializeStruct;
            let mut state = serializer.serialize_struct("BitString", 2)?;
            state.serialize_field("bit_length", &self.bit_len())?;
            state.serialize_field("bits", &hex_colon(&self.data))?;
            state.end()
        } else {
            (self.unused, &self.data).serialize(serializer)
        }
    }
}

impl BitString {
    pub fn new(unused: u8, data: Vec<u8>) -> Self {
        BitString { unused, data }
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Returns the total number of bits (excluding unused bits)
    pub fn bit_len(&self) -> usize {
        if self.data.is_empty() {
            0
        } else {
            self.data.len() * 8 - self.unused as usize
        }
    }
}

impl AsRef<[u8]> for BitString {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl TryFrom<&[u8]> for BitString {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self> {
        match value.split_first() {
            Some((&unused, _)) if unused > 7 => Err(Error::BitStringUnusedBitsOutOfRange(unused)),
            Some((&unused, data)) => Ok(BitString {
                unused,
                data: data.to_vec(),
            }),
            None => Err(Error::BitStringNoData),
        }
    }
}

impl From<BitString> for Vec<u8> {
    fn from(value: BitString) -> Self {
        let mut result = Vec::with_capacity(value.data.len() + 1);
        result.push(value.unused);
        result.extend(value.data);
        result
    }
}

impl Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut result = String::new();

        for (i, byte) in self.data.iter().enumerate() {
            if i == self.data.len() - 1 && self.unused > 0 {
                let valid_bits = byte >> self.unused;
                let bit_count = 8 - self.unused as usize;
                result.push_str(&format!("{:0bit_count$b}", valid_bits));
            } else {
                result.push_str(&format!("{:08b}", byte));
            }
        }

        write!(f, "{}", result)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctetString {
    inner: Vec<u8>,
}

impl Serialize for OctetString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            self.inner.serialize(serializer)
        }
    }
}

impl OctetString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner
    }
}

impl TryFrom<&OctetString> for ASN1Object {
    type Error = Error;

    fn try_from(value: &OctetString) -> Result<Self> {
        ASN1Object::from_der(value.as_bytes())
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(value: Vec<u8>) -> Self {
        OctetString { inner: value }
    }
}

impl From<&[u8]> for OctetString {
    fn from(value: &[u8]) -> Self {
        OctetString {
            inner: value.to_vec(),
        }
    }
}

impl Display for OctetString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in &self.inner {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

fn hex_colon(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use num_bigint::{BigInt, BigUint};
    use rstest::rstest;
    use std::str::FromStr;

    use crate::error::Error;
    use crate::{ASN1Object, BitString, Element, Integer, ObjectIdentifier, OctetString};
    use tokencert_der::{PrimitiveTag, Tag, Tlv};

    #[rstest(input, expected,
        case(vec![0x01], "1"),
        case(vec![0x00, 0xff], "255"),
        case(vec![0xff], "-1"),
        case(vec![0x03, 0xd4, 0x15, 0x31, 0x8e, 0x2c, 0x57, 0x1d, 0x29, 0x05, 0xfc, 0x3e, 0x05, 0x27, 0x68, 0x9d, 0x0d, 0x09], "333504890676592408951587385614406537514249"),
    )]
    fn test_parse_element_integer(input: Vec<u8>, expected: &str) {
        let expected_num = Integer {
            inner: BigInt::from_str(expected).unwrap(),
        };

        let value = Integer::from(input.as_slice());

        assert_eq!(expected_num, value);
    }

    #[rstest(input, expected,
        case(vec![0xff], "255"),
        case(vec![0x80, 0x00], "32768"),
        case(vec![0x00, 0x00, 0x01], "1"),
    )]
    fn test_integer_from_unsigned_bytes(input: Vec<u8>, expected: &str) {
        let value = Integer::from_unsigned_bytes_be(&input);
        assert_eq!(value.to_biguint(), Some(BigUint::from_str(expected).unwrap()));
        assert!(!value.is_negative());
    }

    #[rstest(
        input,
        expected_json,
        case(Integer { inner: BigInt::from(0) }, r#""0""#),
        case(Integer { inner: BigInt::from(255) }, r#""255""#),
        case(Integer { inner: BigInt::from(-1) }, r#""-1""#),
    )]
    fn test_integer_serialize(input: Integer, expected_json: &str) {
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(expected_json, json);
    }

    #[rstest(input, expected,
        // a leading zero keeps 0x80 positive
        case(128u64, vec![0x02, 0x02, 0x00, 0x80]),
        case(0u64, vec![0x02, 0x01, 0x00]),
        case(65537u64, vec![0x02, 0x03, 0x01, 0x00, 0x01]),
    )]
    fn test_integer_encode(input: u64, expected: Vec<u8>) {
        let element = Element::Integer(Integer::from(input));
        assert_eq!(element.to_der().unwrap(), expected);
    }

    #[test]
    fn test_integer_empty_is_error() {
        let tlv = Tlv::new_primitive(Tag::from(PrimitiveTag::Integer), vec![]);
        assert_eq!(Element::try_from(&tlv).unwrap_err(), Error::IntegerNoData);
    }

    #[rstest(input, expected, case(ObjectIdentifier { inner: vec![0x01, 0x02, 0x03, 0x04]}, "1.2.3.4"))]
    fn test_object_identifier_to_string(input: ObjectIdentifier, expected: &str) {
        let actual = input.to_string();
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
        case("1.2.3.4", Ok(ObjectIdentifier { inner: vec![1, 2, 3, 4] })),
        case("2.5.4.3", Ok(ObjectIdentifier { inner: vec![2, 5, 4, 3] })),
        case("1", Err(Error::ObjectIdentifierTooFewComponents)),
        case("1..2", Err(Error::ObjectIdentifierInvalidComponent(String::new()))),
        case("CN", Err(Error::ObjectIdentifierInvalidComponent("CN".to_string()))),
        case("1.+2", Err(Error::ObjectIdentifierInvalidComponent("+2".to_string()))),
    )]
    fn test_object_identifier_from_string(input: &str, expected: Result<ObjectIdentifier, Error>) {
        let actual = ObjectIdentifier::from_str(input);
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
        // Test case for ISO/ITU-T joint standards (1.2)
        case(vec![0x2A], ObjectIdentifier { inner: vec![1, 2] }),
        // Test case for ISO/IEC standard (1.3.6.1.4.1)
        case(vec![0x2B, 0x06, 0x01, 0x04, 0x01], ObjectIdentifier { inner: vec![1, 3, 6, 1, 4, 1] }),
        // Test case for ITU-T standard (0.9.2342.19200300.100.1.1)
        case(vec![0x09, 0x92, 0x26, 0x89, 0x93, 0xf2, 0x2c, 0x64, 0x01, 0x01], ObjectIdentifier { inner: vec![0, 9, 2342, 19200300, 100, 1, 1] }),
        // Test case for large values (1.2.840.113549)
        case(vec![0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D], ObjectIdentifier { inner: vec![1, 2, 840, 113549] }),
        // secp256r1 (1.2.840.10045.3.1.7)
        case(vec![0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07], ObjectIdentifier { inner: vec![1, 2, 840, 10045, 3, 1, 7] }),
        // secp384r1 (1.3.132.0.34), zero arc
        case(vec![0x2b, 0x81, 0x04, 0x00, 0x22], ObjectIdentifier { inner: vec![1, 3, 132, 0, 34] }),
        // commonName (2.5.4.3)
        case(vec![0x55, 0x04, 0x03], ObjectIdentifier { inner: vec![2, 5, 4, 3] }),
    )]
    fn test_object_identifier_bytes(input: Vec<u8>, expected: ObjectIdentifier) {
        let actual = ObjectIdentifier::try_from(input.clone()).unwrap();
        assert_eq!(expected, actual);
        let encoded = Vec::<u8>::try_from(actual).unwrap();
        assert_eq!(input, encoded);
    }

    #[rstest(input, expected,
        case(vec![0x2a, 0x86], Error::ObjectIdentifierIncompleteEncoding),
        case(vec![], Error::ObjectIdentifierNoData),
        // secp256r1 with a padded last-but-one arc
        case(vec![0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x80, 0x01, 0x07], Error::ObjectIdentifierNonMinimalEncoding),
        case(vec![0x80, 0x2a], Error::ObjectIdentifierNonMinimalEncoding),
        case(vec![0x2a, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f], Error::ObjectIdentifierComponentOverflow),
    )]
    fn test_object_identifier_bytes_rejected(input: Vec<u8>, expected: Error) {
        let result = ObjectIdentifier::try_from(input);
        assert_eq!(result.unwrap_err(), expected);
    }

    #[test]
    fn test_object_identifier_largest_arc() {
        // nine groups hold 63 bits
        let input = vec![0x2a, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f];
        let oid = ObjectIdentifier::try_from(input).unwrap();
        assert_eq!(oid.inner, vec![1, 2, u64::MAX >> 1]);
    }

    #[rstest(input, expected,
        // Test case: No unused bits, single byte
        case(BitString { unused: 0, data: vec![0b10101010] }, "10101010"),
        // Test case: Unused bits in the last byte
        case(BitString { unused: 2, data: vec![0b10101010, 0b11001100] }, "10101010110011"),
        // Test case: Empty data
        case(BitString { unused: 0, data: vec![] }, ""),
    )]
    fn test_bit_string_to_string(input: BitString, expected: &str) {
        assert_eq!(expected, input.to_string());
    }

    #[test]
    fn test_bit_string_unused_out_of_range() {
        let result = BitString::try_from(&[0x08, 0x00][..]);
        assert_eq!(result.unwrap_err(), Error::BitStringUnusedBitsOutOfRange(8));
    }

    #[rstest(input, expected,
        case(vec![0x13, 0x02, 0x55, 0x53], Element::PrintableString("US".to_string())),
        case(vec![0x16, 0x03, 0x61, 0x40, 0x62], Element::IA5String("a@b".to_string())),
        case(vec![0x0c, 0x02, 0xc3, 0xa9], Element::UTF8String("é".to_string())),
        case(vec![0x04, 0x02, 0x04, 0x00], Element::OctetString(OctetString::from(vec![0x04, 0x00]))),
        case(vec![0x05, 0x00], Element::Null),
        case(vec![0x01, 0x01, 0xff], Element::Boolean(true)),
        case(vec![0x30, 0x03, 0x02, 0x01, 0x01], Element::Sequence(vec![Element::Integer(Integer::from(1u64))])),
    )]
    fn test_element_der_round_trip(input: Vec<u8>, expected: Element) {
        let object = ASN1Object::from_der(&input).unwrap();
        assert_eq!(object.elements(), &[expected.clone()]);
        assert_eq!(expected.to_der().unwrap(), input);
    }

    #[rstest(input, expected,
        case(vec![0x13, 0x01, 0x40], Error::PrintableStringInvalidEncoding),
        case(vec![0x16, 0x01, 0xc3], Error::Ia5StringInvalidEncoding),
        case(vec![0x0c, 0x01, 0xff], Error::Utf8StringInvalidUtf8),
        case(vec![0x01, 0x01, 0x02], Error::InvalidBoolean),
    )]
    fn test_element_decode_rejects(input: Vec<u8>, expected: Error) {
        assert_eq!(ASN1Object::from_der(&input).unwrap_err(), expected);
    }

    #[test]
    fn test_element_decode_rejects_deep_nesting() {
        let mut input = vec![0x05, 0x00];
        for _ in 0..1000 {
            let len = input.len();
            let mut outer = vec![0xa0];
            match len {
                0..=0x7f => outer.push(len as u8),
                0x80..=0xff => outer.extend([0x81, len as u8]),
                _ => outer.extend([0x82, (len >> 8) as u8, len as u8]),
            }
            outer.extend(input);
            input = outer;
        }
        assert_eq!(
            ASN1Object::from_der(&input).unwrap_err(),
            Error::FailedToDecodeDer(tokencert_der::error::Error::NestingTooDeep)
        );
    }

    #[test]
    fn test_context_specific_explicit() {
        let input = vec![0xa0, 0x03, 0x02, 0x01, 0x02];
        let object = ASN1Object::from_der(&input).unwrap();
        assert_eq!(
            object.elements()[0],
            Element::ContextSpecific {
                slot: 0,
                constructed: true,
                element: Box::new(Element::Integer(Integer::from(2u64))),
            }
        );
        assert_eq!(object.to_der().unwrap(), input);
    }

    #[rstest(input, expected,
        case("A-Z a-z 0-9 '()+,-./:=?", true),
        case("user@example.com", false),
        case("a*b", false),
        case("é", false),
    )]
    fn test_is_printable_string(input: &str, expected: bool) {
        assert_eq!(crate::is_printable_string(input), expected);
    }
}
