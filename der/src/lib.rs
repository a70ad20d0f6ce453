//! DER (Distinguished Encoding Rules) TLV layer.
//!
//! Splits a byte buffer into tag-length-value triples, recursing into
//! constructed values, and serializes them back. Interpretation of the
//! values is left to the `tokencert-asn1` crate.

use nom::error::ErrorKind;
use nom::{IResult, Parser};
use tokencert::decoder::{DecodableFrom, Decoder};
use tokencert::encoder::{EncodableTo, Encoder};

use error::{Error, Result};

pub mod error;

/// Constructed bit of an identifier octet.
pub const TAG_CONSTRUCTED: u8 = 0x20;
const TAG_CLASS_MASK: u8 = 0xc0;
const TAG_CLASS_CONTEXT_SPECIFIC: u8 = 0x80;
const TAG_NUMBER_MASK: u8 = 0x1f;

/// Deepest nesting of constructed values accepted by the parser.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A sequence of top-level TLVs, usually exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der {
    elements: Vec<Tlv>,
}

impl Der {
    pub fn new(elements: Vec<Tlv>) -> Self {
        Der { elements }
    }

    pub fn elements(&self) -> &[Tlv] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Tlv> {
        self.elements
    }
}

impl<'a> DecodableFrom<&'a [u8]> for Der {}

impl<'a> Decoder<&'a [u8], Der> for &'a [u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        let mut input: &[u8] = self;
        let mut elements = Vec::new();
        while !input.is_empty() {
            let (rest, tlv) = Tlv::parse(input)?;
            input = rest;
            elements.push(tlv);
        }
        Ok(Der { elements })
    }
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        self.as_slice().decode()
    }
}

impl EncodableTo<Der> for Vec<u8> {}

impl Encoder<Der, Vec<u8>> for Der {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for tlv in &self.elements {
            tlv.write_to(&mut out);
        }
        Ok(out)
    }
}

/// Universal tags understood by the ASN.1 layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrimitiveTag {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    UTF8String,
    Sequence,
    Set,
    PrintableString,
    IA5String,
    Unimplemented(u8),
}

impl PrimitiveTag {
    /// Full identifier octet, including the constructed bit for SEQUENCE/SET.
    pub fn to_byte(&self) -> u8 {
        match self {
            PrimitiveTag::Boolean => 0x01,
            PrimitiveTag::Integer => 0x02,
            PrimitiveTag::BitString => 0x03,
            PrimitiveTag::OctetString => 0x04,
            PrimitiveTag::Null => 0x05,
            PrimitiveTag::ObjectIdentifier => 0x06,
            PrimitiveTag::UTF8String => 0x0c,
            PrimitiveTag::Sequence => 0x30,
            PrimitiveTag::Set => 0x31,
            PrimitiveTag::PrintableString => 0x13,
            PrimitiveTag::IA5String => 0x16,
            PrimitiveTag::Unimplemented(b) => *b,
        }
    }
}

impl From<u8> for PrimitiveTag {
    fn from(value: u8) -> Self {
        match value {
            0x01 => Self::Boolean,
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x04 => Self::OctetString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x0c => Self::UTF8String,
            0x30 => Self::Sequence,
            0x31 => Self::Set,
            0x13 => Self::PrintableString,
            0x16 => Self::IA5String,
            _ => Self::Unimplemented(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tag {
    /// Universal (or unrecognised) tag with its raw identifier octet.
    Primitive(PrimitiveTag, u8),
    ContextSpecific { slot: u8, constructed: bool },
}

impl Tag {
    pub fn is_constructed(&self) -> bool {
        match self {
            Tag::Primitive(_, raw) => raw & TAG_CONSTRUCTED == TAG_CONSTRUCTED,
            Tag::ContextSpecific { constructed, .. } => *constructed,
        }
    }

    pub fn to_byte(&self) -> u8 {
        match self {
            Tag::Primitive(_, raw) => *raw,
            Tag::ContextSpecific { slot, constructed } => {
                let mut b = TAG_CLASS_CONTEXT_SPECIFIC | (slot & TAG_NUMBER_MASK);
                if *constructed {
                    b |= TAG_CONSTRUCTED;
                }
                b
            }
        }
    }
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        if value & TAG_CLASS_MASK == TAG_CLASS_CONTEXT_SPECIFIC {
            Tag::ContextSpecific {
                slot: value & TAG_NUMBER_MASK,
                constructed: value & TAG_CONSTRUCTED == TAG_CONSTRUCTED,
            }
        } else {
            Tag::Primitive(PrimitiveTag::from(value), value)
        }
    }
}

impl From<PrimitiveTag> for Tag {
    fn from(tag: PrimitiveTag) -> Self {
        Tag::Primitive(tag, tag.to_byte())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    length: u64,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Tlv(Vec<Tlv>),
    Data(Vec<u8>),
}

impl Tlv {
    pub fn new_primitive(tag: Tag, data: Vec<u8>) -> Self {
        Tlv {
            tag,
            length: data.len() as u64,
            value: Value::Data(data),
        }
    }

    pub fn new_constructed(tag: Tag, tlvs: Vec<Tlv>) -> Self {
        let length = tlvs.iter().map(|t| t.encoded_len() as u64).sum();
        Tlv {
            tag,
            length,
            value: Value::Tlv(tlvs),
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    /// Content octets of a primitive TLV.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Data(data) => Some(data),
            Value::Tlv(_) => None,
        }
    }

    /// Nested TLVs of a constructed TLV.
    pub fn tlvs(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Tlv(tlvs) => Some(tlvs),
            Value::Data(_) => None,
        }
    }

    /// Size of the complete encoding (identifier + length + contents).
    pub fn encoded_len(&self) -> usize {
        1 + length_octets(self.length as usize) + self.length as usize
    }

    fn parse(input: &[u8]) -> IResult<&[u8], Tlv> {
        Self::parse_nested(input, 0)
    }

    /// `depth` counts the constructed TLVs enclosing `input`.
    fn parse_nested(input: &[u8], depth: usize) -> IResult<&[u8], Tlv> {
        let (rest, tag) = parse_tag(input)?;
        let (rest, length) = parse_length(rest)?;
        let (input, data) = nom::bytes::complete::take(length).parse(rest)?;

        if tag.is_constructed() {
            if depth >= MAX_NESTING_DEPTH {
                // reported as Error::NestingTooDeep
                return Err(nom::Err::Failure(nom::error::Error::new(
                    data,
                    ErrorKind::Count,
                )));
            }
            // parse TLV recursively.
            let mut tlvs = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (new_input, v) = Self::parse_nested(data, depth + 1)?;
                data = new_input;
                tlvs.push(v);
            }

            return Ok((
                input,
                Tlv {
                    tag,
                    length,
                    value: Value::Tlv(tlvs),
                },
            ));
        }

        Ok((
            input,
            Tlv {
                tag,
                length,
                value: Value::Data(data.to_vec()),
            },
        ))
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.tag.to_byte());
        write_length(self.length as usize, out);
        match &self.value {
            Value::Data(data) => out.extend_from_slice(data),
            Value::Tlv(tlvs) => {
                for tlv in tlvs {
                    tlv.write_to(out);
                }
            }
        }
    }
}

impl EncodableTo<Tlv> for Vec<u8> {}

impl Encoder<Tlv, Vec<u8>> for Tlv {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out);
        Ok(out)
    }
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (rest, n) = nom::number::be_u8().parse(input)?;
    if n & TAG_NUMBER_MASK == TAG_NUMBER_MASK {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            ErrorKind::TagBits,
        )));
    }
    Ok((rest, Tag::from(n)))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], u64> {
    let (rest, n) = nom::number::be_u8().parse(input)?;
    if n == 0x80 {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            ErrorKind::LengthValue,
        )));
    }
    if n & 0x80 == 0x80 {
        // long form
        // First 1 bit is a marker for long form.
        // Other bits represent bytes length of the length field.
        let length = n & 0x7f;
        if length > 8 {
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                ErrorKind::TooLarge,
            )));
        }
        let (rest, bs) = nom::bytes::complete::take(length).parse(rest)?;
        let n = bs.iter().fold(0u64, |n, &b| (n << 8) | b as u64);
        return Ok((rest, n));
    }
    // short form: 0-127
    Ok((rest, n as u64))
}

fn length_octets(length: usize) -> usize {
    if length < 0x80 {
        1
    } else {
        1 + (usize::BITS as usize / 8) - (length.leading_zeros() as usize / 8)
    }
}

fn write_length(length: usize, out: &mut Vec<u8>) {
    if length < 0x80 {
        out.push(length as u8);
        return;
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}
