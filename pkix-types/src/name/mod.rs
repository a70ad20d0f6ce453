//! Name and related types
//!
//! Defined in RFC 5280 Section 4.1.2.4
//!
//! ```asn1
//! Name ::= CHOICE { -- only one possibility for now --
//!     rdnSequence  RDNSequence
//! }
//!
//! RDNSequence ::= SEQUENCE OF RelativeDistinguishedName
//!
//! RelativeDistinguishedName ::= SET OF AttributeTypeAndValue
//!
//! AttributeTypeAndValue ::= SEQUENCE {
//!     type     AttributeType,
//!     value    AttributeValue
//! }
//! ```
//!
//! A [`DistinguishedName`] is normally produced from a subject string by
//! [`parse_dn`]. It only grows at the tail: the order RDNs are pushed in is
//! the order they are encoded in.

use std::fmt;

use serde::{Serialize, ser::SerializeStruct};
use tokencert::decoder::{DecodableFrom, Decoder};
use tokencert::encoder::{EncodableTo, Encoder};
use tokencert_asn1::{ASN1Object, Element, ObjectIdentifier};

use crate::OidName;
use crate::directory_string::DirectoryString;

pub mod error;
mod parser;
pub mod registry;

pub use error::{Error, Malformed, Result};
pub use parser::{CharacterEncoding, NameElement, parse_dn, tokenize, validate_dn};

/// X.509 Distinguished Name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DistinguishedName {
    rdns: Vec<RelativeDistinguishedName>,
}

impl DistinguishedName {
    pub fn new() -> Self {
        Self { rdns: Vec::new() }
    }

    pub fn rdns(&self) -> &[RelativeDistinguishedName] {
        &self.rdns
    }

    /// Number of RDNs.
    pub fn len(&self) -> usize {
        self.rdns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }

    /// Appends an RDN at the end.
    pub fn push_rdn(&mut self, rdn: RelativeDistinguishedName) {
        self.rdns.push(rdn);
    }

    /// Adds an attribute to the last RDN, making it multi-valued. Starts a
    /// new RDN when the name is empty.
    pub fn push_attribute(&mut self, attribute: AttributeTypeAndValue) {
        match self.rdns.last_mut() {
            Some(rdn) => rdn.attributes.push(attribute),
            None => self.rdns.push(RelativeDistinguishedName::new_single(attribute)),
        }
    }

    /// All attributes in encoding order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeTypeAndValue> {
        self.rdns.iter().flat_map(|rdn| rdn.attributes.iter())
    }

    /// Renders the name in subject-string syntax.
    ///
    /// RDNs are written last-first and `/ + = \` are escaped, so the result
    /// fed back to [`parse_dn`] (preferred order, multi-valued RDNs allowed)
    /// yields the same name, as long as every attribute type is registered.
    pub fn to_slash_string(&self) -> String {
        let mut out = String::new();
        for rdn in self.rdns.iter().rev() {
            out.push('/');
            let members = rdn
                .attributes
                .iter()
                .map(|atv| format!("{}={}", escape(&atv.label()), escape(atv.value.as_str())))
                .collect::<Vec<_>>()
                .join("+");
            out.push_str(&members);
        }
        out
    }

    /// Decodes a DER `Name`.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let object = ASN1Object::from_der(bytes)?;
        match object.elements() {
            [element] => element.decode(),
            _ => Err(Error::NameTrailingData),
        }
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        let element = self.encode()?;
        Ok(element.to_der()?)
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '/' | '+' | '=' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// OpenSSL one-line form: RDNs in encoding order, unlike RFC 4514.
impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .rdns
            .iter()
            .map(|rdn| rdn.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", formatted)
    }
}

impl DecodableFrom<Element> for DistinguishedName {}

impl Decoder<Element, DistinguishedName> for Element {
    type Error = Error;

    fn decode(&self) -> Result<DistinguishedName> {
        match self {
            Element::Sequence(elements) => {
                let rdns = elements
                    .iter()
                    .map(|elem| elem.decode())
                    .collect::<Result<Vec<RelativeDistinguishedName>>>()?;
                Ok(DistinguishedName { rdns })
            }
            _ => Err(Error::NameExpectedSequence),
        }
    }
}

impl EncodableTo<DistinguishedName> for Element {}

impl Encoder<DistinguishedName, Element> for DistinguishedName {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let rdn_elements: Result<Vec<Element>> = self.rdns.iter().map(|rdn| rdn.encode()).collect();
        Ok(Element::Sequence(rdn_elements?))
    }
}

/// Relative Distinguished Name (RDN)
///
/// Usually a single attribute; several for a multi-valued RDN such as
/// `CN=server+OU=ops`. Attributes keep the order they were added in; the
/// DER encoding sorts them as `SET OF` requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RelativeDistinguishedName {
    attributes: Vec<AttributeTypeAndValue>,
}

impl RelativeDistinguishedName {
    pub fn new_single(attribute: AttributeTypeAndValue) -> Self {
        Self {
            attributes: vec![attribute],
        }
    }

    pub fn attributes(&self) -> &[AttributeTypeAndValue] {
        &self.attributes
    }

    pub fn is_multivalued(&self) -> bool {
        self.attributes.len() > 1
    }
}

impl fmt::Display for RelativeDistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .attributes
            .iter()
            .map(|atv| atv.to_string())
            .collect::<Vec<_>>()
            .join("+");
        write!(f, "{}", formatted)
    }
}

impl DecodableFrom<Element> for RelativeDistinguishedName {}

impl Decoder<Element, RelativeDistinguishedName> for Element {
    type Error = Error;

    fn decode(&self) -> Result<RelativeDistinguishedName> {
        match self {
            Element::Set(elements) if elements.is_empty() => Err(Error::RdnEmpty),
            Element::Set(elements) => {
                let attributes = elements
                    .iter()
                    .map(|elem| elem.decode())
                    .collect::<Result<Vec<AttributeTypeAndValue>>>()?;
                Ok(RelativeDistinguishedName { attributes })
            }
            _ => Err(Error::RdnExpectedSet),
        }
    }
}

impl EncodableTo<RelativeDistinguishedName> for Element {}

impl Encoder<RelativeDistinguishedName, Element> for RelativeDistinguishedName {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        // DER: SET OF members ordered by their encodings
        let mut members = self
            .attributes
            .iter()
            .map(|attr| {
                let element = attr.encode()?;
                let der = element.to_der()?;
                Ok((der, element))
            })
            .collect::<Result<Vec<(Vec<u8>, Element)>>>()?;
        members.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Element::Set(members.into_iter().map(|(_, e)| e).collect()))
    }
}

/// Attribute Type and Value pair, such as `CN=example.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    attribute_type: ObjectIdentifier,
    value: DirectoryString,
}

impl AttributeTypeAndValue {
    pub fn new(attribute_type: ObjectIdentifier, value: DirectoryString) -> Self {
        Self {
            attribute_type,
            value,
        }
    }

    pub fn attribute_type(&self) -> &ObjectIdentifier {
        &self.attribute_type
    }

    pub fn value(&self) -> &DirectoryString {
        &self.value
    }

    /// Short name when registered, dotted OID otherwise.
    pub fn label(&self) -> String {
        self.oid_name()
            .map(str::to_string)
            .unwrap_or_else(|| self.attribute_type.to_string())
    }
}

impl OidName for AttributeTypeAndValue {
    fn oid_name(&self) -> Option<&'static str> {
        registry::by_oid(&self.attribute_type).map(|def| def.short_name)
    }
}

impl fmt::Display for AttributeTypeAndValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.label(), self.value)
    }
}

impl Serialize for AttributeTypeAndValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AttributeTypeAndValue", 4)?;
        state.serialize_field("attribute_type", &self.label())?;
        state.serialize_field("oid", &self.attribute_type)?;
        state.serialize_field("attribute_value", self.value.as_str())?;
        state.serialize_field("string_type", &self.value.kind())?;
        state.end()
    }
}

impl DecodableFrom<Element> for AttributeTypeAndValue {}

impl Decoder<Element, AttributeTypeAndValue> for Element {
    type Error = Error;

    fn decode(&self) -> Result<AttributeTypeAndValue> {
        let Element::Sequence(seq) = self else {
            return Err(Error::AttributeTypeAndValueExpectedSequence);
        };

        let (attribute_type, value) = match seq.as_slice() {
            [Element::ObjectIdentifier(oid), value_elem] => (oid.clone(), value_elem.decode()?),
            [_, _] => {
                return Err(Error::AttributeTypeAndValueExpectedOid);
            }
            _ => {
                return Err(Error::AttributeTypeAndValueInvalidElementCount);
            }
        };

        Ok(AttributeTypeAndValue {
            attribute_type,
            value,
        })
    }
}

impl EncodableTo<AttributeTypeAndValue> for Element {}

impl Encoder<AttributeTypeAndValue, Element> for AttributeTypeAndValue {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let oid_elm = Element::ObjectIdentifier(self.attribute_type.clone());
        let value_elm = self.value.encode()?;
        Ok(Element::Sequence(vec![oid_elm, value_elm]))
    }
}
