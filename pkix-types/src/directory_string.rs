//! DirectoryString type as defined in RFC 5280 Section 4.1.2.4
//!
//! Attribute values in a distinguished name are one of a handful of ASN.1
//! string types. The chosen type is kept next to the text so a name encodes
//! back to the same tags it was built or decoded with.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use tokencert::decoder::{DecodableFrom, Decoder};
use tokencert::encoder::{EncodableTo, Encoder};
use tokencert_asn1::{Element, is_ia5_string, is_printable_string};

use crate::name::{Error, Result};

/// ASN.1 string type carried by a [`DirectoryString`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringKind {
    /// UTF8String
    #[default]
    Utf8,
    /// PrintableString
    Printable,
    /// IA5String
    Ia5,
}

impl StringKind {
    /// Whether `value` fits this type's character set.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            StringKind::Utf8 => true,
            StringKind::Printable => is_printable_string(value),
            StringKind::Ia5 => is_ia5_string(value),
        }
    }
}

impl fmt::Display for StringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StringKind::Utf8 => "UTF8String",
            StringKind::Printable => "PrintableString",
            StringKind::Ia5 => "IA5String",
        };
        write!(f, "{}", s)
    }
}

/// DirectoryString as defined in RFC 5280 Section 4.1.2.4
///
/// ```asn1
/// DirectoryString ::= CHOICE {
///   teletexString     TeletexString (SIZE (1..MAX)),
///   printableString   PrintableString (SIZE (1..MAX)),
///   universalString   UniversalString (SIZE (1..MAX)),
///   utf8String        UTF8String (SIZE (1..MAX)),
///   bmpString         BMPString (SIZE (1..MAX))
/// }
/// ```
///
/// Only the UTF8String and PrintableString alternatives are produced, plus
/// IA5String, which `emailAddress` and `domainComponent` use instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryString {
    kind: StringKind,
    value: String,
}

impl DirectoryString {
    /// Creates a value of the given kind, rejecting characters the kind cannot carry.
    pub fn new(kind: StringKind, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !kind.accepts(&value) {
            return Err(Error::DirectoryStringInvalidCharacters(kind));
        }
        Ok(Self { kind, value })
    }

    /// UTF8String value; never fails.
    pub fn utf8(value: impl Into<String>) -> Self {
        Self {
            kind: StringKind::Utf8,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> StringKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Serialize for DirectoryString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl AsRef<str> for DirectoryString {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl Deref for DirectoryString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Display for DirectoryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<DirectoryString> for String {
    fn from(ds: DirectoryString) -> Self {
        ds.value
    }
}

impl DecodableFrom<Element> for DirectoryString {}

impl Decoder<Element, DirectoryString> for Element {
    type Error = Error;

    fn decode(&self) -> Result<DirectoryString> {
        let (kind, value) = match self {
            Element::UTF8String(s) => (StringKind::Utf8, s.clone()),
            Element::PrintableString(s) => (StringKind::Printable, s.clone()),
            Element::IA5String(s) => (StringKind::Ia5, s.clone()),
            _ => return Err(Error::DirectoryStringExpectedStringType),
        };
        Ok(DirectoryString { kind, value })
    }
}

impl EncodableTo<DirectoryString> for Element {}

impl Encoder<DirectoryString, Element> for DirectoryString {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let value = self.value.clone();
        Ok(match self.kind {
            StringKind::Utf8 => Element::UTF8String(value),
            StringKind::Printable => Element::PrintableString(value),
            StringKind::Ia5 => Element::IA5String(value),
        })
    }
}
