//! Attribute types accepted in subject strings
//!
//! Labels resolve by short name (`CN`), long name (`commonName`) or dotted
//! OID (`2.5.4.3`). Matching is case-sensitive.

use std::str::FromStr;

use tokencert_asn1::ObjectIdentifier;

use crate::directory_string::StringKind;
use crate::name::CharacterEncoding;

/// Character-set rule an attribute imposes on its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueConstraint {
    /// Follows the caller's [`CharacterEncoding`].
    Any,
    /// Always PrintableString.
    Printable,
    /// PrintableString of exactly this many characters.
    PrintableFixed(usize),
    /// Always IA5String.
    Ia5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDefinition {
    pub short_name: &'static str,
    pub long_name: &'static str,
    pub oid: &'static str,
    pub constraint: ValueConstraint,
}

impl AttributeDefinition {
    pub fn oid(&self) -> tokencert_asn1::error::Result<ObjectIdentifier> {
        ObjectIdentifier::from_str(self.oid)
    }

    /// String type used for a value of this attribute.
    pub fn string_kind(&self, encoding: CharacterEncoding) -> StringKind {
        match self.constraint {
            ValueConstraint::Any => encoding.string_kind(),
            ValueConstraint::Printable | ValueConstraint::PrintableFixed(_) => StringKind::Printable,
            ValueConstraint::Ia5 => StringKind::Ia5,
        }
    }

    pub fn fixed_length(&self) -> Option<usize> {
        match self.constraint {
            ValueConstraint::PrintableFixed(n) => Some(n),
            _ => None,
        }
    }
}

macro_rules! attr {
    ($short:literal, $long:literal, $oid:literal) => {
        attr!($short, $long, $oid, ValueConstraint::Any)
    };
    ($short:literal, $long:literal, $oid:literal, $constraint:expr) => {
        AttributeDefinition {
            short_name: $short,
            long_name: $long,
            oid: $oid,
            constraint: $constraint,
        }
    };
}

static ATTRIBUTES: &[AttributeDefinition] = &[
    attr!("C", "countryName", "2.5.4.6", ValueConstraint::PrintableFixed(2)),
    attr!("ST", "stateOrProvinceName", "2.5.4.8"),
    attr!("L", "localityName", "2.5.4.7"),
    attr!("street", "streetAddress", "2.5.4.9"),
    attr!("O", "organizationName", "2.5.4.10"),
    attr!("OU", "organizationalUnitName", "2.5.4.11"),
    attr!("CN", "commonName", "2.5.4.3"),
    attr!("SN", "surname", "2.5.4.4"),
    attr!("GN", "givenName", "2.5.4.42"),
    attr!("serialNumber", "serialNumber", "2.5.4.5", ValueConstraint::Printable),
    attr!("title", "title", "2.5.4.12"),
    attr!("initials", "initials", "2.5.4.43"),
    attr!("generationQualifier", "generationQualifier", "2.5.4.44"),
    attr!("dnQualifier", "dnQualifier", "2.5.4.46", ValueConstraint::Printable),
    attr!("pseudonym", "pseudonym", "2.5.4.65"),
    attr!("postalCode", "postalCode", "2.5.4.17"),
    attr!("businessCategory", "businessCategory", "2.5.4.15"),
    attr!("name", "name", "2.5.4.41"),
    attr!("description", "description", "2.5.4.13"),
    attr!("organizationIdentifier", "organizationIdentifier", "2.5.4.97"),
    attr!(
        "DC",
        "domainComponent",
        "0.9.2342.19200300.100.1.25",
        ValueConstraint::Ia5
    ),
    attr!("UID", "userId", "0.9.2342.19200300.100.1.1"),
    attr!(
        "emailAddress",
        "emailAddress",
        "1.2.840.113549.1.9.1",
        ValueConstraint::Ia5
    ),
    attr!(
        "jurisdictionC",
        "jurisdictionCountryName",
        "1.3.6.1.4.1.311.60.2.1.3",
        ValueConstraint::PrintableFixed(2)
    ),
    attr!(
        "jurisdictionST",
        "jurisdictionStateOrProvinceName",
        "1.3.6.1.4.1.311.60.2.1.2"
    ),
    attr!(
        "jurisdictionL",
        "jurisdictionLocalityName",
        "1.3.6.1.4.1.311.60.2.1.1"
    ),
];

/// Resolves a subject-string label to its definition.
pub fn lookup(label: &str) -> Option<&'static AttributeDefinition> {
    ATTRIBUTES
        .iter()
        .find(|def| def.short_name == label || def.long_name == label || def.oid == label)
}

/// Finds the definition registered for `oid`.
pub fn by_oid(oid: &ObjectIdentifier) -> Option<&'static AttributeDefinition> {
    let oid = oid.to_string();
    ATTRIBUTES.iter().find(|def| def.oid == oid)
}

pub fn definitions() -> &'static [AttributeDefinition] {
    ATTRIBUTES
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CN", Some("2.5.4.3"))]
    #[case("commonName", Some("2.5.4.3"))]
    #[case("2.5.4.3", Some("2.5.4.3"))]
    #[case("C", Some("2.5.4.6"))]
    #[case("emailAddress", Some("1.2.840.113549.1.9.1"))]
    #[case("DC", Some("0.9.2342.19200300.100.1.25"))]
    #[case("cn", None)]
    #[case("XYZ", None)]
    #[case("1.2.3.4", None)]
    #[case("", None)]
    fn test_lookup(#[case] label: &str, #[case] expected: Option<&str>) {
        assert_eq!(lookup(label).map(|def| def.oid), expected);
    }

    #[test]
    fn test_registry_oids_parse() {
        for def in definitions() {
            assert!(ObjectIdentifier::from_str(def.oid).is_ok(), "{}", def.oid);
            assert_eq!(by_oid(&def.oid().unwrap()), Some(def));
        }
    }

    #[rstest]
    #[case("CN", CharacterEncoding::Printable, StringKind::Printable)]
    #[case("CN", CharacterEncoding::Utf8, StringKind::Utf8)]
    #[case("C", CharacterEncoding::Utf8, StringKind::Printable)]
    #[case("serialNumber", CharacterEncoding::Utf8, StringKind::Printable)]
    #[case("emailAddress", CharacterEncoding::Utf8, StringKind::Ia5)]
    #[case("DC", CharacterEncoding::Printable, StringKind::Ia5)]
    fn test_string_kind(
        #[case] label: &str,
        #[case] encoding: CharacterEncoding,
        #[case] expected: StringKind,
    ) {
        let def = lookup(label).unwrap();
        assert_eq!(def.string_kind(encoding), expected);
    }
}
