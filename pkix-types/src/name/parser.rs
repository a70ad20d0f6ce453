//! Subject string parser
//!
//! Accepts the `/type0=value0/type1=value1/...` syntax used on command lines
//! and in token configuration, e.g. `/C=US/O=Example/CN=server+OU=ops`.
//!
//! Parsing happens in two steps. [`tokenize`] splits the string into
//! [`NameElement`]s without looking at attribute types. [`parse_dn`] then
//! resolves each label through the registry, groups elements into RDNs and
//! appends them to a [`DistinguishedName`] in the requested order.

use serde::Serialize;
use tracing::{debug, warn};

use super::error::{Error, Malformed, Result};
use super::registry;
use super::{AttributeTypeAndValue, DistinguishedName, RelativeDistinguishedName};
use crate::directory_string::{DirectoryString, StringKind};

const SEPARATOR: char = '/';
const MULTI_VALUE: char = '+';
const ASSIGN: char = '=';
const ESCAPE: char = '\\';

/// Default string type for attribute values.
///
/// Attributes with a fixed ASN.1 type (`C`, `serialNumber`, `emailAddress`,
/// ...) ignore this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CharacterEncoding {
    #[default]
    Utf8,
    Printable,
    Ia5,
}

impl CharacterEncoding {
    pub fn string_kind(&self) -> StringKind {
        match self {
            CharacterEncoding::Utf8 => StringKind::Utf8,
            CharacterEncoding::Printable => StringKind::Printable,
            CharacterEncoding::Ia5 => StringKind::Ia5,
        }
    }
}

/// One `type=value` pair as written in the subject string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameElement {
    pub type_label: String,
    pub value: String,
    /// Joined with the next element into one multi-valued RDN.
    pub multivalued: bool,
}

/// Splits a subject string into elements.
///
/// `+` separates members of a multi-valued RDN only when
/// `allow_multivalued_rdn` is set; otherwise it is an ordinary value
/// character. Inside the type field only `\` and `=` are special.
pub fn tokenize(subject: &str, allow_multivalued_rdn: bool) -> Result<Vec<NameElement>> {
    let mut chars = subject.chars().peekable();
    if chars.next() != Some(SEPARATOR) {
        return Err(Malformed::MissingLeadingSlash.into());
    }

    let mut elements: Vec<NameElement> = Vec::new();
    while chars.peek().is_some() {
        let index = elements.len();

        let mut type_label = String::new();
        loop {
            match chars.next() {
                None => return Err(Malformed::UnterminatedType { index }.into()),
                Some(ESCAPE) => type_label.push(chars.next().ok_or(Malformed::DanglingEscape)?),
                Some(ASSIGN) => break,
                Some(c) => type_label.push(c),
            }
        }

        let mut value = String::new();
        let mut multivalued = false;
        loop {
            match chars.next() {
                None | Some(SEPARATOR) => break,
                Some(ESCAPE) => value.push(chars.next().ok_or(Malformed::DanglingEscape)?),
                Some(MULTI_VALUE) if allow_multivalued_rdn => {
                    multivalued = true;
                    break;
                }
                Some(c) => value.push(c),
            }
        }
        // a trailing '+' has nothing to join with
        if chars.peek().is_none() {
            multivalued = false;
        }

        elements.push(NameElement {
            type_label,
            value,
            multivalued,
        });
    }

    Ok(elements)
}

/// Parses a subject string into a [`DistinguishedName`].
///
/// Elements whose label is not a registered attribute type, or whose value
/// is empty, are skipped with a warning. At least one element must survive.
///
/// With `legacy_order == false` the RDNs are appended last-parsed first, so
/// `/CN=Alice/O=Org` encodes `O=Org` before `CN=Alice`. With
/// `legacy_order == true` they are appended in the order written; this
/// exists for parity with names issued by older releases.
pub fn parse_dn(
    subject: &str,
    encoding: CharacterEncoding,
    allow_multivalued_rdn: bool,
    legacy_order: bool,
) -> Result<DistinguishedName> {
    let elements = tokenize(subject, allow_multivalued_rdn)?;

    let mut groups: Vec<Vec<AttributeTypeAndValue>> = Vec::new();
    let mut current: Vec<AttributeTypeAndValue> = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        if let Some(attribute) = resolve(index, element, encoding)? {
            current.push(attribute);
        }
        if !element.multivalued && !current.is_empty() {
            groups.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }

    if groups.is_empty() {
        return Err(Error::EmptyResult);
    }

    if legacy_order {
        warn!("legacy DN ordering requested; RDNs keep input order, which is non-standard");
    } else {
        groups.reverse();
    }

    let mut name = DistinguishedName::new();
    for group in groups {
        let mut attributes = group.into_iter();
        if let Some(first) = attributes.next() {
            name.push_rdn(RelativeDistinguishedName::new_single(first));
        }
        for attribute in attributes {
            name.push_attribute(attribute);
        }
    }
    debug!(rdns = name.len(), "parsed distinguished name");

    Ok(name)
}

/// Whether `subject` parses with default settings.
pub fn validate_dn(subject: &str) -> bool {
    match parse_dn(subject, CharacterEncoding::Utf8, false, false) {
        Ok(_) => true,
        Err(e) => {
            debug!(error = %e, "subject rejected");
            false
        }
    }
}

fn resolve(
    index: usize,
    element: &NameElement,
    encoding: CharacterEncoding,
) -> Result<Option<AttributeTypeAndValue>> {
    let Some(definition) = registry::lookup(&element.type_label) else {
        warn!(index, label = %element.type_label, "skipping unknown attribute type");
        return Ok(None);
    };
    if element.value.is_empty() {
        warn!(index, label = %element.type_label, "skipping attribute with empty value");
        return Ok(None);
    }

    let invalid = |reason: String| Error::InvalidValue {
        attribute: definition.short_name.to_string(),
        reason,
    };

    if let Some(length) = definition.fixed_length() {
        let actual = element.value.chars().count();
        if actual != length {
            return Err(invalid(format!(
                "expected {} characters, got {}",
                length, actual
            )));
        }
    }

    let kind = definition.string_kind(encoding);
    let value = DirectoryString::new(kind, element.value.as_str())
        .map_err(|e| invalid(e.to_string()))?;
    let oid = definition.oid()?;

    Ok(Some(AttributeTypeAndValue::new(oid, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn element(type_label: &str, value: &str, multivalued: bool) -> NameElement {
        NameElement {
            type_label: type_label.to_string(),
            value: value.to_string(),
            multivalued,
        }
    }

    fn labels(name: &DistinguishedName) -> Vec<Vec<String>> {
        name.rdns()
            .iter()
            .map(|rdn| {
                rdn.attributes()
                    .iter()
                    .map(|atv| atv.to_string())
                    .collect()
            })
            .collect()
    }

    #[rstest]
    #[case("/CN=A\\/B", false, vec![element("CN", "A/B", false)])]
    #[case("/CN=A+OU=B", true, vec![element("CN", "A", true), element("OU", "B", false)])]
    #[case("/CN=A+OU=B", false, vec![element("CN", "A+OU=B", false)])]
    #[case("/CN=a=b", false, vec![element("CN", "a=b", false)])]
    #[case("/C\\=X=1", false, vec![element("C=X", "1", false)])]
    #[case("/O=Org/", false, vec![element("O", "Org", false)])]
    #[case("/O=Org+", true, vec![element("O", "Org", false)])]
    #[case("/CN=x\\+y+OU=z", true, vec![element("CN", "x+y", true), element("OU", "z", false)])]
    #[case("/CN=", false, vec![element("CN", "", false)])]
    #[case("/", false, vec![])]
    #[case("/a/b=c", false, vec![element("a/b", "c", false)])]
    #[case("/CN=\\\\", false, vec![element("CN", "\\", false)])]
    fn test_tokenize(
        #[case] input: &str,
        #[case] multi: bool,
        #[case] expected: Vec<NameElement>,
    ) {
        assert_eq!(tokenize(input, multi).unwrap(), expected);
    }

    #[rstest]
    #[case("CN=x", Malformed::MissingLeadingSlash)]
    #[case("", Malformed::MissingLeadingSlash)]
    #[case("/CN=x\\", Malformed::DanglingEscape)]
    #[case("/CN\\", Malformed::DanglingEscape)]
    #[case("/CN", Malformed::UnterminatedType { index: 0 })]
    #[case("/CN=x/O", Malformed::UnterminatedType { index: 1 })]
    fn test_tokenize_malformed(#[case] input: &str, #[case] expected: Malformed) {
        assert_eq!(
            tokenize(input, true).unwrap_err(),
            Error::MalformedInput(expected)
        );
    }

    #[test]
    fn test_parse_dn_preferred_order() {
        let name = parse_dn("/CN=Alice/O=Org", CharacterEncoding::Utf8, false, false).unwrap();
        assert_eq!(labels(&name), vec![vec!["O=Org"], vec!["CN=Alice"]]);
    }

    #[test]
    fn test_parse_dn_legacy_order() {
        let name = parse_dn("/CN=Alice/O=Org", CharacterEncoding::Utf8, false, true).unwrap();
        assert_eq!(labels(&name), vec![vec!["CN=Alice"], vec!["O=Org"]]);
    }

    #[test]
    fn test_parse_dn_multivalued_rdn() {
        let name = parse_dn(
            "/C=US/CN=A+OU=B",
            CharacterEncoding::Utf8,
            true,
            false,
        )
        .unwrap();
        assert_eq!(labels(&name), vec![vec!["CN=A", "OU=B"], vec!["C=US"]]);
    }

    #[test]
    fn test_parse_dn_plus_is_literal_without_multivalue() {
        let name = parse_dn("/CN=A+OU=B", CharacterEncoding::Utf8, false, false).unwrap();
        assert_eq!(labels(&name), vec![vec!["CN=A+OU=B"]]);
    }

    #[test]
    fn test_parse_dn_skips_unknown_and_empty() {
        let name = parse_dn(
            "/XYZ=1/CN=/O=Org+foo=bar+OU=Unit",
            CharacterEncoding::Utf8,
            true,
            false,
        )
        .unwrap();
        // the skipped member leaves the rest of its RDN joined
        assert_eq!(labels(&name), vec![vec!["O=Org", "OU=Unit"]]);
    }

    #[test]
    fn test_parse_dn_long_names_and_oids() {
        let name = parse_dn(
            "/countryName=DE/2.5.4.10=Acme/commonName=host",
            CharacterEncoding::Utf8,
            false,
            true,
        )
        .unwrap();
        assert_eq!(labels(&name), vec![vec!["C=DE"], vec!["O=Acme"], vec!["CN=host"]]);
    }

    #[rstest]
    #[case("/CN=", Error::EmptyResult)]
    #[case("/", Error::EmptyResult)]
    #[case("/foo=bar", Error::EmptyResult)]
    #[case("/C=USA", Error::InvalidValue { attribute: "C".into(), reason: "expected 2 characters, got 3".into() })]
    #[case("/emailAddress=zoë@example.com", Error::InvalidValue { attribute: "emailAddress".into(), reason: "DirectoryString: characters not allowed in IA5String".into() })]
    fn test_parse_dn_errors(#[case] input: &str, #[case] expected: Error) {
        assert_eq!(
            parse_dn(input, CharacterEncoding::Utf8, false, false).unwrap_err(),
            expected
        );
    }

    #[rstest]
    #[case(CharacterEncoding::Utf8, "Zoë", Some(StringKind::Utf8))]
    #[case(CharacterEncoding::Printable, "Zoe", Some(StringKind::Printable))]
    #[case(CharacterEncoding::Printable, "Zoë", None)]
    #[case(CharacterEncoding::Ia5, "zoe@example", Some(StringKind::Ia5))]
    fn test_parse_dn_encoding(
        #[case] encoding: CharacterEncoding,
        #[case] value: &str,
        #[case] expected: Option<StringKind>,
    ) {
        let result = parse_dn(&format!("/CN={}", value), encoding, false, false);
        match expected {
            Some(kind) => {
                let name = result.unwrap();
                let atv = &name.rdns()[0].attributes()[0];
                assert_eq!(atv.value().kind(), kind);
                assert_eq!(atv.value().as_str(), value);
            }
            None => assert!(matches!(result, Err(Error::InvalidValue { .. }))),
        }
    }

    #[test]
    fn test_parse_dn_fixed_types_override_encoding() {
        let name = parse_dn(
            "/C=US/emailAddress=a@b.c/CN=x",
            CharacterEncoding::Utf8,
            false,
            true,
        )
        .unwrap();
        let kinds: Vec<StringKind> = name
            .rdns()
            .iter()
            .map(|rdn| rdn.attributes()[0].value().kind())
            .collect();
        assert_eq!(
            kinds,
            vec![StringKind::Printable, StringKind::Ia5, StringKind::Utf8]
        );
    }

    #[rstest]
    #[case("/CN=Alice/O=Org", true)]
    #[case("/CN=", false)]
    #[case("no-leading-slash", false)]
    #[case("/CN=a\\", false)]
    #[case("/C=USA", false)]
    fn test_validate_dn(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(validate_dn(input), expected);
    }
}
