//! Subject Public Key Info
//!
//! RFC 5280 Section 4.1.2.7
//!
//! ```asn1
//! SubjectPublicKeyInfo  ::=  SEQUENCE  {
//!     algorithm            AlgorithmIdentifier,
//!     subjectPublicKey     BIT STRING
//! }
//! ```

use serde::Serialize;
use tokencert::decoder::{DecodableFrom, Decoder};
use tokencert::encoder::{EncodableTo, Encoder};
use tokencert_asn1::{ASN1Object, BitString, Element};

use crate::OidName;
use crate::algorithm::AlgorithmIdentifier;
use crate::error::{Error, Result};

/// Subject Public Key Info
///
/// Contains the algorithm identifier and the public key itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectPublicKeyInfo {
    algorithm: AlgorithmIdentifier,
    subject_public_key: BitString,
}

impl SubjectPublicKeyInfo {
    pub fn new(algorithm: AlgorithmIdentifier, subject_public_key: BitString) -> Self {
        Self {
            algorithm,
            subject_public_key,
        }
    }

    pub fn algorithm(&self) -> &AlgorithmIdentifier {
        &self.algorithm
    }

    pub fn subject_public_key(&self) -> &BitString {
        &self.subject_public_key
    }

    /// Decodes a DER `SubjectPublicKeyInfo`. Bytes after the structure are rejected.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let object = ASN1Object::from_der(bytes)?;
        match object.elements() {
            [element] => element.decode(),
            _ => Err(Error::SubjectPublicKeyInfoTrailingData),
        }
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        let element: Element = self.encode()?;
        Ok(element.to_der()?)
    }
}

impl DecodableFrom<Element> for SubjectPublicKeyInfo {}

impl Decoder<Element, SubjectPublicKeyInfo> for Element {
    type Error = Error;

    fn decode(&self) -> Result<SubjectPublicKeyInfo> {
        let Element::Sequence(elements) = self else {
            return Err(Error::SubjectPublicKeyInfoExpectedSequence);
        };

        let [algorithm_elm, public_key_elm] = elements.as_slice() else {
            return Err(Error::SubjectPublicKeyInfoInvalidElementCount(
                elements.len(),
            ));
        };

        let algorithm = algorithm_elm.decode()?;
        let Element::BitString(subject_public_key) = public_key_elm else {
            return Err(Error::SubjectPublicKeyInfoExpectedBitString);
        };

        Ok(SubjectPublicKeyInfo {
            algorithm,
            subject_public_key: subject_public_key.clone(),
        })
    }
}

impl EncodableTo<SubjectPublicKeyInfo> for Element {}

impl Encoder<SubjectPublicKeyInfo, Element> for SubjectPublicKeyInfo {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let algorithm_elm = self.algorithm.encode()?;
        let public_key_elm = Element::BitString(self.subject_public_key.clone());
        Ok(Element::Sequence(vec![algorithm_elm, public_key_elm]))
    }
}

impl OidName for SubjectPublicKeyInfo {
    fn oid_name(&self) -> Option<&'static str> {
        self.algorithm.oid_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokencert_asn1::{ObjectIdentifier, OctetString};

    #[test]
    fn test_subject_public_key_info_der() {
        // RSAPublicKey { n = 0x00c5 (197), e = 3 }
        let key = vec![0x30, 0x07, 0x02, 0x02, 0x00, 0xc5, 0x02, 0x01, 0x03];
        let spki = SubjectPublicKeyInfo::new(
            AlgorithmIdentifier::rsa_encryption().unwrap(),
            BitString::new(0, key.clone()),
        );

        let der = spki.to_der().unwrap();
        let mut expected = vec![
            0x30, 0x1b, 0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01,
            0x01, 0x05, 0x00, 0x03, 0x0a, 0x00,
        ];
        expected.extend(key);
        assert_eq!(der, expected);

        let decoded = SubjectPublicKeyInfo::from_der(&der).unwrap();
        assert_eq!(decoded, spki);
        assert_eq!(decoded.oid_name(), Some("rsaEncryption"));
    }

    #[test]
    fn test_subject_public_key_info_trailing_data() {
        let spki = SubjectPublicKeyInfo::new(
            AlgorithmIdentifier::rsa_encryption().unwrap(),
            BitString::new(0, vec![0x05, 0x00]),
        );
        let mut der = spki.to_der().unwrap();
        der.extend([0x05, 0x00]);
        assert_eq!(
            SubjectPublicKeyInfo::from_der(&der).unwrap_err(),
            Error::SubjectPublicKeyInfoTrailingData
        );
    }

    #[test]
    fn test_subject_public_key_info_invalid_sequence_length() {
        let oid: ObjectIdentifier = "1.2.840.113549.1.1.1".parse().unwrap();
        let element = Element::Sequence(vec![Element::ObjectIdentifier(oid)]);

        let result: Result<SubjectPublicKeyInfo> = element.decode();
        assert_eq!(
            result.unwrap_err(),
            Error::SubjectPublicKeyInfoInvalidElementCount(1)
        );
    }

    #[test]
    fn test_subject_public_key_info_invalid_public_key_type() {
        let algorithm_elm = AlgorithmIdentifier::rsa_encryption()
            .unwrap()
            .encode()
            .unwrap();
        let element = Element::Sequence(vec![
            algorithm_elm,
            Element::OctetString(OctetString::from(vec![1, 2, 3])),
        ]);

        let result: Result<SubjectPublicKeyInfo> = element.decode();
        assert_eq!(
            result.unwrap_err(),
            Error::SubjectPublicKeyInfoExpectedBitString
        );
    }
}
