//! PKIX naming and key-info types
//!
//! This crate provides the X.509 structures a token-backed certificate
//! generator needs before anything is signed:
//!
//! - [`DistinguishedName`] and the `/type=value/...` subject parser
//!   ([`name::parse_dn`], [`name::validate_dn`], [`name::tokenize`])
//! - [`AlgorithmIdentifier`] with RSA, DSA and EC parameters
//! - [`SubjectPublicKeyInfo`]
//!
//! These types are defined in various RFCs including:
//! - RFC 5280: Internet X.509 Public Key Infrastructure Certificate and CRL Profile
//! - RFC 4519: Lightweight Directory Access Protocol (LDAP): Schema for User Applications
//! - RFC 3279 / RFC 5480: algorithm identifiers and parameters
//! - SEC 1: Elliptic Curve Cryptography

pub mod algorithm;
pub mod directory_string;
pub mod error;
pub mod name;
mod oid_name;
pub mod subject_public_key_info;

pub use algorithm::{AlgorithmIdentifier, AlgorithmParameters};
pub use directory_string::{DirectoryString, StringKind};
pub use error::{Error, Result};
pub use name::{
    AttributeTypeAndValue, CharacterEncoding, DistinguishedName, NameElement,
    RelativeDistinguishedName,
};
pub use oid_name::OidName;
pub use subject_public_key_info::SubjectPublicKeyInfo;
