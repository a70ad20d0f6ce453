//! Public keys rebuilt from PKCS#11 attribute buffers
//!
//! A token hands back a key as loose attribute values: `CKA_MODULUS` and
//! `CKA_PUBLIC_EXPONENT` for RSA, the DSA domain plus `CKA_VALUE`, or DER
//! `CKA_EC_PARAMS` and `CKA_EC_POINT` for EC. The builders here turn such a
//! set into a [`PublicKey`] and from there into a `SubjectPublicKeyInfo`.
//!
//! ```
//! use tokencert_keys::{AttributeList, AttributeType, KeyAlgorithm, build_public_key};
//!
//! let mut attrs = AttributeList::new();
//! attrs.insert(AttributeType::Modulus, vec![0x00, 0xc5]);
//! attrs.insert(AttributeType::PublicExponent, vec![0x03]);
//!
//! let key = build_public_key(KeyAlgorithm::Rsa, &attrs).unwrap();
//! assert_eq!(key.key_size(), 8);
//! ```

pub mod attribute;
pub mod dsa;
pub mod ec;
pub mod error;
pub mod public_key;
pub mod rsa;
mod serde_hex;

pub use attribute::{AttributeList, AttributeType, KeyAttributes};
pub use dsa::{DsaDomain, DsaPublicKey, build_dsa_key};
pub use ec::{EcPoint, EcPublicKey, build_ec_key};
pub use error::{DecodeFailure, Error, Result};
pub use public_key::{KeyAlgorithm, PublicKey, build_public_key};
pub use rsa::{RsaPublicKey, build_rsa_key};
