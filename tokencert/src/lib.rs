//! # tokencert
//!
//! Core traits for encoding and decoding in the tokencert toolkit.
//!
//! Every layer of the workspace converts one representation into the next
//! through the `Decoder` and `Encoder` traits defined here:
//!
//! ```text
//! &[u8] → Der → Element → DistinguishedName / SubjectPublicKeyInfo
//! ```
//!
//! Encoding walks the same chain backwards, which is how a parsed subject
//! name or a reconstructed public key ends up as DER bytes.
//!
//! ## Type Safety
//!
//! Both traits are paired with a marker trait (`DecodableFrom`,
//! `EncodableTo`) so that only conversions that were declared explicitly
//! can be called.
//!
//! ```ignore
//! use tokencert::decoder::Decoder;
//! use tokencert_der::Der;
//! use tokencert_asn1::ASN1Object;
//!
//! let bytes: &[u8] = &[0x30, 0x00];
//! let der: Der = bytes.decode().unwrap();
//! let asn1: ASN1Object = der.decode().unwrap();
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
