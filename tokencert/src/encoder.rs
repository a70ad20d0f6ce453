//! Encoder trait, the mirror image of [`crate::decoder`].
//!
//! `Encoder<T, E>` is implemented by the value being encoded (`T`) and
//! produces the lower-level representation `E`, e.g. a
//! `DistinguishedName` encodes to an ASN.1 `Element`, which encodes to a
//! DER `Tlv`.

/// Encoder trait for converting from type `T` to type `E`.
pub trait Encoder<T, E: EncodableTo<T>> {
    /// The error type returned when encoding fails.
    type Error;

    /// Encodes `self` into type `E`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented in `E`.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that type `E` can be produced from type `T`.
pub trait EncodableTo<T> {}
