//! Decoder trait for type-safe conversions.
//!
//! The decoder uses a two-trait pattern:
//!
//! 1. `Decoder<T, D>` performs the conversion from `T` into `D`
//! 2. `DecodableFrom<T>` marks `D` as a valid destination for `T`
//!
//! ```no_run
//! use tokencert::decoder::{DecodableFrom, Decoder};
//!
//! struct Raw(Vec<u8>);
//! struct Text(String);
//!
//! #[derive(Debug)]
//! struct TextError;
//!
//! impl DecodableFrom<Raw> for Text {}
//!
//! impl Decoder<Raw, Text> for Raw {
//!     type Error = TextError;
//!
//!     fn decode(&self) -> Result<Text, Self::Error> {
//!         String::from_utf8(self.0.clone())
//!             .map(Text)
//!             .map_err(|_| TextError)
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type. The destination must implement
/// `DecodableFrom<T>`.
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
pub trait DecodableFrom<T> {}
