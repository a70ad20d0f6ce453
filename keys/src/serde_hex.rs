//! Hex serialization for big integers.

use num_bigint::BigUint;
use serde::Serializer;

pub(crate) fn biguint<S>(value: &BigUint, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&hex::encode(value.to_bytes_be()))
}
