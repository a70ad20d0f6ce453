//! SEC1 point encodings
//!
//! [SEC 1 Section 2.3.4](https://www.secg.org/sec1-v2.pdf): `02`/`03` compressed,
//! `04` uncompressed, `06`/`07` hybrid. P-256, P-384, P-521 and secp256k1
//! go through the RustCrypto curve crates. P-192, P-224 and explicit
//! domains use [`PrimeCurve`].

use elliptic_curve::sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint};
use elliptic_curve::{AffinePoint, CurveArithmetic, FieldBytesSize};
use num_bigint::BigUint;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use tokencert_pkix_types::OidName;
use tokencert_pkix_types::algorithm::parameters::NamedCurve;

use super::prime_field::PrimeCurve;
use crate::error::DecodeFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sec1Point<'a> {
    Compressed { x: &'a [u8], y_odd: bool },
    /// Uncompressed, or hybrid with a matching parity bit.
    Uncompressed { x: &'a [u8], y: &'a [u8] },
}

/// Splits SEC1 octets for a field of `field_size` bytes.
pub(crate) fn parse_sec1(octets: &[u8], field_size: usize) -> Result<Sec1Point<'_>, DecodeFailure> {
    let Some((&tag, rest)) = octets.split_first() else {
        return Err(DecodeFailure::InvalidPointEncoding("empty point".into()));
    };
    match tag {
        0x00 => Err(DecodeFailure::IdentityPoint),
        0x02 | 0x03 => {
            expect_len(rest, field_size, "compressed")?;
            Ok(Sec1Point::Compressed {
                x: rest,
                y_odd: tag == 0x03,
            })
        }
        0x04 | 0x06 | 0x07 => {
            let form = if tag == 0x04 { "uncompressed" } else { "hybrid" };
            expect_len(rest, 2 * field_size, form)?;
            let (x, y) = rest.split_at(field_size);
            if tag != 0x04 {
                let y_odd = y.last().is_some_and(|b| b & 1 == 1);
                if y_odd != (tag == 0x07) {
                    return Err(DecodeFailure::InvalidPointEncoding(
                        "hybrid parity bit does not match y".into(),
                    ));
                }
            }
            Ok(Sec1Point::Uncompressed { x, y })
        }
        other => Err(DecodeFailure::InvalidPointEncoding(format!(
            "unknown point form 0x{:02x}",
            other
        ))),
    }
}

fn expect_len(rest: &[u8], expected: usize, form: &str) -> Result<(), DecodeFailure> {
    if rest.len() == expected {
        Ok(())
    } else {
        Err(DecodeFailure::InvalidPointEncoding(format!(
            "{} point must be {} bytes, got {}",
            form,
            expected + 1,
            rest.len() + 1
        )))
    }
}

/// Field element size in bytes for the named curves that can be validated.
pub(crate) fn named_field_size(curve: NamedCurve) -> Option<usize> {
    match curve {
        NamedCurve::Secp192r1 => Some(24),
        NamedCurve::Secp224r1 => Some(28),
        NamedCurve::Secp256r1 | NamedCurve::Secp256k1 => Some(32),
        NamedCurve::Secp384r1 => Some(48),
        NamedCurve::Secp521r1 => Some(66),
        _ => None,
    }
}

/// Field size in bits for the named curves that can be validated.
pub(crate) fn named_field_bits(curve: NamedCurve) -> Option<u32> {
    match curve {
        NamedCurve::Secp192r1 => Some(192),
        NamedCurve::Secp224r1 => Some(224),
        NamedCurve::Secp256r1 | NamedCurve::Secp256k1 => Some(256),
        NamedCurve::Secp384r1 => Some(384),
        NamedCurve::Secp521r1 => Some(521),
        _ => None,
    }
}

/// Decodes a point on a named curve, checking it is on the curve.
pub(crate) fn decode_named(curve: NamedCurve, octets: &[u8]) -> Result<EcPoint, DecodeFailure> {
    let field_size = named_field_size(curve).ok_or_else(|| unsupported(curve))?;

    if let Some(prime) = PrimeCurve::named(curve) {
        let (x, y) = prime.decode(octets)?;
        return Ok(EcPoint::new(x, y, field_size));
    }

    // RustCrypto has no hybrid form; rewrite it as uncompressed once the
    // parity bit is checked.
    let canonical = match parse_sec1(octets, field_size)? {
        Sec1Point::Compressed { .. } => octets.to_vec(),
        Sec1Point::Uncompressed { x, y } => [&[0x04u8][..], x, y].concat(),
    };

    let (x, y) = match curve {
        NamedCurve::Secp256r1 => decode_with::<p256::NistP256>(&canonical)?,
        NamedCurve::Secp384r1 => decode_with::<p384::NistP384>(&canonical)?,
        NamedCurve::Secp521r1 => decode_with::<p521::NistP521>(&canonical)?,
        NamedCurve::Secp256k1 => decode_with::<k256::Secp256k1>(&canonical)?,
        other => return Err(unsupported(other)),
    };
    Ok(EcPoint::new(x, y, field_size))
}

pub(crate) fn decode_explicit(curve: &PrimeCurve, octets: &[u8]) -> Result<EcPoint, DecodeFailure> {
    let (x, y) = curve.decode(octets)?;
    Ok(EcPoint::new(x, y, curve.field_size()))
}

fn unsupported(curve: NamedCurve) -> DecodeFailure {
    let name = curve
        .oid_name()
        .map(str::to_string)
        .unwrap_or_else(|| curve.oid_str().to_string());
    DecodeFailure::UnsupportedCurve(name)
}

fn decode_with<C>(octets: &[u8]) -> Result<(BigUint, BigUint), DecodeFailure>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let key = elliptic_curve::PublicKey::<C>::from_sec1_bytes(octets)
        .map_err(|_| DecodeFailure::PointNotOnCurve)?;
    let encoded = key.to_encoded_point(false);
    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => Ok((BigUint::from_bytes_be(x), BigUint::from_bytes_be(y))),
        _ => Err(DecodeFailure::IdentityPoint),
    }
}

/// Affine point with the byte size of its field elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPoint {
    x: BigUint,
    y: BigUint,
    field_size: usize,
}

impl EcPoint {
    pub fn new(x: BigUint, y: BigUint, field_size: usize) -> Self {
        Self { x, y, field_size }
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    pub fn field_size(&self) -> usize {
        self.field_size
    }

    /// `04 || X || Y`
    pub fn to_uncompressed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + 2 * self.field_size);
        out.push(0x04);
        out.extend(pad(&self.x, self.field_size));
        out.extend(pad(&self.y, self.field_size));
        out
    }

    /// `02 || X` or `03 || X` depending on the parity of y.
    pub fn to_compressed(&self) -> Vec<u8> {
        let odd = self.y.bit(0);
        let mut out = Vec::with_capacity(1 + self.field_size);
        out.push(if odd { 0x03 } else { 0x02 });
        out.extend(pad(&self.x, self.field_size));
        out
    }
}

fn pad(value: &BigUint, size: usize) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    let mut out = vec![0u8; size.saturating_sub(bytes.len())];
    out.extend(bytes);
    out
}

impl Serialize for EcPoint {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("EcPoint", 3)?;
        state.serialize_field("x", &hex::encode(pad(&self.x, self.field_size)))?;
        state.serialize_field("y", &hex::encode(pad(&self.y, self.field_size)))?;
        state.serialize_field("uncompressed", &hex::encode(self.to_uncompressed()))?;
        state.end()
    }
}
