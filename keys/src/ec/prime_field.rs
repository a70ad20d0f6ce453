//! Short Weierstrass curves over a prime field, for explicit domains
//!
//! `y^2 = x^3 + ax + b (mod p)`. Only the checks needed to accept a public
//! point are implemented: membership and decompression.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use tokencert_pkix_types::algorithm::parameters::{NamedCurve, SpecifiedCurve};

use super::point::{Sec1Point, parse_sec1};
use crate::error::DecodeFailure;

// Bound on the quadratic non-residue search in Tonelli-Shanks. A prime
// modulus always has one among the first few candidates.
const NON_RESIDUE_SEARCH_LIMIT: u32 = 1024;

// SEC 2 section 2.2.1: secp192r1 (p, a, b)
const SECP192R1: [&str; 3] = [
    "fffffffffffffffffffffffffffffffeffffffffffffffff",
    "fffffffffffffffffffffffffffffffefffffffffffffffc",
    "64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1",
];

// SEC 2 section 2.3.2: secp224r1 (p, a, b)
const SECP224R1: [&str; 3] = [
    "ffffffffffffffffffffffffffffffff000000000000000000000001",
    "fffffffffffffffffffffffffffffffefffffffffffffffffffffffe",
    "b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrimeCurve {
    p: BigUint,
    a: BigUint,
    b: BigUint,
    field_size: usize,
}

impl PrimeCurve {
    pub(crate) fn new(p: BigUint, a: BigUint, b: BigUint) -> Result<Self, DecodeFailure> {
        if p <= BigUint::from(3u32) || p.is_even() {
            return Err(DecodeFailure::InvalidDomain(
                "prime must be an odd number greater than 3".into(),
            ));
        }
        if a >= p || b >= p {
            return Err(DecodeFailure::InvalidDomain(
                "curve coefficients must be smaller than the prime".into(),
            ));
        }
        let field_size = usize::try_from(p.bits().div_ceil(8)).map_err(|_| {
            DecodeFailure::InvalidDomain("prime is too large".into())
        })?;
        Ok(Self {
            p,
            a,
            b,
            field_size,
        })
    }

    /// Builds the curve from an explicit domain and checks the generator.
    pub(crate) fn from_specified(curve: &SpecifiedCurve) -> Result<Self, DecodeFailure> {
        let p = curve
            .prime
            .to_biguint()
            .ok_or_else(|| DecodeFailure::InvalidDomain("negative prime".into()))?;
        let this = Self::new(
            p,
            BigUint::from_bytes_be(&curve.a),
            BigUint::from_bytes_be(&curve.b),
        )?;
        match this.decode(&curve.base) {
            Ok(_) => Ok(this),
            Err(DecodeFailure::PointNotOnCurve) => Err(DecodeFailure::GeneratorNotOnCurve),
            Err(err) => Err(err),
        }
    }

    /// Named prime curves without a RustCrypto arithmetic crate.
    pub(crate) fn named(curve: NamedCurve) -> Option<Self> {
        let [p, a, b] = match curve {
            NamedCurve::Secp192r1 => SECP192R1,
            NamedCurve::Secp224r1 => SECP224R1,
            _ => return None,
        };
        let parse = |hex: &str| BigUint::parse_bytes(hex.as_bytes(), 16);
        Self::new(parse(p)?, parse(a)?, parse(b)?).ok()
    }

    pub(crate) fn field_size(&self) -> usize {
        self.field_size
    }

    pub(crate) fn prime(&self) -> &BigUint {
        &self.p
    }

    fn rhs(&self, x: &BigUint) -> BigUint {
        (x.modpow(&BigUint::from(3u32), &self.p) + &self.a * x + &self.b) % &self.p
    }

    pub(crate) fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        x < &self.p && y < &self.p && (y * y) % &self.p == self.rhs(x)
    }

    /// Recovers y from x and the parity bit.
    pub(crate) fn decompress(&self, x: &BigUint, y_odd: bool) -> Result<BigUint, DecodeFailure> {
        if x >= &self.p {
            return Err(DecodeFailure::PointNotOnCurve);
        }
        let y = sqrt_mod(&self.rhs(x), &self.p).ok_or(DecodeFailure::PointNotOnCurve)?;
        if y.is_odd() == y_odd {
            Ok(y)
        } else if y.is_zero() {
            Err(DecodeFailure::PointNotOnCurve)
        } else {
            Ok(&self.p - y)
        }
    }

    /// Decodes SEC1 octets into affine coordinates on this curve.
    pub(crate) fn decode(&self, octets: &[u8]) -> Result<(BigUint, BigUint), DecodeFailure> {
        match parse_sec1(octets, self.field_size)? {
            Sec1Point::Compressed { x, y_odd } => {
                let x = BigUint::from_bytes_be(x);
                let y = self.decompress(&x, y_odd)?;
                Ok((x, y))
            }
            Sec1Point::Uncompressed { x, y } => {
                let x = BigUint::from_bytes_be(x);
                let y = BigUint::from_bytes_be(y);
                if self.contains(&x, &y) {
                    Ok((x, y))
                } else {
                    Err(DecodeFailure::PointNotOnCurve)
                }
            }
        }
    }
}

/// Square root of `n` modulo the odd prime `p` (Tonelli-Shanks).
pub(crate) fn sqrt_mod(n: &BigUint, p: &BigUint) -> Option<BigUint> {
    let n = n % p;
    if n.is_zero() {
        return Some(BigUint::zero());
    }
    let one = BigUint::one();
    let p_minus_one = p - &one;
    let euler = &p_minus_one >> 1u32;
    if n.modpow(&euler, p) != one {
        return None;
    }

    if (p % 4u32) == BigUint::from(3u32) {
        let r = n.modpow(&((p + &one) >> 2u32), p);
        return ((&r * &r) % p == n).then_some(r);
    }

    // p - 1 = q * 2^s with q odd
    let mut q = p_minus_one.clone();
    let mut s = 0u32;
    while q.is_even() {
        q >>= 1u32;
        s += 1;
    }

    let mut z = BigUint::from(2u32);
    let mut tries = 0;
    while z.modpow(&euler, p) != p_minus_one {
        z += 1u32;
        tries += 1;
        if tries > NON_RESIDUE_SEARCH_LIMIT || &z >= p {
            return None;
        }
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = n.modpow(&q, p);
    let mut r = n.modpow(&((&q + &one) >> 1u32), p);

    while t != one {
        let mut i = 0u32;
        let mut t2 = t.clone();
        while t2 != one {
            t2 = (&t2 * &t2) % p;
            i += 1;
            if i == m {
                return None;
            }
        }
        let mut b = c.clone();
        for _ in 0..(m - i - 1) {
            b = (&b * &b) % p;
        }
        m = i;
        c = (&b * &b) % p;
        t = (&t * &c) % p;
        r = (&r * &b) % p;
    }

    ((&r * &r) % p == n).then_some(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // y^2 = x^3 + 2x + 3 over F_97, with (3, 6) on the curve
    fn toy_curve() -> PrimeCurve {
        PrimeCurve::new(BigUint::from(97u32), BigUint::from(2u32), BigUint::from(3u32)).unwrap()
    }

    #[rstest]
    #[case::p_1_mod_4(17, 2)]
    #[case::p_1_mod_4_large_s(97, 36)]
    #[case::p_3_mod_4(23, 13)]
    #[case::zero(13, 0)]
    fn test_sqrt_mod(#[case] p: u32, #[case] n: u32) {
        let p = BigUint::from(p);
        let n = BigUint::from(n);
        let r = sqrt_mod(&n, &p).unwrap();
        assert_eq!((&r * &r) % &p, n);
    }

    #[rstest]
    #[case(17, 3)]
    #[case(23, 5)]
    fn test_sqrt_mod_non_residue(#[case] p: u32, #[case] n: u32) {
        assert_eq!(sqrt_mod(&BigUint::from(n), &BigUint::from(p)), None);
    }

    #[test]
    fn test_toy_curve_contains() {
        let curve = toy_curve();
        assert_eq!(curve.field_size(), 1);
        assert!(curve.contains(&BigUint::from(3u32), &BigUint::from(6u32)));
        assert!(curve.contains(&BigUint::from(3u32), &BigUint::from(91u32)));
        assert!(!curve.contains(&BigUint::from(3u32), &BigUint::from(7u32)));
    }

    #[rstest]
    #[case::even(vec![0x02, 0x03], 6)]
    #[case::odd(vec![0x03, 0x03], 91)]
    #[case::uncompressed(vec![0x04, 0x03, 0x06], 6)]
    #[case::hybrid(vec![0x06, 0x03, 0x06], 6)]
    fn test_toy_curve_decode(#[case] octets: Vec<u8>, #[case] y: u32) {
        let (px, py) = toy_curve().decode(&octets).unwrap();
        assert_eq!(px, BigUint::from(3u32));
        assert_eq!(py, BigUint::from(y));
    }

    #[rstest]
    #[case::off_curve(vec![0x04, 0x03, 0x07], DecodeFailure::PointNotOnCurve)]
    #[case::x_out_of_range(vec![0x02, 0x64], DecodeFailure::PointNotOnCurve)]
    #[case::identity(vec![0x00], DecodeFailure::IdentityPoint)]
    fn test_toy_curve_decode_errors(#[case] octets: Vec<u8>, #[case] expected: DecodeFailure) {
        assert_eq!(toy_curve().decode(&octets).unwrap_err(), expected);
    }

    #[rstest]
    #[case(NamedCurve::Secp192r1, 24)]
    #[case(NamedCurve::Secp224r1, 28)]
    fn test_named_prime_curve(#[case] curve: NamedCurve, #[case] field_size: usize) {
        let prime = PrimeCurve::named(curve).unwrap();
        assert_eq!(prime.field_size(), field_size);
        assert_eq!(prime.prime().bits() as usize, field_size * 8);
    }

    #[test]
    fn test_named_prime_curve_rustcrypto_curves() {
        assert_eq!(PrimeCurve::named(NamedCurve::Secp256r1), None);
        assert_eq!(PrimeCurve::named(NamedCurve::Sect163k1), None);
    }

    #[rstest]
    #[case::even(4, 1, 1)]
    #[case::too_small(3, 1, 1)]
    #[case::a_not_reduced(97, 97, 1)]
    #[case::b_not_reduced(97, 1, 100)]
    fn test_prime_curve_rejects_domain(#[case] p: u32, #[case] a: u32, #[case] b: u32) {
        let result = PrimeCurve::new(BigUint::from(p), BigUint::from(a), BigUint::from(b));
        assert!(matches!(result, Err(DecodeFailure::InvalidDomain(_))));
    }
}
