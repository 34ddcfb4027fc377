//! Scalar and vector arithmetic mod q, plus the byte-padding and commitment
//! helpers shared by the signature and proof modules.
//!
//! All functions allocate fresh outputs and never alias their inputs.

use num_bigint::{BigInt, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::curve::{Curve, Point};
use crate::errors::Error;

/// Left-pads `raw` with zero bytes to exactly `size` bytes.
pub fn pad(raw: &[u8], size: usize) -> Vec<u8> {
    let mut out = vec![0u8; size.saturating_sub(raw.len())];
    out.extend_from_slice(raw);
    out
}

/// Multiplicative inverse of `v` modulo `m`. Fails on zero and on
/// non-invertible inputs.
pub fn mod_inverse(v: &BigInt, m: &BigInt) -> Result<BigInt, Error> {
    let v = v.mod_floor(m);
    if v.is_zero() {
        return Err(Error::ScalarOutOfRange);
    }
    let e = v.extended_gcd(m);
    if !e.gcd.is_one() {
        return Err(Error::ScalarOutOfRange);
    }
    Ok(e.x.mod_floor(m))
}

/// A uniform scalar in [0, order) from the thread-local CSPRNG.
pub(crate) fn random_scalar(order: &BigInt) -> BigInt {
    rand::thread_rng().gen_bigint_range(&BigInt::zero(), order)
}

/// [1, x, x², …, xⁿ⁻¹] mod order.
pub fn powers_of(order: &BigInt, x: &BigInt, n: u64) -> Vec<BigInt> {
    let mut out = Vec::with_capacity(n as usize);
    let mut current = BigInt::one();
    for _ in 0..n {
        out.push(current.clone());
        current = (&current * x).mod_floor(order);
    }
    out
}

/// Base-u digits of `x`, little-endian, `l` of them, so that
/// x = Σ dᵢ·uⁱ. Division is Euclidean, so negative inputs decompose into
/// non-negative digits.
pub fn decompose(x: &BigInt, u: u64, l: u64) -> Vec<BigInt> {
    let base = BigInt::from(u);
    let mut rest = x.clone();
    let mut out = Vec::with_capacity(l as usize);
    for _ in 0..l {
        out.push(rest.mod_floor(&base));
        rest = rest.div_floor(&base);
    }
    out
}

/// ⟨a, b⟩ mod order. Fails unless the vectors match in length.
pub fn inner_product(order: &BigInt, a: &[BigInt], b: &[BigInt]) -> Result<BigInt, Error> {
    if a.len() != b.len() {
        return Err(Error::VectorLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let mut out = BigInt::zero();
    for (ai, bi) in a.iter().zip(b) {
        out = (out + ai * bi).mod_floor(order);
    }
    Ok(out)
}

/// Elementwise a + b mod order.
pub fn vector_add(order: &BigInt, a: &[BigInt], b: &[BigInt]) -> Result<Vec<BigInt>, Error> {
    if a.len() != b.len() {
        return Err(Error::VectorLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b)
        .map(|(ai, bi)| (ai + bi).mod_floor(order))
        .collect())
}

/// Elementwise a − b mod order.
pub fn vector_sub(order: &BigInt, a: &[BigInt], b: &[BigInt]) -> Result<Vec<BigInt>, Error> {
    if a.len() != b.len() {
        return Err(Error::VectorLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b)
        .map(|(ai, bi)| (ai - bi).mod_floor(order))
        .collect())
}

/// Elementwise a ∘ b mod order.
pub fn vector_mul(order: &BigInt, a: &[BigInt], b: &[BigInt]) -> Result<Vec<BigInt>, Error> {
    if a.len() != b.len() {
        return Err(Error::VectorLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b)
        .map(|(ai, bi)| (ai * bi).mod_floor(order))
        .collect())
}

/// a scaled by x mod order.
pub fn vector_scalar_mul(order: &BigInt, a: &[BigInt], x: &BigInt) -> Vec<BigInt> {
    a.iter().map(|ai| (ai * x).mod_floor(order)).collect()
}

/// Π aᵢ^bᵢ, a multi-exponentiation folded into one point.
pub fn vector_exp(curve: &Curve, a: &[Point], b: &[BigInt]) -> Result<Point, Error> {
    if a.len() != b.len() {
        return Err(Error::VectorLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let mut out = Point::infinity();
    for (ai, bi) in a.iter().zip(b) {
        out = out.add(curve, &ai.scalar_mult(curve, bi));
    }
    Ok(out)
}

/// Every point of `a` raised to the same scalar.
pub fn vector_scalar_exp(curve: &Curve, a: &[Point], b: &BigInt) -> Vec<Point> {
    a.iter().map(|ai| ai.scalar_mult(curve, b)).collect()
}

/// Componentwise point addition.
pub fn vector_ec_add(curve: &Curve, a: &[Point], b: &[Point]) -> Result<Vec<Point>, Error> {
    if a.len() != b.len() {
        return Err(Error::VectorLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(ai, bi)| ai.add(curve, bi)).collect())
}

/// Pedersen-style commitment value·G + blinding·h, with G the curve base
/// point and `h` a companion generator.
pub fn commit(curve: &Curve, value: &BigInt, blinding: &BigInt, h: &Point) -> Point {
    Point::scalar_base_mult(curve, value).add(curve, &h.scalar_mult(curve, blinding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::generator_g;

    fn order() -> BigInt {
        Curve::gost_r3410_2001_crypto_pro_a().q
    }

    #[test]
    fn pad_widths() {
        assert_eq!(pad(&[1, 2], 4), vec![0, 0, 1, 2]);
        assert_eq!(pad(&[1, 2, 3, 4], 4), vec![1, 2, 3, 4]);
    }

    #[test]
    fn mod_inverse_round_trip() {
        let q = order();
        let x = BigInt::from(1234567u64);
        let inv = mod_inverse(&x, &q).unwrap();
        assert!((x * inv).mod_floor(&q).is_one());
        assert_eq!(
            mod_inverse(&BigInt::zero(), &q),
            Err(Error::ScalarOutOfRange)
        );
    }

    #[test]
    fn powers_and_inner_product() {
        let q = order();
        let powers = powers_of(&q, &BigInt::from(3), 4);
        assert_eq!(
            powers,
            vec![
                BigInt::from(1),
                BigInt::from(3),
                BigInt::from(9),
                BigInt::from(27)
            ]
        );
        let ones = vec![BigInt::one(); 4];
        assert_eq!(inner_product(&q, &powers, &ones).unwrap(), BigInt::from(40));
        assert!(matches!(
            inner_product(&q, &powers, &ones[..3]),
            Err(Error::VectorLengthMismatch { .. })
        ));
    }

    #[test]
    fn decompose_recomposes() {
        let digits = decompose(&BigInt::from(300), 2, 16);
        let mut acc = BigInt::zero();
        for (i, d) in digits.iter().enumerate() {
            acc += d << i;
        }
        assert_eq!(acc, BigInt::from(300));
    }

    #[test]
    fn decompose_negative_is_euclidean() {
        // −1 in 4 binary digits comes out as all ones.
        let digits = decompose(&BigInt::from(-1), 2, 4);
        assert_eq!(digits, vec![BigInt::one(); 4]);
    }

    #[test]
    fn vector_exp_matches_manual_sum() {
        let curve = Curve::gost_r3410_2001_crypto_pro_a();
        let g = generator_g(&curve);
        let two_g = g.add(&curve, &g);
        let points = vec![g.clone(), two_g];
        let scalars = vec![BigInt::from(2), BigInt::from(3)];
        // 2·G + 3·(2G) = 8·G
        assert_eq!(
            vector_exp(&curve, &points, &scalars).unwrap(),
            Point::scalar_base_mult(&curve, &BigInt::from(8))
        );
    }
}
