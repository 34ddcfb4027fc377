//! The GOST R 34.10-2001 CryptoPro-A curve and affine point arithmetic.
//!
//! All operations are stateless: every add, double and scalar multiplication
//! returns a fresh [`Point`], so a [`Curve`] can be shared freely across
//! threads. The identity ("point at infinity") is represented by the
//! coordinate pair (0, 0), which is not on the curve and which the group
//! arithmetic treats as the neutral element.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::errors::Error;

/// Short-Weierstrass curve parameters: y² = x³ + a·x + b over F_p, with a
/// base point of prime order q and cofactor 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve {
    /// Field prime.
    pub p: BigInt,
    /// Order of the base point.
    pub q: BigInt,
    /// Curve coefficient a (≡ −3 mod p for this profile).
    pub a: BigInt,
    /// Curve coefficient b.
    pub b: BigInt,
    /// Base point x coordinate.
    pub gx: BigInt,
    /// Base point y coordinate.
    pub gy: BigInt,
    /// Bit size of the field.
    pub bit_size: usize,
}

fn hex_int(s: &str) -> BigInt {
    BigInt::parse_bytes(s.as_bytes(), 16).expect("curve constant")
}

impl Curve {
    /// Builds a curve from its parameters, checking that the base point
    /// satisfies the curve equation.
    pub fn new(
        p: BigInt,
        q: BigInt,
        a: BigInt,
        b: BigInt,
        gx: BigInt,
        gy: BigInt,
        bit_size: usize,
    ) -> Result<Curve, Error> {
        let curve = Curve {
            p,
            q,
            a,
            b,
            gx,
            gy,
            bit_size,
        };
        if !curve.is_on_curve(&curve.gx, &curve.gy) {
            return Err(Error::InvalidCurvePoint);
        }
        Ok(curve)
    }

    /// The 256-bit GOST R 34.10-2001 CryptoPro-A parameter set.
    pub fn gost_r3410_2001_crypto_pro_a() -> Curve {
        let p = hex_int("fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffd97");
        let a = &p - 3;
        Curve {
            q: hex_int("ffffffffffffffffffffffffffffffff6c611070995ad10045841b09b761b893"),
            b: hex_int("a6"),
            gx: BigInt::one(),
            gy: hex_int("8d91e471e0989cda27df505a453f2b7635294f2ddf23e3b122acc99c9e9f1e14"),
            bit_size: 256,
            p,
            a,
        }
    }

    /// Byte width of one serialised coordinate.
    pub fn mode(&self) -> usize {
        self.bit_size / 8
    }

    /// Whether (x, y) satisfies y² = x³ + a·x + b over F_p.
    pub fn is_on_curve(&self, x: &BigInt, y: &BigInt) -> bool {
        let lhs = (y * y).mod_floor(&self.p);
        let rhs = (x * x * x + &self.a * x + &self.b).mod_floor(&self.p);
        lhs == rhs
    }

    /// x³ + a·x + b mod p, the right-hand side of the curve equation.
    pub(crate) fn equation_rhs(&self, x: &BigInt) -> BigInt {
        (x * x * x + &self.a * x + &self.b).mod_floor(&self.p)
    }

    /// Square root modulo p, if one exists. Relies on p ≡ 3 (mod 4).
    pub(crate) fn mod_sqrt(&self, v: &BigInt) -> Option<BigInt> {
        let exp = (&self.p + 1) / 4;
        let root = v.modpow(&exp, &self.p);
        if (&root * &root).mod_floor(&self.p) == v.mod_floor(&self.p) {
            Some(root)
        } else {
            None
        }
    }

    /// Multiplicative inverse in the field F_p via Fermat's little theorem.
    fn field_inv(&self, v: &BigInt) -> BigInt {
        let exp = &self.p - 2;
        v.mod_floor(&self.p).modpow(&exp, &self.p)
    }

    fn jacobian_double(&self, point: &Jacobian) -> Jacobian {
        if point.z.is_zero() || point.y.is_zero() {
            return Jacobian::identity();
        }
        let p = &self.p;
        let y_sq = (&point.y * &point.y).mod_floor(p);
        let s = (&point.x * &y_sq * 4i64).mod_floor(p);
        let z_sq = (&point.z * &point.z).mod_floor(p);
        let z_4 = (&z_sq * &z_sq).mod_floor(p);
        let m = (&point.x * &point.x * 3i64 + &self.a * z_4).mod_floor(p);
        let x3 = (&m * &m - &s * 2i64).mod_floor(p);
        let y3 = (&m * (&s - &x3) - (&y_sq * &y_sq) * 8i64).mod_floor(p);
        let z3 = (&point.y * &point.z * 2i64).mod_floor(p);
        Jacobian {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    fn jacobian_add_affine(&self, point: &Jacobian, other: &Point) -> Jacobian {
        if point.z.is_zero() {
            return Jacobian {
                x: other.x.clone(),
                y: other.y.clone(),
                z: BigInt::one(),
            };
        }
        let p = &self.p;
        let z_sq = (&point.z * &point.z).mod_floor(p);
        let u2 = (&other.x * &z_sq).mod_floor(p);
        let s2 = (&other.y * &point.z * &z_sq).mod_floor(p);
        if u2 == point.x {
            if s2 == point.y {
                return self.jacobian_double(point);
            }
            return Jacobian::identity();
        }
        let h = (&u2 - &point.x).mod_floor(p);
        let r = (&s2 - &point.y).mod_floor(p);
        let h_sq = (&h * &h).mod_floor(p);
        let h_cu = (&h_sq * &h).mod_floor(p);
        let x3 = (&r * &r - &h_cu - &point.x * &h_sq * 2i64).mod_floor(p);
        let y3 = (&r * (&point.x * &h_sq - &x3) - &point.y * &h_cu).mod_floor(p);
        let z3 = (&point.z * &h).mod_floor(p);
        Jacobian {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    fn jacobian_to_affine(&self, point: &Jacobian) -> Point {
        if point.z.is_zero() {
            return Point::infinity();
        }
        let p = &self.p;
        let z_inv = self.field_inv(&point.z);
        let z_inv_sq = (&z_inv * &z_inv).mod_floor(p);
        Point {
            x: (&point.x * &z_inv_sq).mod_floor(p),
            y: (&point.y * &z_inv_sq * &z_inv).mod_floor(p),
        }
    }
}

/// Jacobian coordinates for the scalar-multiplication ladder: the affine
/// point is (X/Z², Y/Z³), with Z = 0 standing for the identity. Only the
/// ladder uses this form; one field inversion converts the result back.
struct Jacobian {
    x: BigInt,
    y: BigInt,
    z: BigInt,
}

impl Jacobian {
    fn identity() -> Jacobian {
        Jacobian {
            x: BigInt::one(),
            y: BigInt::one(),
            z: BigInt::zero(),
        }
    }
}

/// An affine curve point. The pair (0, 0) stands for the group identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Affine x coordinate, reduced mod p.
    pub x: BigInt,
    /// Affine y coordinate, reduced mod p.
    pub y: BigInt,
}

impl Point {
    /// The group identity.
    pub fn infinity() -> Point {
        Point {
            x: BigInt::zero(),
            y: BigInt::zero(),
        }
    }

    /// Whether this point is the group identity.
    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    /// The inverse element, computed as (q − 1)·P.
    pub fn neg(&self, curve: &Curve) -> Point {
        if self.is_zero() {
            return Point::infinity();
        }
        let minus_one = &curve.q - 1;
        self.scalar_mult(curve, &minus_one)
    }

    /// Group addition, with the identity handled on either side and doubling
    /// on equal inputs.
    pub fn add(&self, curve: &Curve, other: &Point) -> Point {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        if self.x == other.x {
            if self.y == other.y && !self.y.is_zero() {
                return self.double(curve);
            }
            // P + (−P), or doubling a point of order two.
            return Point::infinity();
        }
        let p = &curve.p;
        let lambda = ((&other.y - &self.y) * curve.field_inv(&(&other.x - &self.x))).mod_floor(p);
        let x3 = (&lambda * &lambda - &self.x - &other.x).mod_floor(p);
        let y3 = (&lambda * (&self.x - &x3) - &self.y).mod_floor(p);
        Point { x: x3, y: y3 }
    }

    fn double(&self, curve: &Curve) -> Point {
        let p = &curve.p;
        let num = (&self.x * &self.x * 3i64 + &curve.a).mod_floor(p);
        let lambda = (num * curve.field_inv(&(&self.y * 2))).mod_floor(p);
        let x3 = (&lambda * &lambda - &self.x * 2i64).mod_floor(p);
        let y3 = (&lambda * (&self.x - &x3) - &self.y).mod_floor(p);
        Point { x: x3, y: y3 }
    }

    /// n·G for the curve base point G. The scalar is reduced mod q; a zero
    /// scalar yields the identity.
    pub fn scalar_base_mult(curve: &Curve, n: &BigInt) -> Point {
        Point {
            x: curve.gx.clone(),
            y: curve.gy.clone(),
        }
        .scalar_mult(curve, n)
    }

    /// n·P by double-and-add over Jacobian coordinates. The scalar is
    /// reduced mod q; a zero scalar or identity input yields the identity.
    pub fn scalar_mult(&self, curve: &Curve, n: &BigInt) -> Point {
        if self.is_zero() {
            return Point::infinity();
        }
        let k = n.mod_floor(&curve.q);
        if k.is_zero() {
            return Point::infinity();
        }
        let (_, bytes) = k.to_bytes_be();
        let mut acc = Jacobian::identity();
        for byte in bytes {
            for shift in (0..8).rev() {
                acc = curve.jacobian_double(&acc);
                if (byte >> shift) & 1 == 1 {
                    acc = curve.jacobian_add_affine(&acc, self);
                }
            }
        }
        curve.jacobian_to_affine(&acc)
    }

    /// Fixed-width serialisation: x || y, each big-endian and padded to the
    /// curve's coordinate width. 64 bytes for the 256-bit profile.
    pub fn bytes(&self, curve: &Curve) -> Vec<u8> {
        let mode = curve.mode();
        let mut raw = crate::util::pad(&self.x.to_bytes_be().1, mode);
        raw.extend_from_slice(&crate::util::pad(&self.y.to_bytes_be().1, mode));
        raw
    }

    /// Parses the fixed-width form produced by [`Point::bytes`]. Rejects
    /// inputs of the wrong length and coordinate pairs that are neither the
    /// identity nor on the curve.
    pub fn from_bytes(curve: &Curve, raw: &[u8]) -> Result<Point, Error> {
        let mode = curve.mode();
        if raw.len() != mode * 2 {
            return Err(Error::BadInputLength {
                got: raw.len(),
                want: mode * 2,
            });
        }
        let x = BigInt::from_bytes_be(Sign::Plus, &raw[..mode]);
        let y = BigInt::from_bytes_be(Sign::Plus, &raw[mode..]);
        let point = Point { x, y };
        if !point.is_zero() && !curve.is_on_curve(&point.x, &point.y) {
            return Err(Error::InvalidCurvePoint);
        }
        Ok(point)
    }

    /// Lowercase hex of [`Point::bytes`].
    pub fn hex(&self, curve: &Curve) -> String {
        hex::encode(self.bytes(curve))
    }

    /// Parses the hex form produced by [`Point::hex`].
    pub fn from_hex(curve: &Curve, s: &str) -> Result<Point, Error> {
        let raw = hex::decode(s).map_err(|_| Error::InvalidCurvePoint)?;
        Point::from_bytes(curve, &raw)
    }

    /// Whether the point satisfies the curve equation.
    pub fn is_on_curve(&self, curve: &Curve) -> bool {
        curve.is_on_curve(&self.x, &self.y)
    }
}

/// Hash-to-curve ("MapToGroup"): deterministically derives a curve point
/// from a seed string, so that no discrete logarithm relation to any other
/// generator is known.
///
/// For i = 0, 1, …, 255 the candidate abscissa is the context digest of
/// `decimal(i) || seed`, reduced to a scalar and then mod p; the point is
/// accepted once x³ + a·x + b is a quadratic residue and the resulting pair
/// lies on the curve. Fails with [`Error::InvalidCurvePoint`] after 256
/// attempts.
pub fn map_to_group(ctx: &Context, seed: &str) -> Result<Point, Error> {
    let curve = &ctx.curve;
    for i in 0..256u32 {
        let mut msg = i.to_string().into_bytes();
        msg.extend_from_slice(seed.as_bytes());
        let x = ctx.hash_to_int(&msg).mod_floor(&curve.p);
        let fx = curve.equation_rhs(&x);
        if let Some(y) = curve.mod_sqrt(&fx) {
            let point = Point { x, y };
            if point.is_on_curve(curve) && !point.is_zero() {
                return Ok(point);
            }
        }
    }
    Err(Error::InvalidCurvePoint)
}

/// The curve base point G.
pub fn generator_g(curve: &Curve) -> Point {
    Point {
        x: curve.gx.clone(),
        y: curve.gy.clone(),
    }
}

/// The NUMS companion generator H, derived by hashing the lowercase hex of
/// the base point's serialised form onto the curve.
pub fn generator_h(ctx: &Context) -> Result<Point, Error> {
    let g = generator_g(&ctx.curve);
    map_to_group(ctx, &g.hex(&ctx.curve))
}

/// A generator derived from an arbitrary seed via [`map_to_group`] over the
/// seed's lowercase hex form.
pub fn new_generator(ctx: &Context, seed: &[u8]) -> Result<Point, Error> {
    map_to_group(ctx, &hex::encode(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HashAlgorithm;
    use num_bigint::BigInt;

    fn ctx() -> Context {
        Context::new(
            Curve::gost_r3410_2001_crypto_pro_a(),
            HashAlgorithm::Streebog256,
        )
    }

    #[test]
    fn base_point_is_on_curve() {
        let curve = Curve::gost_r3410_2001_crypto_pro_a();
        assert!(curve.is_on_curve(&curve.gx, &curve.gy));
    }

    #[test]
    fn new_rejects_base_point_off_curve() {
        let c = Curve::gost_r3410_2001_crypto_pro_a();
        assert!(Curve::new(c.p, c.q, c.a, c.b, c.gx, c.gy + 1, c.bit_size).is_err());
    }

    #[test]
    fn addition_matches_scalar_mult() {
        let curve = Curve::gost_r3410_2001_crypto_pro_a();
        let g = generator_g(&curve);
        let two_g = g.add(&curve, &g);
        assert_eq!(two_g, Point::scalar_base_mult(&curve, &BigInt::from(2)));
        let three_g = two_g.add(&curve, &g);
        assert_eq!(three_g, Point::scalar_base_mult(&curve, &BigInt::from(3)));
        assert!(three_g.is_on_curve(&curve));
    }

    #[test]
    fn negation_cancels() {
        let curve = Curve::gost_r3410_2001_crypto_pro_a();
        let p = Point::scalar_base_mult(&curve, &BigInt::from(7));
        let sum = p.add(&curve, &p.neg(&curve));
        assert!(sum.is_zero());
    }

    #[test]
    fn scalar_mult_reduces_mod_order() {
        let curve = Curve::gost_r3410_2001_crypto_pro_a();
        let n = &curve.q + 5;
        assert_eq!(
            Point::scalar_base_mult(&curve, &n),
            Point::scalar_base_mult(&curve, &BigInt::from(5)),
        );
        assert!(Point::scalar_base_mult(&curve, &curve.q.clone()).is_zero());
    }

    #[test]
    fn infinity_is_neutral() {
        let curve = Curve::gost_r3410_2001_crypto_pro_a();
        let g = generator_g(&curve);
        assert_eq!(g.add(&curve, &Point::infinity()), g);
        assert_eq!(Point::infinity().add(&curve, &g), g);
        assert!(Point::infinity().scalar_mult(&curve, &BigInt::from(9)).is_zero());
    }

    #[test]
    fn map_to_group_is_deterministic() {
        let ctx = ctx();
        let a = map_to_group(&ctx, "some seed").unwrap();
        let b = map_to_group(&ctx, "some seed").unwrap();
        assert_eq!(a, b);
        assert!(a.is_on_curve(&ctx.curve));
        let c = map_to_group(&ctx, "another seed").unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn bytes_round_trip() {
        let ctx = ctx();
        let p = Point::scalar_base_mult(&ctx.curve, &BigInt::from(42));
        let raw = p.bytes(&ctx.curve);
        assert_eq!(raw.len(), 64);
        assert_eq!(Point::from_bytes(&ctx.curve, &raw).unwrap(), p);
        assert_eq!(Point::from_hex(&ctx.curve, &p.hex(&ctx.curve)).unwrap(), p);
    }

    #[test]
    fn from_bytes_rejects_bad_input() {
        let ctx = ctx();
        assert!(matches!(
            Point::from_bytes(&ctx.curve, &[0u8; 63]),
            Err(Error::BadInputLength { .. })
        ));
        let mut raw = Point::scalar_base_mult(&ctx.curve, &BigInt::from(42)).bytes(&ctx.curve);
        raw[10] ^= 1;
        assert_eq!(
            Point::from_bytes(&ctx.curve, &raw),
            Err(Error::InvalidCurvePoint)
        );
    }

    #[test]
    fn generator_h_has_no_known_relation_to_g() {
        let ctx = ctx();
        let h = generator_h(&ctx).unwrap();
        assert!(h.is_on_curve(&ctx.curve));
        assert_ne!(h, generator_g(&ctx.curve));
    }
}
