//! Fiat–Shamir challenge derivation.
//!
//! Two constructions are used across the proofs, and both must produce the
//! same bytes on the prover and verifier side:
//!
//! * [`hash_bp`] digests the decimal coordinates of two transcript points
//!   into a pair of challenges;
//! * [`hash_ip`] binds the inner-product statement (generators, commitment
//!   and claimed product) into a single challenge.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;

use crate::context::Context;
use crate::curve::Point;
use crate::errors::Error;

/// Two challenges from the pair of transcript points (P₁, P₂).
///
/// The first challenge digests `decimal(P₁.x) ‖ decimal(P₁.y) ‖
/// decimal(P₂.x) ‖ decimal(P₂.y)`; the second digests the same buffer
/// extended with the decimal form of the first digest, so the two are
/// independent. Both are reduced mod q.
pub(crate) fn hash_bp(ctx: &Context, p1: &Point, p2: &Point) -> (BigInt, BigInt) {
    let mut buf = String::new();
    buf.push_str(&p1.x.to_str_radix(10));
    buf.push_str(&p1.y.to_str_radix(10));
    buf.push_str(&p2.x.to_str_radix(10));
    buf.push_str(&p2.y.to_str_radix(10));

    let digest1 = ctx.digest(&[buf.as_bytes()]);
    let raw1 = BigInt::from_bytes_be(Sign::Plus, &digest1);

    buf.push_str(&raw1.to_str_radix(10));
    let digest2 = ctx.digest(&[buf.as_bytes()]);
    let raw2 = BigInt::from_bytes_be(Sign::Plus, &digest2);

    let q = &ctx.curve.q;
    (raw1.mod_floor(q), raw2.mod_floor(q))
}

/// The inner-product challenge: digests P, every (gᵢ, hᵢ) generator pair in
/// order, and the decimal form of the claimed product c. Reduced mod q.
pub(crate) fn hash_ip(
    ctx: &Context,
    g: &[Point],
    h: &[Point],
    p: &Point,
    c: &BigInt,
) -> Result<BigInt, Error> {
    if g.len() != h.len() {
        return Err(Error::VectorLengthMismatch {
            left: g.len(),
            right: h.len(),
        });
    }
    let curve = &ctx.curve;
    let mut hasher = ctx.hash.hasher();
    hasher.update(&p.bytes(curve));
    for (gi, hi) in g.iter().zip(h) {
        hasher.update(&gi.bytes(curve));
        hasher.update(&hi.bytes(curve));
    }
    hasher.update(c.to_str_radix(10).as_bytes());
    let digest = hasher.finalize_reset();
    Ok(BigInt::from_bytes_be(Sign::Plus, &digest).mod_floor(&curve.q))
}
