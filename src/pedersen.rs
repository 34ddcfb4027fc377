//! Pedersen commitments with homomorphic sum and difference, plus the
//! matching arithmetic on raw blinding factors.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::curve::Point;
use crate::errors::Error;
use crate::util;

/// A Pedersen commitment C = value·H + blind·G, hiding and binding, with H
/// a NUMS generator (see [`crate::curve::generator_h`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment(pub Point);

impl Commitment {
    /// Commits to `value` under the blinding factor `blind`, over the
    /// generator pair (h, g).
    pub fn new(ctx: &Context, value: u64, blind: &[u8], h: &Point, g: &Point) -> Commitment {
        let curve = &ctx.curve;
        let v = BigInt::from(value);
        let b = BigInt::from_bytes_be(Sign::Plus, blind);
        let vh = h.scalar_mult(curve, &v);
        let bg = g.scalar_mult(curve, &b);
        Commitment(vh.add(curve, &bg))
    }

    /// Σ positive − Σ negative, by successive point additions and negations.
    pub fn sum(ctx: &Context, positive: &[Commitment], negative: &[Commitment]) -> Commitment {
        let curve = &ctx.curve;
        let mut acc = Point::infinity();
        for c in positive {
            acc = acc.add(curve, &c.0);
        }
        for c in negative {
            acc = acc.add(curve, &c.0.neg(curve));
        }
        Commitment(acc)
    }

    /// Lowercase hex of the commitment point.
    pub fn hex(&self, ctx: &Context) -> String {
        self.0.hex(&ctx.curve)
    }

    /// Parses the hex form produced by [`Commitment::hex`], rejecting
    /// off-curve points.
    pub fn from_hex(ctx: &Context, s: &str) -> Result<Commitment, Error> {
        Ok(Commitment(Point::from_hex(&ctx.curve, s)?))
    }
}

/// Σ positive − Σ negative over raw blinding factors, reduced mod q and
/// padded to the curve's scalar width. The result opens the commitment
/// produced by the matching [`Commitment::sum`].
pub fn blind_sum(ctx: &Context, positive: &[&[u8]], negative: &[&[u8]]) -> Vec<u8> {
    let q = &ctx.curve.q;
    let mut acc = BigInt::from(0);
    for blind in positive {
        acc = (acc + BigInt::from_bytes_be(Sign::Plus, blind)).mod_floor(q);
    }
    for blind in negative {
        acc = (acc - BigInt::from_bytes_be(Sign::Plus, blind)).mod_floor(q);
    }
    util::pad(&acc.to_bytes_be().1, ctx.curve.mode())
}
