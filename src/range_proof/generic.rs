//! Range proofs over an arbitrary interval [A, B).
//!
//! The interval statement is split into two power-of-two sub-statements
//! over the smallest supported width 2ᴺ ≥ B − A: x − A ∈ [0, 2ᴺ) bounds x
//! from below, and x − B + 2ᴺ ∈ [0, 2ᴺ) bounds it from above. The combined
//! proof verifies iff both sub-proofs verify.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::errors::Error;
use crate::generators::{setup, BulletproofParams};
use crate::range_proof::RangeProof;

/// Public parameters for proofs over [A, B).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericRangeParams {
    /// Inclusive interval start.
    pub a: i64,
    /// Exclusive interval end.
    pub b: i64,
    /// The power-of-two width 2ᴺ the sub-statements run over.
    pub max: u64,
    /// Parameters of the lower-bound sub-proof.
    pub bp1: BulletproofParams,
    /// Parameters of the upper-bound sub-proof.
    pub bp2: BulletproofParams,
}

impl GenericRangeParams {
    /// Derives parameters for the interval [a, b). The width b − a must fit
    /// in the largest supported range, 2³².
    pub fn setup(ctx: &Context, a: i64, b: i64) -> Result<GenericRangeParams, Error> {
        if b <= a {
            return Err(Error::BadRange("interval end must exceed its start"));
        }
        let width = i128::from(b) - i128::from(a);
        let n = [1u32, 2, 4, 8, 16, 32]
            .into_iter()
            .find(|n| width <= 1i128 << n)
            .ok_or(Error::BadRange("interval is wider than 2^32"))?;
        let max = 1u64 << n;
        Ok(GenericRangeParams {
            a,
            b,
            max,
            bp1: setup(ctx, max)?,
            bp2: setup(ctx, max)?,
        })
    }
}

/// A proof that a committed value lies in [A, B): two Bulletproofs over the
/// shifted sub-statements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericRangeProof {
    /// Proof that x − A ∈ [0, 2ᴺ).
    pub p1: RangeProof,
    /// Proof that x − B + 2ᴺ ∈ [0, 2ᴺ).
    pub p2: RangeProof,
}

impl GenericRangeProof {
    /// Proves that `secret` lies in the interval of `params`. As with the
    /// power-of-two prover, out-of-interval secrets yield a proof that
    /// fails verification.
    pub fn prove(
        ctx: &Context,
        secret: &BigInt,
        params: &GenericRangeParams,
    ) -> Result<GenericRangeProof, Error> {
        let lower = secret - params.a;
        let upper = secret - params.b + BigInt::from(params.max);
        Ok(GenericRangeProof {
            p1: RangeProof::prove(ctx, &lower, &params.bp1)?,
            p2: RangeProof::prove(ctx, &upper, &params.bp2)?,
        })
    }

    /// Verifies both sub-proofs.
    pub fn verify(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.p1.verify(ctx)? && self.p2.verify(ctx)?)
    }
}
