//! Deterministic public parameters for Bulletproof range proofs.
//!
//! Every generator is derived from a fixed ASCII seed by hash-to-curve, so
//! two setups over the same context and range end are bitwise identical and
//! no trusted setup is needed.

use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::curve::{generator_g, map_to_group, Point};
use crate::errors::Error;

/// Seed for the companion generator H and the per-bit generator vectors.
pub const SEEDH: &str = "BulletproofsDoesNotNeedTrustedSetupH";

/// Seed for the inner-product binding generator U.
pub const SEEDU: &str = "BulletproofsDoesNotNeedTrustedSetupU";

/// The largest supported range end, 2³².
pub const MAX_RANGE_END: u64 = 1 << 32;

/// Public parameters for proofs over [0, 2ᴺ): the base point G, the NUMS
/// companion H, N generator pairs (Gᵢ, Hᵢ) for the per-bit vector
/// commitments, and the inner-product generator U.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct BulletproofParams {
    /// Bit length of the range; a power of two, at most 32.
    pub n: u64,
    /// The curve base point.
    pub G: Point,
    /// Companion generator derived from SEEDH.
    pub H: Point,
    /// Per-bit generators G₀ … G_{N−1}.
    pub G_vec: Vec<Point>,
    /// Per-bit generators H₀ … H_{N−1}.
    pub H_vec: Vec<Point>,
    /// Inner-product binding generator derived from SEEDU.
    pub U: Point,
}

/// Derives the proof parameters for the range [0, `range_end`).
///
/// `range_end` must be a power of two 2ᴺ with N itself a power of two and
/// N ≤ 32, so N ∈ {1, 2, 4, 8, 16, 32}.
pub fn setup(ctx: &Context, range_end: u64) -> Result<BulletproofParams, Error> {
    if range_end == 0 || !range_end.is_power_of_two() {
        return Err(Error::BadRange("range end is not a power of two"));
    }
    let n = u64::from(range_end.trailing_zeros());
    if !n.is_power_of_two() {
        return Err(Error::BadRange("range bit length is not a power of two"));
    }
    if n > 32 {
        return Err(Error::BadRange("range end is greater than 2^32"));
    }

    let mut g_vec = Vec::with_capacity(n as usize);
    let mut h_vec = Vec::with_capacity(n as usize);
    for i in 0..n {
        g_vec.push(map_to_group(ctx, &format!("{SEEDH}g{i}"))?);
        h_vec.push(map_to_group(ctx, &format!("{SEEDH}h{i}"))?);
    }

    Ok(BulletproofParams {
        n,
        G: generator_g(&ctx.curve),
        H: map_to_group(ctx, SEEDH)?,
        G_vec: g_vec,
        H_vec: h_vec,
        U: map_to_group(ctx, SEEDU)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HashAlgorithm;
    use crate::curve::Curve;

    fn ctx() -> Context {
        Context::new(
            Curve::gost_r3410_2001_crypto_pro_a(),
            HashAlgorithm::Streebog256,
        )
    }

    #[test]
    fn setup_is_deterministic() {
        let ctx = ctx();
        let a = setup(&ctx, 1 << 16).unwrap();
        let b = setup(&ctx, 1 << 16).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.n, 16);
        assert_eq!(a.G_vec.len(), 16);
        assert_eq!(a.H_vec.len(), 16);
    }

    #[test]
    fn generators_are_distinct() {
        let ctx = ctx();
        let params = setup(&ctx, 1 << 4).unwrap();
        let mut all = params.G_vec.clone();
        all.extend(params.H_vec.clone());
        all.push(params.G.clone());
        all.push(params.H.clone());
        all.push(params.U.clone());
        for i in 0..all.len() {
            for j in i + 1..all.len() {
                assert_ne!(all[i], all[j]);
            }
        }
    }

    #[test]
    fn setup_rejects_bad_ranges() {
        let ctx = ctx();
        // Not a power of two.
        assert!(matches!(setup(&ctx, 3), Err(Error::BadRange(_))));
        // 2^8: the exponent 8 is a power of two, but 2^3 is rejected.
        assert!(setup(&ctx, 1 << 8).is_ok());
        assert!(matches!(setup(&ctx, 1 << 3), Err(Error::BadRange(_))));
        // 2^0 has bit length zero.
        assert!(matches!(setup(&ctx, 1), Err(Error::BadRange(_))));
        // Beyond 2^32 the exponent is no longer a power of two until 2^64,
        // which u64 cannot express; 2^33 is the representative failure.
        assert!(matches!(setup(&ctx, 1 << 33), Err(Error::BadRange(_))));
        assert!(setup(&ctx, MAX_RANGE_END).is_ok());
    }
}
