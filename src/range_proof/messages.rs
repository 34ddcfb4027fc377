//! Messages passed between the parties and the dealer in the two-round
//! aggregated proving protocol.
//!
//! Round 1 publishes one [`NonceCommitment`] per party. The dealer answers
//! with a single [`TranscriptCommitments`] broadcast, and round 2 collects
//! one [`TauxShare`] per party. No message carries secret material; the
//! protocol prescribes no transport.

#![allow(non_snake_case)]

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::curve::Point;

/// A party's round-1 message: commitments to its τ₁/τ₂ blinding nonces and
/// to its value share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceCommitment {
    /// T₁⁽ʲ⁾ = Commit(0, τ₁⁽ʲ⁾).
    pub T_1_j: Point,
    /// T₂⁽ʲ⁾ = Commit(0, τ₂⁽ʲ⁾).
    pub T_2_j: Point,
    /// V⁽ʲ⁾ = Commit(v_j, γ_j); zero-value parties contribute pure blinding.
    pub V_j: Point,
}

/// The dealer's broadcast fixing the Fiat–Shamir transcript: every party
/// recomputes (y, z) from (A, S) and x from (T₁, T₂) and necessarily arrives
/// at the same challenges.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptCommitments {
    /// The dealer's bit commitment.
    pub A: Point,
    /// The dealer's blinding-vector commitment.
    pub S: Point,
    /// Aggregated T₁ = Commit(t₁, 0) + Σⱼ T₁⁽ʲ⁾.
    pub T_1: Point,
    /// Aggregated T₂ = Commit(t₂, 0) + Σⱼ T₂⁽ʲ⁾.
    pub T_2: Point,
}

/// A party's round-2 message: its share of the aggregate blinding scalar,
/// τₓ⁽ʲ⁾ = τ₂⁽ʲ⁾·x² + τ₁⁽ʲ⁾·x + z²·γ_j mod q.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TauxShare {
    /// The published blinding share.
    pub tau_x_j: BigInt,
}
