//! Per-party state for the aggregated proving protocol.
//!
//! Protocol steps are represented by types, and each transition consumes the
//! previous state, so a step cannot be repeated and retained nonces cannot
//! leak into a second session: τ₁ and τ₂ live only inside
//! [`PartyAwaitingTranscript`] and are wiped when it goes away.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

use crate::context::Context;
use crate::generators::BulletproofParams;
use crate::transcript::hash_bp;
use crate::util;

use super::messages::{NonceCommitment, TauxShare, TranscriptCommitments};

/// Entry point for one party of the aggregated proving protocol.
pub struct Party;

impl Party {
    /// Round 1: samples the τ₁/τ₂ nonces and produces the party's public
    /// [`NonceCommitment`].
    ///
    /// Zero-value parties pass `value = 0` and contribute only blinding;
    /// the dealer passes the value being proven. The sum of all parties'
    /// values must equal the dealer's witness, so only the dealer carries
    /// a non-zero value.
    pub fn new(
        ctx: &Context,
        params: &BulletproofParams,
        value: &BigInt,
        blinding: &BigInt,
    ) -> (PartyAwaitingTranscript, NonceCommitment) {
        let curve = &ctx.curve;
        let q = &curve.q;

        let tau_1 = util::random_scalar(q);
        let tau_2 = util::random_scalar(q);

        let commitment = NonceCommitment {
            T_1_j: util::commit(curve, &BigInt::zero(), &tau_1, &params.H),
            T_2_j: util::commit(curve, &BigInt::zero(), &tau_2, &params.H),
            V_j: util::commit(curve, value, blinding, &params.H),
        };

        let party = PartyAwaitingTranscript {
            tau_1,
            tau_2,
            value: value.clone(),
            blinding: blinding.clone(),
        };
        (party, commitment)
    }
}

/// A party that has published its round-1 commitments and is waiting for the
/// dealer's transcript broadcast. Holds the session secrets.
pub struct PartyAwaitingTranscript {
    pub(super) tau_1: BigInt,
    pub(super) tau_2: BigInt,
    pub(super) value: BigInt,
    pub(super) blinding: BigInt,
}

impl PartyAwaitingTranscript {
    /// Round 2: recomputes the challenges from the dealer's broadcast and
    /// publishes this party's blinding share
    /// τₓ⁽ʲ⁾ = τ₂⁽ʲ⁾·x² + τ₁⁽ʲ⁾·x + z²·γ_j mod q.
    ///
    /// Consumes the session; the retained nonces are wiped on drop.
    pub fn tau_share(self, ctx: &Context, commitments: &TranscriptCommitments) -> TauxShare {
        let q = &ctx.curve.q;
        let (_, z) = hash_bp(ctx, &commitments.A, &commitments.S);
        let (x, _) = hash_bp(ctx, &commitments.T_1, &commitments.T_2);
        let z_sq = (&z * &z).mod_floor(q);
        let tau_x_j =
            (&self.tau_2 * &x * &x + &self.tau_1 * &x + z_sq * &self.blinding).mod_floor(q);
        TauxShare { tau_x_j }
    }
}

impl Drop for PartyAwaitingTranscript {
    fn drop(&mut self) {
        self.tau_1 = BigInt::zero();
        self.tau_2 = BigInt::zero();
        self.value = BigInt::zero();
        self.blinding = BigInt::zero();
    }
}
