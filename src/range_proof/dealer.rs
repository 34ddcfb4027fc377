//! Dealer state for the aggregated proving protocol.
//!
//! The dealer is itself a party (it runs round 1 like everyone else) and
//! additionally owns the proof witness: after collecting every round-1
//! [`NonceCommitment`] it computes the aggregate transcript, broadcasts it,
//! produces the inner-product proof, and finally folds the collected τₓ
//! shares into one verifiable [`RangeProof`].

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

use crate::context::Context;
use crate::curve::Point;
use crate::errors::Error;
use crate::generators::BulletproofParams;
use crate::inner_product_proof::InnerProductProof;
use crate::transcript::hash_bp;
use crate::util;

use super::messages::{NonceCommitment, TauxShare, TranscriptCommitments};
use super::party::PartyAwaitingTranscript;
use super::{commit_to_bits, prove_final, RangeProof};

/// Entry point for the dealer of the aggregated proving protocol.
pub struct Dealer;

impl Dealer {
    /// Round 2, dealer side.
    ///
    /// `session` is the dealer's own round-1 state and `nonce_commitments`
    /// the round-1 messages of *every* party, the dealer's included. The
    /// aggregate value commitment is V = Σⱼ V⁽ʲ⁾ and the polynomial
    /// commitments fold every party's blinding share:
    /// T₁ = Commit(t₁, 0) + Σⱼ T₁⁽ʲ⁾, likewise for T₂.
    ///
    /// Returns the dealer state awaiting τₓ shares, the transcript broadcast
    /// for the other parties, and the dealer's own τₓ share.
    #[allow(non_snake_case)]
    pub fn prove(
        ctx: &Context,
        params: &BulletproofParams,
        session: PartyAwaitingTranscript,
        nonce_commitments: &[NonceCommitment],
    ) -> Result<(DealerAwaitingTauxShares, TranscriptCommitments, TauxShare), Error> {
        let curve = &ctx.curve;
        let q = &curve.q;

        let witness = commit_to_bits(ctx, params, &session.value)?;

        let mut V = Point::infinity();
        let mut T_1 = util::commit(curve, &witness.t_1, &BigInt::zero(), &params.H);
        let mut T_2 = util::commit(curve, &witness.t_2, &BigInt::zero(), &params.H);
        for share in nonce_commitments {
            V = V.add(curve, &share.V_j);
            T_1 = T_1.add(curve, &share.T_1_j);
            T_2 = T_2.add(curve, &share.T_2_j);
        }

        let broadcast = TranscriptCommitments {
            A: witness.A.clone(),
            S: witness.S.clone(),
            T_1: T_1.clone(),
            T_2: T_2.clone(),
        };

        let (x, _) = hash_bp(ctx, &T_1, &T_2);
        let z_sq = (&witness.z * &witness.z).mod_floor(q);
        let own_share = TauxShare {
            tau_x_j: (&session.tau_2 * &x * &x + &session.tau_1 * &x + z_sq * &session.blinding)
                .mod_floor(q),
        };

        let body = prove_final(ctx, params, &witness, &x)?;

        let dealer = DealerAwaitingTauxShares {
            V,
            A: witness.A,
            S: witness.S,
            T_1,
            T_2,
            mu: body.mu,
            t_hat: body.t_hat,
            ipp_proof: body.ipp_proof,
            commit: body.commit,
            params: params.clone(),
        };
        Ok((dealer, broadcast, own_share))
    }
}

/// The dealer's state after the transcript broadcast: the complete proof
/// body minus the aggregate blinding scalar τₓ.
#[allow(non_snake_case)]
pub struct DealerAwaitingTauxShares {
    V: Point,
    A: Point,
    S: Point,
    T_1: Point,
    T_2: Point,
    mu: BigInt,
    t_hat: BigInt,
    ipp_proof: InnerProductProof,
    commit: Point,
    params: BulletproofParams,
}

impl DealerAwaitingTauxShares {
    /// Folds every party's τₓ share (the dealer's own included) into
    /// τₓ = Σⱼ τₓ⁽ʲ⁾ mod q and assembles the final proof. The sum is
    /// independent of the order the shares arrive in.
    pub fn assemble(self, ctx: &Context, tau_shares: &[TauxShare]) -> RangeProof {
        let q = &ctx.curve.q;
        let mut tau_x = BigInt::zero();
        for share in tau_shares {
            tau_x = (tau_x + &share.tau_x_j).mod_floor(q);
        }
        RangeProof {
            V: self.V,
            A: self.A,
            S: self.S,
            T_1: self.T_1,
            T_2: self.T_2,
            tau_x,
            mu: self.mu,
            t_hat: self.t_hat,
            ipp_proof: self.ipp_proof,
            commit: self.commit,
            params: self.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HashAlgorithm;
    use crate::curve::Curve;
    use crate::generators::{setup, MAX_RANGE_END};
    use crate::range_proof::party::Party;

    fn ctx() -> Context {
        Context::new(
            Curve::gost_r3410_2001_crypto_pro_a(),
            HashAlgorithm::Streebog256,
        )
    }

    #[test]
    fn dealer_and_two_parties_produce_verifiable_proof() {
        let ctx = ctx();
        let q = &ctx.curve.q;
        let params = setup(&ctx, MAX_RANGE_END).unwrap();

        let dealer_value = BigInt::from(300);
        let dealer_blind = util::random_scalar(q);
        let participant_blinds = [util::random_scalar(q), util::random_scalar(q)];

        // Round 1: every party, dealer included, publishes its commitments.
        let mut commitments = Vec::new();
        let mut participants = Vec::new();
        for blind in &participant_blinds {
            let (party, commitment) = Party::new(&ctx, &params, &BigInt::zero(), blind);
            participants.push(party);
            commitments.push(commitment);
        }
        let (dealer_session, dealer_commitment) =
            Party::new(&ctx, &params, &dealer_value, &dealer_blind);
        commitments.push(dealer_commitment);

        // Round 2: the dealer broadcasts the aggregate transcript and the
        // participants answer with their blinding shares.
        let (dealer, broadcast, dealer_share) =
            Dealer::prove(&ctx, &params, dealer_session, &commitments).unwrap();
        let mut shares = Vec::new();
        for party in participants {
            shares.push(party.tau_share(&ctx, &broadcast));
        }
        shares.push(dealer_share);

        let proof = dealer.assemble(&ctx, &shares);
        assert!(proof.verify(&ctx).unwrap());

        // The aggregate commitment opens to the dealer's value under the
        // summed blinding.
        let mut blind_sum = dealer_blind;
        for blind in &participant_blinds {
            blind_sum = (blind_sum + blind).mod_floor(q);
        }
        assert_eq!(
            proof.V,
            util::commit(&ctx.curve, &dealer_value, &blind_sum, &params.H)
        );
    }

    #[test]
    fn missing_share_breaks_the_proof() {
        let ctx = ctx();
        let q = &ctx.curve.q;
        let params = setup(&ctx, 1 << 8).unwrap();

        let (participant, participant_commitment) =
            Party::new(&ctx, &params, &BigInt::zero(), &util::random_scalar(q));
        let (dealer_session, dealer_commitment) =
            Party::new(&ctx, &params, &BigInt::from(42), &util::random_scalar(q));

        let commitments = vec![participant_commitment, dealer_commitment];
        let (dealer, broadcast, dealer_share) =
            Dealer::prove(&ctx, &params, dealer_session, &commitments).unwrap();
        let participant_share = participant.tau_share(&ctx, &broadcast);

        // Dropping the participant's share leaves τₓ unbalanced.
        let proof = dealer.assemble(&ctx, &[dealer_share]);
        assert!(!proof.verify(&ctx).unwrap());
        let _ = participant_share;
    }
}
