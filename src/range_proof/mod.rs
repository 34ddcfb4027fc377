//! Zero-knowledge range proofs: a Bulletproof showing that the value inside
//! a Pedersen commitment lies in [0, 2ᴺ), without revealing the value.
//!
//! The range statement is reduced to a single inner-product argument. The
//! prover commits to the bit decomposition of the value (A), to per-bit
//! blinding vectors (S), and to the coefficients t₁, t₂ of the polynomial
//! t(X) induced by the reduction (T₁, T₂); the Fiat–Shamir challenges
//! (y, z) and x are derived from those commitments in that order, and any
//! reordering invalidates the proof. The verifier checks the polynomial
//! identity at x, the commitment identity over the shifted generators, and
//! the inner-product argument.

#![allow(non_snake_case)]

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::curve::{Curve, Point};
use crate::errors::Error;
use crate::generators::BulletproofParams;
use crate::inner_product_proof::{InnerProductParams, InnerProductProof};
use crate::transcript::{hash_bp, hash_ip};
use crate::util;

pub mod dealer;
pub mod generic;
pub mod messages;
pub mod party;

/// A proof that the value committed to by `V` lies in [0, 2ᴺ).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProof {
    /// Commitment to the value and its blinding factor.
    pub V: Point,
    /// Commitment to the bits of the value.
    pub A: Point,
    /// Commitment to the per-bit blinding vectors.
    pub S: Point,
    /// Commitment to the t₁ coefficient of t(X).
    pub T_1: Point,
    /// Commitment to the t₂ coefficient of t(X).
    pub T_2: Point,
    /// Blinding factor for the synthetic commitment to t(x).
    pub tau_x: BigInt,
    /// Blinding factor tying A and S into the commitment identity.
    pub mu: BigInt,
    /// Evaluation t(x) = ⟨bl, br⟩ at the challenge point.
    pub t_hat: BigInt,
    /// Proof data for the inner-product argument.
    pub ipp_proof: InnerProductProof,
    /// The inner-product commitment g^bl · h′^br.
    pub commit: Point,
    /// The public parameters the proof was created against.
    pub params: BulletproofParams,
}

/// Witness state after the first proving phase: the bit and blinding
/// commitments together with everything needed to evaluate the l and r
/// vectors once the challenge x is known.
pub(crate) struct BitWitness {
    pub(crate) A: Point,
    pub(crate) S: Point,
    pub(crate) y: BigInt,
    pub(crate) z: BigInt,
    pub(crate) t_1: BigInt,
    pub(crate) t_2: BigInt,
    a_l_minus_z: Vec<BigInt>,
    a_r_plus_z: Vec<BigInt>,
    s_L: Vec<BigInt>,
    s_R: Vec<BigInt>,
    y_powers: Vec<BigInt>,
    z_sq_2n: Vec<BigInt>,
    alpha: BigInt,
    rho: BigInt,
}

/// Everything the third phase produces once x is fixed.
pub(crate) struct ProofBody {
    pub(crate) t_hat: BigInt,
    pub(crate) mu: BigInt,
    pub(crate) ipp_proof: InnerProductProof,
    pub(crate) commit: Point,
}

/// First proving phase: bit decomposition, the commitments A and S, the
/// challenges (y, z) they induce, and the t(X) coefficients.
pub(crate) fn commit_to_bits(
    ctx: &Context,
    params: &BulletproofParams,
    secret: &BigInt,
) -> Result<BitWitness, Error> {
    let curve = &ctx.curve;
    let q = &curve.q;
    let n = params.n;

    // a_L holds the bits of the value; a_R replaces every 0 bit by −1.
    let a_L = util::decompose(secret, 2, n);
    let a_R: Vec<BigInt> = a_L.iter().map(|bit| bit - 1).collect();

    let alpha = util::random_scalar(q);
    let A = params
        .H
        .scalar_mult(curve, &alpha)
        .add(curve, &util::vector_exp(curve, &params.G_vec, &a_L)?)
        .add(curve, &util::vector_exp(curve, &params.H_vec, &a_R)?);

    let s_L: Vec<BigInt> = (0..n).map(|_| util::random_scalar(q)).collect();
    let s_R: Vec<BigInt> = (0..n).map(|_| util::random_scalar(q)).collect();
    let rho = util::random_scalar(q);
    let S = params
        .H
        .scalar_mult(curve, &rho)
        .add(curve, &util::vector_exp(curve, &params.G_vec, &s_L)?)
        .add(curve, &util::vector_exp(curve, &params.H_vec, &s_R)?);

    let (y, z) = hash_bp(ctx, &A, &S);

    let z_vec = vec![z.clone(); n as usize];
    let y_powers = util::powers_of(q, &y, n);
    let two_powers = util::powers_of(q, &BigInt::from(2), n);
    let z_sq = (&z * &z).mod_floor(q);
    let z_sq_2n = util::vector_scalar_mul(q, &two_powers, &z_sq);

    let a_l_minus_z = util::vector_sub(q, &a_L, &z_vec)?;
    let a_r_plus_z = util::vector_add(q, &a_R, &z_vec)?;

    // t₁ = ⟨a_L − z·1, yⁿ ∘ s_R⟩ + ⟨s_L, yⁿ ∘ (a_R + z·1) + z²·2ⁿ⟩,
    // t₂ = ⟨s_L, yⁿ ∘ s_R⟩; the constant term t₀ never leaves the witness.
    let yn_s_r = util::vector_mul(q, &y_powers, &s_R)?;
    let sp1 = util::inner_product(q, &a_l_minus_z, &yn_s_r)?;
    let yn_a_r = util::vector_mul(q, &y_powers, &a_r_plus_z)?;
    let sp2 = util::inner_product(q, &s_L, &util::vector_add(q, &yn_a_r, &z_sq_2n)?)?;
    let t_1 = (sp1 + sp2).mod_floor(q);
    let t_2 = util::inner_product(q, &s_L, &yn_s_r)?;

    Ok(BitWitness {
        A,
        S,
        y,
        z,
        t_1,
        t_2,
        a_l_minus_z,
        a_r_plus_z,
        s_L,
        s_R,
        y_powers,
        z_sq_2n,
        alpha,
        rho,
    })
}

/// Third proving phase: evaluate the committed vectors at x and run the
/// inner-product argument over the shifted generators.
pub(crate) fn prove_final(
    ctx: &Context,
    params: &BulletproofParams,
    witness: &BitWitness,
    x: &BigInt,
) -> Result<ProofBody, Error> {
    let curve = &ctx.curve;
    let q = &curve.q;

    let bl = util::vector_add(
        q,
        &witness.a_l_minus_z,
        &util::vector_scalar_mul(q, &witness.s_L, x),
    )?;
    let shifted = util::vector_add(
        q,
        &witness.a_r_plus_z,
        &util::vector_scalar_mul(q, &witness.s_R, x),
    )?;
    let br = util::vector_add(
        q,
        &util::vector_mul(q, &witness.y_powers, &shifted)?,
        &witness.z_sq_2n,
    )?;

    let t_hat = util::inner_product(q, &bl, &br)?;
    let mu = (&witness.alpha + &witness.rho * x).mod_floor(q);

    let h_prime = update_generators(curve, &params.H_vec, &witness.y)?;
    let commit = util::vector_exp(curve, &params.G_vec, &bl)?
        .add(curve, &util::vector_exp(curve, &h_prime, &br)?);

    let ip_params = InnerProductParams::new(
        params.n,
        t_hat.clone(),
        params.U.clone(),
        params.H.clone(),
        params.G_vec.clone(),
        h_prime,
    )?;
    let ipp_proof = InnerProductProof::create(ctx, &bl, &br, &commit, ip_params)?;

    Ok(ProofBody {
        t_hat,
        mu,
        ipp_proof,
        commit,
    })
}

/// The shifted generator vector (H₀, H₁·y⁻¹, …, H_{N−1}·y^{−(N−1)}).
///
/// H₀ is deliberately left unscaled; prover and verifier must agree on this
/// exact shape.
pub(crate) fn update_generators(
    curve: &Curve,
    h_vec: &[Point],
    y: &BigInt,
) -> Result<Vec<Point>, Error> {
    let q = &curve.q;
    let y_inv = util::mod_inverse(y, q)?;
    let mut h_prime = Vec::with_capacity(h_vec.len());
    let mut exp = y_inv.clone();
    for (i, h) in h_vec.iter().enumerate() {
        if i == 0 {
            h_prime.push(h.clone());
            continue;
        }
        h_prime.push(h.scalar_mult(curve, &exp));
        exp = (&exp * &y_inv).mod_floor(q);
    }
    Ok(h_prime)
}

/// δ(y, z) = (z − z²)·⟨1ⁿ, yⁿ⟩ − z³·⟨1ⁿ, 2ⁿ⟩ mod q.
pub(crate) fn delta(q: &BigInt, n: u64, y: &BigInt, z: &BigInt) -> BigInt {
    let z_sq = (z * z).mod_floor(q);
    let z_cu = (&z_sq * z).mod_floor(q);

    let mut sum_y = BigInt::zero();
    for p in util::powers_of(q, y, n) {
        sum_y = (sum_y + p).mod_floor(q);
    }
    // ⟨1ⁿ, 2ⁿ⟩ = 2ⁿ − 1.
    let sum_two = (BigInt::one() << n) - 1i64;

    let head = ((z - &z_sq).mod_floor(q) * sum_y).mod_floor(q);
    (head - (z_cu * sum_two).mod_floor(q)).mod_floor(q)
}

impl RangeProof {
    /// Proves that `secret` lies in [0, 2ᴺ) for the given parameters. The
    /// blinding factor of the value commitment is sampled internally; the
    /// resulting commitment is carried in the proof as `V`.
    ///
    /// Out-of-range secrets are not rejected here: the resulting proof
    /// simply fails verification.
    pub fn prove(
        ctx: &Context,
        secret: &BigInt,
        params: &BulletproofParams,
    ) -> Result<RangeProof, Error> {
        let curve = &ctx.curve;
        let q = &curve.q;

        let witness = commit_to_bits(ctx, params, secret)?;

        let gamma = util::random_scalar(q);
        let V = util::commit(curve, secret, &gamma, &params.H);

        let tau_1 = util::random_scalar(q);
        let tau_2 = util::random_scalar(q);
        let T_1 = util::commit(curve, &witness.t_1, &tau_1, &params.H);
        let T_2 = util::commit(curve, &witness.t_2, &tau_2, &params.H);

        let (x, _) = hash_bp(ctx, &T_1, &T_2);

        let z_sq = (&witness.z * &witness.z).mod_floor(q);
        let tau_x = (&tau_2 * &x * &x + &tau_1 * &x + &z_sq * &gamma).mod_floor(q);

        let body = prove_final(ctx, params, &witness, &x)?;

        Ok(RangeProof {
            V,
            A: witness.A,
            S: witness.S,
            T_1,
            T_2,
            tau_x,
            mu: body.mu,
            t_hat: body.t_hat,
            ipp_proof: body.ipp_proof,
            commit: body.commit,
            params: params.clone(),
        })
    }

    /// Verifies the proof. Structural damage is reported as an error; an
    /// honest cryptographic rejection comes back as `Ok(false)` without
    /// revealing which sub-check failed.
    pub fn verify(&self, ctx: &Context) -> Result<bool, Error> {
        self.validate(ctx)?;

        let curve = &ctx.curve;
        let q = &curve.q;
        let n = self.params.n;

        let (x, _) = hash_bp(ctx, &self.T_1, &self.T_2);
        let (y, z) = hash_bp(ctx, &self.A, &self.S);

        let h_prime = update_generators(curve, &self.params.H_vec, &y)?;

        let z_sq = (&z * &z).mod_floor(q);
        let x_sq = (&x * &x).mod_floor(q);

        // Polynomial identity at x: t̂·G + τₓ·H = z²·V + δ(y,z)·G + x·T₁ + x²·T₂.
        let lhs = util::commit(curve, &self.t_hat, &self.tau_x, &self.params.H);
        let rhs = self
            .V
            .scalar_mult(curve, &z_sq)
            .add(curve, &Point::scalar_base_mult(curve, &delta(q, n, &y, &z)))
            .add(curve, &self.T_1.scalar_mult(curve, &x))
            .add(curve, &self.T_2.scalar_mult(curve, &x_sq));
        let poly_ok = lhs == rhs;

        // Commitment identity: A + x·S + Σ Gᵢ^(−z) + Σ h′ᵢ^(z·yⁱ + z²·2ⁱ)
        // must equal μ·H + commit.
        let minus_z = (q - &z).mod_floor(q);
        let g_neg_z = util::vector_exp(curve, &self.params.G_vec, &vec![minus_z; n as usize])?;
        let y_powers = util::powers_of(q, &y, n);
        let two_powers = util::powers_of(q, &BigInt::from(2), n);
        let exponents = util::vector_add(
            q,
            &util::vector_scalar_mul(q, &y_powers, &z),
            &util::vector_scalar_mul(q, &two_powers, &z_sq),
        )?;
        let lp = self
            .A
            .add(curve, &self.S.scalar_mult(curve, &x))
            .add(curve, &g_neg_z)
            .add(curve, &util::vector_exp(curve, &h_prime, &exponents)?);
        let rp = self
            .params
            .H
            .scalar_mult(curve, &self.mu)
            .add(curve, &self.commit);
        let commit_ok = lp == rp;

        // Rebuild the inner-product statement from the proof's own
        // commitments; the embedded copy must agree with it.
        let mut ip_params = InnerProductParams::new(
            n,
            self.t_hat.clone(),
            self.params.U.clone(),
            self.params.H.clone(),
            self.params.G_vec.clone(),
            h_prime,
        )?;
        let x_ip = hash_ip(
            ctx,
            &ip_params.G_vec,
            &ip_params.H_vec,
            &self.commit,
            &self.t_hat,
        )?;
        let u_x = self.params.U.scalar_mult(curve, &x_ip);
        ip_params.P = self.commit.add(curve, &u_x.scalar_mult(curve, &self.t_hat));
        if self.ipp_proof.params != ip_params || self.ipp_proof.U != u_x {
            return Err(Error::ProofStructurallyInvalid);
        }
        let ipp_ok = self.ipp_proof.verify_with_params(ctx, &ip_params)?;

        Ok(poly_ok && commit_ok && ipp_ok)
    }

    /// Structural checks on lengths, scalar ranges, and point validity.
    fn validate(&self, ctx: &Context) -> Result<(), Error> {
        let curve = &ctx.curve;
        let q = &curve.q;
        let n = self.params.n;

        if n == 0 || !n.is_power_of_two() || n > 32 {
            return Err(Error::ProofStructurallyInvalid);
        }
        if self.params.G_vec.len() != n as usize || self.params.H_vec.len() != n as usize {
            return Err(Error::ProofStructurallyInvalid);
        }
        if self.ipp_proof.n != n {
            return Err(Error::ProofStructurallyInvalid);
        }
        for scalar in [&self.tau_x, &self.mu, &self.t_hat] {
            if scalar < &BigInt::zero() || scalar >= q {
                return Err(Error::ProofStructurallyInvalid);
            }
        }
        for point in [
            &self.V,
            &self.A,
            &self.S,
            &self.T_1,
            &self.T_2,
            &self.commit,
        ] {
            if !point.is_zero() && !point.is_on_curve(curve) {
                return Err(Error::ProofStructurallyInvalid);
            }
        }
        Ok(())
    }
}
