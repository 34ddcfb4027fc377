//! The inner-product argument: a proof of knowledge of vectors a, b with
//! ⟨a, b⟩ = c, with communication logarithmic in the vector length.
//!
//! The statement is folded in half each round. With n′ = n/2 the prover
//! sends
//!
//! ```text
//! L = g[n′:]^a[:n′] · h[:n′]^b[n′:] · U^⟨a[:n′], b[n′:]⟩
//! R = g[:n′]^a[n′:] · h[n′:]^b[:n′] · U^⟨a[n′:], b[:n′]⟩
//! ```
//!
//! derives the challenge x from (L, R), and continues on the folded
//! generators g′ = g[:n′]^x⁻¹ ∘ g[n′:]^x, h′ = h[:n′]^x ∘ h[n′:]^x⁻¹,
//! vectors a′ = a[:n′]·x + a[n′:]·x⁻¹, b′ = b[:n′]·x⁻¹ + b[n′:]·x, and
//! commitment P′ = L^x² · P · R^x⁻². The verifier replays the same folding
//! from the recorded (Lᵢ, Rᵢ) pairs.

#![allow(non_snake_case)]

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::curve::Point;
use crate::errors::Error;
use crate::transcript::{hash_bp, hash_ip};
use crate::util::{
    inner_product, mod_inverse, vector_add, vector_ec_add, vector_exp, vector_scalar_exp,
    vector_scalar_mul,
};

/// Public parameters of one inner-product statement: the generator vectors,
/// the binding generator U, the claimed product c, and the augmented
/// commitment P̂ the folding starts from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerProductParams {
    /// Vector length; a power of two.
    pub n: u64,
    /// The claimed inner product ⟨a, b⟩.
    pub c: BigInt,
    /// Binding generator scaled into the commitment.
    pub U: Point,
    /// Companion generator carried for the parent range-proof statement.
    pub H: Point,
    /// Generators for a.
    pub G_vec: Vec<Point>,
    /// Generators for b.
    pub H_vec: Vec<Point>,
    /// The augmented commitment P + U^(x·c) the folding starts from.
    pub P: Point,
}

impl InnerProductParams {
    /// Assembles the statement parameters. The augmented commitment is
    /// filled in by the prover.
    pub fn new(
        n: u64,
        c: BigInt,
        u: Point,
        h: Point,
        g_vec: Vec<Point>,
        h_vec: Vec<Point>,
    ) -> Result<InnerProductParams, Error> {
        if n == 0 {
            return Err(Error::BadRange("vector length must be positive"));
        }
        if g_vec.len() != h_vec.len() || g_vec.len() != n as usize {
            return Err(Error::VectorLengthMismatch {
                left: g_vec.len(),
                right: h_vec.len(),
            });
        }
        Ok(InnerProductParams {
            n,
            c,
            U: u,
            H: h,
            G_vec: g_vec,
            H_vec: h_vec,
            P: Point::infinity(),
        })
    }
}

/// An inner-product proof: log₂(n) folding pairs (Lᵢ, Rᵢ), the two final
/// scalars, and the fully folded generators and commitment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerProductProof {
    /// Original vector length.
    pub n: u64,
    /// Left folding commitments, outermost first.
    pub L_vec: Vec<Point>,
    /// Right folding commitments, outermost first.
    pub R_vec: Vec<Point>,
    /// The x-scaled binding generator U^x.
    pub U: Point,
    /// The fully folded commitment.
    pub P: Point,
    /// The fully folded generator for a.
    pub G: Point,
    /// The fully folded generator for b.
    pub H: Point,
    /// Final scalar of the a vector.
    pub a: BigInt,
    /// Final scalar of the b vector.
    pub b: BigInt,
    /// The statement this proof was created for.
    pub params: InnerProductParams,
}

impl InnerProductProof {
    /// Creates an inner-product proof for vectors a, b whose inner product
    /// is `params.c`, against the commitment P = g^a · h^b.
    pub fn create(
        ctx: &Context,
        a: &[BigInt],
        b: &[BigInt],
        P: &Point,
        mut params: InnerProductParams,
    ) -> Result<InnerProductProof, Error> {
        if a.len() != b.len() {
            return Err(Error::VectorLengthMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
        if a.len() != params.n as usize || !a.len().is_power_of_two() {
            return Err(Error::BadRange("vector length is not a power of two"));
        }
        let curve = &ctx.curve;
        let q = &curve.q;

        // x = H(g, h, P, c) binds the claimed product into the commitment:
        // P̂ = P · U^(x·c), with U^x the generator the folded cross terms
        // land on.
        let x = hash_ip(ctx, &params.G_vec, &params.H_vec, P, &params.c)?;
        let U_x = params.U.scalar_mult(curve, &x);
        let P_hat = P.add(curve, &U_x.scalar_mult(curve, &params.c));
        params.P = P_hat.clone();

        let mut g = params.G_vec.clone();
        let mut h = params.H_vec.clone();
        let mut a = a.to_vec();
        let mut b = b.to_vec();
        let mut p = P_hat;
        let mut L_vec = Vec::new();
        let mut R_vec = Vec::new();

        let mut n = a.len();
        while n > 1 {
            let np = n / 2;

            let c_L = inner_product(q, &a[..np], &b[np..])?;
            let c_R = inner_product(q, &a[np..], &b[..np])?;

            let L = vector_exp(curve, &g[np..], &a[..np])?
                .add(curve, &vector_exp(curve, &h[..np], &b[np..])?)
                .add(curve, &U_x.scalar_mult(curve, &c_L));
            let R = vector_exp(curve, &g[..np], &a[np..])?
                .add(curve, &vector_exp(curve, &h[np..], &b[..np])?)
                .add(curve, &U_x.scalar_mult(curve, &c_R));

            let (x_i, _) = hash_bp(ctx, &L, &R);
            let x_inv = mod_inverse(&x_i, q)?;

            g = vector_ec_add(
                curve,
                &vector_scalar_exp(curve, &g[..np], &x_inv),
                &vector_scalar_exp(curve, &g[np..], &x_i),
            )?;
            h = vector_ec_add(
                curve,
                &vector_scalar_exp(curve, &h[..np], &x_i),
                &vector_scalar_exp(curve, &h[np..], &x_inv),
            )?;

            let x_sq = (&x_i * &x_i).mod_floor(q);
            let x_sq_inv = mod_inverse(&x_sq, q)?;
            p = L
                .scalar_mult(curve, &x_sq)
                .add(curve, &p)
                .add(curve, &R.scalar_mult(curve, &x_sq_inv));

            a = vector_add(
                q,
                &vector_scalar_mul(q, &a[..np], &x_i),
                &vector_scalar_mul(q, &a[np..], &x_inv),
            )?;
            b = vector_add(
                q,
                &vector_scalar_mul(q, &b[..np], &x_inv),
                &vector_scalar_mul(q, &b[np..], &x_i),
            )?;

            L_vec.push(L);
            R_vec.push(R);
            n = np;
        }

        Ok(InnerProductProof {
            n: params.n,
            L_vec,
            R_vec,
            U: U_x,
            P: p,
            G: g.swap_remove(0),
            H: h.swap_remove(0),
            a: a.swap_remove(0),
            b: b.swap_remove(0),
            params,
        })
    }

    /// Verifies the proof against its embedded statement parameters.
    pub fn verify(&self, ctx: &Context) -> Result<bool, Error> {
        self.verify_with_params(ctx, &self.params)
    }

    /// Verifies the proof against externally supplied statement parameters,
    /// replaying the generator folding from the recorded (Lᵢ, Rᵢ) pairs and
    /// checking Ĝ^a · Ĥ^b · U^(a·b) against the folded commitment.
    pub(crate) fn verify_with_params(
        &self,
        ctx: &Context,
        params: &InnerProductParams,
    ) -> Result<bool, Error> {
        self.validate(ctx, params)?;
        let curve = &ctx.curve;
        let q = &curve.q;

        let mut g = params.G_vec.clone();
        let mut h = params.H_vec.clone();
        let mut p = params.P.clone();

        let mut np = self.n as usize;
        for (L, R) in self.L_vec.iter().zip(&self.R_vec) {
            np /= 2;
            let (x_i, _) = hash_bp(ctx, L, R);
            let x_inv = mod_inverse(&x_i, q)?;

            g = vector_ec_add(
                curve,
                &vector_scalar_exp(curve, &g[..np], &x_inv),
                &vector_scalar_exp(curve, &g[np..], &x_i),
            )?;
            h = vector_ec_add(
                curve,
                &vector_scalar_exp(curve, &h[..np], &x_i),
                &vector_scalar_exp(curve, &h[np..], &x_inv),
            )?;

            let x_sq = (&x_i * &x_i).mod_floor(q);
            let x_sq_inv = mod_inverse(&x_sq, q)?;
            p = p
                .add(curve, &L.scalar_mult(curve, &x_sq))
                .add(curve, &R.scalar_mult(curve, &x_sq_inv));
        }

        let ab = (&self.a * &self.b).mod_floor(q);
        let rhs = g[0]
            .scalar_mult(curve, &self.a)
            .add(curve, &h[0].scalar_mult(curve, &self.b))
            .add(curve, &self.U.scalar_mult(curve, &ab));
        Ok(rhs == p)
    }

    /// Structural checks: consistent lengths, scalars in [0, q), points on
    /// the curve.
    fn validate(&self, ctx: &Context, params: &InnerProductParams) -> Result<(), Error> {
        let curve = &ctx.curve;
        let q = &curve.q;
        let n = self.n as usize;

        if self.n != params.n || n == 0 || !n.is_power_of_two() {
            return Err(Error::ProofStructurallyInvalid);
        }
        let lg_n = self.L_vec.len();
        if lg_n > 32 || n != 1usize << lg_n || self.R_vec.len() != lg_n {
            return Err(Error::ProofStructurallyInvalid);
        }
        if params.G_vec.len() != n || params.H_vec.len() != n {
            return Err(Error::ProofStructurallyInvalid);
        }
        for scalar in [&self.a, &self.b, &params.c] {
            if scalar < &BigInt::zero() || scalar >= q {
                return Err(Error::ProofStructurallyInvalid);
            }
        }
        for point in self.L_vec.iter().chain(&self.R_vec).chain([&self.U]) {
            if !point.is_zero() && !point.is_on_curve(curve) {
                return Err(Error::ProofStructurallyInvalid);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HashAlgorithm;
    use crate::curve::{map_to_group, Curve};
    use crate::generators;

    fn ctx() -> Context {
        Context::new(
            Curve::gost_r3410_2001_crypto_pro_a(),
            HashAlgorithm::Streebog256,
        )
    }

    fn statement(
        ctx: &Context,
        a: &[BigInt],
        b: &[BigInt],
    ) -> (InnerProductParams, Point) {
        let n = a.len() as u64;
        let mut g_vec = Vec::new();
        let mut h_vec = Vec::new();
        for i in 0..n {
            g_vec.push(map_to_group(ctx, &format!("ipp test g{i}")).unwrap());
            h_vec.push(map_to_group(ctx, &format!("ipp test h{i}")).unwrap());
        }
        let u = map_to_group(ctx, generators::SEEDU).unwrap();
        let h = map_to_group(ctx, generators::SEEDH).unwrap();
        let c = inner_product(&ctx.curve.q, a, b).unwrap();
        let commit = vector_exp(&ctx.curve, &g_vec, a)
            .unwrap()
            .add(&ctx.curve, &vector_exp(&ctx.curve, &h_vec, b).unwrap());
        let params = InnerProductParams::new(n, c, u, h, g_vec, h_vec).unwrap();
        (params, commit)
    }

    #[test]
    fn proves_and_verifies_small_statement() {
        let ctx = ctx();
        let a: Vec<BigInt> = [3u64, 5, 7, 11].iter().map(|&v| BigInt::from(v)).collect();
        let b: Vec<BigInt> = [2u64, 4, 6, 8].iter().map(|&v| BigInt::from(v)).collect();
        let (params, commit) = statement(&ctx, &a, &b);
        let proof = InnerProductProof::create(&ctx, &a, &b, &commit, params).unwrap();
        assert_eq!(proof.L_vec.len(), 2);
        assert!(proof.verify(&ctx).unwrap());
    }

    #[test]
    fn rejects_wrong_product() {
        let ctx = ctx();
        let a: Vec<BigInt> = [3u64, 5].iter().map(|&v| BigInt::from(v)).collect();
        let b: Vec<BigInt> = [2u64, 4].iter().map(|&v| BigInt::from(v)).collect();
        let (params, commit) = statement(&ctx, &a, &b);
        let mut proof = InnerProductProof::create(&ctx, &a, &b, &commit, params).unwrap();
        proof.a += 1;
        assert!(!proof.verify(&ctx).unwrap());
    }

    #[test]
    fn rejects_structural_damage() {
        let ctx = ctx();
        let a: Vec<BigInt> = [3u64, 5].iter().map(|&v| BigInt::from(v)).collect();
        let b: Vec<BigInt> = [2u64, 4].iter().map(|&v| BigInt::from(v)).collect();
        let (params, commit) = statement(&ctx, &a, &b);
        let mut proof = InnerProductProof::create(&ctx, &a, &b, &commit, params).unwrap();
        proof.L_vec.pop();
        assert_eq!(
            proof.verify(&ctx),
            Err(Error::ProofStructurallyInvalid)
        );
    }
}
