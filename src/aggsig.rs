//! Aggregate GOST R 34.10 signatures.
//!
//! Each of n signers holds a private key d_i and a secret nonce k_i with
//! public nonce R_i = k_i·G. With R = Σ R_i and r = R.x mod q, signer i
//! produces the partial signature s_i = d_i·r + k_i·e mod q, where e is the
//! message digest scalar. Partials aggregate additively into s = Σ s_i,
//! and (s, r) verifies against the sum of the signers' public keys.
//!
//! Note the signing equation is the GOST 34.10 variant `s = d·r + k·e`, not
//! the Schnorr `s = k − d·e`; aggregation relies on r being shared and e
//! being deterministic in the message.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::Zero;

use crate::context::Context;
use crate::curve::Point;
use crate::errors::Error;
use crate::util;

/// A validated private scalar: exactly one coordinate width of bytes,
/// non-zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey(pub BigInt);

impl PrivateKey {
    /// Parses raw key bytes, rejecting wrong widths and the zero scalar.
    pub fn new(ctx: &Context, raw: &[u8]) -> Result<PrivateKey, Error> {
        let mode = ctx.curve.mode();
        if raw.len() != mode {
            return Err(Error::BadInputLength {
                got: raw.len(),
                want: mode,
            });
        }
        let k = BigInt::from_bytes_be(Sign::Plus, raw);
        if k.is_zero() {
            return Err(Error::ScalarOutOfRange);
        }
        Ok(PrivateKey(k))
    }

    /// The matching public key k·G.
    pub fn public_key(&self, ctx: &Context) -> PublicKey {
        PublicKey(Point::scalar_base_mult(&ctx.curve, &self.0))
    }
}

/// A public key (or public nonce): a non-identity curve point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(pub Point);

impl PublicKey {
    /// Derives the public key for raw private key bytes.
    pub fn new(ctx: &Context, raw_private_key: &[u8]) -> Result<PublicKey, Error> {
        Ok(PrivateKey::new(ctx, raw_private_key)?.public_key(ctx))
    }
}

/// Sums public keys (or public nonces) pointwise.
pub fn sum_public_keys(ctx: &Context, public_keys: &[PublicKey]) -> PublicKey {
    let curve = &ctx.curve;
    let mut acc = Point::infinity();
    for pk in public_keys {
        acc = acc.add(curve, &pk.0);
    }
    PublicKey(acc)
}

/// Produces signer i's partial signature `pad(s_i) ‖ pad(r)` (2·m bytes)
/// over `msg`, under the shared public nonce sum R.
///
/// s_i = d_i·r + k_i·e mod q with r = R.x mod q and e the digest scalar of
/// the message. Fails with [`Error::ZeroSignature`] if s_i comes out zero.
pub fn sign_partial(
    ctx: &Context,
    raw_private_key: &[u8],
    nonce: &[u8],
    sum_nonces: &PublicKey,
    msg: &[u8],
) -> Result<Vec<u8>, Error> {
    let private_key = PrivateKey::new(ctx, raw_private_key)?;
    let nonce = PrivateKey::new(ctx, nonce)?;

    let q = &ctx.curve.q;
    let mode = ctx.curve.mode();
    let d = &private_key.0;
    let k = &nonce.0;
    let r = sum_nonces.0.x.mod_floor(q);
    let e = ctx.hash_to_int(msg);

    let s = (d * &r + k * e).mod_floor(q);
    if s.is_zero() {
        return Err(Error::ZeroSignature);
    }

    let mut signature = util::pad(&s.to_bytes_be().1, mode);
    signature.extend_from_slice(&util::pad(&r.to_bytes_be().1, mode));
    Ok(signature)
}

/// Aggregates partial signatures sharing the public nonce sum R into the
/// final signature `pad(Σ s_i mod q) ‖ pad(r)`.
pub fn aggregate_partial_signatures(
    ctx: &Context,
    partial_signatures: &[Vec<u8>],
    sum_nonces: &PublicKey,
) -> Result<Vec<u8>, Error> {
    let q = &ctx.curve.q;
    let mode = ctx.curve.mode();
    let r = sum_nonces.0.x.mod_floor(q);

    let mut s = BigInt::zero();
    for partial in partial_signatures {
        if partial.len() != 2 * mode {
            return Err(Error::BadInputLength {
                got: partial.len(),
                want: 2 * mode,
            });
        }
        let si = BigInt::from_bytes_be(Sign::Plus, &partial[..mode]);
        s = (s + si).mod_floor(q);
    }

    let mut signature = util::pad(&s.to_bytes_be().1, mode);
    signature.extend_from_slice(&util::pad(&r.to_bytes_be().1, mode));
    Ok(signature)
}

/// Verifies an aggregate signature against the sum of the signers' public
/// keys.
pub fn verify(
    ctx: &Context,
    signature: &[u8],
    public_key: &PublicKey,
    msg: &[u8],
) -> Result<bool, Error> {
    verify_inner(ctx, signature, public_key, msg, None)
}

/// Verifies one signer's partial signature against that signer's public key
/// and public nonce R_i: the recomputed abscissa must equal R_i.x instead of
/// the r carried inside the signature.
pub fn verify_partial(
    ctx: &Context,
    signature: &[u8],
    public_key: &PublicKey,
    public_nonce: &PublicKey,
    msg: &[u8],
) -> Result<bool, Error> {
    verify_inner(ctx, signature, public_key, msg, Some(&public_nonce.0.x))
}

fn verify_inner(
    ctx: &Context,
    signature: &[u8],
    public_key: &PublicKey,
    msg: &[u8],
    partial_r: Option<&BigInt>,
) -> Result<bool, Error> {
    let curve = &ctx.curve;
    let q = &curve.q;
    let mode = curve.mode();

    if signature.len() != 2 * mode {
        return Err(Error::BadInputLength {
            got: signature.len(),
            want: 2 * mode,
        });
    }

    let s = BigInt::from_bytes_be(Sign::Plus, &signature[..mode]);
    let r = BigInt::from_bytes_be(Sign::Plus, &signature[mode..]);
    if r.is_zero() || &r >= q || s.is_zero() || &s >= q {
        return Ok(false);
    }

    // e is forced non-zero by the digest step, so the inverse exists.
    let e = ctx.hash_to_int(msg);
    let v = util::mod_inverse(&e, q)?;

    let z1 = (&s * &v).mod_floor(q);
    let z2 = q - (&r * &v).mod_floor(q);

    // C = z1·G + z2·P; accept iff C.x mod q matches the expected abscissa.
    let c = Point::scalar_base_mult(curve, &z1).add(curve, &public_key.0.scalar_mult(curve, &z2));
    let cx = c.x.mod_floor(q);

    match partial_r {
        Some(expected) => Ok(&cx == expected),
        None => Ok(cx == r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HashAlgorithm;
    use crate::curve::Curve;
    use rand::RngCore;

    fn ctx() -> Context {
        Context::new(
            Curve::gost_r3410_2001_crypto_pro_a(),
            HashAlgorithm::Streebog256,
        )
    }

    fn random_bytes(n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        rand::thread_rng().fill_bytes(&mut out);
        out
    }

    #[test]
    fn four_signers_aggregate_and_verify() {
        let ctx = ctx();
        let mode = ctx.curve.mode();
        let n = 4;
        let msg = b"Hello world!";

        let mut private_keys = Vec::new();
        let mut public_keys = Vec::new();
        let mut nonces = Vec::new();
        let mut public_nonces = Vec::new();
        for _ in 0..n {
            let private_key = random_bytes(mode);
            public_keys.push(PublicKey::new(&ctx, &private_key).unwrap());
            private_keys.push(private_key);

            let nonce = random_bytes(mode);
            public_nonces.push(PublicKey::new(&ctx, &nonce).unwrap());
            nonces.push(nonce);
        }

        let sum_nonces = sum_public_keys(&ctx, &public_nonces);

        let mut partials = Vec::new();
        for i in 0..n {
            let partial =
                sign_partial(&ctx, &private_keys[i], &nonces[i], &sum_nonces, msg).unwrap();
            assert_eq!(partial.len(), 2 * mode);
            assert!(
                verify_partial(&ctx, &partial, &public_keys[i], &public_nonces[i], msg).unwrap()
            );
            partials.push(partial);
        }

        let signature = aggregate_partial_signatures(&ctx, &partials, &sum_nonces).unwrap();
        let sum_keys = sum_public_keys(&ctx, &public_keys);
        assert!(verify(&ctx, &signature, &sum_keys, msg).unwrap());
    }

    #[test]
    fn tampering_breaks_verification() {
        let ctx = ctx();
        let mode = ctx.curve.mode();
        let private_key = random_bytes(mode);
        let nonce = random_bytes(mode);
        let public_key = PublicKey::new(&ctx, &private_key).unwrap();
        let public_nonce = PublicKey::new(&ctx, &nonce).unwrap();
        let msg = b"Hello world!";

        let partial = sign_partial(&ctx, &private_key, &nonce, &public_nonce, msg).unwrap();
        let signature =
            aggregate_partial_signatures(&ctx, &[partial], &public_nonce).unwrap();
        assert!(verify(&ctx, &signature, &public_key, msg).unwrap());

        // Flipped message bit.
        assert!(!verify(&ctx, &signature, &public_key, b"Hello world?").unwrap());

        // Flipped bit in s.
        let mut bad_s = signature.clone();
        bad_s[mode - 1] ^= 1;
        assert!(!verify(&ctx, &bad_s, &public_key, msg).unwrap());

        // Flipped bit in r.
        let mut bad_r = signature.clone();
        bad_r[2 * mode - 1] ^= 1;
        assert!(!verify(&ctx, &bad_r, &public_key, msg).unwrap());

        // Wrong length is a structural error, not a rejection.
        assert!(matches!(
            verify(&ctx, &signature[1..], &public_key, msg),
            Err(Error::BadInputLength { .. })
        ));
    }

    #[test]
    fn key_parsing_rejects_bad_input() {
        let ctx = ctx();
        assert!(matches!(
            PrivateKey::new(&ctx, &[1u8; 16]),
            Err(Error::BadInputLength { .. })
        ));
        assert_eq!(
            PrivateKey::new(&ctx, &[0u8; 32]),
            Err(Error::ScalarOutOfRange)
        );
    }
}
