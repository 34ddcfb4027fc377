//! The immutable context shared by every operation: curve parameters plus
//! the digest algorithm used for message hashing and Fiat–Shamir challenges.

use digest::DynDigest;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::curve::Curve;

/// Digest algorithms a [`Context`] can be instantiated with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// GOST R 34.11-2012 256-bit (Streebog-256), the default profile.
    Streebog256,
    /// SHA-256, the alternate profile.
    Sha256,
}

impl HashAlgorithm {
    /// A fresh hasher instance for this algorithm.
    pub fn hasher(&self) -> Box<dyn DynDigest> {
        match self {
            HashAlgorithm::Streebog256 => Box::<streebog::Streebog256>::default(),
            HashAlgorithm::Sha256 => Box::<sha2::Sha256>::default(),
        }
    }
}

/// Curve and digest bundle. Carries no mutable state and is safe to share
/// across threads.
#[derive(Clone, Debug)]
pub struct Context {
    /// Curve parameters.
    pub curve: Curve,
    /// Digest algorithm for messages and transcript challenges.
    pub hash: HashAlgorithm,
}

impl Context {
    /// Bundles a curve with a digest algorithm.
    pub fn new(curve: Curve, hash: HashAlgorithm) -> Context {
        Context { curve, hash }
    }

    /// Digests the concatenation of `chunks`.
    pub fn digest(&self, chunks: &[&[u8]]) -> Vec<u8> {
        let mut hasher = self.hash.hasher();
        for chunk in chunks {
            hasher.update(chunk);
        }
        hasher.finalize_reset().to_vec()
    }

    /// Digests a message into a scalar mod q. A zero result is substituted
    /// by 1; downstream signing and verification rely on the digest scalar
    /// being invertible.
    pub fn hash_to_int(&self, msg: &[u8]) -> BigInt {
        let digest = self.digest(&[msg]);
        let mut e = BigInt::from_bytes_be(Sign::Plus, &digest).mod_floor(&self.curve.q);
        if e.is_zero() {
            e = BigInt::one();
        }
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_widths() {
        let curve = Curve::gost_r3410_2001_crypto_pro_a();
        for alg in [HashAlgorithm::Streebog256, HashAlgorithm::Sha256] {
            let ctx = Context::new(curve.clone(), alg);
            assert_eq!(ctx.digest(&[b"abc"]).len(), 32);
        }
    }

    #[test]
    fn digest_is_deterministic_and_algorithms_differ() {
        let curve = Curve::gost_r3410_2001_crypto_pro_a();
        let streebog = Context::new(curve.clone(), HashAlgorithm::Streebog256);
        let sha = Context::new(curve, HashAlgorithm::Sha256);
        assert_eq!(streebog.digest(&[b"msg"]), streebog.digest(&[b"msg"]));
        assert_ne!(streebog.digest(&[b"msg"]), sha.digest(&[b"msg"]));
    }

    #[test]
    fn hash_to_int_is_reduced_and_nonzero() {
        let curve = Curve::gost_r3410_2001_crypto_pro_a();
        let ctx = Context::new(curve, HashAlgorithm::Streebog256);
        let e = ctx.hash_to_int(b"Hello world!");
        assert!(e > BigInt::zero());
        assert!(e < ctx.curve.q);
    }
}
