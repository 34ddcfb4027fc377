//! Aggregate GOST R 34.10 signatures, Pedersen commitments and Bulletproof
//! range proofs over the 256-bit CryptoPro-A curve.
//!
//! Three interlocking primitives share one [`Context`] (curve plus digest
//! algorithm):
//!
//! * [`aggsig`]: multi-signer signatures under a shared public nonce,
//!   aggregating additively into one signature verifiable against the sum
//!   of the signers' public keys;
//! * [`pedersen`]: hiding, binding, additively homomorphic commitments
//!   over a NUMS generator;
//! * [`range_proof`]: Bulletproofs showing that a committed value lies in
//!   [0, 2ᴺ) (or an arbitrary interval via [`range_proof::generic`]), with
//!   a two-round multi-party protocol producing one aggregate proof.
//!
//! All public parameters derive deterministically from fixed seeds; no
//! trusted setup is involved.

pub mod aggsig;
pub mod context;
pub mod curve;
pub mod errors;
pub mod generators;
pub mod inner_product_proof;
pub mod pedersen;
pub mod range_proof;
mod transcript;
pub mod util;

pub use crate::context::{Context, HashAlgorithm};
pub use crate::curve::{Curve, Point};
pub use crate::errors::Error;
pub use crate::generators::{setup, BulletproofParams, MAX_RANGE_END};
pub use crate::inner_product_proof::InnerProductProof;
pub use crate::pedersen::Commitment;
pub use crate::range_proof::{
    generic::{GenericRangeParams, GenericRangeProof},
    RangeProof,
};
