//! Errors which may occur while parsing keys, building commitments, or
//! creating and verifying proofs.

use thiserror::Error;

/// Represents an error in key handling, signing, commitment arithmetic, or
/// proof creation/verification.
///
/// Verification routines only return an error for malformed inputs; an
/// honest "this proof/signature is not valid" outcome is reported through
/// their boolean result instead.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A raw key, signature, or point had the wrong byte width.
    #[error("input has wrong length: got {got}, want {want} bytes")]
    BadInputLength {
        /// Actual length of the rejected input.
        got: usize,
        /// Expected length.
        want: usize,
    },

    /// A scalar was zero or outside the group order where that is forbidden.
    #[error("scalar out of range")]
    ScalarOutOfRange,

    /// Two vectors that must match in length did not.
    #[error("vector lengths differ: {left} vs {right}")]
    VectorLengthMismatch {
        /// Length of the first operand.
        left: usize,
        /// Length of the second operand.
        right: usize,
    },

    /// A deserialised point is not on the curve, or hash-to-curve exhausted
    /// its iteration limit.
    #[error("invalid curve point")]
    InvalidCurvePoint,

    /// The requested range end is not a supported power of two, or the
    /// interval bounds are inconsistent.
    #[error("unsupported range: {0}")]
    BadRange(&'static str),

    /// Partial signing produced s = 0.
    #[error("failed to create partial signature: s is zero")]
    ZeroSignature,

    /// A proof's fields are structurally inconsistent (wrong vector lengths,
    /// scalars outside the group order, or mismatched embedded parameters).
    #[error("proof is structurally invalid")]
    ProofStructurallyInvalid,
}
