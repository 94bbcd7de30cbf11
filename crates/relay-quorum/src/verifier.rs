//! # Quorum Verifier
//!
//! Ordered aggregation of voter weight over a signature list. Signatures are
//! processed in submission order; the first violation encountered is the one
//! reported, which is part of the observable contract.

use crate::ecdsa::recover_signer;
use relay_types::{Hash, RelayError, RelayResult, SignatureRecord, SigningPolicy};

/// Weighted-quorum signature verifier for one signing policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuorumVerifier;

impl QuorumVerifier {
    /// Create a new verifier.
    pub fn new() -> Self {
        Self
    }

    /// See [`verify_quorum`].
    pub fn verify(
        &self,
        digest: &Hash,
        signatures: &[SignatureRecord],
        policy: &SigningPolicy,
        threshold: u32,
    ) -> RelayResult<u32> {
        verify_quorum(digest, signatures, policy, threshold)
    }
}

/// Verify that `signatures` carry aggregate voter weight strictly above
/// `threshold` for the given digest and policy.
///
/// Per signature, in submission order:
/// 1. the voter index must be strictly greater than the previous one,
/// 2. the index must address an existing voter,
/// 3. the recovered signer must be that voter.
///
/// Returns the accumulated weight on success. Accepts as soon as the
/// threshold is exceeded; signatures after that point are not inspected, so
/// worst-case cost stays bounded by the voter-list cap.
pub fn verify_quorum(
    digest: &Hash,
    signatures: &[SignatureRecord],
    policy: &SigningPolicy,
    threshold: u32,
) -> RelayResult<u32> {
    if signatures.is_empty() {
        return Err(RelayError::NoSignatureCount);
    }

    let mut weight: u32 = 0;
    let mut previous_index: Option<u16> = None;

    for signature in signatures {
        if let Some(previous) = previous_index {
            if signature.index <= previous {
                return Err(RelayError::IndexOutOfOrder);
            }
        }
        previous_index = Some(signature.index);

        let index = signature.index as usize;
        if index >= policy.voters.len() {
            return Err(RelayError::IndexOutOfRange);
        }

        let signer = recover_signer(digest, signature)?;
        if signer != policy.voters[index] {
            return Err(RelayError::WrongSignature);
        }

        weight += policy.weights[index] as u32;
        if weight > threshold {
            return Ok(weight);
        }
    }

    Err(RelayError::NotEnoughWeight)
}
