//! # Relay Errors
//!
//! Every rejection the engine can produce, with a fixed display string per
//! reason. The engine never retries and never partially applies a
//! submission: each error below is terminal for the submission that caused
//! it.

use thiserror::Error;

/// Rejection reasons for relay submissions and policy administration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    // =========================================================================
    // Malformed input (structural decode failures)
    // =========================================================================
    /// Signing policy header shorter than the fixed metadata block
    #[error("Invalid sign policy metadata")]
    InvalidSignPolicyMetadata,

    /// Signing policy body does not match the length implied by its voter count
    #[error("Invalid sign policy length")]
    InvalidSignPolicyLength,

    /// Protocol message body shorter than its fixed layout
    #[error("Too short message")]
    TooShortMessage,

    /// Secure-random flag byte is neither 0x00 nor 0x01
    #[error("Invalid secure random flag")]
    InvalidSecureRandomFlag,

    /// New-policy size indicator does not match the decoded policy's length
    #[error("Wrong size for new sign policy")]
    WrongSizeForNewSignPolicy,

    /// Payload ends before the new-policy size indicator byte
    #[error("No new sign policy size")]
    NoNewSignPolicySize,

    /// Signatures block empty or not a multiple of the record size
    #[error("Not enough signatures")]
    NotEnoughSignatures,

    // =========================================================================
    // Policy admission
    // =========================================================================
    /// Submitted policy fingerprint differs from the stored one for its epoch
    #[error("Signing policy hash mismatch")]
    SigningPolicyHashMismatch,

    /// Message round predates the submitted policy's actual start round
    #[error("Delayed sign policy")]
    DelayedSignPolicy,

    /// Submitted policy's epoch cannot govern the message's voting round
    #[error("Wrong sign policy reward epoch")]
    WrongSignPolicyRewardEpoch,

    /// A newer policy already governs the message's voting round
    #[error("Must use new sign policy")]
    MustUseNewSignPolicy,

    /// Policy initialization must advance the epoch by exactly one
    #[error("Not next reward epoch")]
    NotNextRewardEpoch,

    /// Relayed handoff must be signed under the last initialized policy
    #[error("Not with last initialized")]
    NotWithLastInitialized,

    /// Submitted policy older than the finalization window allows
    #[error("Message too old")]
    MessageTooOld,

    // =========================================================================
    // Quorum violations
    // =========================================================================
    /// Empty signature list
    #[error("No signature count")]
    NoSignatureCount,

    /// Cumulative verified weight did not exceed the threshold
    #[error("Not enough weight")]
    NotEnoughWeight,

    /// Voter indices not strictly increasing across the signature list
    #[error("Index out of order")]
    IndexOutOfOrder,

    /// Voter index beyond the policy's voter list
    #[error("Index out of range")]
    IndexOutOfRange,

    /// Recovery failed or the recovered address is not the indexed voter
    #[error("Wrong signature")]
    WrongSignature,

    // =========================================================================
    // Replay
    // =========================================================================
    /// The (protocolId, votingRoundId) pair is already finalized
    #[error("Already relayed")]
    AlreadyRelayed,

    // =========================================================================
    // Policy construction (direct privileged path)
    // =========================================================================
    /// Voter list longer than the hard cap
    #[error("too many voters")]
    TooManyVoters,

    /// Voter and weight lists differ in length
    #[error("size mismatch")]
    SizeMismatch,

    /// Voter list is empty
    #[error("must be non-trivial")]
    MustBeNonTrivial,

    /// Threshold above the admissible fraction of total weight
    #[error("too big threshold")]
    TooBigThreshold,

    /// Threshold below half of total weight
    #[error("too small threshold")]
    TooSmallThreshold,

    /// Sum of weights exceeds the 16-bit budget
    #[error("total weight too big")]
    TotalWeightTooBig,

    /// Direct initialization attempted by a non-privileged caller
    #[error("only sign policy setter")]
    OnlySignPolicySetter,

    // =========================================================================
    // Random number queries
    // =========================================================================
    /// No random value recorded for the requested voting round
    #[error("no random number")]
    NoRandomNumber,
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
