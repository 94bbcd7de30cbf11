//! # Wire Entities
//!
//! The three structures carried by a relay submission, plus the signature
//! record that accompanies them. All are immutable values; the codec crate
//! owns their byte layouts.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// 32-byte digest (keccak256 output).
pub type Hash = [u8; 32];

/// Ethereum-style address derived from a public key (last 20 bytes of keccak256(pubkey)).
pub type Address = [u8; 20];

/// A finalized result for one protocol and voting round.
///
/// Produced off-chain, consumed here only for hashing, encoding, and
/// comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolMessage {
    /// Protocol identifier.
    pub protocol_id: u8,
    /// Voting round the merkle root belongs to.
    pub voting_round_id: u32,
    /// Whether the round's random contribution is considered unbiased.
    pub is_secure_random: bool,
    /// Merkle root summarizing the round's off-chain computation.
    pub merkle_root: Hash,
}

/// The voter set, per-voter weights, and quorum threshold for one reward epoch.
///
/// Created once per reward epoch and immutable afterwards; referenced by its
/// keccak256 fingerprint, never copied into engine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningPolicy {
    /// Reward epoch this policy governs (3 bytes on the wire).
    pub reward_epoch_id: u32,
    /// First voting round governed by this policy.
    pub start_voting_round_id: u32,
    /// Quorum threshold; a submission passes only with aggregate weight
    /// strictly above it.
    pub threshold: u16,
    /// Random seed assigned to the epoch.
    pub seed: U256,
    /// Voter addresses; insertion order defines the signature index.
    pub voters: Vec<Address>,
    /// Per-voter weights, parallel to `voters`.
    pub weights: Vec<u16>,
}

impl SigningPolicy {
    /// Sum of all voter weights.
    ///
    /// Returned as `u32`: a valid policy keeps the sum within `u16`, but the
    /// structural checks that enforce that live in the engine, not here.
    pub fn total_weight(&self) -> u32 {
        self.weights.iter().map(|&w| w as u32).sum()
    }
}

/// One recoverable ECDSA signature bound to a voter index.
///
/// Ephemeral: exists only within a single verification call.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Index into the signing policy's voter list.
    pub index: u16,
    /// Recovery ID (0, 1, 27, or 28).
    pub v: u8,
    /// R component (32 bytes).
    #[serde_as(as = "Bytes")]
    pub r: [u8; 32],
    /// S component (32 bytes).
    #[serde_as(as = "Bytes")]
    pub s: [u8; 32],
}

/// A decoded relay submission.
///
/// The variant is inferred from the wire's new-policy size indicator, not an
/// explicit tag field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayMessage {
    /// Quorum-signed handoff to the next reward epoch's signing policy.
    NewSigningPolicy {
        /// The currently governing policy the signatures were made under.
        signing_policy: SigningPolicy,
        /// The next epoch's policy, signed by a quorum of the current one.
        new_signing_policy: SigningPolicy,
        /// Signatures over the new policy's fingerprint.
        signatures: Vec<SignatureRecord>,
    },
    /// Quorum-signed finalization of a protocol message.
    ProtocolMessageRelay {
        /// The policy the signatures were made under.
        signing_policy: SigningPolicy,
        /// The message being finalized.
        message: ProtocolMessage,
        /// Signatures over the message's digest.
        signatures: Vec<SignatureRecord>,
    },
}

impl RelayMessage {
    /// The policy the submission claims governs it.
    pub fn signing_policy(&self) -> &SigningPolicy {
        match self {
            RelayMessage::NewSigningPolicy { signing_policy, .. } => signing_policy,
            RelayMessage::ProtocolMessageRelay { signing_policy, .. } => signing_policy,
        }
    }

    /// The submission's signature list, in wire order.
    pub fn signatures(&self) -> &[SignatureRecord] {
        match self {
            RelayMessage::NewSigningPolicy { signatures, .. } => signatures,
            RelayMessage::ProtocolMessageRelay { signatures, .. } => signatures,
        }
    }
}
