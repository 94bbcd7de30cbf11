//! # Relay Wire Codec
//!
//! Exact big-endian byte layouts for the three relay structures, built on a
//! bounds-checked cursor. Decoding never panics on caller bytes: every
//! structural defect maps to one stable [`relay_types::RelayError`] reason.
//!
//! ## Layouts
//!
//! | Structure | Layout |
//! |-----------|--------|
//! | `ProtocolMessage` | `protocolId:1 \| votingRoundId:4 \| secureRandomFlag:1 \| merkleRoot:32` (38 bytes) |
//! | `SigningPolicy` | `voterCount:2 \| rewardEpochId:3 \| startVotingRoundId:4 \| threshold:2 \| seed:32 \| voters:20*N \| weights:2*N` |
//! | `RelayMessage` | `currentPolicy \| sizeIndicator:1 \| (newPolicy or message:38) \| signatures:67*K` |
//!
//! Fingerprints and signed digests are keccak256 over the canonical encoding.

pub mod cursor;
pub mod protocol_message;
pub mod relay_message;
pub mod signing_policy;

pub use cursor::ByteReader;
pub use protocol_message::{
    decode_protocol_message, encode_protocol_message, protocol_message_hash,
    PROTOCOL_MESSAGE_BYTES,
};
pub use relay_message::{
    decode_relay_message, encode_relay_message, SIGNATURE_RECORD_BYTES,
};
pub use signing_policy::{
    decode_signing_policy, encode_signing_policy, signing_policy_encoded_len,
    signing_policy_hash, SIGNING_POLICY_METADATA_BYTES,
};

use relay_types::Hash;
use sha3::{Digest, Keccak256};

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}
