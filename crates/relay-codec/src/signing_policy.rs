//! # Signing Policy Codec
//!
//! Layout, all big-endian:
//!
//! ```text
//! voterCount:2 | rewardEpochId:3 | startVotingRoundId:4 | threshold:2   (11-byte metadata)
//! seed:32
//! voters:  20 * voterCount
//! weights:  2 * voterCount
//! ```
//!
//! The total encoded length is `43 + 22 * voterCount`, which lets the decoder
//! detect truncation or corruption from the metadata alone.

use crate::cursor::ByteReader;
use crate::keccak256;
use primitive_types::U256;
use relay_types::{Address, Hash, RelayError, RelayResult, SigningPolicy};

/// Size of the fixed metadata header.
pub const SIGNING_POLICY_METADATA_BYTES: usize = 11;

const SEED_BYTES: usize = 32;
const ADDRESS_BYTES: usize = 20;
const WEIGHT_BYTES: usize = 2;

/// Reward epoch ids are carried in 3 bytes on the wire.
const MAX_WIRE_REWARD_EPOCH_ID: u32 = 0x00FF_FFFF;

/// Encoded length of a signing policy with `voter_count` voters.
pub fn signing_policy_encoded_len(voter_count: usize) -> usize {
    SIGNING_POLICY_METADATA_BYTES + SEED_BYTES + (ADDRESS_BYTES + WEIGHT_BYTES) * voter_count
}

/// Encode a signing policy.
///
/// Fails if the policy cannot be represented on the wire: a reward epoch id
/// beyond 3 bytes, a voter count beyond 2 bytes, or voter/weight lists of
/// different lengths.
pub fn encode_signing_policy(policy: &SigningPolicy) -> RelayResult<Vec<u8>> {
    if policy.reward_epoch_id > MAX_WIRE_REWARD_EPOCH_ID
        || policy.voters.len() > u16::MAX as usize
        || policy.voters.len() != policy.weights.len()
    {
        return Err(RelayError::InvalidSignPolicyMetadata);
    }

    let mut out = Vec::with_capacity(signing_policy_encoded_len(policy.voters.len()));
    out.extend_from_slice(&(policy.voters.len() as u16).to_be_bytes());
    out.extend_from_slice(&policy.reward_epoch_id.to_be_bytes()[1..]);
    out.extend_from_slice(&policy.start_voting_round_id.to_be_bytes());
    out.extend_from_slice(&policy.threshold.to_be_bytes());

    let mut seed = [0u8; SEED_BYTES];
    policy.seed.to_big_endian(&mut seed);
    out.extend_from_slice(&seed);

    for voter in &policy.voters {
        out.extend_from_slice(voter);
    }
    for weight in &policy.weights {
        out.extend_from_slice(&weight.to_be_bytes());
    }

    Ok(out)
}

/// Decode a standalone signing policy; trailing bytes are a length error.
pub fn decode_signing_policy(bytes: &[u8]) -> RelayResult<SigningPolicy> {
    let mut reader = ByteReader::new(bytes);
    let policy = decode_signing_policy_from(&mut reader)?;
    if !reader.is_empty() {
        return Err(RelayError::InvalidSignPolicyLength);
    }
    Ok(policy)
}

/// Decode a signing policy from the cursor's current position.
///
/// Consumes exactly `signing_policy_encoded_len(count)` bytes on success.
pub(crate) fn decode_signing_policy_from(
    reader: &mut ByteReader<'_>,
) -> RelayResult<SigningPolicy> {
    let voter_count = reader
        .read_u16()
        .ok_or(RelayError::InvalidSignPolicyMetadata)? as usize;
    let reward_epoch_id = reader
        .read_u24()
        .ok_or(RelayError::InvalidSignPolicyMetadata)?;
    let start_voting_round_id = reader
        .read_u32()
        .ok_or(RelayError::InvalidSignPolicyMetadata)?;
    let threshold = reader
        .read_u16()
        .ok_or(RelayError::InvalidSignPolicyMetadata)?;

    let seed_bytes = reader
        .take(SEED_BYTES)
        .ok_or(RelayError::InvalidSignPolicyLength)?;
    let seed = U256::from_big_endian(seed_bytes);

    let mut voters: Vec<Address> = Vec::with_capacity(voter_count);
    for _ in 0..voter_count {
        let voter: Address = reader
            .read_array()
            .ok_or(RelayError::InvalidSignPolicyLength)?;
        voters.push(voter);
    }

    let mut weights: Vec<u16> = Vec::with_capacity(voter_count);
    for _ in 0..voter_count {
        let weight = reader
            .read_u16()
            .ok_or(RelayError::InvalidSignPolicyLength)?;
        weights.push(weight);
    }

    Ok(SigningPolicy {
        reward_epoch_id,
        start_voting_round_id,
        threshold,
        seed,
        voters,
        weights,
    })
}

/// Policy fingerprint: keccak256 of the canonical encoding.
///
/// Used both as the digest quorums sign during epoch handoff and as the
/// comparison key the engine stores per reward epoch.
pub fn signing_policy_hash(policy: &SigningPolicy) -> RelayResult<Hash> {
    Ok(keccak256(&encode_signing_policy(policy)?))
}
