//! Test fixtures: voter sets with live signing keys and payload builders.

use k256::ecdsa::SigningKey;
use primitive_types::U256;
use relay_codec::{encode_relay_message, protocol_message_hash, signing_policy_hash};
use relay_quorum::address_from_pubkey;
use relay_types::{
    Hash, ProtocolMessage, RelayMessage, SignatureRecord, SigningPolicy,
};

/// A signing policy together with the keys able to sign for it.
pub struct VoterSet {
    pub keys: Vec<SigningKey>,
    pub policy: SigningPolicy,
}

impl VoterSet {
    /// Build a voter set with the given weights and threshold.
    pub fn new(
        reward_epoch_id: u32,
        start_voting_round_id: u32,
        weights: Vec<u16>,
        threshold: u16,
    ) -> Self {
        let mut keys = Vec::new();
        let mut voters = Vec::new();
        for _ in 0..weights.len() {
            let key = SigningKey::random(&mut rand::thread_rng());
            voters.push(address_from_pubkey(key.verifying_key()));
            keys.push(key);
        }

        Self {
            keys,
            policy: SigningPolicy {
                reward_epoch_id,
                start_voting_round_id,
                threshold,
                seed: U256::from(reward_epoch_id),
                voters,
                weights,
            },
        }
    }

    /// A set of `count` equally weighted voters.
    pub fn equal_weights(
        reward_epoch_id: u32,
        start_voting_round_id: u32,
        count: usize,
        weight: u16,
        threshold: u16,
    ) -> Self {
        Self::new(
            reward_epoch_id,
            start_voting_round_id,
            vec![weight; count],
            threshold,
        )
    }

    /// Sign a digest with the voters at `indices`, in that order.
    pub fn sign(&self, digest: &Hash, indices: &[u16]) -> Vec<SignatureRecord> {
        indices
            .iter()
            .map(|&index| {
                let (sig, recovery_id) = self.keys[index as usize]
                    .sign_prehash_recoverable(digest)
                    .unwrap();
                let bytes = sig.to_bytes();
                let mut r = [0u8; 32];
                let mut s = [0u8; 32];
                r.copy_from_slice(&bytes[..32]);
                s.copy_from_slice(&bytes[32..]);
                SignatureRecord {
                    index,
                    v: recovery_id.to_byte(),
                    r,
                    s,
                }
            })
            .collect()
    }

    /// Encoded protocol-message relay signed by the voters at `indices`.
    pub fn message_payload(&self, message: ProtocolMessage, indices: &[u16]) -> Vec<u8> {
        let digest = protocol_message_hash(&message);
        encode_relay_message(&RelayMessage::ProtocolMessageRelay {
            signing_policy: self.policy.clone(),
            message,
            signatures: self.sign(&digest, indices),
        })
        .unwrap()
    }

    /// Encoded new-policy relay signed by the voters at `indices`.
    pub fn policy_payload(&self, new_policy: &SigningPolicy, indices: &[u16]) -> Vec<u8> {
        let digest = signing_policy_hash(new_policy).unwrap();
        encode_relay_message(&RelayMessage::NewSigningPolicy {
            signing_policy: self.policy.clone(),
            new_signing_policy: new_policy.clone(),
            signatures: self.sign(&digest, indices),
        })
        .unwrap()
    }
}

/// A protocol message with a distinctive root.
pub fn message(protocol_id: u8, voting_round_id: u32, is_secure_random: bool) -> ProtocolMessage {
    let mut merkle_root = [0u8; 32];
    merkle_root[0] = protocol_id;
    merkle_root[28..].copy_from_slice(&voting_round_id.to_be_bytes());
    ProtocolMessage {
        protocol_id,
        voting_round_id,
        is_secure_random,
        merkle_root,
    }
}
