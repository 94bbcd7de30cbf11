//! # Epoch Policy Store
//!
//! Per-reward-epoch signing policy fingerprints and the admission rule that
//! decides which policy governs a given voting round.
//!
//! Policies are stored by fingerprint only; the full voter set always arrives
//! with the submission and is checked against the stored hash. Epochs advance
//! strictly one at a time, either through the privileged direct path or
//! through a quorum-verified relay of the next epoch's policy.

use relay_codec::signing_policy_hash;
use relay_quorum::QuorumVerifier;
use relay_types::{
    Hash, RelayConfig, RelayError, RelayResult, SignatureRecord, SigningPolicy, MAX_TOTAL_WEIGHT,
    MAX_VOTERS,
};
use std::collections::BTreeMap;

/// What the store keeps per reward epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolicyRecord {
    /// keccak256 fingerprint of the policy's canonical encoding.
    pub hash: Hash,
    /// First voting round the policy actually governs.
    pub start_voting_round_id: u32,
}

/// Signing policy fingerprints per reward epoch.
#[derive(Debug, Default)]
pub struct EpochPolicyStore {
    policies: BTreeMap<u32, PolicyRecord>,
    last_initialized: Option<u32>,
}

impl EpochPolicyStore {
    /// Create an empty store; the first initialized policy seeds it.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently initialized reward epoch, if any.
    pub fn last_initialized_reward_epoch(&self) -> Option<u32> {
        self.last_initialized
    }

    /// Stored record for a reward epoch.
    pub fn record(&self, reward_epoch_id: u32) -> Option<&PolicyRecord> {
        self.policies.get(&reward_epoch_id)
    }

    /// Install a policy for the next reward epoch.
    ///
    /// The very first call seeds the store and accepts any epoch; afterwards
    /// the epoch must advance by exactly one. Structural invariants are
    /// enforced on every path.
    pub fn initialize(&mut self, policy: &SigningPolicy) -> RelayResult<()> {
        if let Some(last) = self.last_initialized {
            if policy.reward_epoch_id != last + 1 {
                return Err(RelayError::NotNextRewardEpoch);
            }
        }
        validate_structure(policy)?;

        let hash = signing_policy_hash(policy)?;
        self.policies.insert(
            policy.reward_epoch_id,
            PolicyRecord {
                hash,
                start_voting_round_id: policy.start_voting_round_id,
            },
        );
        self.last_initialized = Some(policy.reward_epoch_id);
        Ok(())
    }

    /// Install the next epoch's policy from a quorum-verified relay.
    ///
    /// `current` must be the last initialized policy (checked by
    /// fingerprint), and the quorum signs the new policy's fingerprint under
    /// the current policy's ordinary threshold.
    pub fn initialize_via_relay(
        &mut self,
        verifier: &QuorumVerifier,
        current: &SigningPolicy,
        new_policy: &SigningPolicy,
        signatures: &[SignatureRecord],
    ) -> RelayResult<()> {
        let last = self
            .last_initialized
            .ok_or(RelayError::NotWithLastInitialized)?;
        let stored = self
            .policies
            .get(&last)
            .ok_or(RelayError::NotWithLastInitialized)?;
        if signing_policy_hash(current)? != stored.hash {
            return Err(RelayError::NotWithLastInitialized);
        }

        if new_policy.reward_epoch_id != current.reward_epoch_id + 1 {
            return Err(RelayError::NotNextRewardEpoch);
        }

        let digest = signing_policy_hash(new_policy)?;
        verifier.verify(&digest, signatures, current, current.threshold as u32)?;

        self.initialize(new_policy)
    }

    /// Decide whether `submitted` may govern `voting_round_id` and return the
    /// weight threshold the quorum must exceed.
    ///
    /// The ordinary threshold applies when the round nominally belongs to the
    /// submitted policy's epoch. Inside the grace window (the round already
    /// belongs to the next epoch, whose policy is late or started later), the
    /// previous policy is still accepted at an increased threshold. Once the
    /// next policy is initialized and its start round reached, it is the only
    /// admissible one.
    pub fn resolve_threshold(
        &self,
        voting_round_id: u32,
        submitted: &SigningPolicy,
        config: &RelayConfig,
    ) -> RelayResult<u32> {
        let last = self
            .last_initialized
            .ok_or(RelayError::WrongSignPolicyRewardEpoch)?;
        let epoch = submitted.reward_epoch_id;

        if epoch > last {
            return Err(RelayError::WrongSignPolicyRewardEpoch);
        }
        if last - epoch > config.message_finalization_window_in_reward_epochs {
            return Err(RelayError::MessageTooOld);
        }

        let stored = self
            .policies
            .get(&epoch)
            .ok_or(RelayError::WrongSignPolicyRewardEpoch)?;
        if signing_policy_hash(submitted)? != stored.hash {
            return Err(RelayError::SigningPolicyHashMismatch);
        }

        let expected = config.expected_reward_epoch_of(voting_round_id);
        if epoch == expected {
            if voting_round_id < stored.start_voting_round_id {
                // The policy was initialized late; this round is still
                // governed by its predecessor.
                return Err(RelayError::DelayedSignPolicy);
            }
            Ok(submitted.threshold as u32)
        } else if epoch + 1 == expected {
            if let Some(next) = self.policies.get(&(epoch + 1)) {
                if voting_round_id >= next.start_voting_round_id {
                    return Err(RelayError::MustUseNewSignPolicy);
                }
            }
            Ok(config.increased_threshold(submitted.threshold))
        } else {
            Err(RelayError::WrongSignPolicyRewardEpoch)
        }
    }
}

/// Structural invariants every stored policy satisfies.
fn validate_structure(policy: &SigningPolicy) -> RelayResult<()> {
    if policy.voters.len() != policy.weights.len() {
        return Err(RelayError::SizeMismatch);
    }
    if policy.voters.is_empty() {
        return Err(RelayError::MustBeNonTrivial);
    }
    if policy.voters.len() > MAX_VOTERS {
        return Err(RelayError::TooManyVoters);
    }

    let total = policy.total_weight();
    if total > MAX_TOTAL_WEIGHT {
        return Err(RelayError::TotalWeightTooBig);
    }

    let threshold = policy.threshold as u32;
    if threshold < total / 2 {
        return Err(RelayError::TooSmallThreshold);
    }
    if threshold > total * 66 / 100 {
        return Err(RelayError::TooBigThreshold);
    }

    Ok(())
}
