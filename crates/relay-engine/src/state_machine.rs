//! # Relay State Machine
//!
//! The single entry point for relay submissions. Each submission is parsed,
//! dispatched to the new-policy or protocol-message branch, and either
//! applied in full or rejected with one stable reason. There is no suspended
//! state across calls: the engine is a deterministic admit/reject function of
//! the payload and its current state.

use crate::finalization::FinalizationLedger;
use crate::policy_store::EpochPolicyStore;
use crate::random::{RandomNumber, RandomNumberCache};
use relay_codec::{decode_relay_message, protocol_message_hash};
use relay_quorum::QuorumVerifier;
use relay_types::{
    Address, Hash, RelayConfig, RelayError, RelayEvent, RelayMessage, RelayResult, SigningPolicy,
};

/// Top-level relay verification engine.
///
/// All shared state (`EpochPolicyStore`, `FinalizationLedger`,
/// `RandomNumberCache`) is owned here and mutated only inside the atomic
/// submission handler or the privileged direct path.
#[derive(Debug)]
pub struct RelayStateMachine {
    config: RelayConfig,
    verifier: QuorumVerifier,
    policies: EpochPolicyStore,
    finalizations: FinalizationLedger,
    randoms: RandomNumberCache,
}

impl RelayStateMachine {
    /// Create an engine with no installed policy; the first direct
    /// initialization seeds it.
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            verifier: QuorumVerifier::new(),
            policies: EpochPolicyStore::new(),
            finalizations: FinalizationLedger::new(),
            randoms: RandomNumberCache::new(),
        }
    }

    /// Create an engine and install its genesis signing policy.
    pub fn with_genesis_policy(config: RelayConfig, policy: &SigningPolicy) -> RelayResult<Self> {
        let mut engine = Self::new(config);
        engine.policies.initialize(policy)?;
        Ok(engine)
    }

    /// Process one relay submission atomically.
    pub fn submit(&mut self, payload: &[u8]) -> RelayResult<RelayEvent> {
        match decode_relay_message(payload)? {
            RelayMessage::NewSigningPolicy {
                signing_policy,
                new_signing_policy,
                signatures,
            } => {
                self.policies.initialize_via_relay(
                    &self.verifier,
                    &signing_policy,
                    &new_signing_policy,
                    &signatures,
                )?;

                tracing::info!(
                    reward_epoch_id = new_signing_policy.reward_epoch_id,
                    start_voting_round_id = new_signing_policy.start_voting_round_id,
                    "signing policy relayed"
                );
                Ok(RelayEvent::SigningPolicyRelayed {
                    reward_epoch_id: new_signing_policy.reward_epoch_id,
                })
            }
            RelayMessage::ProtocolMessageRelay {
                signing_policy,
                message,
                signatures,
            } => {
                let threshold = self.policies.resolve_threshold(
                    message.voting_round_id,
                    &signing_policy,
                    &self.config,
                )?;

                let digest = protocol_message_hash(&message);
                self.verifier
                    .verify(&digest, &signatures, &signing_policy, threshold)?;

                // First state write; everything before this is a pure check,
                // so a rejected submission mutates nothing.
                self.finalizations.record(
                    message.protocol_id,
                    message.voting_round_id,
                    message.merkle_root,
                )?;

                if message.protocol_id == self.config.random_number_protocol_id {
                    self.randoms.store(
                        message.voting_round_id,
                        &message.merkle_root,
                        message.is_secure_random,
                    );
                }

                tracing::info!(
                    protocol_id = message.protocol_id,
                    voting_round_id = message.voting_round_id,
                    is_secure_random = message.is_secure_random,
                    "protocol message relayed"
                );
                Ok(RelayEvent::ProtocolMessageRelayed {
                    protocol_id: message.protocol_id,
                    voting_round_id: message.voting_round_id,
                    is_secure_random: message.is_secure_random,
                    merkle_root: message.merkle_root,
                })
            }
        }
    }

    /// Privileged direct policy initialization.
    pub fn set_signing_policy(
        &mut self,
        caller: Address,
        policy: &SigningPolicy,
    ) -> RelayResult<RelayEvent> {
        if caller != self.config.signing_policy_setter {
            return Err(RelayError::OnlySignPolicySetter);
        }
        self.policies.initialize(policy)?;

        tracing::info!(
            reward_epoch_id = policy.reward_epoch_id,
            start_voting_round_id = policy.start_voting_round_id,
            voters = policy.voters.len(),
            "signing policy initialized"
        );
        Ok(RelayEvent::SigningPolicyInitialized {
            reward_epoch_id: policy.reward_epoch_id,
            start_voting_round_id: policy.start_voting_round_id,
            threshold: policy.threshold,
            voters_count: policy.voters.len() as u16,
        })
    }

    // =========================================================================
    // Read surface
    // =========================================================================

    /// Engine configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// The most recently initialized reward epoch.
    pub fn last_initialized_reward_epoch(&self) -> Option<u32> {
        self.policies.last_initialized_reward_epoch()
    }

    /// Stored fingerprint of an epoch's signing policy.
    pub fn policy_fingerprint(&self, reward_epoch_id: u32) -> Option<Hash> {
        self.policies.record(reward_epoch_id).map(|r| r.hash)
    }

    /// Finalized merkle root for a protocol and voting round.
    pub fn finalized_root(&self, protocol_id: u8, voting_round_id: u32) -> Option<Hash> {
        self.finalizations.finalized_root(protocol_id, voting_round_id)
    }

    /// Whether a protocol message is already finalized.
    pub fn is_finalized(&self, protocol_id: u8, voting_round_id: u32) -> bool {
        self.finalizations.is_finalized(protocol_id, voting_round_id)
    }

    /// Random value of the highest finalized random-protocol round.
    pub fn latest_random(&self) -> RelayResult<RandomNumber> {
        self.randoms.latest(&self.config)
    }

    /// Random value of a specific voting round.
    pub fn historical_random(&self, voting_round_id: u32) -> RelayResult<RandomNumber> {
        self.randoms.historical(voting_round_id, &self.config)
    }
}
