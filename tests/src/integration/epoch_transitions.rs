//! Epoch handoff scenarios: quorum-verified policy relay, the grace window,
//! and the forced switch to a new policy.

#[cfg(test)]
mod tests {
    use crate::fixtures::{message, VoterSet};
    use relay_codec::signing_policy_hash;
    use relay_engine::RelayStateMachine;
    use relay_types::{RelayConfig, RelayError, RelayEvent};

    fn config() -> RelayConfig {
        RelayConfig {
            random_number_protocol_id: 1,
            first_reward_epoch_start_voting_round_id: 0,
            voting_rounds_per_reward_epoch: 1000,
            message_finalization_window_in_reward_epochs: 2,
            ..RelayConfig::default()
        }
    }

    fn standard_set(epoch: u32, start: u32) -> VoterSet {
        VoterSet::new(epoch, start, vec![300, 300, 200, 200], 500)
    }

    #[test]
    fn test_policy_relay_then_handoff() {
        let current = standard_set(0, 0);
        let next = standard_set(1, 1000);
        let mut engine =
            RelayStateMachine::with_genesis_policy(config(), &current.policy).unwrap();

        let event = engine
            .submit(&current.policy_payload(&next.policy, &[0, 1]))
            .unwrap();
        assert_eq!(event, RelayEvent::SigningPolicyRelayed { reward_epoch_id: 1 });
        assert_eq!(
            engine.policy_fingerprint(1),
            Some(signing_policy_hash(&next.policy).unwrap())
        );

        // Epoch 1 rounds now verify under the new policy at the ordinary
        // threshold.
        engine
            .submit(&next.message_payload(message(7, 1500, false), &[0, 1]))
            .unwrap();

        // And the old policy is refused for them.
        assert_eq!(
            engine.submit(&current.message_payload(message(7, 1600, false), &[0, 1])),
            Err(RelayError::MustUseNewSignPolicy)
        );
    }

    #[test]
    fn test_policy_relay_requires_quorum_of_current_policy() {
        let current = standard_set(0, 0);
        let next = standard_set(1, 1000);
        let mut engine =
            RelayStateMachine::with_genesis_policy(config(), &current.policy).unwrap();

        // Weight 500 == threshold: not strictly above.
        assert_eq!(
            engine.submit(&current.policy_payload(&next.policy, &[0, 3])),
            Err(RelayError::NotEnoughWeight)
        );
        assert_eq!(engine.last_initialized_reward_epoch(), Some(0));
    }

    #[test]
    fn test_outsiders_cannot_relay_a_policy() {
        let current = standard_set(0, 0);
        let imposters = standard_set(0, 0);
        let next = standard_set(1, 1000);
        let mut engine =
            RelayStateMachine::with_genesis_policy(config(), &current.policy).unwrap();

        // Imposters present their own voter set as the current policy.
        assert_eq!(
            engine.submit(&imposters.policy_payload(&next.policy, &[0, 1])),
            Err(RelayError::NotWithLastInitialized)
        );

        // Imposters sign under the genuine policy bytes: recovery yields
        // addresses that are not the indexed voters.
        let digest = signing_policy_hash(&next.policy).unwrap();
        let forged = relay_codec::encode_relay_message(&relay_types::RelayMessage::NewSigningPolicy {
            signing_policy: current.policy.clone(),
            new_signing_policy: next.policy.clone(),
            signatures: imposters.sign(&digest, &[0, 1]),
        })
        .unwrap();
        assert_eq!(engine.submit(&forged), Err(RelayError::WrongSignature));
    }

    #[test]
    fn test_grace_window_round_just_before_new_start() {
        // Next policy starts at 1200; round 1199 nominally belongs to epoch 1
        // but is still governed by epoch 0 at the increased threshold.
        let current = standard_set(0, 0);
        let next = standard_set(1, 1200);
        let mut engine =
            RelayStateMachine::with_genesis_policy(config(), &current.policy).unwrap();
        engine
            .submit(&current.policy_payload(&next.policy, &[0, 1, 2]))
            .unwrap();

        let msg = message(7, 1199, false);
        // Ordinary quorum weight 600 > 500 is no longer enough: the grace
        // window requires > 600.
        assert_eq!(
            engine.submit(&current.message_payload(msg, &[0, 1])),
            Err(RelayError::NotEnoughWeight)
        );
        // 800 > 600 passes under the old policy.
        engine
            .submit(&current.message_payload(msg, &[0, 1, 2]))
            .unwrap();

        // From the start round on, only the new policy is admissible.
        assert_eq!(
            engine.submit(&current.message_payload(message(7, 1200, false), &[0, 1, 2, 3])),
            Err(RelayError::MustUseNewSignPolicy)
        );
    }

    #[test]
    fn test_stale_policy_is_message_too_old() {
        let sets: Vec<VoterSet> = (0..4).map(|e| standard_set(e, e * 1000)).collect();
        let mut engine =
            RelayStateMachine::with_genesis_policy(config(), &sets[0].policy).unwrap();
        for pair in sets.windows(2) {
            engine
                .submit(&pair[0].policy_payload(&pair[1].policy, &[0, 1]))
                .unwrap();
        }

        // Epoch 0 is 3 epochs behind last (3); the window is 2.
        assert_eq!(
            engine.submit(&sets[0].message_payload(message(7, 500, false), &[0, 1])),
            Err(RelayError::MessageTooOld)
        );

        // Epoch 1 is within the window but its rounds are long past: the
        // policy no longer matches the round's epoch.
        assert_eq!(
            engine.submit(&sets[1].message_payload(message(7, 3500, false), &[0, 1])),
            Err(RelayError::WrongSignPolicyRewardEpoch)
        );
    }

    #[test]
    fn test_tampered_policy_bytes_mismatch_fingerprint() {
        let current = standard_set(0, 0);
        let mut engine =
            RelayStateMachine::with_genesis_policy(config(), &current.policy).unwrap();

        let mut tampered = VoterSet {
            keys: current.keys.clone(),
            policy: current.policy.clone(),
        };
        tampered.policy.threshold = 499;

        assert_eq!(
            engine.submit(&tampered.message_payload(message(7, 500, false), &[0, 1])),
            Err(RelayError::SigningPolicyHashMismatch)
        );
    }
}
