//! End-to-end finalization scenario: 100 voters, equal weight 500
//! (total 50,000), threshold 25,000.

#[cfg(test)]
mod tests {
    use crate::fixtures::{message, VoterSet};
    use relay_engine::{derive_random, RelayStateMachine};
    use relay_types::{RelayConfig, RelayError, RelayEvent};

    fn config() -> RelayConfig {
        RelayConfig {
            random_number_protocol_id: 1,
            first_reward_epoch_start_voting_round_id: 0,
            voting_rounds_per_reward_epoch: 1000,
            ..RelayConfig::default()
        }
    }

    fn hundred_voter_engine() -> (RelayStateMachine, VoterSet) {
        let set = VoterSet::equal_weights(0, 0, 100, 500, 25_000);
        let engine = RelayStateMachine::with_genesis_policy(config(), &set.policy).unwrap();
        (engine, set)
    }

    fn indices(n: u16) -> Vec<u16> {
        (0..n).collect()
    }

    #[test]
    fn test_fifty_one_voters_finalize() {
        let (mut engine, set) = hundred_voter_engine();
        let msg = message(7, 400, false);

        // 51 * 500 = 25,500 > 25,000.
        let event = engine
            .submit(&set.message_payload(msg, &indices(51)))
            .unwrap();

        assert_eq!(
            event,
            RelayEvent::ProtocolMessageRelayed {
                protocol_id: 7,
                voting_round_id: 400,
                is_secure_random: false,
                merkle_root: msg.merkle_root,
            }
        );
        assert_eq!(engine.finalized_root(7, 400), Some(msg.merkle_root));
    }

    #[test]
    fn test_second_submission_is_already_relayed() {
        let (mut engine, set) = hundred_voter_engine();
        let msg = message(7, 400, false);

        engine
            .submit(&set.message_payload(msg, &indices(51)))
            .unwrap();

        // A different but still-valid quorum cannot re-finalize.
        let other_quorum: Vec<u16> = (40..95).collect();
        assert_eq!(
            engine.submit(&set.message_payload(msg, &other_quorum)),
            Err(RelayError::AlreadyRelayed)
        );
    }

    #[test]
    fn test_fifty_voters_are_not_a_quorum() {
        let (mut engine, set) = hundred_voter_engine();
        let msg = message(7, 400, false);

        // 50 * 500 = 25,000 == threshold: strictly-above is required.
        assert_eq!(
            engine.submit(&set.message_payload(msg, &indices(50))),
            Err(RelayError::NotEnoughWeight)
        );
        assert!(!engine.is_finalized(7, 400));

        // The same engine still accepts the real quorum afterwards.
        engine
            .submit(&set.message_payload(msg, &indices(51)))
            .unwrap();
    }

    #[test]
    fn test_random_value_derivation() {
        let (mut engine, set) = hundred_voter_engine();

        let early = message(1, 300, false);
        let late = message(1, 310, true);
        engine
            .submit(&set.message_payload(early, &indices(51)))
            .unwrap();
        engine
            .submit(&set.message_payload(late, &indices(51)))
            .unwrap();

        let latest = engine.latest_random().unwrap();
        assert_eq!(latest.value, derive_random(&late.merkle_root));
        assert!(latest.is_secure_random);
        assert_eq!(latest.timestamp, config().voting_round_end_ts(310));

        let historical = engine.historical_random(300).unwrap();
        assert_eq!(historical.value, derive_random(&early.merkle_root));
        assert!(!historical.is_secure_random);

        assert_eq!(
            engine.historical_random(305),
            Err(RelayError::NoRandomNumber)
        );
    }

    #[test]
    fn test_truncated_payload_rejected_without_state_change() {
        let (mut engine, set) = hundred_voter_engine();
        let msg = message(7, 400, false);
        let payload = set.message_payload(msg, &indices(51));

        assert_eq!(
            engine.submit(&payload[..payload.len() - 1]),
            Err(RelayError::NotEnoughSignatures)
        );
        assert!(!engine.is_finalized(7, 400));
    }

    #[test]
    fn test_shuffled_quorum_order_is_rejected() {
        let (mut engine, set) = hundred_voter_engine();
        let msg = message(7, 400, false);

        let mut order = indices(51);
        order.swap(10, 40);
        assert_eq!(
            engine.submit(&set.message_payload(msg, &order)),
            Err(RelayError::IndexOutOfOrder)
        );
    }
}
