//! # Relay Events
//!
//! Observable side effects of accepted submissions, consumed by external
//! collaborators (indexers, the hosting environment).

use crate::entities::Hash;
use serde::{Deserialize, Serialize};

/// Event emitted by the state machine when a submission is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayEvent {
    /// A signing policy was installed for a reward epoch, either directly or
    /// via a quorum-verified relay.
    SigningPolicyInitialized {
        reward_epoch_id: u32,
        start_voting_round_id: u32,
        threshold: u16,
        voters_count: u16,
    },
    /// A quorum-verified handoff to the next epoch's policy was accepted.
    SigningPolicyRelayed { reward_epoch_id: u32 },
    /// A protocol message was finalized for its voting round.
    ProtocolMessageRelayed {
        protocol_id: u8,
        voting_round_id: u32,
        is_secure_random: bool,
        merkle_root: Hash,
    },
}
