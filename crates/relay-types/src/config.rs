//! # Relay Configuration
//!
//! Static parameters of the verification engine: the reward-epoch schedule,
//! the grace-window threshold increase, the replay/finalization window, and
//! the privileged policy setter.

use crate::entities::Address;
use serde::{Deserialize, Serialize};

/// Hard cap on a signing policy's voter list.
///
/// Bounds worst-case verification cost per submission.
pub const MAX_VOTERS: usize = 300;

/// Hard cap on a signing policy's summed weights.
pub const MAX_TOTAL_WEIGHT: u32 = u16::MAX as u32;

/// Basis-point denominator for threshold scaling.
pub const BIPS_BASE: u32 = 10_000;

/// Relay engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Sole address allowed to install policies through the direct path.
    pub signing_policy_setter: Address,
    /// Protocol whose finalized merkle roots feed the random number cache.
    pub random_number_protocol_id: u8,
    /// Unix timestamp at which voting round 0 started.
    pub first_voting_round_start_ts: u64,
    /// Duration of one voting round in seconds.
    pub voting_round_duration_seconds: u64,
    /// Voting round at which reward epoch 0 nominally starts.
    pub first_reward_epoch_start_voting_round_id: u32,
    /// Nominal number of voting rounds per reward epoch.
    pub voting_rounds_per_reward_epoch: u32,
    /// Threshold increase, in basis points, applied inside the grace window.
    pub threshold_increase_bips: u32,
    /// How many reward epochs behind the last initialized one a submission
    /// may still reference before it is rejected as too old.
    pub message_finalization_window_in_reward_epochs: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            signing_policy_setter: [0u8; 20],
            random_number_protocol_id: 1,
            first_voting_round_start_ts: 1_704_067_200,
            voting_round_duration_seconds: 90,
            first_reward_epoch_start_voting_round_id: 0,
            voting_rounds_per_reward_epoch: 3360,
            threshold_increase_bips: 2_000,
            message_finalization_window_in_reward_epochs: 100,
        }
    }
}

impl RelayConfig {
    /// Reward epoch a voting round nominally belongs to.
    ///
    /// Rounds before the first reward epoch's start map to epoch 0.
    pub fn expected_reward_epoch_of(&self, voting_round_id: u32) -> u32 {
        voting_round_id.saturating_sub(self.first_reward_epoch_start_voting_round_id)
            / self.voting_rounds_per_reward_epoch
    }

    /// Unix timestamp at which a voting round ends.
    pub fn voting_round_end_ts(&self, voting_round_id: u32) -> u64 {
        self.first_voting_round_start_ts
            + self.voting_round_duration_seconds * (voting_round_id as u64 + 1)
    }

    /// Threshold required inside the grace window: the policy threshold
    /// scaled up by `threshold_increase_bips`.
    pub fn increased_threshold(&self, threshold: u16) -> u32 {
        threshold as u32 * (BIPS_BASE + self.threshold_increase_bips) / BIPS_BASE
    }
}
