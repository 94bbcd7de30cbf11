//! # Random Number Cache
//!
//! Random values derived from finalized merkle roots of the designated
//! random-number protocol: all historical rounds plus a pointer to the most
//! recent one.

use primitive_types::U256;
use relay_codec::keccak256;
use relay_types::{Hash, RelayConfig, RelayError, RelayResult};
use std::collections::HashMap;

/// A random value as reported to consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomNumber {
    /// The derived value.
    pub value: U256,
    /// Whether the source round was considered cryptographically unbiased.
    pub is_secure_random: bool,
    /// End timestamp of the source voting round.
    pub timestamp: u64,
}

#[derive(Clone, Copy, Debug)]
struct RandomRecord {
    value: U256,
    is_secure_random: bool,
}

/// One-way transform from a finalized merkle root to the random value.
///
/// The same transform serves historical and latest reads, so a value never
/// changes after finalization.
pub fn derive_random(merkle_root: &Hash) -> U256 {
    U256::from_big_endian(&keccak256(merkle_root))
}

/// Per-round random values plus the latest pointer.
#[derive(Debug, Default)]
pub struct RandomNumberCache {
    history: HashMap<u32, RandomRecord>,
    latest_round: Option<u32>,
}

impl RandomNumberCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the random value for a finalized round. The latest pointer only
    /// moves forward: a late finalization of an older round is recorded but
    /// does not become "latest".
    pub fn store(&mut self, voting_round_id: u32, merkle_root: &Hash, is_secure_random: bool) {
        self.history.insert(
            voting_round_id,
            RandomRecord {
                value: derive_random(merkle_root),
                is_secure_random,
            },
        );
        if self.latest_round.map_or(true, |latest| voting_round_id > latest) {
            self.latest_round = Some(voting_round_id);
        }
    }

    /// The random value of the highest finalized round.
    pub fn latest(&self, config: &RelayConfig) -> RelayResult<RandomNumber> {
        let round = self.latest_round.ok_or(RelayError::NoRandomNumber)?;
        self.historical(round, config)
    }

    /// The random value of a specific round.
    pub fn historical(&self, voting_round_id: u32, config: &RelayConfig) -> RelayResult<RandomNumber> {
        let record = self
            .history
            .get(&voting_round_id)
            .ok_or(RelayError::NoRandomNumber)?;
        Ok(RandomNumber {
            value: record.value,
            is_secure_random: record.is_secure_random,
            timestamp: config.voting_round_end_ts(voting_round_id),
        })
    }
}
