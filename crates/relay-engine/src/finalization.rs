//! # Finalization Ledger
//!
//! Set-once map from `(protocolId, votingRoundId)` to the finalized merkle
//! root. A second write to the same key is the replay rejection.

use relay_types::{Hash, RelayError, RelayResult};
use std::collections::HashMap;

/// Finalized merkle roots, one per protocol and voting round.
#[derive(Debug, Default)]
pub struct FinalizationLedger {
    roots: HashMap<(u8, u32), Hash>,
}

impl FinalizationLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finalization. Fails if the pair is already finalized.
    pub fn record(
        &mut self,
        protocol_id: u8,
        voting_round_id: u32,
        merkle_root: Hash,
    ) -> RelayResult<()> {
        let key = (protocol_id, voting_round_id);
        if self.roots.contains_key(&key) {
            return Err(RelayError::AlreadyRelayed);
        }
        self.roots.insert(key, merkle_root);
        Ok(())
    }

    /// The finalized root for a pair, if any.
    pub fn finalized_root(&self, protocol_id: u8, voting_round_id: u32) -> Option<Hash> {
        self.roots.get(&(protocol_id, voting_round_id)).copied()
    }

    /// Whether the pair is already finalized.
    pub fn is_finalized(&self, protocol_id: u8, voting_round_id: u32) -> bool {
        self.roots.contains_key(&(protocol_id, voting_round_id))
    }
}
