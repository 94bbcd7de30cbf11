//! # Relay Verification Engine
//!
//! The stateful half of the relay verifier: which signing policy governs
//! which voting round, which messages are already finalized, and the random
//! values derived from finalized roots.
//!
//! ## Architecture
//!
//! - **Domain state** (`policy_store`, `finalization`, `random`): owned
//!   structs with well-defined lifecycles, mutated only through the
//!   operations below.
//! - **Service layer** (`state_machine`): the single entry point. Each
//!   submission is processed atomically; every check runs before the first
//!   state write, so a rejection leaves no partial state behind.

pub mod finalization;
pub mod policy_store;
pub mod random;
pub mod state_machine;


pub use finalization::FinalizationLedger;
pub use policy_store::{EpochPolicyStore, PolicyRecord};
pub use random::{derive_random, RandomNumber, RandomNumberCache};
pub use state_machine::RelayStateMachine;
