//! # Relay Shared Types
//!
//! Single source of truth for the entities, errors, events, and configuration
//! shared by the relay verification crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every cross-crate type is defined here.
//! - **Stable Rejection Reasons**: every failure surfaces as one fixed
//!   [`RelayError`] display string; callers can match on the reason.
//! - **Immutable Values**: wire entities are plain values; all state lives in
//!   the engine crate.

pub mod config;
pub mod entities;
pub mod errors;
pub mod events;

pub use config::{RelayConfig, BIPS_BASE, MAX_TOTAL_WEIGHT, MAX_VOTERS};
pub use entities::{
    Address, Hash, ProtocolMessage, RelayMessage, SignatureRecord, SigningPolicy,
};
pub use errors::{RelayError, RelayResult};
pub use events::RelayEvent;
