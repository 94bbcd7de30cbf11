//! # Weighted Quorum Verification
//!
//! Recovers signer addresses from recoverable secp256k1 signatures and checks
//! a submission's aggregate voter weight against a signing policy's
//! threshold.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: signatures with high S values are
//!   rejected.
//! - **No Double Counting**: voter indices must be strictly increasing across
//!   a submission, so each voter's weight is summed at most once without a
//!   seen-set.
//! - **Strict Threshold**: a quorum passes only with aggregate weight
//!   strictly above the threshold.

pub mod ecdsa;
pub mod verifier;

pub use ecdsa::{address_from_pubkey, recover_signer};
pub use verifier::{verify_quorum, QuorumVerifier};
