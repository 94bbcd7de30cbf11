//! # Relay Test Suite
//!
//! Workspace-level scenarios exercising the full pipeline:
//! raw bytes → codec → state machine → {quorum verifier, policy store} →
//! {finalization ledger, random cache}.
//!
//! ```bash
//! cargo test -p relay-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
