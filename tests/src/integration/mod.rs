//! Cross-crate scenarios driven through encoded payloads.

pub mod end_to_end;
pub mod epoch_transitions;
