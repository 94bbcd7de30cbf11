//! # Protocol Message Codec
//!
//! Fixed 38-byte layout:
//! `protocolId:1 | votingRoundId:4 BE | secureRandomFlag:1 | merkleRoot:32`.
//!
//! The flag byte admits exactly `0x00` and `0x01`; anything else is a decode
//! failure, so a message never round-trips through a non-canonical encoding.

use crate::cursor::ByteReader;
use crate::keccak256;
use relay_types::{Hash, ProtocolMessage, RelayError, RelayResult};

/// Encoded size of a protocol message.
pub const PROTOCOL_MESSAGE_BYTES: usize = 38;

/// Encode a protocol message into its fixed 38-byte layout.
pub fn encode_protocol_message(message: &ProtocolMessage) -> Vec<u8> {
    let mut out = Vec::with_capacity(PROTOCOL_MESSAGE_BYTES);
    out.push(message.protocol_id);
    out.extend_from_slice(&message.voting_round_id.to_be_bytes());
    out.push(message.is_secure_random as u8);
    out.extend_from_slice(&message.merkle_root);
    out
}

/// Decode a standalone protocol message; the input must be exactly 38 bytes.
pub fn decode_protocol_message(bytes: &[u8]) -> RelayResult<ProtocolMessage> {
    if bytes.len() != PROTOCOL_MESSAGE_BYTES {
        return Err(RelayError::TooShortMessage);
    }
    let mut reader = ByteReader::new(bytes);
    decode_protocol_message_from(&mut reader)
}

/// Decode a protocol message from the cursor's current position.
pub(crate) fn decode_protocol_message_from(
    reader: &mut ByteReader<'_>,
) -> RelayResult<ProtocolMessage> {
    let protocol_id = reader.read_u8().ok_or(RelayError::TooShortMessage)?;
    let voting_round_id = reader.read_u32().ok_or(RelayError::TooShortMessage)?;
    let flag = reader.read_u8().ok_or(RelayError::TooShortMessage)?;
    let is_secure_random = match flag {
        0x00 => false,
        0x01 => true,
        _ => return Err(RelayError::InvalidSecureRandomFlag),
    };
    let merkle_root: Hash = reader.read_array().ok_or(RelayError::TooShortMessage)?;

    Ok(ProtocolMessage {
        protocol_id,
        voting_round_id,
        is_secure_random,
        merkle_root,
    })
}

/// Signed digest of a protocol message: keccak256 of its canonical encoding.
pub fn protocol_message_hash(message: &ProtocolMessage) -> Hash {
    keccak256(&encode_protocol_message(message))
}
