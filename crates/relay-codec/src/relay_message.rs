//! # Relay Message Codec
//!
//! Layout:
//!
//! ```text
//! currentSigningPolicy | sizeIndicator:1 | body | signaturesBlock
//! ```
//!
//! The indicator byte selects the branch. `0x00` means the body is a 38-byte
//! protocol message. Any other value means the body is the next epoch's
//! signing policy and the indicator carries that policy's encoded length in
//! 32-byte words (`ceil(len / 32)`), which keeps one byte sufficient for the
//! 300-voter cap.
//!
//! The signatures block is the remainder of the payload: one or more 67-byte
//! records, `index:2 | v:1 | r:32 | s:32`.

use crate::cursor::ByteReader;
use crate::protocol_message::{decode_protocol_message_from, encode_protocol_message};
use crate::signing_policy::{
    decode_signing_policy_from, encode_signing_policy, signing_policy_encoded_len,
};
use relay_types::{RelayError, RelayMessage, RelayResult, SignatureRecord};

/// Encoded size of one signature record.
pub const SIGNATURE_RECORD_BYTES: usize = 67;

/// Indicator value for a new signing policy of the given encoded length.
fn size_indicator(encoded_len: usize) -> u8 {
    encoded_len.div_ceil(32) as u8
}

/// Encode a relay submission.
pub fn encode_relay_message(message: &RelayMessage) -> RelayResult<Vec<u8>> {
    let mut out = encode_signing_policy(message.signing_policy())?;

    match message {
        RelayMessage::NewSigningPolicy {
            new_signing_policy, ..
        } => {
            let policy_bytes = encode_signing_policy(new_signing_policy)?;
            out.push(size_indicator(policy_bytes.len()));
            out.extend_from_slice(&policy_bytes);
        }
        RelayMessage::ProtocolMessageRelay { message, .. } => {
            out.push(0x00);
            out.extend_from_slice(&encode_protocol_message(message));
        }
    }

    for signature in message.signatures() {
        out.extend_from_slice(&signature.index.to_be_bytes());
        out.push(signature.v);
        out.extend_from_slice(&signature.r);
        out.extend_from_slice(&signature.s);
    }

    Ok(out)
}

/// Decode a relay submission.
pub fn decode_relay_message(bytes: &[u8]) -> RelayResult<RelayMessage> {
    let mut reader = ByteReader::new(bytes);
    let signing_policy = decode_signing_policy_from(&mut reader)?;

    let indicator = reader.read_u8().ok_or(RelayError::NoNewSignPolicySize)?;

    if indicator != 0x00 {
        let new_signing_policy = decode_signing_policy_from(&mut reader)?;
        let expected =
            size_indicator(signing_policy_encoded_len(new_signing_policy.voters.len()));
        if indicator != expected {
            return Err(RelayError::WrongSizeForNewSignPolicy);
        }
        let signatures = decode_signatures(reader.rest())?;

        Ok(RelayMessage::NewSigningPolicy {
            signing_policy,
            new_signing_policy,
            signatures,
        })
    } else {
        let message = decode_protocol_message_from(&mut reader)?;
        let signatures = decode_signatures(reader.rest())?;

        Ok(RelayMessage::ProtocolMessageRelay {
            signing_policy,
            message,
            signatures,
        })
    }
}

/// Parse the trailing signatures block.
///
/// The block must be non-empty and an exact multiple of the record size;
/// a truncated or empty block is "Not enough signatures".
fn decode_signatures(bytes: &[u8]) -> RelayResult<Vec<SignatureRecord>> {
    if bytes.is_empty() || bytes.len() % SIGNATURE_RECORD_BYTES != 0 {
        return Err(RelayError::NotEnoughSignatures);
    }

    let mut reader = ByteReader::new(bytes);
    let mut signatures = Vec::with_capacity(bytes.len() / SIGNATURE_RECORD_BYTES);
    while !reader.is_empty() {
        // Block length is already an exact multiple; reads cannot fail here.
        let index = reader.read_u16().ok_or(RelayError::NotEnoughSignatures)?;
        let v = reader.read_u8().ok_or(RelayError::NotEnoughSignatures)?;
        let r = reader.read_array().ok_or(RelayError::NotEnoughSignatures)?;
        let s = reader.read_array().ok_or(RelayError::NotEnoughSignatures)?;
        signatures.push(SignatureRecord { index, v, r, s });
    }

    Ok(signatures)
}
