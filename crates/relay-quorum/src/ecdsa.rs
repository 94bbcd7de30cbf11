//! # ECDSA Recovery (secp256k1)
//!
//! Pure signer recovery: no I/O, no state. Every malformed or unrecoverable
//! signature maps to the single stable "Wrong signature" reason, so the
//! quorum layer reports one violation regardless of which internal check
//! tripped.
//!
//! ## Security Notes
//!
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Malleability Prevention (EIP-2)**: S must be strictly below n/2
//! - **Constant-Time Comparisons**: scalar checks use the `subtle` crate

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use relay_types::{Address, Hash, RelayError, RelayResult, SignatureRecord};
use sha3::{Digest, Keccak256};
use subtle::{Choice, ConstantTimeEq};

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for the malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Recover the signer's address from a digest and a recoverable signature.
///
/// Validations performed:
/// 1. Recovery ID (v) is 0, 1, 27, or 28
/// 2. R and S are in [1, n-1]
/// 3. S is in the lower half of the curve order (EIP-2)
/// 4. Public key recovery succeeds
pub fn recover_signer(digest: &Hash, signature: &SignatureRecord) -> RelayResult<Address> {
    let recovery_id = parse_recovery_id(signature.v)?;

    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(RelayError::WrongSignature);
    }
    if !is_low_s(&signature.s) {
        return Err(RelayError::WrongSignature);
    }

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);
    let sig = Signature::from_slice(&sig_bytes).map_err(|_| RelayError::WrongSignature)?;

    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| RelayError::WrongSignature)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Derive an Ethereum-style address from a public key: last 20 bytes of
/// keccak256 over the uncompressed point without its 0x04 prefix.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let pubkey_slice = pubkey_bytes.as_bytes();

    let mut hasher = Keccak256::new();
    hasher.update(&pubkey_slice[1..]);
    let hash = hasher.finalize();

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Parse a recovery ID, accepting both raw (0/1) and Ethereum (27/28) forms.
fn parse_recovery_id(v: u8) -> RelayResult<RecoveryId> {
    let byte = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        _ => return Err(RelayError::WrongSignature),
    };
    RecoveryId::from_byte(byte).ok_or(RelayError::WrongSignature)
}

/// Check that a scalar is in [1, n-1], in constant time.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let less = ct_less_than(scalar, &SECP256K1_ORDER);
    (!is_zero & less).into()
}

/// Check that S is strictly below n/2 (EIP-2), in constant time.
fn is_low_s(s: &[u8; 32]) -> bool {
    ct_less_than(s, &SECP256K1_HALF_ORDER).into()
}

/// Constant-time big-endian `a < b` over 32-byte values.
///
/// Walks every byte without early returns; the first differing byte decides,
/// later bytes cannot overwrite the decision.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((a[i] < b[i]) as u8);
        let byte_greater = Choice::from((a[i] > b[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less
}
