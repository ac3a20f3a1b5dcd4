//! Hex rendering for raw contract/token bytes
//!
//! Bridge-created assets on the Proton chain carry their origin EVM contract
//! address and token id as raw byte arrays. The claim step needs them back as
//! `0x`-prefixed hex strings. Each byte is zero-padded to two digits so the
//! output is unambiguous for bytes below 0x10.

/// Render a byte sequence as a `0x`-prefixed lowercase hex string.
///
/// Output length is always `2 + 2 * bytes.len()`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a `0x`-prefixed hex string back into bytes.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}
