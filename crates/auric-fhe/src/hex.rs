//! Lowercase hex encode/decode helpers shared by the encoder and the
//! proof scheme. Decoding is strict: odd lengths and non-hex characters
//! are rejected rather than truncated.

/// Encode bytes as lowercase hex.
pub(crate) fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a lowercase hex string. Returns `None` for odd-length or
/// non-hex input.
pub(crate) fn decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 || !s.is_ascii() {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
