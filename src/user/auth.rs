//! Subsonic password checks.
//!
//! Clients send the password either in clear (`p=secret`) or hex encoded
//! with an `enc:` prefix (`p=enc:736563726574`).

const HEX_PASSWORD_PREFIX: &str = "enc:";

/// Decodes the `p` parameter into the clear-text password.
/// Returns None if it carries the `enc:` prefix but is not valid hex UTF-8.
pub fn decode_password_param(param: &str) -> Option<String> {
    match param.strip_prefix(HEX_PASSWORD_PREFIX) {
        Some(hex) => decode_hex(hex).and_then(|bytes| String::from_utf8(bytes).ok()),
        None => Some(param.to_string()),
    }
}

pub fn verify_password(stored: &str, param: &str) -> bool {
    match decode_password_param(param) {
        Some(provided) => provided == stored,
        None => false,
    }
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    hex.as_bytes()
        .chunks(2)
        .map(|pair| {
            let s = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(s, 16).ok()
        })
        .collect()
}
