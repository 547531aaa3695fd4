//! API token formatting, parsing, and hashing.
//!
//! Raw tokens look like `tw_<64 lowercase hex>` and are only ever shown at
//! issue time. Storage keeps the SHA-256 digest of the full token string.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroize;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "tw_";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

const HEX: &[u8; 16] = b"0123456789abcdef";

#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    ApiTokenSecret::from_bytes(secret)
}

#[must_use]
pub fn format_api_token(secret: &ApiTokenSecret) -> String {
    let mut token = String::with_capacity(API_TOKEN_PREFIX.len() + API_TOKEN_SECRET_HEX_CHARS);

    token.push_str(API_TOKEN_PREFIX);
    push_hex(&mut token, secret.as_bytes());

    token
}

/// Check a bearer token's shape before it is hashed and looked up.
///
/// # Errors
///
/// Returns an error when the prefix is missing or the secret is not exactly
/// 64 lowercase hex characters.
pub fn parse_api_token(token: &str) -> Result<ApiTokenSecret, ApiTokenError> {
    let secret_hex = token
        .strip_prefix(API_TOKEN_PREFIX)
        .ok_or(ApiTokenError::InvalidFormat)?;

    decode_secret_hex(secret_hex)
        .map(ApiTokenSecret::from_bytes)
        .ok_or(ApiTokenError::InvalidSecretEncoding)
}

/// Lowercase hex SHA-256 digest of a raw token, as stored in `api_tokens.token_hash`.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let mut hash = String::with_capacity(digest.len() * 2);

    push_hex(&mut hash, &digest);

    hash
}

fn push_hex(out: &mut String, bytes: &[u8]) {
    for byte in bytes {
        out.push(char::from(HEX[usize::from(byte >> 4)]));
        out.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }
}

fn decode_secret_hex(secret_hex: &str) -> Option<[u8; API_TOKEN_SECRET_BYTES]> {
    if secret_hex.len() != API_TOKEN_SECRET_HEX_CHARS {
        return None;
    }

    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?;
    }

    Some(secret)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_and_format_round_trip() -> TestResult {
        let secret = ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(&secret);
        let parsed = parse_api_token(&token)?;

        assert_eq!(parsed.as_bytes(), secret.as_bytes());

        Ok(())
    }

    #[test]
    fn formatted_token_has_prefix_and_hex_secret() {
        let token = format_api_token(&generate_api_token_secret());

        assert_eq!(token.len(), 67, "unexpected token length: {token}");
        assert!(token.starts_with("tw_"), "missing prefix: {token}");
        assert!(
            token
                .trim_start_matches("tw_")
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)),
            "secret must be lowercase hex: {token}"
        );
    }

    #[test]
    fn generated_secrets_differ() {
        let first = format_api_token(&generate_api_token_secret());
        let second = format_api_token(&generate_api_token_secret());

        assert_ne!(first, second, "two generated tokens should not collide");
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let token = format!("lt_{}", "a".repeat(64));

        assert!(matches!(
            parse_api_token(&token),
            Err(ApiTokenError::InvalidFormat)
        ));
    }

    #[test]
    fn parse_rejects_short_secret() {
        assert!(matches!(
            parse_api_token("tw_abcdef"),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn parse_rejects_uppercase_or_non_hex_secret() {
        let upper = format!("tw_{}", "A".repeat(64));
        let junk = format!("tw_{}", "z".repeat(64));

        assert!(parse_api_token(&upper).is_err(), "uppercase hex is not canonical");
        assert!(parse_api_token(&junk).is_err(), "non-hex secret");
    }

    #[test]
    fn hash_matches_known_sha256_digest() {
        assert_eq!(
            hash_api_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn secret_debug_output_is_redacted() {
        let secret = ApiTokenSecret::from_bytes([0x11; API_TOKEN_SECRET_BYTES]);

        assert_eq!(format!("{secret:?}"), "ApiTokenSecret(**redacted**)");
    }
}
