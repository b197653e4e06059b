//! Double-submit CSRF tokens.
//!
//! `GET /csrftoken` hands the client a random token in the response body
//! and an HMAC-SHA256 signature of that token in the `csrf_token` cookie.
//! A mutating request must echo the raw token in the `x-csrf-token`
//! header; the server re-signs the header value and compares it with the
//! cookie. A cross-site request can make the browser send the cookie but
//! cannot read the token to put in the header, so the pair never matches.

use hmac::{Hmac, Mac};
use rand::distr::Alphanumeric;
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of the random CSRF token, in characters.
const CSRF_TOKEN_LENGTH: usize = 32;

/// Generate a fresh random CSRF token.
pub fn generate_csrf_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CSRF_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Sign a CSRF token with the server signing key.
///
/// The signature, not the token, is what goes in the cookie.
pub fn sign_csrf_token(token: &str, signing_key: &str) -> String {
    format!("{:x}", mac_for(token, signing_key).finalize().into_bytes())
}

/// Check a token/signature pair minted by [`sign_csrf_token`].
///
/// The comparison runs in constant time via [`Mac::verify_slice`].
pub fn verify_csrf_pair(token: &str, signature: &str, signing_key: &str) -> bool {
    let Some(expected) = decode_hex(signature) else {
        return false;
    };
    mac_for(token, signing_key).verify_slice(&expected).is_ok()
}

fn mac_for(token: &str, signing_key: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(signing_key.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    mac
}

/// Decode the cookie's hex signature back into bytes; `None` for
/// anything that is not well-formed hex.
fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if !hex.is_ascii() || hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_random_alphanumeric() {
        let a = generate_csrf_token();
        let b = generate_csrf_token();

        assert_eq!(a.len(), CSRF_TOKEN_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_sign_and_verify_pair() {
        let token = generate_csrf_token();
        let signature = sign_csrf_token(&token, "server-key");

        assert!(verify_csrf_pair(&token, &signature, "server-key"));
    }

    #[test]
    fn test_wrong_token_or_key_fails() {
        let token = generate_csrf_token();
        let signature = sign_csrf_token(&token, "server-key");

        assert!(!verify_csrf_pair("some-other-token", &signature, "server-key"));
        assert!(!verify_csrf_pair(&token, &signature, "another-key"));
        assert!(!verify_csrf_pair(&token, "tampered-signature", "server-key"));
    }

    #[test]
    fn test_malformed_cookie_signature_fails() {
        let token = generate_csrf_token();
        let signature = sign_csrf_token(&token, "server-key");

        // Truncated hex, odd length, and non-hex input all fail cleanly.
        assert!(!verify_csrf_pair(&token, &signature[..32], "server-key"));
        assert!(!verify_csrf_pair(&token, &signature[..31], "server-key"));
        assert!(!verify_csrf_pair(&token, "zz".repeat(32).as_str(), "server-key"));
        assert!(!verify_csrf_pair(&token, "", "server-key"));
    }

    #[test]
    fn test_signature_is_hex_sha256() {
        let signature = sign_csrf_token("token", "key");

        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
