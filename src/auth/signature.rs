//! HMAC-SHA256 signature generation for Coincheck API authentication.
//!
//! Coincheck private endpoints require a signature computed as:
//! ```text
//! hex(HMAC-SHA256(nonce + url + body, api_secret))
//! ```
//!
//! `url` is the full request URL including the query string, exactly as sent,
//! and `body` is the raw request body (empty for reads). The result goes in
//! the `ACCESS-SIGNATURE` header.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::CoincheckError;

type HmacSha256 = Hmac<Sha256>;

/// Sign a request for Coincheck's private API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `nonce` - The nonce value sent in `ACCESS-NONCE`
/// * `url` - The full request URL (e.g., "https://coincheck.com/api/accounts")
/// * `body` - The raw request body, or `""` when there is none
///
/// # Returns
///
/// Lowercase hex-encoded HMAC-SHA256 signature.
///
/// # Example
///
/// ```rust
/// use coincheck_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "api_secret")?;
/// let signature = sign_request(
///     &credentials,
///     1234567890,
///     "https://coincheck.com/api/accounts/balance",
///     "",
/// )?;
/// assert_eq!(signature.len(), 64);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    nonce: u64,
    url: &str,
    body: &str,
) -> Result<String, CoincheckError> {
    let mut hmac = HmacSha256::new_from_slice(credentials.secret_bytes())
        .map_err(|e| CoincheckError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(nonce.to_string().as_bytes());
    hmac.update(url.as_bytes());
    hmac.update(body.as_bytes());

    Ok(hex::encode(hmac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://coincheck.com/api/accounts/balance";

    fn credentials() -> Credentials {
        Credentials::new("key", "my_secret").unwrap()
    }

    #[test]
    fn test_signature_matches_hmac_of_concatenation() {
        let credentials = Credentials::new("key", "Jefe").unwrap();
        let mut hmac = HmacSha256::new_from_slice(b"Jefe").unwrap();
        hmac.update(b"1609459200https://coincheck.com/api/exchange/orders{\"pair\":\"btc_jpy\"}");
        let expected = hex::encode(hmac.finalize().into_bytes());

        let signature = sign_request(
            &credentials,
            1609459200,
            "https://coincheck.com/api/exchange/orders",
            r#"{"pair":"btc_jpy"}"#,
        )
        .unwrap();
        assert_eq!(signature, expected);
    }

    #[test]
    fn test_signature_format() {
        let signature = sign_request(&credentials(), 1616492376594, URL, "").unwrap();

        // HMAC-SHA256 produces 32 bytes, hex encoded = 64 lowercase chars
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert!(hex::decode(&signature).is_ok());
    }

    #[test]
    fn test_signature_consistency() {
        let body = r#"{"amount":"1","order_type":"buy","pair":"btc_jpy","rate":"30000"}"#;
        let sig1 = sign_request(&credentials(), 12345, URL, body).unwrap();
        let sig2 = sign_request(&credentials(), 12345, URL, body).unwrap();

        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_each_input() {
        let base = sign_request(&credentials(), 12345, URL, "{}").unwrap();

        let other_nonce = sign_request(&credentials(), 12346, URL, "{}").unwrap();
        let other_url =
            sign_request(&credentials(), 12345, "https://coincheck.com/api/accounts", "{}")
                .unwrap();
        let other_body = sign_request(&credentials(), 12345, URL, "{ }").unwrap();
        let other_secret =
            sign_request(&Credentials::new("key", "other").unwrap(), 12345, URL, "{}").unwrap();

        assert_ne!(base, other_nonce);
        assert_ne!(base, other_url);
        assert_ne!(base, other_body);
        assert_ne!(base, other_secret);
    }

    #[test]
    fn test_signature_is_over_plain_concatenation() {
        // The exchange signs the bare concatenation, so moving bytes between
        // url and body does not change the message.
        let a = sign_request(&credentials(), 1, "ab", "c").unwrap();
        let b = sign_request(&credentials(), 1, "a", "bc").unwrap();
        assert_eq!(a, b);

        // Different body content still changes the signature.
        let c = sign_request(&credentials(), 1, URL, r#"{"a":"1"}"#).unwrap();
        let e = sign_request(&credentials(), 1, URL, r#"{"a":"2"}"#).unwrap();
        assert_ne!(c, e);
    }

    #[test]
    fn test_nonce_is_signed_as_decimal() {
        let from_nonce = sign_request(&credentials(), 987, URL, "").unwrap();
        let spliced = sign_request(&credentials(), 98, &format!("7{URL}"), "").unwrap();
        assert_eq!(from_nonce, spliced);
    }
}
