//! Coincheck access key and secret.
//!
//! The access key travels in clear in the `ACCESS-KEY` header, so it has to
//! be a printable ASCII token. The secret never leaves the process: it is
//! only the HMAC key, and it is held in a [`SecretString`] so that `Debug`
//! output and accidental logging cannot reveal it.

use secrecy::{ExposeSecret, SecretString};

use crate::error::CoincheckError;

/// Default environment variable holding the access key.
pub const API_KEY_VAR: &str = "COINCHECK_API_KEY";
/// Default environment variable holding the secret key.
pub const API_SECRET_VAR: &str = "COINCHECK_API_SECRET";

/// A validated access key / secret key pair.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
}

impl Credentials {
    /// Create credentials, rejecting an empty secret or an access key that
    /// cannot be sent as a header value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use coincheck_api_client::auth::Credentials;
    ///
    /// assert!(Credentials::new("access_key", "secret_key").is_ok());
    /// assert!(Credentials::new("", "secret_key").is_err());
    /// assert!(Credentials::new("access key", "secret_key").is_err());
    /// ```
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, CoincheckError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() {
            return Err(CoincheckError::Auth("access key is empty".to_string()));
        }
        if !api_key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(CoincheckError::Auth(
                "access key must be printable ASCII without spaces".to_string(),
            ));
        }
        if api_secret.is_empty() {
            return Err(CoincheckError::Auth("secret key is empty".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// Read credentials from `COINCHECK_API_KEY` and `COINCHECK_API_SECRET`.
    ///
    /// Fails with [`CoincheckError::MissingCredentials`] when either variable
    /// is unset, and with [`CoincheckError::Auth`] when a value is invalid.
    pub fn from_env() -> Result<Self, CoincheckError> {
        Self::from_env_vars(API_KEY_VAR, API_SECRET_VAR)
    }

    /// Read credentials from custom environment variable names.
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, CoincheckError> {
        match (std::env::var(key_var), std::env::var(secret_var)) {
            (Ok(key), Ok(secret)) => Self::new(key, secret),
            _ => Err(CoincheckError::MissingCredentials),
        }
    }

    /// The access key, as sent in `ACCESS-KEY`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.api_secret.expose_secret().as_bytes()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
