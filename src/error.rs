//! Error types for the Coincheck client library.

use thiserror::Error;

/// The main error type for all Coincheck client operations.
#[derive(Error, Debug)]
pub enum CoincheckError {
    /// The caller asked for an HTTP method the API does not use.
    #[error("Invalid method ({0})")]
    InvalidMethod(String),

    /// Network-level failure (DNS, connection refused, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The exchange rejected the request.
    ///
    /// `status` is the HTTP status code for non-200 responses, and `None`
    /// when a 200 response carried an embedded `error` field.
    #[error("{}", format_endpoint_error(.status, .message))]
    Endpoint {
        /// HTTP status code, if the failure was signalled by the status line
        status: Option<u16>,
        /// Message provided by the exchange (may be empty)
        message: String,
    },

    /// A field that must hold a number or timestamp did not.
    #[error("Invalid format for field `{field}`: {value:?}")]
    Format {
        /// Wire name of the offending field
        field: &'static str,
        /// The raw value as received
        value: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Query string encoding/decoding error
    #[error("Query string error: {0}")]
    Query(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,
}

impl From<reqwest::Error> for CoincheckError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(reqwest_middleware::Error::Reqwest(err))
    }
}

impl CoincheckError {
    /// Build an endpoint error for a non-200 response.
    pub fn endpoint(status: u16, message: impl Into<String>) -> Self {
        Self::Endpoint {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Build an endpoint error for an `error` field embedded in a 200 response.
    pub fn embedded(message: impl Into<String>) -> Self {
        Self::Endpoint {
            status: None,
            message: message.into(),
        }
    }

    /// The exchange-provided message, if this is an endpoint error.
    pub fn endpoint_message(&self) -> Option<&str> {
        match self {
            Self::Endpoint { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Check if the exchange rejected the nonce (replayed or out of order).
    pub fn is_invalid_nonce(&self) -> bool {
        self.endpoint_message()
            .is_some_and(|m| m.to_ascii_lowercase().contains("nonce"))
    }

    /// Check if the exchange rejected the signature or API key.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::Endpoint { status: Some(401), .. })
            || self.endpoint_message().is_some_and(|m| {
                let m = m.to_ascii_lowercase();
                m.contains("signature") || m.contains("authentication")
            })
    }
}

fn format_endpoint_error(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("EndPointError: StatusCode[{code}], Error[{message}]"),
        None => format!("EndPointError: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_error_display() {
        let error = CoincheckError::endpoint(400, "amount is invalid");
        assert_eq!(
            error.to_string(),
            "EndPointError: StatusCode[400], Error[amount is invalid]"
        );

        let error = CoincheckError::embedded("insufficient funds");
        assert_eq!(error.to_string(), "EndPointError: insufficient funds");
    }

    #[test]
    fn test_format_error_names_field() {
        let error = CoincheckError::Format {
            field: "jpy",
            value: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid format for field `jpy`: \"abc\"");
    }

    #[test]
    fn test_error_classification() {
        assert!(CoincheckError::endpoint(401, "").is_authentication_failure());
        assert!(CoincheckError::embedded("Nonce must be incremented").is_invalid_nonce());
        assert!(!CoincheckError::MissingCredentials.is_invalid_nonce());
    }
}
