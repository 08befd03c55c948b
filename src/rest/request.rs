//! Request construction and signing.
//!
//! A request is a method, an endpoint path and an optional flat map of
//! parameters. Reads put the parameters in the query string; writes send
//! them as a JSON object body. Authenticated requests carry three headers:
//!
//! ```text
//! ACCESS-KEY:       api key
//! ACCESS-NONCE:     nonce (decimal)
//! ACCESS-SIGNATURE: hex(HMAC-SHA256(nonce + url + body, secret))
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::auth::{Credentials, NonceProvider, sign_request};
use crate::error::CoincheckError;

/// Header carrying the API key.
pub const ACCESS_KEY: &str = "ACCESS-KEY";
/// Header carrying the nonce.
pub const ACCESS_NONCE: &str = "ACCESS-NONCE";
/// Header carrying the signature.
pub const ACCESS_SIGNATURE: &str = "ACCESS-SIGNATURE";

/// Request parameters. Keys are unique; on the wire they appear sorted.
pub type Content = BTreeMap<String, String>;

/// HTTP methods used by the Coincheck API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Reads; parameters go in the query string
    Get,
    /// Writes; parameters go in a JSON body
    Post,
    /// Deletions; parameters (if any) go in a JSON body
    Delete,
}

impl Method {
    /// Parse a method name. An empty string means `GET`.
    pub fn parse(method: &str) -> Result<Self, CoincheckError> {
        match method {
            "" | "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "DELETE" => Ok(Method::Delete),
            other => Err(CoincheckError::InvalidMethod(other.to_string())),
        }
    }

    /// Method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl FromStr for Method {
    type Err = CoincheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::parse(s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Authentication header values for one request.
#[derive(Clone)]
pub struct AuthHeaders {
    /// `ACCESS-KEY`
    pub key: String,
    /// `ACCESS-NONCE`
    pub nonce: u64,
    /// `ACCESS-SIGNATURE`
    pub signature: String,
}

impl fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHeaders")
            .field("key", &self.key)
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}

/// A fully built request, ready to send.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP method.
    pub method: Method,
    /// Full URL including any query string; this exact text was signed.
    pub url: Url,
    /// JSON body for writes.
    pub body: Option<String>,
    /// Authentication headers, absent for unauthenticated requests.
    pub auth: Option<AuthHeaders>,
}

/// Signing material borrowed from a client.
#[derive(Clone, Copy)]
pub struct Signer<'a> {
    /// Key and secret.
    pub credentials: &'a Credentials,
    /// Shared nonce source.
    pub nonce_provider: &'a dyn NonceProvider,
}

/// Build a request for `base_url + endpoint`.
///
/// When `signer` is given, a fresh nonce is drawn and the request is signed
/// over the final URL and body.
pub fn build_request(
    base_url: &str,
    method: Method,
    endpoint: &str,
    content: Option<&Content>,
    signer: Option<Signer<'_>>,
) -> Result<SignedRequest, CoincheckError> {
    let mut url = Url::parse(&format!("{base_url}{endpoint}"))?;

    let body = match method {
        Method::Get => {
            if let Some(content) = content {
                let query = encode_query(content)?;
                if !query.is_empty() {
                    url.set_query(Some(&query));
                }
            }
            None
        }
        Method::Post | Method::Delete => content.map(serde_json::to_string).transpose()?,
    };

    let auth = signer
        .map(|signer| {
            let nonce = signer.nonce_provider.next_nonce();
            let signature = sign_request(
                signer.credentials,
                nonce,
                url.as_str(),
                body.as_deref().unwrap_or_default(),
            )?;
            Ok::<_, CoincheckError>(AuthHeaders {
                key: signer.credentials.api_key().to_string(),
                nonce,
                signature,
            })
        })
        .transpose()?;

    Ok(SignedRequest {
        method,
        url,
        body,
        auth,
    })
}

/// Encode parameters as an `application/x-www-form-urlencoded` query string.
pub fn encode_query(content: &Content) -> Result<String, CoincheckError> {
    serde_urlencoded::to_string(content).map_err(|e| CoincheckError::Query(e.to_string()))
}

/// Parse a query string back into parameters.
pub fn decode_query(query: &str) -> Result<Content, CoincheckError> {
    serde_urlencoded::from_str(query).map_err(|e| CoincheckError::Query(e.to_string()))
}

/// Build a [`Content`] map from key/value pairs.
pub fn content<K, V, I>(pairs: I) -> Content
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SequentialNonce;

    const BASE: &str = "https://coincheck.com/api";

    fn signer_parts() -> (Credentials, SequentialNonce) {
        (
            Credentials::new("key", "secret").unwrap(),
            SequentialNonce::starting_at(100),
        )
    }

    #[test]
    fn test_method_parse() {
        assert_eq!(Method::parse("").unwrap(), Method::Get);
        assert_eq!(Method::parse("GET").unwrap(), Method::Get);
        assert_eq!(Method::parse("POST").unwrap(), Method::Post);
        assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);

        match Method::parse("PATCH") {
            Err(CoincheckError::InvalidMethod(m)) => assert_eq!(m, "PATCH"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_get_puts_content_in_query() {
        let params = content([("pair", "btc_jpy"), ("offset", "20")]);
        let request = build_request(BASE, Method::Get, "/trades", Some(&params), None).unwrap();

        assert_eq!(
            request.url.as_str(),
            "https://coincheck.com/api/trades?offset=20&pair=btc_jpy"
        );
        assert!(request.body.is_none());
        assert!(request.auth.is_none());
    }

    #[test]
    fn test_get_without_content_has_no_query() {
        let empty = Content::new();
        let request = build_request(BASE, Method::Get, "/ticker", Some(&empty), None).unwrap();
        assert_eq!(request.url.as_str(), "https://coincheck.com/api/ticker");
        assert_eq!(request.url.query(), None);
    }

    #[test]
    fn test_post_puts_content_in_json_body() {
        let params = content([("pair", "btc_jpy"), ("amount", "5"), ("order_type", "market_sell")]);
        let request =
            build_request(BASE, Method::Post, "/exchange/orders", Some(&params), None).unwrap();

        assert_eq!(request.url.as_str(), "https://coincheck.com/api/exchange/orders");
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"amount":"5","order_type":"market_sell","pair":"btc_jpy"}"#)
        );
    }

    #[test]
    fn test_delete_without_content_has_no_body() {
        let request =
            build_request(BASE, Method::Delete, "/exchange/orders/12345", None, None).unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn test_signed_request_signs_exact_url_and_body() {
        let (credentials, nonces) = signer_parts();
        let signer = Signer {
            credentials: &credentials,
            nonce_provider: &nonces,
        };
        let params = content([("currency", "BTC")]);

        let request =
            build_request(BASE, Method::Get, "/send_money", Some(&params), Some(signer)).unwrap();
        let auth = request.auth.unwrap();

        assert_eq!(auth.key, "key");
        assert_eq!(auth.nonce, 100);
        let expected = sign_request(
            &credentials,
            100,
            "https://coincheck.com/api/send_money?currency=BTC",
            "",
        )
        .unwrap();
        assert_eq!(auth.signature, expected);

        let body_params = content([("address", "1abc"), ("amount", "0.5")]);
        let request =
            build_request(BASE, Method::Post, "/send_money", Some(&body_params), Some(signer))
                .unwrap();
        let auth = request.auth.unwrap();
        assert_eq!(auth.nonce, 101);
        let expected = sign_request(
            &credentials,
            101,
            "https://coincheck.com/api/send_money",
            r#"{"address":"1abc","amount":"0.5"}"#,
        )
        .unwrap();
        assert_eq!(auth.signature, expected);
    }

    #[test]
    fn test_debug_hides_signature() {
        let (credentials, nonces) = signer_parts();
        let signer = Signer {
            credentials: &credentials,
            nonce_provider: &nonces,
        };
        let request = build_request(BASE, Method::Get, "/accounts", None, Some(signer)).unwrap();
        let signature = request.auth.as_ref().unwrap().signature.clone();
        assert!(!format!("{request:?}").contains(&signature));
    }

    #[test]
    fn test_query_round_trip() {
        let params = content([
            ("order_type", "buy"),
            ("pair", "btc_jpy"),
            ("amount", "0.1"),
            ("note", "a b&c=d/é"),
        ]);
        let encoded = encode_query(&params).unwrap();
        assert_eq!(decode_query(&encoded).unwrap(), params);

        let reordered = decode_query("pair=btc_jpy&amount=0.1&order_type=buy").unwrap();
        assert_eq!(reordered, content([("order_type", "buy"), ("pair", "btc_jpy"), ("amount", "0.1")]));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            build_request("not a url", Method::Get, "/ticker", None, None),
            Err(CoincheckError::Url(_))
        ));
    }
}
