//! Coincheck REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::auth::{Credentials, IncreasingNonce, NonceProvider};
use crate::error::CoincheckError;
use crate::rest::endpoints::COINCHECK_BASE_URL;
use crate::rest::private::{
    Account, Balance, BankAccount, NewOrder, Order, OrderTransaction, SentMoney, Transaction,
    UnsettledOrder,
};
use crate::rest::public::{CalculatedRate, OrderBook, Ticker, Trade, TradesRequest};
use crate::rest::request::{
    ACCESS_KEY, ACCESS_NONCE, ACCESS_SIGNATURE, Content, Method, SignedRequest, Signer,
    build_request,
};
use crate::rest::traits::CoincheckClient;
use crate::types::decode::{FromWire, decode};
use crate::types::{Pair, TradeSide};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The Coincheck REST API client.
///
/// Each operation performs exactly one HTTP round trip: the request is built
/// and signed, sent, and the body is decoded into a typed result. There are
/// no retries. Clones share the HTTP connection pool and the nonce provider,
/// so one client can be used from many tasks at once.
///
/// # Example
///
/// ```rust,no_run
/// use coincheck_api_client::rest::RestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints need no credentials
///     let client = RestClient::new();
///
///     let ticker = client.get_ticker(None).await?;
///     println!("Last: {} at {}", ticker.last, ticker.timestamp);
///
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use coincheck_api_client::rest::RestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RestClient::with_credentials("access_key", "secret_key")?;
///
///     let balance = client.get_balance().await?;
///     println!("JPY: {}, BTC: {}", balance.jpy, balance.btc);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<Credentials>>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl RestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`RestClient::builder()`] to configure credentials for private endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a client for both public and private endpoints.
    ///
    /// Fails if the key or secret is unusable (see [`Credentials::new`]).
    pub fn with_credentials(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, CoincheckError> {
        let credentials = Credentials::new(api_key, api_secret)?;
        Ok(Self::builder().credentials(credentials).build())
    }

    /// Create a new client builder.
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::new()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether credentials are configured.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Build and sign a request without sending it.
    ///
    /// The request is signed whenever credentials are configured.
    pub fn prepare(
        &self,
        method: Method,
        endpoint: &str,
        content: Option<&Content>,
    ) -> Result<SignedRequest, CoincheckError> {
        let signer = self.credentials.as_deref().map(|credentials| Signer {
            credentials,
            nonce_provider: self.nonce_provider.as_ref(),
        });
        build_request(&self.base_url, method, endpoint, content, signer)
    }

    /// Send a prepared request and return the body of a `200 OK` response.
    ///
    /// Any other status is turned into [`CoincheckError::Endpoint`] carrying
    /// the status code and the body's `error` message (empty if the body is
    /// not an error envelope). Errors embedded in `200` bodies are left to
    /// the caller's decoder.
    pub async fn execute(&self, request: SignedRequest) -> Result<String, CoincheckError> {
        let SignedRequest {
            method,
            url,
            body,
            auth,
        } = request;

        tracing::debug!(
            method = %method,
            path = url.path(),
            nonce = auth.as_ref().map(|a| a.nonce),
            "sending Coincheck request"
        );

        let path = url.path().to_string();
        let mut builder = self.http_client.request(method.into(), url);
        if let Some(auth) = auth {
            builder = builder
                .header(ACCESS_KEY, auth.key)
                .header(ACCESS_NONCE, auth.nonce.to_string())
                .header(ACCESS_SIGNATURE, auth.signature);
        }
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::OK {
            return Ok(body);
        }

        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.error)
            .unwrap_or_default()
            .replace('\n', " | ");
        tracing::warn!(
            status = status.as_u16(),
            path = %path,
            message = %message,
            "Coincheck endpoint returned an error"
        );
        Err(CoincheckError::endpoint(status.as_u16(), message))
    }

    /// Perform a raw request and return the response body.
    ///
    /// `method` is one of `""`/`"GET"`, `"POST"` or `"DELETE"`; anything else
    /// fails with [`CoincheckError::InvalidMethod`] before any network I/O.
    pub async fn request(
        &self,
        method: &str,
        endpoint: &str,
        content: Option<&Content>,
    ) -> Result<String, CoincheckError> {
        let method = Method::parse(method)?;
        let request = self.prepare(method, endpoint, content)?;
        self.execute(request).await
    }

    /// Make a public GET request and decode the response.
    pub(crate) async fn public_get<T: FromWire>(
        &self,
        endpoint: &str,
        content: Option<&Content>,
    ) -> Result<T, CoincheckError> {
        let request = self.prepare(Method::Get, endpoint, content)?;
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// Make an authenticated request and decode the response.
    pub(crate) async fn private_call<T: FromWire>(
        &self,
        method: Method,
        endpoint: &str,
        content: Option<&Content>,
    ) -> Result<T, CoincheckError> {
        if self.credentials.is_none() {
            return Err(CoincheckError::MissingCredentials);
        }
        let request = self.prepare(method, endpoint, content)?;
        let body = self.execute(request).await?;
        decode(&body)
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`RestClient`].
pub struct RestClientBuilder {
    base_url: String,
    credentials: Option<Arc<Credentials>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Duration,
}

impl RestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: COINCHECK_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the credentials for authenticated requests.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the timeout applied to each request, from connect to end of body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> RestClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("coincheck-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("coincheck-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        RestClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
            nonce_provider,
        }
    }
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// CoincheckClient trait implementation.

impl CoincheckClient for RestClient {
    // ========== Public Endpoints ==========

    async fn get_ticker(&self, pair: Option<Pair>) -> Result<Ticker, CoincheckError> {
        RestClient::get_ticker(self, pair).await
    }

    async fn get_trades(&self, request: &TradesRequest) -> Result<Vec<Trade>, CoincheckError> {
        RestClient::get_trades(self, request).await
    }

    async fn get_order_book(&self) -> Result<OrderBook, CoincheckError> {
        RestClient::get_order_book(self).await
    }

    async fn get_rate(&self, pair: Pair) -> Result<f64, CoincheckError> {
        RestClient::get_rate(self, pair).await
    }

    async fn calculate_rate_by_amount(
        &self,
        order_type: TradeSide,
        pair: Pair,
        amount: f64,
    ) -> Result<CalculatedRate, CoincheckError> {
        RestClient::calculate_rate_by_amount(self, order_type, pair, amount).await
    }

    async fn calculate_rate_by_price(
        &self,
        order_type: TradeSide,
        pair: Pair,
        price: f64,
    ) -> Result<CalculatedRate, CoincheckError> {
        RestClient::calculate_rate_by_price(self, order_type, pair, price).await
    }

    // ========== Private Endpoints - Account ==========

    async fn get_account(&self) -> Result<Account, CoincheckError> {
        RestClient::get_account(self).await
    }

    async fn get_balance(&self) -> Result<Balance, CoincheckError> {
        RestClient::get_balance(self).await
    }

    async fn get_bank_accounts(&self) -> Result<Vec<BankAccount>, CoincheckError> {
        RestClient::get_bank_accounts(self).await
    }

    // ========== Private Endpoints - Funding ==========

    async fn send_money(&self, address: &str, amount: f64) -> Result<SentMoney, CoincheckError> {
        RestClient::send_money(self, address, amount).await
    }

    async fn get_send_history(&self, currency: &str) -> Result<Vec<Transaction>, CoincheckError> {
        RestClient::get_send_history(self, currency).await
    }

    async fn get_deposit_history(
        &self,
        currency: &str,
    ) -> Result<Vec<Transaction>, CoincheckError> {
        RestClient::get_deposit_history(self, currency).await
    }

    // ========== Private Endpoints - Trading ==========

    async fn new_order(&self, order: &NewOrder) -> Result<Order, CoincheckError> {
        RestClient::new_order(self, order).await
    }

    async fn get_unsettled_orders(&self) -> Result<Vec<UnsettledOrder>, CoincheckError> {
        RestClient::get_unsettled_orders(self).await
    }

    async fn cancel_order(&self, id: i64) -> Result<i64, CoincheckError> {
        RestClient::cancel_order(self, id).await
    }

    async fn get_order_transactions(&self) -> Result<Vec<OrderTransaction>, CoincheckError> {
        RestClient::get_order_transactions(self).await
    }
}

/// Body of a failed response.
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
}
