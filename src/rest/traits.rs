//! Trait definition for the Coincheck REST API client.
//!
//! [`CoincheckClient`] abstracts every REST operation so that code written
//! against it can run with a mock implementation in tests or behind a
//! wrapper that adds behaviour around [`RestClient`](crate::rest::RestClient).
//!
//! # Example
//!
//! ```rust,ignore
//! use coincheck_api_client::rest::CoincheckClient;
//!
//! async fn total_jpy<C: CoincheckClient>(client: &C) -> Result<f64, coincheck_api_client::CoincheckError> {
//!     let balance = client.get_balance().await?;
//!     Ok(balance.jpy + balance.jpy_reserved)
//! }
//! ```

use std::future::Future;

use crate::error::CoincheckError;
use crate::rest::private::{
    Account, Balance, BankAccount, NewOrder, Order, OrderTransaction, SentMoney, Transaction,
    UnsettledOrder,
};
use crate::rest::public::{CalculatedRate, OrderBook, Ticker, Trade, TradesRequest};
use crate::types::{Pair, TradeSide};

/// Every Coincheck REST operation.
///
/// All methods are async and return `Result<T, CoincheckError>`.
pub trait CoincheckClient: Send + Sync {
    // ========== Public Endpoints ==========

    /// Get the latest ticker; `None` means `btc_jpy`.
    fn get_ticker(
        &self,
        pair: Option<Pair>,
    ) -> impl Future<Output = Result<Ticker, CoincheckError>> + Send;

    /// Get recent public trades.
    fn get_trades(
        &self,
        request: &TradesRequest,
    ) -> impl Future<Output = Result<Vec<Trade>, CoincheckError>> + Send;

    /// Get the order book.
    fn get_order_book(&self) -> impl Future<Output = Result<OrderBook, CoincheckError>> + Send;

    /// Get the standard rate of a pair.
    fn get_rate(&self, pair: Pair) -> impl Future<Output = Result<f64, CoincheckError>> + Send;

    /// Calculate the rate for trading an amount of the base currency.
    fn calculate_rate_by_amount(
        &self,
        order_type: TradeSide,
        pair: Pair,
        amount: f64,
    ) -> impl Future<Output = Result<CalculatedRate, CoincheckError>> + Send;

    /// Calculate the rate for a price in the quote currency.
    fn calculate_rate_by_price(
        &self,
        order_type: TradeSide,
        pair: Pair,
        price: f64,
    ) -> impl Future<Output = Result<CalculatedRate, CoincheckError>> + Send;

    // ========== Private Endpoints - Account ==========

    /// Get account information.
    fn get_account(&self) -> impl Future<Output = Result<Account, CoincheckError>> + Send;

    /// Get the account balance.
    fn get_balance(&self) -> impl Future<Output = Result<Balance, CoincheckError>> + Send;

    /// List registered bank accounts.
    fn get_bank_accounts(
        &self,
    ) -> impl Future<Output = Result<Vec<BankAccount>, CoincheckError>> + Send;

    // ========== Private Endpoints - Funding ==========

    /// Send BTC to an address.
    fn send_money(
        &self,
        address: &str,
        amount: f64,
    ) -> impl Future<Output = Result<SentMoney, CoincheckError>> + Send;

    /// Get the sending history for a currency.
    fn get_send_history(
        &self,
        currency: &str,
    ) -> impl Future<Output = Result<Vec<Transaction>, CoincheckError>> + Send;

    /// Get the deposit history for a currency.
    fn get_deposit_history(
        &self,
        currency: &str,
    ) -> impl Future<Output = Result<Vec<Transaction>, CoincheckError>> + Send;

    // ========== Private Endpoints - Trading ==========

    /// Place a new order.
    fn new_order(
        &self,
        order: &NewOrder,
    ) -> impl Future<Output = Result<Order, CoincheckError>> + Send;

    /// List orders that are not fully matched yet.
    fn get_unsettled_orders(
        &self,
    ) -> impl Future<Output = Result<Vec<UnsettledOrder>, CoincheckError>> + Send;

    /// Cancel an order.
    fn cancel_order(&self, id: i64) -> impl Future<Output = Result<i64, CoincheckError>> + Send;

    /// List the account's own recent fills.
    fn get_order_transactions(
        &self,
    ) -> impl Future<Output = Result<Vec<OrderTransaction>, CoincheckError>> + Send;
}
