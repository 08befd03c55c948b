//! Private REST API endpoints (authentication required).
//!
//! Every call here fails with [`CoincheckError::MissingCredentials`] before
//! any network I/O when the client has no credentials.

mod types;

pub use types::*;

use crate::error::CoincheckError;
use crate::rest::RestClient;
use crate::rest::endpoints::private;
use crate::rest::request::{Method, content};
use crate::types::decode::format_number;

impl RestClient {
    // ========== Account ==========

    /// Get account information.
    pub async fn get_account(&self) -> Result<Account, CoincheckError> {
        self.private_call(Method::Get, private::ACCOUNTS, None).await
    }

    /// Get the account balance.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coincheck_api_client::rest::RestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = RestClient::with_credentials("access_key", "secret_key")?;
    ///     let balance = client.get_balance().await?;
    ///     println!("JPY {} (reserved {})", balance.jpy, balance.jpy_reserved);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_balance(&self) -> Result<Balance, CoincheckError> {
        self.private_call(Method::Get, private::BALANCE, None).await
    }

    /// List registered bank accounts.
    pub async fn get_bank_accounts(&self) -> Result<Vec<BankAccount>, CoincheckError> {
        let BankAccountList(accounts) = self
            .private_call(Method::Get, private::BANK_ACCOUNTS, None)
            .await?;
        Ok(accounts)
    }

    // ========== Send / deposit ==========

    /// Send `amount` BTC to `address`.
    ///
    /// The exchange charges [`BTC_SENDING_FEE`](crate::rest::BTC_SENDING_FEE)
    /// on top of the amount.
    pub async fn send_money(&self, address: &str, amount: f64) -> Result<SentMoney, CoincheckError> {
        let amount = format_number(amount);
        let params = content([("address", address), ("amount", amount.as_str())]);
        self.private_call(Method::Post, private::SEND_MONEY, Some(&params))
            .await
    }

    /// Get the sending history for a currency (e.g. `"BTC"`).
    pub async fn get_send_history(&self, currency: &str) -> Result<Vec<Transaction>, CoincheckError> {
        let params = content([("currency", currency)]);
        let SendList(sends) = self
            .private_call(Method::Get, private::SEND_MONEY, Some(&params))
            .await?;
        Ok(sends)
    }

    /// Get the deposit history for a currency (e.g. `"BTC"`).
    pub async fn get_deposit_history(
        &self,
        currency: &str,
    ) -> Result<Vec<Transaction>, CoincheckError> {
        let params = content([("currency", currency)]);
        let DepositList(deposits) = self
            .private_call(Method::Get, private::DEPOSIT_MONEY, Some(&params))
            .await?;
        Ok(deposits)
    }

    // ========== Orders ==========

    /// Place a new order.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coincheck_api_client::rest::RestClient;
    /// use coincheck_api_client::rest::private::NewOrder;
    /// use coincheck_api_client::types::Pair;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = RestClient::with_credentials("access_key", "secret_key")?;
    ///
    ///     let order = NewOrder::buy(Pair::BtcJpy, 3_000_000.0, 0.01);
    ///     let placed = client.new_order(&order).await?;
    ///     println!("Order {} placed", placed.id);
    ///
    ///     Ok(())
    /// }
    /// ```
    pub async fn new_order(&self, order: &NewOrder) -> Result<Order, CoincheckError> {
        tracing::info!(
            pair = %order.pair,
            order_type = %order.order_type,
            "placing order"
        );
        self.private_call(Method::Post, private::ORDERS, Some(&order.to_content()))
            .await
    }

    /// List orders that are not fully matched yet.
    pub async fn get_unsettled_orders(&self) -> Result<Vec<UnsettledOrder>, CoincheckError> {
        let UnsettledOrderList(orders) = self
            .private_call(Method::Get, private::ORDERS_OPENS, None)
            .await?;
        Ok(orders)
    }

    /// Cancel an order, returning the id of the cancelled order.
    pub async fn cancel_order(&self, id: i64) -> Result<i64, CoincheckError> {
        let endpoint = format!("{}/{}", private::ORDERS, id);
        let CancelledOrder(cancelled) = self.private_call(Method::Delete, &endpoint, None).await?;
        Ok(cancelled)
    }

    /// List the account's own recent fills.
    pub async fn get_order_transactions(&self) -> Result<Vec<OrderTransaction>, CoincheckError> {
        let OrderTransactionList(transactions) = self
            .private_call(Method::Get, private::ORDERS_TRANSACTIONS, None)
            .await?;
        Ok(transactions)
    }
}
