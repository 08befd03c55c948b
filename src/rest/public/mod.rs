//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use crate::error::CoincheckError;
use crate::rest::RestClient;
use crate::rest::endpoints::public;
use crate::rest::request::content;
use crate::types::{Pair, TradeSide};

impl RestClient {
    /// Get the latest ticker.
    ///
    /// Without a pair the exchange answers for `btc_jpy`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coincheck_api_client::rest::RestClient;
    /// use coincheck_api_client::types::Pair;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = RestClient::new();
    ///     let ticker = client.get_ticker(Some(Pair::EthJpy)).await?;
    ///     println!("bid {} / ask {}", ticker.bid, ticker.ask);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_ticker(&self, pair: Option<Pair>) -> Result<Ticker, CoincheckError> {
        match pair {
            Some(pair) => {
                let params = content([("pair", pair.as_str())]);
                self.public_get(public::TICKER, Some(&params)).await
            }
            None => self.public_get(public::TICKER, None).await,
        }
    }

    /// Get recent public trades.
    pub async fn get_trades(&self, request: &TradesRequest) -> Result<Vec<Trade>, CoincheckError> {
        let TradeList(trades) = self
            .public_get(public::TRADES, Some(&request.to_content()))
            .await?;
        Ok(trades)
    }

    /// Get the order book.
    pub async fn get_order_book(&self) -> Result<OrderBook, CoincheckError> {
        self.public_get(public::ORDER_BOOKS, None).await
    }

    /// Get the standard rate of a pair, e.g. the price of one BTC in JPY
    /// for [`Pair::BtcJpy`].
    pub async fn get_rate(&self, pair: Pair) -> Result<f64, CoincheckError> {
        let endpoint = format!("{}/{}", public::RATE, pair.as_str());
        let Rate(rate) = self.public_get(&endpoint, None).await?;
        Ok(rate)
    }

    /// Calculate the rate for an order of a given amount or price.
    pub async fn calculate_rate(
        &self,
        request: &CalculateRateRequest,
    ) -> Result<CalculatedRate, CoincheckError> {
        self.public_get(public::ORDERS_RATE, Some(&request.to_content()))
            .await
    }

    /// Calculate the rate for trading `amount` of the base currency.
    pub async fn calculate_rate_by_amount(
        &self,
        order_type: TradeSide,
        pair: Pair,
        amount: f64,
    ) -> Result<CalculatedRate, CoincheckError> {
        self.calculate_rate(&CalculateRateRequest::by_amount(order_type, pair, amount))
            .await
    }

    /// Calculate the rate for spending or receiving `price` of the quote currency.
    pub async fn calculate_rate_by_price(
        &self,
        order_type: TradeSide,
        pair: Pair,
        price: f64,
    ) -> Result<CalculatedRate, CoincheckError> {
        self.calculate_rate(&CalculateRateRequest::by_price(order_type, pair, price))
            .await
    }
}
