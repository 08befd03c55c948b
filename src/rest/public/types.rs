//! Types for public REST API endpoints.

use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::CoincheckError;
use crate::rest::request::{Content, content};
use crate::types::decode::{
    FromWire, WireNumber, WireTimestamp, check_embedded_error, convert_all, format_number,
    optional_number, required_number,
};
use crate::types::{Pair, TradeSide};

/// Latest ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticker {
    /// Last traded price.
    pub last: f64,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
    /// Highest price in the last 24 hours.
    pub high: f64,
    /// Lowest price in the last 24 hours.
    pub low: f64,
    /// Volume in the last 24 hours.
    pub volume: f64,
    /// Time the ticker was generated.
    pub timestamp: OffsetDateTime,
    /// The JSON object as received.
    pub raw: Value,
}

#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct TickerWire {
    last: WireNumber,
    bid: WireNumber,
    ask: WireNumber,
    high: WireNumber,
    low: WireNumber,
    volume: WireNumber,
    timestamp: WireTimestamp,
}

impl FromWire for Ticker {
    type Wire = TickerWire;

    fn from_wire(wire: TickerWire) -> Result<Self, CoincheckError> {
        Ok(Ticker {
            last: wire.last.to_f64("last")?,
            bid: wire.bid.to_f64("bid")?,
            ask: wire.ask.to_f64("ask")?,
            high: wire.high.to_f64("high")?,
            low: wire.low.to_f64("low")?,
            volume: wire.volume.to_f64("volume")?,
            timestamp: wire.timestamp.to_datetime("timestamp")?,
            raw: Value::Null,
        })
    }

    fn attach_raw(&mut self, raw: Value) {
        self.raw = raw;
    }
}

/// Request parameters for public trades.
#[derive(Debug, Clone)]
pub struct TradesRequest {
    /// Pair to list trades for.
    pub pair: Pair,
    /// Number of trades to skip.
    pub offset: Option<u64>,
    /// Maximum number of trades per page.
    pub limit: Option<u32>,
    /// Only trades with an id greater than this.
    pub starting_after: Option<i64>,
    /// Only trades with an id less than this.
    pub ending_before: Option<i64>,
}

impl TradesRequest {
    /// Create a request for the latest trades of `pair`.
    pub fn new(pair: Pair) -> Self {
        Self {
            pair,
            offset: None,
            limit: None,
            starting_after: None,
            ending_before: None,
        }
    }

    /// Skip the first `offset` trades.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Limit the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Page forward from a trade id.
    pub fn starting_after(mut self, id: i64) -> Self {
        self.starting_after = Some(id);
        self
    }

    /// Page backward from a trade id.
    pub fn ending_before(mut self, id: i64) -> Self {
        self.ending_before = Some(id);
        self
    }

    pub(crate) fn to_content(&self) -> Content {
        let mut params = content([("pair", self.pair.as_str())]);
        if let Some(offset) = self.offset {
            params.insert("offset".into(), offset.to_string());
        }
        if let Some(limit) = self.limit {
            params.insert("limit".into(), limit.to_string());
        }
        if let Some(id) = self.starting_after {
            params.insert("starting_after".into(), id.to_string());
        }
        if let Some(id) = self.ending_before {
            params.insert("ending_before".into(), id.to_string());
        }
        params
    }
}

/// A public trade.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    /// Trade id.
    pub id: i64,
    /// Traded amount in the base currency.
    pub amount: f64,
    /// Execution price.
    pub rate: f64,
    /// Pair, when the exchange includes it.
    pub pair: Option<String>,
    /// Taker side.
    pub order_type: TradeSide,
    /// Execution time.
    pub created_at: OffsetDateTime,
    /// The JSON object as received.
    pub raw: Value,
}

#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct TradeWire {
    id: i64,
    amount: WireNumber,
    rate: WireNumber,
    #[serde(default)]
    pair: Option<String>,
    order_type: TradeSide,
    created_at: WireTimestamp,
}

impl FromWire for Trade {
    type Wire = TradeWire;

    fn from_wire(wire: TradeWire) -> Result<Self, CoincheckError> {
        Ok(Trade {
            id: wire.id,
            amount: wire.amount.to_f64("amount")?,
            rate: wire.rate.to_f64("rate")?,
            pair: wire.pair,
            order_type: wire.order_type,
            created_at: wire.created_at.to_datetime("created_at")?,
            raw: Value::Null,
        })
    }

    fn attach_raw(&mut self, raw: Value) {
        self.raw = raw;
    }
}

/// Trades list; the exchange sends either a bare array or a page object.
pub(crate) struct TradeList(pub Vec<Trade>);

#[doc(hidden)]
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TradeListWire {
    Bare(Vec<Value>),
    Page { data: Vec<Value> },
}

impl FromWire for TradeList {
    type Wire = TradeListWire;

    fn from_wire(wire: TradeListWire) -> Result<Self, CoincheckError> {
        let items = match wire {
            TradeListWire::Bare(items) | TradeListWire::Page { data: items } => items,
        };
        convert_all(items).map(TradeList)
    }
}

/// One price level of the order book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLevel {
    /// Price.
    pub rate: f64,
    /// Quantity available at this price.
    pub amount: f64,
}

/// Order book snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBook {
    /// Sell orders, best first.
    pub asks: Vec<PriceLevel>,
    /// Buy orders, best first.
    pub bids: Vec<PriceLevel>,
    /// The JSON object as received.
    pub raw: Value,
}

impl OrderBook {
    /// Lowest ask, if any.
    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks.first().copied()
    }

    /// Highest bid, if any.
    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.first().copied()
    }

    /// Difference between the best ask and best bid.
    pub fn spread(&self) -> Option<f64> {
        Some(self.best_ask()?.rate - self.best_bid()?.rate)
    }
}

#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OrderBookWire {
    asks: Vec<(WireNumber, WireNumber)>,
    bids: Vec<(WireNumber, WireNumber)>,
}

fn price_levels(
    field: &'static str,
    levels: Vec<(WireNumber, WireNumber)>,
) -> Result<Vec<PriceLevel>, CoincheckError> {
    levels
        .into_iter()
        .map(|(rate, amount)| {
            Ok(PriceLevel {
                rate: rate.to_f64(field)?,
                amount: amount.to_f64(field)?,
            })
        })
        .collect()
}

impl FromWire for OrderBook {
    type Wire = OrderBookWire;

    fn from_wire(wire: OrderBookWire) -> Result<Self, CoincheckError> {
        Ok(OrderBook {
            asks: price_levels("asks", wire.asks)?,
            bids: price_levels("bids", wire.bids)?,
            raw: Value::Null,
        })
    }

    fn attach_raw(&mut self, raw: Value) {
        self.raw = raw;
    }
}

/// Standard rate of a pair.
pub(crate) struct Rate(pub f64);

#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct RateWire {
    #[serde(default)]
    rate: Option<WireNumber>,
    #[serde(default)]
    error: Option<String>,
}

impl FromWire for Rate {
    type Wire = RateWire;

    fn from_wire(wire: RateWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        required_number("rate", wire.rate).map(Rate)
    }
}

/// What to base a rate calculation on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateBasis {
    /// Quantity in the base currency.
    Amount(f64),
    /// Total in the quote currency.
    Price(f64),
}

/// Request parameters for a calculated rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculateRateRequest {
    /// Buying or selling.
    pub order_type: TradeSide,
    /// Pair to price.
    pub pair: Pair,
    /// Amount or price to calculate for.
    pub basis: RateBasis,
}

impl CalculateRateRequest {
    /// Rate for trading `amount` of the base currency.
    pub fn by_amount(order_type: TradeSide, pair: Pair, amount: f64) -> Self {
        Self {
            order_type,
            pair,
            basis: RateBasis::Amount(amount),
        }
    }

    /// Rate for spending or receiving `price` of the quote currency.
    pub fn by_price(order_type: TradeSide, pair: Pair, price: f64) -> Self {
        Self {
            order_type,
            pair,
            basis: RateBasis::Price(price),
        }
    }

    pub(crate) fn to_content(&self) -> Content {
        let (key, value) = match self.basis {
            RateBasis::Amount(amount) => ("amount", amount),
            RateBasis::Price(price) => ("price", price),
        };
        content([
            ("order_type", self.order_type.to_string()),
            ("pair", self.pair.to_string()),
            (key, format_number(value)),
        ])
    }
}

/// Result of a rate calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedRate {
    /// Effective rate.
    pub rate: f64,
    /// Base currency quantity.
    pub amount: Option<f64>,
    /// Quote currency total.
    pub price: Option<f64>,
}

#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct CalculatedRateWire {
    #[serde(default)]
    rate: Option<WireNumber>,
    #[serde(default)]
    amount: Option<WireNumber>,
    #[serde(default)]
    price: Option<WireNumber>,
    #[serde(default)]
    error: Option<String>,
}

impl FromWire for CalculatedRate {
    type Wire = CalculatedRateWire;

    fn from_wire(wire: CalculatedRateWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        Ok(CalculatedRate {
            rate: required_number("rate", wire.rate)?,
            amount: optional_number("amount", wire.amount)?,
            price: optional_number("price", wire.price)?,
        })
    }
}
