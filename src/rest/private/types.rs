//! Types for private REST API endpoints.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use time::OffsetDateTime;

use crate::error::CoincheckError;
use crate::rest::request::{Content, content};
use crate::types::decode::{
    FromWire, WireNumber, WireTimestamp, check_embedded_error, convert_all, format_number,
    number_or_zero, optional_datetime, optional_number, required, required_datetime,
    required_number,
};
use crate::types::{OrderType, Pair, TradeSide};

// ========== Account ==========

/// Account information.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Account id.
    pub id: i64,
    /// Registered email address.
    pub email: String,
    /// Identity verification status.
    pub identity_status: String,
    /// Deposit address for bitcoin.
    pub bitcoin_address: Option<String>,
    /// Maximum leverage for margin trading.
    pub lending_leverage: Option<f64>,
    /// Taker fee in percent.
    pub taker_fee: f64,
    /// Maker fee in percent.
    pub maker_fee: f64,
}

#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccountWire {
    id: Option<i64>,
    email: Option<String>,
    identity_status: Option<String>,
    bitcoin_address: Option<String>,
    lending_leverage: Option<WireNumber>,
    taker_fee: Option<WireNumber>,
    maker_fee: Option<WireNumber>,
    error: Option<String>,
}

impl FromWire for Account {
    type Wire = AccountWire;

    fn from_wire(wire: AccountWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        Ok(Account {
            id: required("id", wire.id)?,
            email: wire.email.unwrap_or_default(),
            identity_status: wire.identity_status.unwrap_or_default(),
            bitcoin_address: wire.bitcoin_address,
            lending_leverage: optional_number("lending_leverage", wire.lending_leverage)?,
            taker_fee: number_or_zero("taker_fee", wire.taker_fee)?,
            maker_fee: number_or_zero("maker_fee", wire.maker_fee)?,
        })
    }
}

/// Account balance. Currencies the exchange omits are reported as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Balance {
    /// Available JPY.
    pub jpy: f64,
    /// Available BTC.
    pub btc: f64,
    /// JPY reserved by unsettled orders.
    pub jpy_reserved: f64,
    /// BTC reserved by unsettled orders.
    pub btc_reserved: f64,
    /// JPY in lending applications.
    pub jpy_lend_in_use: f64,
    /// BTC in lending applications.
    pub btc_lend_in_use: f64,
    /// JPY lent out.
    pub jpy_lent: f64,
    /// BTC lent out.
    pub btc_lent: f64,
    /// JPY borrowed.
    pub jpy_debt: f64,
    /// BTC borrowed.
    pub btc_debt: f64,
}

#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BalanceWire {
    jpy: Option<WireNumber>,
    btc: Option<WireNumber>,
    jpy_reserved: Option<WireNumber>,
    btc_reserved: Option<WireNumber>,
    jpy_lend_in_use: Option<WireNumber>,
    btc_lend_in_use: Option<WireNumber>,
    jpy_lent: Option<WireNumber>,
    btc_lent: Option<WireNumber>,
    jpy_debt: Option<WireNumber>,
    btc_debt: Option<WireNumber>,
    error: Option<String>,
}

impl FromWire for Balance {
    type Wire = BalanceWire;

    fn from_wire(wire: BalanceWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        Ok(Balance {
            jpy: number_or_zero("jpy", wire.jpy)?,
            btc: number_or_zero("btc", wire.btc)?,
            jpy_reserved: number_or_zero("jpy_reserved", wire.jpy_reserved)?,
            btc_reserved: number_or_zero("btc_reserved", wire.btc_reserved)?,
            jpy_lend_in_use: number_or_zero("jpy_lend_in_use", wire.jpy_lend_in_use)?,
            btc_lend_in_use: number_or_zero("btc_lend_in_use", wire.btc_lend_in_use)?,
            jpy_lent: number_or_zero("jpy_lent", wire.jpy_lent)?,
            btc_lent: number_or_zero("btc_lent", wire.btc_lent)?,
            jpy_debt: number_or_zero("jpy_debt", wire.jpy_debt)?,
            btc_debt: number_or_zero("btc_debt", wire.btc_debt)?,
        })
    }
}

/// A registered bank account for JPY withdrawals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BankAccount {
    /// Bank account id.
    pub id: i64,
    /// Bank name.
    pub bank_name: String,
    /// Branch name.
    pub branch_name: String,
    /// Account type (`futsu`, `toza`).
    pub bank_account_type: String,
    /// Account number.
    pub number: String,
    /// Account holder name.
    pub name: String,
}

impl FromWire for BankAccount {
    type Wire = BankAccount;

    fn from_wire(wire: BankAccount) -> Result<Self, CoincheckError> {
        Ok(wire)
    }
}

pub(crate) struct BankAccountList(pub Vec<BankAccount>);

#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BankAccountListWire {
    data: Vec<BankAccount>,
    error: Option<String>,
}

impl FromWire for BankAccountList {
    type Wire = BankAccountListWire;

    fn from_wire(wire: BankAccountListWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        Ok(BankAccountList(wire.data))
    }
}

// ========== Send / deposit ==========

/// A bitcoin send or deposit.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Transaction id.
    pub id: i64,
    /// Amount moved.
    pub amount: f64,
    /// Fee charged, for sends.
    pub fee: Option<f64>,
    /// Currency code, e.g. `BTC`.
    pub currency: String,
    /// Destination (sends) or deposit (deposits) address.
    pub address: String,
    /// Deposit status (`pending`, `confirmed`), when reported.
    pub status: Option<String>,
    /// Creation time.
    pub created_at: OffsetDateTime,
    /// Confirmation time, for confirmed deposits.
    pub confirmed_at: Option<OffsetDateTime>,
}

#[doc(hidden)]
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct TransactionWire {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    id: i64,
    amount: WireNumber,
    #[serde(default)]
    fee: Option<WireNumber>,
    currency: String,
    address: String,
    #[serde(default)]
    status: Option<String>,
    created_at: WireTimestamp,
    #[serde(default)]
    confirmed_at: Option<WireTimestamp>,
}

impl FromWire for Transaction {
    type Wire = TransactionWire;

    fn from_wire(wire: TransactionWire) -> Result<Self, CoincheckError> {
        Ok(Transaction {
            id: wire.id,
            amount: wire.amount.to_f64("amount")?,
            fee: optional_number("fee", wire.fee)?,
            currency: wire.currency,
            address: wire.address,
            status: wire.status,
            created_at: wire.created_at.to_datetime("created_at")?,
            confirmed_at: optional_datetime("confirmed_at", wire.confirmed_at)?,
        })
    }
}

/// Sending history, listed under `sends`.
pub(crate) struct SendList(pub Vec<Transaction>);

#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendListWire {
    sends: Vec<Value>,
    error: Option<String>,
}

impl FromWire for SendList {
    type Wire = SendListWire;

    fn from_wire(wire: SendListWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        convert_all(wire.sends).map(SendList)
    }
}

/// Deposit history, listed under `deposits`.
pub(crate) struct DepositList(pub Vec<Transaction>);

#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DepositListWire {
    deposits: Vec<Value>,
    error: Option<String>,
}

impl FromWire for DepositList {
    type Wire = DepositListWire;

    fn from_wire(wire: DepositListWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        convert_all(wire.deposits).map(DepositList)
    }
}

/// Result of sending bitcoin.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMoney {
    /// Send id.
    pub id: i64,
    /// Destination address.
    pub address: String,
    /// Amount sent.
    pub amount: f64,
    /// Fee charged.
    pub fee: f64,
}

#[doc(hidden)]
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SentMoneyWire {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    id: Option<i64>,
    address: Option<String>,
    amount: Option<WireNumber>,
    fee: Option<WireNumber>,
    error: Option<String>,
}

impl FromWire for SentMoney {
    type Wire = SentMoneyWire;

    fn from_wire(wire: SentMoneyWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        Ok(SentMoney {
            id: required("id", wire.id)?,
            address: wire.address.unwrap_or_default(),
            amount: required_number("amount", wire.amount)?,
            fee: number_or_zero("fee", wire.fee)?,
        })
    }
}

// ========== Orders ==========

/// Parameters for `POST /exchange/orders`.
///
/// Which fields are sent depends on the order type:
///
/// | Order type | Fields sent besides `pair` and `order_type` |
/// |---|---|
/// | `buy` / `sell` | `rate`, `amount` |
/// | `market_buy` | `market_buy` (the quote amount, taken from `rate`) |
/// | `market_sell` | `amount` |
/// | `leverage_*` / `close_*` | `amount`, plus `rate` unless it is [`NewOrder::NO_RATE`] |
///
/// `stop_loss_rate` is sent whenever it is set, and `position_id` for
/// closing orders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewOrder {
    /// Pair to trade.
    pub pair: Pair,
    /// Order type.
    pub order_type: OrderType,
    /// Limit price, or the quote amount for `market_buy`.
    pub rate: f64,
    /// Quantity in the base currency.
    pub amount: f64,
    /// Stop-loss trigger price.
    pub stop_loss_rate: Option<f64>,
    /// Position to close, for `close_long` / `close_short`.
    pub position_id: Option<i64>,
}

impl NewOrder {
    /// Rate value meaning "no limit price" for leverage orders.
    pub const NO_RATE: f64 = -1.0;

    /// Create an order from raw parameters.
    pub fn new(order_type: OrderType, pair: Pair, rate: f64, amount: f64) -> Self {
        Self {
            pair,
            order_type,
            rate,
            amount,
            stop_loss_rate: None,
            position_id: None,
        }
    }

    /// Limit buy `amount` at `rate`.
    pub fn buy(pair: Pair, rate: f64, amount: f64) -> Self {
        Self::new(OrderType::Buy, pair, rate, amount)
    }

    /// Limit sell `amount` at `rate`.
    pub fn sell(pair: Pair, rate: f64, amount: f64) -> Self {
        Self::new(OrderType::Sell, pair, rate, amount)
    }

    /// Market buy spending `quote_amount` of the quote currency.
    pub fn market_buy(pair: Pair, quote_amount: f64) -> Self {
        Self::new(OrderType::MarketBuy, pair, quote_amount, 0.0)
    }

    /// Market sell `amount` of the base currency.
    pub fn market_sell(pair: Pair, amount: f64) -> Self {
        Self::new(OrderType::MarketSell, pair, Self::NO_RATE, amount)
    }

    /// Open a leveraged long; `None` rate means at market.
    pub fn leverage_buy(pair: Pair, amount: f64, rate: Option<f64>) -> Self {
        Self::new(OrderType::LeverageBuy, pair, rate.unwrap_or(Self::NO_RATE), amount)
    }

    /// Open a leveraged short; `None` rate means at market.
    pub fn leverage_sell(pair: Pair, amount: f64, rate: Option<f64>) -> Self {
        Self::new(OrderType::LeverageSell, pair, rate.unwrap_or(Self::NO_RATE), amount)
    }

    /// Close (part of) a long position.
    pub fn close_long(pair: Pair, position_id: i64, amount: f64, rate: Option<f64>) -> Self {
        Self::new(OrderType::CloseLong, pair, rate.unwrap_or(Self::NO_RATE), amount)
            .position_id(position_id)
    }

    /// Close (part of) a short position.
    pub fn close_short(pair: Pair, position_id: i64, amount: f64, rate: Option<f64>) -> Self {
        Self::new(OrderType::CloseShort, pair, rate.unwrap_or(Self::NO_RATE), amount)
            .position_id(position_id)
    }

    /// Attach a stop-loss trigger price.
    pub fn stop_loss_rate(mut self, rate: f64) -> Self {
        self.stop_loss_rate = Some(rate);
        self
    }

    /// Attach the position to close.
    pub fn position_id(mut self, id: i64) -> Self {
        self.position_id = Some(id);
        self
    }

    /// The request parameters for this order.
    pub fn to_content(&self) -> Content {
        let mut params = content([
            ("pair", self.pair.as_str()),
            ("order_type", self.order_type.as_str()),
        ]);
        let mut set = |key: &str, value: f64| {
            params.insert(key.to_string(), format_number(value));
        };

        if self.order_type.is_leverage() {
            set("amount", self.amount);
            if self.rate != Self::NO_RATE {
                set("rate", self.rate);
            }
        } else {
            match self.order_type {
                OrderType::MarketBuy => set("market_buy", self.rate),
                OrderType::MarketSell => set("amount", self.amount),
                _ => {
                    set("rate", self.rate);
                    set("amount", self.amount);
                }
            }
        }
        if let Some(stop) = self.stop_loss_rate {
            set("stop_loss_rate", stop);
        }
        if let Some(id) = self.position_id {
            params.insert("position_id".to_string(), id.to_string());
        }
        params
    }
}

/// An order accepted by `POST /exchange/orders`.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Order id.
    pub id: i64,
    /// Limit price; `None` for market orders.
    pub rate: Option<f64>,
    /// Quantity; `None` for market buys.
    pub amount: Option<f64>,
    /// Quote amount of a market buy.
    pub market_buy_amount: Option<f64>,
    /// Order type.
    pub order_type: OrderType,
    /// Stop-loss trigger price.
    pub stop_loss_rate: Option<f64>,
    /// Pair traded.
    pub pair: String,
    /// Creation time.
    pub created_at: OffsetDateTime,
    /// The JSON object as received.
    pub raw: Value,
}

#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderWire {
    id: Option<i64>,
    rate: Option<WireNumber>,
    amount: Option<WireNumber>,
    market_buy_amount: Option<WireNumber>,
    order_type: Option<OrderType>,
    stop_loss_rate: Option<WireNumber>,
    pair: Option<String>,
    created_at: Option<WireTimestamp>,
    error: Option<String>,
}

impl FromWire for Order {
    type Wire = OrderWire;

    fn from_wire(wire: OrderWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        Ok(Order {
            id: required("id", wire.id)?,
            rate: optional_number("rate", wire.rate)?,
            amount: optional_number("amount", wire.amount)?,
            market_buy_amount: optional_number("market_buy_amount", wire.market_buy_amount)?,
            order_type: required("order_type", wire.order_type)?,
            stop_loss_rate: optional_number("stop_loss_rate", wire.stop_loss_rate)?,
            pair: wire.pair.unwrap_or_default(),
            created_at: required_datetime("created_at", wire.created_at)?,
            raw: Value::Null,
        })
    }

    fn attach_raw(&mut self, raw: Value) {
        self.raw = raw;
    }
}

/// An order that has not been fully matched yet.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsettledOrder {
    /// Order id.
    pub id: i64,
    /// Order type.
    pub order_type: OrderType,
    /// Limit price; `None` for market orders.
    pub rate: Option<f64>,
    /// Pair traded.
    pub pair: String,
    /// Quantity not yet filled.
    pub pending_amount: Option<f64>,
    /// Quote amount not yet spent, for market buys.
    pub pending_market_buy_amount: Option<f64>,
    /// Stop-loss trigger price.
    pub stop_loss_rate: Option<f64>,
    /// Creation time.
    pub created_at: OffsetDateTime,
    /// The JSON object as received.
    pub raw: Value,
}

#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct UnsettledOrderWire {
    id: i64,
    order_type: OrderType,
    #[serde(default)]
    rate: Option<WireNumber>,
    pair: String,
    #[serde(default)]
    pending_amount: Option<WireNumber>,
    #[serde(default)]
    pending_market_buy_amount: Option<WireNumber>,
    #[serde(default)]
    stop_loss_rate: Option<WireNumber>,
    created_at: WireTimestamp,
}

impl FromWire for UnsettledOrder {
    type Wire = UnsettledOrderWire;

    fn from_wire(wire: UnsettledOrderWire) -> Result<Self, CoincheckError> {
        Ok(UnsettledOrder {
            id: wire.id,
            order_type: wire.order_type,
            rate: optional_number("rate", wire.rate)?,
            pair: wire.pair,
            pending_amount: optional_number("pending_amount", wire.pending_amount)?,
            pending_market_buy_amount: optional_number(
                "pending_market_buy_amount",
                wire.pending_market_buy_amount,
            )?,
            stop_loss_rate: optional_number("stop_loss_rate", wire.stop_loss_rate)?,
            created_at: wire.created_at.to_datetime("created_at")?,
            raw: Value::Null,
        })
    }

    fn attach_raw(&mut self, raw: Value) {
        self.raw = raw;
    }
}

/// Unsettled orders, listed under `orders`.
pub(crate) struct UnsettledOrderList(pub Vec<UnsettledOrder>);

#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UnsettledOrderListWire {
    orders: Vec<Value>,
    error: Option<String>,
}

impl FromWire for UnsettledOrderList {
    type Wire = UnsettledOrderListWire;

    fn from_wire(wire: UnsettledOrderListWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        convert_all(wire.orders).map(UnsettledOrderList)
    }
}

/// Id of a cancelled order.
pub(crate) struct CancelledOrder(pub i64);

#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CancelledOrderWire {
    id: Option<i64>,
    error: Option<String>,
}

impl FromWire for CancelledOrder {
    type Wire = CancelledOrderWire;

    fn from_wire(wire: CancelledOrderWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        required("id", wire.id).map(CancelledOrder)
    }
}

/// A fill of one of the account's own orders.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTransaction {
    /// Transaction id.
    pub id: i64,
    /// Order that was filled.
    pub order_id: i64,
    /// Execution time.
    pub created_at: OffsetDateTime,
    /// Balance changes keyed by currency (`btc`, `jpy`, ...).
    pub funds: BTreeMap<String, f64>,
    /// Pair traded.
    pub pair: String,
    /// Execution price.
    pub rate: f64,
    /// Currency the fee was charged in.
    pub fee_currency: Option<String>,
    /// Fee charged.
    pub fee: f64,
    /// `T` for taker, `M` for maker.
    pub liquidity: String,
    /// Side of the order.
    pub side: TradeSide,
}

impl OrderTransaction {
    /// Balance change for one currency.
    pub fn fund(&self, currency: &str) -> Option<f64> {
        self.funds.get(currency).copied()
    }
}

#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OrderTransactionWire {
    id: i64,
    order_id: i64,
    created_at: WireTimestamp,
    funds: BTreeMap<String, WireNumber>,
    pair: String,
    rate: WireNumber,
    #[serde(default)]
    fee_currency: Option<String>,
    fee: WireNumber,
    liquidity: String,
    side: TradeSide,
}

impl FromWire for OrderTransaction {
    type Wire = OrderTransactionWire;

    fn from_wire(wire: OrderTransactionWire) -> Result<Self, CoincheckError> {
        let funds = wire
            .funds
            .into_iter()
            .map(|(currency, amount)| Ok((currency, amount.to_f64("funds")?)))
            .collect::<Result<_, CoincheckError>>()?;

        Ok(OrderTransaction {
            id: wire.id,
            order_id: wire.order_id,
            created_at: wire.created_at.to_datetime("created_at")?,
            funds,
            pair: wire.pair,
            rate: wire.rate.to_f64("rate")?,
            fee_currency: wire.fee_currency,
            fee: wire.fee.to_f64("fee")?,
            liquidity: wire.liquidity,
            side: wire.side,
        })
    }
}

/// Own transactions, listed under `transactions`.
pub(crate) struct OrderTransactionList(pub Vec<OrderTransaction>);

#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderTransactionListWire {
    transactions: Vec<Value>,
    error: Option<String>,
}

impl FromWire for OrderTransactionList {
    type Wire = OrderTransactionListWire;

    fn from_wire(wire: OrderTransactionListWire) -> Result<Self, CoincheckError> {
        check_embedded_error(wire.error)?;
        convert_all(wire.transactions).map(OrderTransactionList)
    }
}
