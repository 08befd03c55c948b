//! Common domain types for the Coincheck API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A currency trading pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pair {
    /// Bitcoin / Japanese yen
    BtcJpy,
    /// Ethereum / Japanese yen
    EthJpy,
    /// Ethereum / Bitcoin
    EthBtc,
    /// Ethereum Classic / Japanese yen
    EtcJpy,
    /// Ethereum Classic / Bitcoin
    EtcBtc,
    /// The DAO / Japanese yen
    DaoJpy,
    /// Lisk / Japanese yen
    LskJpy,
    /// Lisk / Bitcoin
    LskBtc,
    /// Factom / Japanese yen
    FctJpy,
    /// Factom / Bitcoin
    FctBtc,
    /// Monero / Japanese yen
    XmrJpy,
    /// Monero / Bitcoin
    XmrBtc,
    /// Augur / Japanese yen
    RepJpy,
    /// Augur / Bitcoin
    RepBtc,
    /// Ripple / Japanese yen
    XrpJpy,
    /// Ripple / Bitcoin
    XrpBtc,
    /// Zcash / Japanese yen
    ZecJpy,
    /// Zcash / Bitcoin
    ZecBtc,
}

impl Pair {
    /// All known pairs.
    pub const ALL: [Pair; 18] = [
        Pair::BtcJpy,
        Pair::EthJpy,
        Pair::EthBtc,
        Pair::EtcJpy,
        Pair::EtcBtc,
        Pair::DaoJpy,
        Pair::LskJpy,
        Pair::LskBtc,
        Pair::FctJpy,
        Pair::FctBtc,
        Pair::XmrJpy,
        Pair::XmrBtc,
        Pair::RepJpy,
        Pair::RepBtc,
        Pair::XrpJpy,
        Pair::XrpBtc,
        Pair::ZecJpy,
        Pair::ZecBtc,
    ];

    /// Wire representation, e.g. `"btc_jpy"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pair::BtcJpy => "btc_jpy",
            Pair::EthJpy => "eth_jpy",
            Pair::EthBtc => "eth_btc",
            Pair::EtcJpy => "etc_jpy",
            Pair::EtcBtc => "etc_btc",
            Pair::DaoJpy => "dao_jpy",
            Pair::LskJpy => "lsk_jpy",
            Pair::LskBtc => "lsk_btc",
            Pair::FctJpy => "fct_jpy",
            Pair::FctBtc => "fct_btc",
            Pair::XmrJpy => "xmr_jpy",
            Pair::XmrBtc => "xmr_btc",
            Pair::RepJpy => "rep_jpy",
            Pair::RepBtc => "rep_btc",
            Pair::XrpJpy => "xrp_jpy",
            Pair::XrpBtc => "xrp_btc",
            Pair::ZecJpy => "zec_jpy",
            Pair::ZecBtc => "zec_btc",
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pair::ALL
            .into_iter()
            .find(|pair| pair.as_str() == s)
            .ok_or_else(|| format!("Unknown pair: {s}"))
    }
}

/// Order kind accepted by `POST /exchange/orders`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Limit buy
    Buy,
    /// Limit sell
    Sell,
    /// Market buy, sized in the quote currency
    MarketBuy,
    /// Market sell, sized in the base currency
    MarketSell,
    /// Open a leveraged long position
    LeverageBuy,
    /// Open a leveraged short position
    LeverageSell,
    /// Close a leveraged long position
    CloseLong,
    /// Close a leveraged short position
    CloseShort,
}

impl OrderType {
    /// Wire representation, e.g. `"market_buy"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Buy => "buy",
            OrderType::Sell => "sell",
            OrderType::MarketBuy => "market_buy",
            OrderType::MarketSell => "market_sell",
            OrderType::LeverageBuy => "leverage_buy",
            OrderType::LeverageSell => "leverage_sell",
            OrderType::CloseLong => "close_long",
            OrderType::CloseShort => "close_short",
        }
    }

    /// Whether this order opens or closes a margin position.
    pub fn is_leverage(&self) -> bool {
        matches!(
            self,
            OrderType::LeverageBuy
                | OrderType::LeverageSell
                | OrderType::CloseLong
                | OrderType::CloseShort
        )
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    /// Buy side
    Buy,
    /// Sell side
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
        }
    }
}
