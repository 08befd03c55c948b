//! Coincheck REST API endpoint constants.

/// Base URL for the Coincheck REST API.
pub const COINCHECK_BASE_URL: &str = "https://coincheck.com/api";

/// Fee in BTC charged for sending bitcoin out of Coincheck.
pub const BTC_SENDING_FEE: f64 = 0.0005;

/// Public endpoints (no authentication required).
pub mod public {
    /// Latest ticker.
    pub const TICKER: &str = "/ticker";
    /// Public trade history.
    pub const TRADES: &str = "/trades";
    /// Order book.
    pub const ORDER_BOOKS: &str = "/order_books";
    /// Standard rate prefix; the pair is appended (`/rate/btc_jpy`).
    pub const RATE: &str = "/rate";
    /// Calculated rate for an amount or price.
    pub const ORDERS_RATE: &str = "/exchange/orders/rate";
}

/// Private endpoints (authentication required).
pub mod private {
    // Account endpoints
    /// Account information.
    pub const ACCOUNTS: &str = "/accounts";
    /// Account balance.
    pub const BALANCE: &str = "/accounts/balance";
    /// Registered bank accounts.
    pub const BANK_ACCOUNTS: &str = "/bank_accounts";
    /// Send money (POST) and sending history (GET).
    pub const SEND_MONEY: &str = "/send_money";
    /// Deposit history.
    pub const DEPOSIT_MONEY: &str = "/deposit_money";

    // Order endpoints
    /// New order (POST); the order id is appended for cancellation (DELETE).
    pub const ORDERS: &str = "/exchange/orders";
    /// Unsettled orders.
    pub const ORDERS_OPENS: &str = "/exchange/orders/opens";
    /// Own order transactions.
    pub const ORDERS_TRANSACTIONS: &str = "/exchange/orders/transactions";
}
