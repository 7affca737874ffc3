/// How an operation reaches the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// Plain HTTP GET, no authentication
    Public,
    /// Signed GET, parameters in the query string
    PrivateGet,
    /// Signed POST, parameters in a form body
    PrivatePost,
}

/// Static description of one API operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub kind: AccessKind,
    pub path: &'static str,
    pub requires_symbol: bool,
}

impl Endpoint {
    const fn public(path: &'static str) -> Self {
        Self {
            kind: AccessKind::Public,
            path,
            requires_symbol: false,
        }
    }

    const fn symbol_scoped(path: &'static str) -> Self {
        Self {
            kind: AccessKind::Public,
            path,
            requires_symbol: true,
        }
    }

    const fn private_get(path: &'static str) -> Self {
        Self {
            kind: AccessKind::PrivateGet,
            path,
            requires_symbol: false,
        }
    }

    const fn private_post(path: &'static str) -> Self {
        Self {
            kind: AccessKind::PrivatePost,
            path,
            requires_symbol: false,
        }
    }
}

// Public market data
pub const SERVER_TIME: Endpoint = Endpoint::public("time");
pub const SYMBOLS: Endpoint = Endpoint::public("symbols");
pub const TICKER: Endpoint = Endpoint::symbol_scoped("ticker");
pub const ORDER_BOOK: Endpoint = Endpoint::symbol_scoped("orderbook");
pub const TRADES: Endpoint = Endpoint::symbol_scoped("trades");

// Trading
pub const BALANCE: Endpoint = Endpoint::private_get("balance");
pub const ACTIVE_ORDERS: Endpoint = Endpoint::private_get("orders/active");
pub const RECENT_ORDERS: Endpoint = Endpoint::private_get("orders/recent");
pub const CANCEL_ORDER: Endpoint = Endpoint::private_get("cancel_order");
pub const TRADE_HISTORY: Endpoint = Endpoint::private_get("trades");
pub const NEW_ORDER: Endpoint = Endpoint::private_post("new_order");
