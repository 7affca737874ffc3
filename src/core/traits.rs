use crate::core::{
    errors::ExchangeError,
    kernel::{Envelope, Normalized, QueryParams},
};
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataSource {
    /// Exchange server time in milliseconds
    async fn server_time(&self) -> Result<u64, ExchangeError>;

    /// All tradable symbols
    async fn symbols(&self) -> Result<Vec<Normalized>, ExchangeError>;

    /// 24h ticker for one symbol
    async fn ticker(&self, symbol: &str) -> Result<Normalized, ExchangeError>;

    /// Order book snapshot. `params` carries the optional `format_*` switches.
    async fn order_book(&self, symbol: &str, params: &QueryParams)
        -> Result<Normalized, ExchangeError>;

    /// Public trade history. `params` must carry a valid `by` filter.
    async fn trades(&self, symbol: &str, params: &QueryParams)
        -> Result<Normalized, ExchangeError>;
}

#[async_trait]
pub trait OrderPlacer {
    /// Place a new order
    async fn create_order(&self, params: &QueryParams) -> Result<Envelope, ExchangeError>;

    async fn cancel_order(&self, params: &QueryParams) -> Result<Envelope, ExchangeError>;

    async fn active_orders(&self, params: &QueryParams) -> Result<Envelope, ExchangeError>;

    async fn recent_orders(&self, params: &QueryParams) -> Result<Envelope, ExchangeError>;
}

#[async_trait]
pub trait AccountInfo {
    async fn balance(&self) -> Result<Envelope, ExchangeError>;

    async fn trade_history(&self, params: &QueryParams) -> Result<Envelope, ExchangeError>;
}

// Composite trait for when you need all functionality
#[async_trait]
pub trait ExchangeConnector: MarketDataSource + OrderPlacer + AccountInfo {}
