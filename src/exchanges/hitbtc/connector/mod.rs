use crate::core::errors::ExchangeError;
use crate::core::kernel::{Envelope, Normalized, QueryParams, RestClient};
use crate::core::traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer};
use crate::exchanges::hitbtc::rest::HitbtcRest;
use async_trait::async_trait;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// HitBTC connector that composes all sub-trait implementations
pub struct HitbtcConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
}

impl<R: RestClient + Clone> HitbtcConnector<R> {
    pub fn new(rest: HitbtcRest<R>) -> Self {
        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest),
            account: Account::new(&rest),
        }
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for HitbtcConnector<R> {
    async fn server_time(&self) -> Result<u64, ExchangeError> {
        self.market.server_time().await
    }

    async fn symbols(&self) -> Result<Vec<Normalized>, ExchangeError> {
        self.market.symbols().await
    }

    async fn ticker(&self, symbol: &str) -> Result<Normalized, ExchangeError> {
        self.market.ticker(symbol).await
    }

    async fn order_book(
        &self,
        symbol: &str,
        params: &QueryParams,
    ) -> Result<Normalized, ExchangeError> {
        self.market.order_book(symbol, params).await
    }

    async fn trades(&self, symbol: &str, params: &QueryParams) -> Result<Normalized, ExchangeError> {
        self.market.trades(symbol, params).await
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for HitbtcConnector<R> {
    async fn create_order(&self, params: &QueryParams) -> Result<Envelope, ExchangeError> {
        self.trading.create_order(params).await
    }

    async fn cancel_order(&self, params: &QueryParams) -> Result<Envelope, ExchangeError> {
        self.trading.cancel_order(params).await
    }

    async fn active_orders(&self, params: &QueryParams) -> Result<Envelope, ExchangeError> {
        self.trading.active_orders(params).await
    }

    async fn recent_orders(&self, params: &QueryParams) -> Result<Envelope, ExchangeError> {
        self.trading.recent_orders(params).await
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for HitbtcConnector<R> {
    async fn balance(&self) -> Result<Envelope, ExchangeError> {
        self.account.balance().await
    }

    async fn trade_history(&self, params: &QueryParams) -> Result<Envelope, ExchangeError> {
        self.account.trade_history(params).await
    }
}

impl<R: RestClient> ExchangeConnector for HitbtcConnector<R> {}
