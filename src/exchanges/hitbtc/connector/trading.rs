use crate::core::errors::ExchangeError;
use crate::core::kernel::{Envelope, QueryParams, RestClient};
use crate::core::traits::OrderPlacer;
use crate::exchanges::hitbtc::{endpoints, rest::HitbtcRest};
use async_trait::async_trait;
use tracing::instrument;

/// HitBTC order management
pub struct Trading<R: RestClient> {
    rest: HitbtcRest<R>,
}

impl<R: RestClient + Clone> Trading<R> {
    pub fn new(rest: &HitbtcRest<R>) -> Self {
        Self { rest: rest.clone() }
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for Trading<R> {
    #[instrument(skip(self, params), fields(exchange = "hitbtc", symbol = ?params.get("symbol")))]
    async fn create_order(&self, params: &QueryParams) -> Result<Envelope, ExchangeError> {
        self.rest.call_private(&endpoints::NEW_ORDER, params).await
    }

    #[instrument(skip(self, params), fields(exchange = "hitbtc"))]
    async fn cancel_order(&self, params: &QueryParams) -> Result<Envelope, ExchangeError> {
        self.rest.call_private(&endpoints::CANCEL_ORDER, params).await
    }

    /// `symbols` may hold a comma-separated list; omitted means all symbols
    #[instrument(skip(self, params), fields(exchange = "hitbtc"))]
    async fn active_orders(&self, params: &QueryParams) -> Result<Envelope, ExchangeError> {
        self.rest.call_private(&endpoints::ACTIVE_ORDERS, params).await
    }

    #[instrument(skip(self, params), fields(exchange = "hitbtc"))]
    async fn recent_orders(&self, params: &QueryParams) -> Result<Envelope, ExchangeError> {
        self.rest.call_private(&endpoints::RECENT_ORDERS, params).await
    }
}
