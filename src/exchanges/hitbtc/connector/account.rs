use crate::core::errors::ExchangeError;
use crate::core::kernel::{Envelope, QueryParams, RestClient};
use crate::core::traits::AccountInfo;
use crate::exchanges::hitbtc::{endpoints, rest::HitbtcRest};
use async_trait::async_trait;
use tracing::instrument;

/// HitBTC account implementation
pub struct Account<R: RestClient> {
    rest: HitbtcRest<R>,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &HitbtcRest<R>) -> Self {
        Self { rest: rest.clone() }
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for Account<R> {
    #[instrument(skip(self), fields(exchange = "hitbtc"))]
    async fn balance(&self) -> Result<Envelope, ExchangeError> {
        self.rest
            .call_private(&endpoints::BALANCE, &QueryParams::new())
            .await
    }

    #[instrument(skip(self, params), fields(exchange = "hitbtc"))]
    async fn trade_history(&self, params: &QueryParams) -> Result<Envelope, ExchangeError> {
        self.rest.call_private(&endpoints::TRADE_HISTORY, params).await
    }
}
