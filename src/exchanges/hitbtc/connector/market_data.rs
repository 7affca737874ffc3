use crate::core::errors::ExchangeError;
use crate::core::kernel::{Normalized, QueryParams, RestClient};
use crate::core::traits::MarketDataSource;
use crate::exchanges::hitbtc::{
    endpoints, rest::HitbtcRest, types::Symbol, types::TradesQuery, validation,
};
use async_trait::async_trait;
use tracing::instrument;

/// HitBTC public market data
#[derive(Debug)]
pub struct MarketData<R: RestClient> {
    rest: HitbtcRest<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &HitbtcRest<R>) -> Self {
        Self { rest: rest.clone() }
    }
}

impl<R: RestClient> MarketData<R> {
    /// The entry for a single symbol, or `None` if the exchange does not list it
    pub async fn symbol(&self, symbol: &str) -> Result<Option<Normalized>, ExchangeError> {
        let wanted = Symbol::new(symbol)?;
        Ok(self.symbols_filtered(&[wanted]).await?.into_iter().next())
    }

    /// Entries whose `symbol` field is one of `wanted`
    pub async fn symbols_filtered(
        &self,
        wanted: &[Symbol],
    ) -> Result<Vec<Normalized>, ExchangeError> {
        let all = self.fetch_symbols().await?;
        Ok(all
            .into_iter()
            .filter(|entry| {
                entry
                    .get("symbol")
                    .and_then(|s| s.as_str())
                    .is_some_and(|code| wanted.iter().any(|w| w.as_str() == code))
            })
            .collect())
    }

    /// Public trades with a typed query
    pub async fn trades_query(
        &self,
        symbol: &str,
        query: &TradesQuery,
    ) -> Result<Normalized, ExchangeError> {
        self.trades(symbol, &query.to_params()).await
    }

    async fn fetch_symbols(&self) -> Result<Vec<Normalized>, ExchangeError> {
        let doc = self
            .rest
            .get_public(&endpoints::SYMBOLS, None, &QueryParams::new())
            .await?;
        Ok(doc
            .field("symbols")
            .present()
            .map(|list| list.items().iter().map(|n| n.to_normalized()).collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "hitbtc"))]
    async fn server_time(&self) -> Result<u64, ExchangeError> {
        let doc = self
            .rest
            .get_public(&endpoints::SERVER_TIME, None, &QueryParams::new())
            .await?;
        doc.get("timestamp")
            .and_then(|ts| ts.as_u64())
            .ok_or_else(|| {
                ExchangeError::DeserializationError(format!(
                    "Missing timestamp in response: {}",
                    doc
                ))
            })
    }

    #[instrument(skip(self), fields(exchange = "hitbtc"))]
    async fn symbols(&self) -> Result<Vec<Normalized>, ExchangeError> {
        self.fetch_symbols().await
    }

    #[instrument(skip(self), fields(exchange = "hitbtc", symbol = %symbol))]
    async fn ticker(&self, symbol: &str) -> Result<Normalized, ExchangeError> {
        let symbol = Symbol::new(symbol)?;
        self.rest
            .get_public(&endpoints::TICKER, Some(&symbol), &QueryParams::new())
            .await
    }

    #[instrument(skip(self, params), fields(exchange = "hitbtc", symbol = %symbol))]
    async fn order_book(
        &self,
        symbol: &str,
        params: &QueryParams,
    ) -> Result<Normalized, ExchangeError> {
        let symbol = Symbol::new(symbol)?;
        self.rest
            .get_public(&endpoints::ORDER_BOOK, Some(&symbol), params)
            .await
    }

    #[instrument(skip(self, params), fields(exchange = "hitbtc", symbol = %symbol))]
    async fn trades(&self, symbol: &str, params: &QueryParams) -> Result<Normalized, ExchangeError> {
        let symbol = Symbol::new(symbol)?;
        validation::validate_trades_params(params)?;
        self.rest
            .get_public(&endpoints::TRADES, Some(&symbol), params)
            .await
    }
}
