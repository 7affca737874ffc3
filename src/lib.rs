pub mod core;
pub mod exchanges;

pub use core::{
    config::ExchangeConfig,
    errors::ExchangeError,
    kernel::{Envelope, ExchangeRejection, Normalized, QueryParams},
    traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer},
};
pub use exchanges::hitbtc::{HitbtcBuilder, HitbtcConnector, Symbol, TradeFilter, TradesQuery};
