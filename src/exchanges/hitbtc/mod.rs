pub mod builder;
pub mod connector;
pub mod endpoints;
pub mod request;
pub mod rest;
pub mod signer;
pub mod types;
pub mod validation;

// Re-export main components
pub use builder::{build_connector, build_connector_with_client, HitbtcBuilder};
pub use connector::{Account, HitbtcConnector, MarketData, Trading};
pub use endpoints::{AccessKind, Endpoint};
pub use request::RequestBuilder;
pub use rest::HitbtcRest;
pub use signer::{generate_signature, HitbtcSigner, SIGNATURE_HEADER};
pub use types::{SortOrder, Symbol, TradeFilter, TradesQuery};
