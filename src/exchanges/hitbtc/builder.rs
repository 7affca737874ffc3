use crate::core::config::{ExchangeConfig, SecretEncoding};
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig, Signer};
use crate::exchanges::hitbtc::{
    connector::HitbtcConnector, request::RequestBuilder, rest::HitbtcRest, signer::HitbtcSigner,
};
use std::sync::Arc;

pub const EXCHANGE_NAME: &str = "hitbtc";

/// Create a HitBTC connector backed by reqwest
pub fn build_connector(config: ExchangeConfig) -> Result<HitbtcConnector<ReqwestRest>, ExchangeError> {
    let rest_config =
        RestClientConfig::new(EXCHANGE_NAME.to_string()).with_timeout(config.timeout_seconds);
    let rest = RestClientBuilder::new(rest_config).build()?;
    build_connector_with_client(config, rest)
}

/// Create a HitBTC connector over any transport
pub fn build_connector_with_client<R: RestClient + Clone>(
    config: ExchangeConfig,
    client: R,
) -> Result<HitbtcConnector<R>, ExchangeError> {
    // Private calls fail with AuthenticationRequired when no signer is set
    let signer: Option<Arc<dyn Signer>> = if config.has_credentials() {
        Some(Arc::new(HitbtcSigner::new(
            config.api_key().to_string(),
            config.secret_key(),
            config.secret_encoding,
        )?))
    } else {
        None
    };

    let requests = RequestBuilder::new(config.version.clone(), config.base_uri.clone(), signer);
    Ok(HitbtcConnector::new(HitbtcRest::new(client, requests)))
}

/// Builder for creating HitBTC connectors
pub struct HitbtcBuilder {
    config: ExchangeConfig,
    user_agent: Option<String>,
}

impl Default for HitbtcBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HitbtcBuilder {
    /// Create a new `HitbtcBuilder` for public data only
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::read_only(),
            user_agent: None,
        }
    }

    /// Set the exchange configuration
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set API credentials, keeping the other settings
    pub fn with_credentials(mut self, api_key: String, secret_key: String) -> Self {
        self.config = ExchangeConfig::new(api_key, secret_key)
            .version(self.config.version.clone())
            .base_uri(self.config.base_uri.clone())
            .secret_encoding(self.config.secret_encoding)
            .timeout_seconds(self.config.timeout_seconds);
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.config = self.config.version(version);
        self
    }

    pub fn with_base_uri(mut self, base_uri: &str) -> Self {
        self.config = self.config.base_uri(base_uri);
        self
    }

    pub fn with_secret_encoding(mut self, encoding: SecretEncoding) -> Self {
        self.config = self.config.secret_encoding(encoding);
        self
    }

    /// Set REST client timeout
    pub fn with_rest_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config = self.config.timeout_seconds(timeout_seconds);
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    /// Build a connector backed by reqwest
    pub fn build(self) -> Result<HitbtcConnector<ReqwestRest>, ExchangeError> {
        let mut rest_config = RestClientConfig::new(EXCHANGE_NAME.to_string())
            .with_timeout(self.config.timeout_seconds);
        if let Some(user_agent) = self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent);
        }

        let rest = RestClientBuilder::new(rest_config).build()?;
        build_connector_with_client(self.config, rest)
    }

    /// Build a connector over a caller-supplied transport
    pub fn build_with_client<R: RestClient + Clone>(
        self,
        client: R,
    ) -> Result<HitbtcConnector<R>, ExchangeError> {
        build_connector_with_client(self.config, client)
    }
}
