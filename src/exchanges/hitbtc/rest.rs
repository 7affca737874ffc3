use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    Envelope, EnvelopeCodec, JsonCodec, NonceGenerator, Normalized, QueryParams, ResponseCodec,
    RestClient,
};
use crate::exchanges::hitbtc::endpoints::{AccessKind, Endpoint};
use crate::exchanges::hitbtc::request::RequestBuilder;
use crate::exchanges::hitbtc::types::Symbol;
use tracing::{instrument, warn};

/// Thin wrapper around `RestClient` for the HitBTC API
///
/// Nonces come from the process-wide sequence, so every connector signing
/// with the same key draws from one strictly increasing series.
#[derive(Debug, Clone)]
pub struct HitbtcRest<R: RestClient> {
    client: R,
    requests: RequestBuilder,
    nonces: NonceGenerator,
}

impl<R: RestClient> HitbtcRest<R> {
    pub fn new(client: R, requests: RequestBuilder) -> Self {
        Self {
            client,
            requests,
            nonces: NonceGenerator::new(),
        }
    }

    /// Unauthenticated GET decoded as a plain tree
    #[instrument(skip(self, params), fields(exchange = "hitbtc", endpoint = endpoint.path, symbol = ?symbol.map(Symbol::as_str)))]
    pub async fn get_public(
        &self,
        endpoint: &Endpoint,
        symbol: Option<&Symbol>,
        params: &QueryParams,
    ) -> Result<Normalized, ExchangeError> {
        let request = self.requests.public(endpoint, symbol, params)?;
        let body = self.client.execute(request).await?;
        JsonCodec.decode(&body)
    }

    /// Signed call, GET or POST according to the endpoint
    #[instrument(skip(self, params), fields(exchange = "hitbtc", endpoint = endpoint.path))]
    pub async fn call_private(
        &self,
        endpoint: &Endpoint,
        params: &QueryParams,
    ) -> Result<Envelope, ExchangeError> {
        let nonce = self.nonces.next_nonce();
        let request = match endpoint.kind {
            AccessKind::PrivateGet => self.requests.private_get(endpoint, params, &nonce)?,
            AccessKind::PrivatePost => self.requests.private_post(endpoint, params, &nonce)?,
            AccessKind::Public => {
                return Err(ExchangeError::InvalidArgument(format!(
                    "'{}' is a public endpoint",
                    endpoint.path
                )))
            }
        };

        let body = self.client.execute(request).await?;
        let envelope = EnvelopeCodec.decode(&body)?;
        if let Envelope::Rejected(rejection) = &envelope {
            warn!(endpoint = endpoint.path, error = %rejection, "Exchange rejected request");
        }
        Ok(envelope)
    }
}
