use crate::core::errors::ExchangeError;
use crate::core::kernel::{PreparedRequest, QueryParams, Signer};
use crate::exchanges::hitbtc::endpoints::{AccessKind, Endpoint};
use crate::exchanges::hitbtc::types::Symbol;
use std::sync::Arc;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Turns endpoint descriptors plus parameters into wire-ready requests.
///
/// Public requests go over plain HTTP to `/api/{version}/public/...`; trading
/// requests go over TLS to `/api/{version}/trading/...` and carry an
/// `X-Signature` header computed over the exact path and body sent.
#[derive(Clone)]
pub struct RequestBuilder {
    version: String,
    base_uri: String,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("version", &self.version)
            .field("base_uri", &self.base_uri)
            .field("has_signer", &self.signer.is_some())
            .finish()
    }
}

impl RequestBuilder {
    pub fn new(version: String, base_uri: String, signer: Option<Arc<dyn Signer>>) -> Self {
        Self {
            version,
            base_uri,
            signer,
        }
    }

    /// `/api/{version}/trading/{method}`
    pub fn trading_path(&self, method: &str) -> String {
        format!("/api/{}/trading/{}", self.version, method)
    }

    /// `http://{base_uri}/api/{version}/public/{method}`
    pub fn public_url(&self, method: &str) -> String {
        format!("http://{}/api/{}/public/{}", self.base_uri, self.version, method)
    }

    /// Build an unauthenticated GET. Symbol-scoped endpoints get the
    /// symbol in front of the operation, e.g. `BTCUSD/ticker`.
    pub fn public(
        &self,
        endpoint: &Endpoint,
        symbol: Option<&Symbol>,
        params: &QueryParams,
    ) -> Result<PreparedRequest, ExchangeError> {
        if endpoint.kind != AccessKind::Public {
            return Err(ExchangeError::InvalidArgument(format!(
                "'{}' is not a public endpoint",
                endpoint.path
            )));
        }

        let method = match (endpoint.requires_symbol, symbol) {
            // Symbols are only length-checked, so escape them as a single path segment
            (true, Some(symbol)) => format!(
                "{}/{}",
                urlencoding::encode(symbol.as_str()),
                endpoint.path
            ),
            (true, None) => {
                return Err(ExchangeError::InvalidSymbol(format!(
                    "'{}' requires a symbol",
                    endpoint.path
                )))
            }
            (false, _) => endpoint.path.to_string(),
        };

        let mut url = self.public_url(&method);
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.encode());
        }

        Ok(PreparedRequest::get(url))
    }

    /// Build a signed GET. `apikey` and `nonce` join the caller's parameters
    /// in the query string; the signature covers path plus query.
    pub fn private_get(
        &self,
        endpoint: &Endpoint,
        params: &QueryParams,
        nonce: &str,
    ) -> Result<PreparedRequest, ExchangeError> {
        let signer = self.require_kind(endpoint, AccessKind::PrivateGet)?;

        let signed_params = params
            .clone()
            .with("apikey", signer.api_key())
            .with("nonce", nonce);
        let uri_path = format!("{}?{}", self.trading_path(endpoint.path), signed_params.encode());
        let headers = signer.sign_request(&uri_path, "")?;

        Ok(PreparedRequest::get(self.private_url(&uri_path)).with_headers(headers))
    }

    /// Build a signed POST. Only `apikey` and `nonce` ride in the URL; the
    /// caller's parameters form the body and the signature covers both.
    pub fn private_post(
        &self,
        endpoint: &Endpoint,
        params: &QueryParams,
        nonce: &str,
    ) -> Result<PreparedRequest, ExchangeError> {
        let signer = self.require_kind(endpoint, AccessKind::PrivatePost)?;

        let post_data = params.encode();
        let auth = QueryParams::new()
            .with("apikey", signer.api_key())
            .with("nonce", nonce);
        let uri_path = format!("{}?{}", self.trading_path(endpoint.path), auth.encode());
        let headers = signer.sign_request(&uri_path, &post_data)?;

        Ok(PreparedRequest::post(self.private_url(&uri_path), post_data)
            .with_headers(headers)
            .with_header("Content-Type", FORM_CONTENT_TYPE))
    }

    fn private_url(&self, uri_path: &str) -> String {
        format!("https://{}{}", self.base_uri, uri_path)
    }

    fn require_kind(
        &self,
        endpoint: &Endpoint,
        expected: AccessKind,
    ) -> Result<&Arc<dyn Signer>, ExchangeError> {
        if endpoint.kind != expected {
            return Err(ExchangeError::InvalidArgument(format!(
                "'{}' is a {:?} endpoint, not {:?}",
                endpoint.path, endpoint.kind, expected
            )));
        }
        self.signer
            .as_ref()
            .ok_or(ExchangeError::AuthenticationRequired)
    }
}
