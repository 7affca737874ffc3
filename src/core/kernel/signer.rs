use crate::core::errors::ExchangeError;
use std::collections::HashMap;

/// Result type for signing operations: headers to attach to the request
pub type SignatureResult = Result<HashMap<String, String>, ExchangeError>;

/// Signer trait for request authentication
///
/// Implementations compute whatever the exchange needs from the exact bytes
/// that will go on the wire and hand back the headers carrying it.
pub trait Signer: Send + Sync {
    /// API key that identifies the caller in signed requests
    fn api_key(&self) -> &str;

    /// Sign a request
    ///
    /// # Arguments
    /// * `uri_path` - Path plus query string exactly as transmitted
    /// * `body` - Request body exactly as transmitted (empty for GET)
    fn sign_request(&self, uri_path: &str, body: &str) -> SignatureResult;
}
