use crate::core::config::SecretEncoding;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{SignatureResult, Signer};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::collections::HashMap;
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

pub const SIGNATURE_HEADER: &str = "X-Signature";

/// HMAC-SHA512 signer for the trading API.
///
/// The signed message is `uri_path + body`, where `uri_path` already contains
/// the query string. The digest goes out lowercase hex in `X-Signature`.
pub struct HitbtcSigner {
    api_key: String,
    key: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for HitbtcSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitbtcSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl HitbtcSigner {
    pub fn new(
        api_key: String,
        secret: &str,
        encoding: SecretEncoding,
    ) -> Result<Self, ExchangeError> {
        let key = prepare_key(secret, encoding)?;
        Ok(Self { api_key, key })
    }

    /// Signature over `uri_path + body`
    pub fn sign(&self, uri_path: &str, body: &str) -> Result<String, ExchangeError> {
        generate_signature(&self.key, uri_path, body)
    }
}

impl Signer for HitbtcSigner {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn sign_request(&self, uri_path: &str, body: &str) -> SignatureResult {
        let signature = self.sign(uri_path, body)?;

        let mut headers = HashMap::new();
        headers.insert(SIGNATURE_HEADER.to_string(), signature);
        Ok(headers)
    }
}

/// Turn the configured secret into HMAC key bytes
pub fn prepare_key(
    secret: &str,
    encoding: SecretEncoding,
) -> Result<Zeroizing<Vec<u8>>, ExchangeError> {
    if secret.is_empty() {
        return Err(ExchangeError::SigningError(
            "API secret is empty".to_string(),
        ));
    }

    let key = match encoding {
        SecretEncoding::Raw => secret.as_bytes().to_vec(),
        SecretEncoding::Base64 => general_purpose::STANDARD
            .decode(secret.trim())
            .map_err(|e| ExchangeError::SigningError(format!("Invalid base64 secret: {}", e)))?,
    };

    if key.is_empty() {
        return Err(ExchangeError::SigningError(
            "API secret decodes to an empty key".to_string(),
        ));
    }

    Ok(Zeroizing::new(key))
}

/// HMAC-SHA512 of `path + body` keyed by `secret`, lowercase hex
pub fn generate_signature(secret: &[u8], path: &str, body: &str) -> Result<String, ExchangeError> {
    if secret.is_empty() {
        return Err(ExchangeError::SigningError(
            "API secret is empty".to_string(),
        ));
    }

    let mut mac = HmacSha512::new_from_slice(secret)
        .map_err(|e| ExchangeError::SigningError(format!("Failed to create HMAC: {}", e)))?;
    mac.update(path.as_bytes());
    mac.update(body.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
