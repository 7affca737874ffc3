/// Exchange-agnostic request plumbing
///
/// The kernel knows how to encode parameters, hand out nonces, move bytes
/// over HTTP and decode what comes back. It knows nothing about any
/// particular exchange's URL layout or signing recipe.
///
/// # Components
///
/// - `QueryParams`: deterministic, percent-encoded parameter sets
/// - `NonceGenerator`: strictly increasing process-wide nonces
/// - `Signer`: pluggable authentication interface
/// - `RestClient`: transport seam, with `ReqwestRest` as the real implementation
/// - `ResponseCodec`: body decoding into `Normalized` trees or `Envelope`s
///
/// # Example
/// ```rust,no_run
/// use hitbtc::core::kernel::*;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let rest = RestClientBuilder::new(RestClientConfig::new("hitbtc".to_string())).build()?;
/// let body = rest
///     .execute(PreparedRequest::get("http://api.hitbtc.com/api/1/public/time".to_string()))
///     .await?;
/// let time = JsonCodec.decode(&body)?;
/// println!("{:?}", time.get("timestamp").and_then(|n| n.as_u64()));
/// # Ok(())
/// # }
/// ```
pub mod codec;
pub mod nonce;
pub mod query;
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use codec::{
    Envelope, EnvelopeCodec, ExchangeRejection, Field, JsonCodec, Node, Normalized, ResponseCodec,
};
pub use nonce::NonceGenerator;
pub use query::QueryParams;
pub use rest::{PreparedRequest, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, Signer};
