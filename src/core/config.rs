use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::str::FromStr;

pub const DEFAULT_API_VERSION: &str = "1";
pub const DEFAULT_BASE_URI: &str = "api.hitbtc.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// How the API secret is turned into HMAC key bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    /// The secret string's UTF-8 bytes are the key.
    #[default]
    Raw,
    /// The secret is base64 text and its decoded bytes are the key.
    Base64,
}

impl FromStr for SecretEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "base64" => Ok(Self::Base64),
            other => Err(ConfigError::InvalidConfiguration(format!(
                "Unknown secret encoding '{}', expected 'raw' or 'base64'",
                other
            ))),
        }
    }
}

/// API key and secret pair. Immutable once handed to a client.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: Secret<String>,
    pub api_secret: Secret<String>,
}

impl Credentials {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            api_secret: Secret::new(api_secret),
        }
    }
}

/// Source of credentials injected at construction time.
pub trait CredentialProvider {
    fn credentials(&self) -> Result<Credentials, ConfigError>;
}

/// Credentials supplied directly by the caller
pub struct StaticCredentials(Credentials);

impl StaticCredentials {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self(Credentials::new(api_key, api_secret))
    }
}

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials, ConfigError> {
        Ok(self.0.clone())
    }
}

/// Reads `{PREFIX}_API_KEY` and `{PREFIX}_SECRET_KEY` from the process environment
pub struct EnvCredentials {
    prefix: String,
}

impl EnvCredentials {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_uppercase(),
        }
    }
}

impl CredentialProvider for EnvCredentials {
    fn credentials(&self) -> Result<Credentials, ConfigError> {
        let api_key_var = format!("{}_API_KEY", self.prefix);
        let secret_key_var = format!("{}_SECRET_KEY", self.prefix);

        let api_key = env::var(&api_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(api_key_var))?;
        let api_secret = env::var(&secret_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(secret_key_var))?;

        Ok(Credentials::new(api_key, api_secret))
    }
}

#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub api_key: Secret<String>,
    pub secret_key: Secret<String>,
    pub version: String,
    pub base_uri: String,
    pub secret_encoding: SecretEncoding,
    pub timeout_seconds: u64,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for ExchangeConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ExchangeConfig", 6)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("secret_key", "[REDACTED]")?;
        state.serialize_field("version", &self.version)?;
        state.serialize_field("base_uri", &self.base_uri)?;
        state.serialize_field("secret_encoding", &self.secret_encoding)?;
        state.serialize_field("timeout_seconds", &self.timeout_seconds)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ExchangeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        fn default_version() -> String {
            DEFAULT_API_VERSION.to_string()
        }

        fn default_base_uri() -> String {
            DEFAULT_BASE_URI.to_string()
        }

        const fn default_timeout() -> u64 {
            DEFAULT_TIMEOUT_SECONDS
        }

        #[derive(Deserialize)]
        struct ExchangeConfigHelper {
            api_key: String,
            secret_key: String,
            #[serde(default = "default_version")]
            version: String,
            #[serde(default = "default_base_uri")]
            base_uri: String,
            #[serde(default)]
            secret_encoding: SecretEncoding,
            #[serde(default = "default_timeout")]
            timeout_seconds: u64,
        }

        let helper = ExchangeConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: Secret::new(helper.api_key),
            secret_key: Secret::new(helper.secret_key),
            version: helper.version,
            base_uri: helper.base_uri,
            secret_encoding: helper.secret_encoding,
            timeout_seconds: helper.timeout_seconds,
        })
    }
}

impl ExchangeConfig {
    /// Create a new configuration with API credentials
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            version: DEFAULT_API_VERSION.to_string(),
            base_uri: DEFAULT_BASE_URI.to_string(),
            secret_encoding: SecretEncoding::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Create configuration from any credential provider
    pub fn from_provider<P: CredentialProvider>(provider: &P) -> Result<Self, ConfigError> {
        let credentials = provider.credentials()?;
        Ok(Self {
            api_key: credentials.api_key,
            secret_key: credentials.api_secret,
            ..Self::read_only()
        })
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{EXCHANGE}_API_KEY` (e.g., `HITBTC_API_KEY`)
    /// - `{EXCHANGE}_SECRET_KEY` (e.g., `HITBTC_SECRET_KEY`)
    /// - `{EXCHANGE}_API_VERSION` (optional, defaults to "1")
    /// - `{EXCHANGE}_BASE_URI` (optional, defaults to "api.hitbtc.com")
    /// - `{EXCHANGE}_SECRET_ENCODING` (optional, "raw" or "base64")
    pub fn from_env(exchange_prefix: &str) -> Result<Self, ConfigError> {
        let prefix = exchange_prefix.to_uppercase();
        let mut config = Self::from_provider(&EnvCredentials::new(&prefix))?;

        if let Ok(version) = env::var(format!("{}_API_VERSION", prefix)) {
            config.version = version;
        }
        if let Ok(base_uri) = env::var(format!("{}_BASE_URI", prefix)) {
            config.base_uri = base_uri;
        }
        if let Ok(encoding) = env::var(format!("{}_SECRET_ENCODING", prefix)) {
            config.secret_encoding = encoding.parse()?;
        }

        Ok(config)
    }

    /// Create configuration from .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(exchange_prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(exchange_prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(
        exchange_prefix: &str,
        env_file_path: &str,
    ) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            // No file is fine, the process environment still applies
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(exchange_prefix)
    }

    /// Create configuration for read-only operations (market data only)
    #[must_use]
    pub fn read_only() -> Self {
        Self::new(String::new(), String::new())
    }

    /// Check if this configuration has valid credentials for authenticated operations
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.secret_key.expose_secret().is_empty()
    }

    /// Set the API version path segment
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the API host (no scheme)
    #[must_use]
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    #[must_use]
    pub const fn secret_encoding(mut self, encoding: SecretEncoding) -> Self {
        self.secret_encoding = encoding;
        self
    }

    #[must_use]
    pub const fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get secret key (use carefully - exposes secret)
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
