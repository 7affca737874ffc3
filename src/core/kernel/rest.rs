use crate::core::errors::ExchangeError;
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{error, instrument, trace};

/// A fully assembled HTTP request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl PreparedRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn post(url: String, body: String) -> Self {
        Self {
            method: Method::POST,
            url,
            headers: HashMap::new(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// REST client trait for making HTTP requests
///
/// The transport only moves bytes. Successful (2xx) responses yield the raw
/// body text; anything else is an error. Nothing is retried.
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<String, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(exchange_name: String) -> Self {
        Self {
            exchange_name,
            timeout_seconds: 30,
            user_agent: concat!("hitbtc-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()?;

        Ok(ReqwestRest {
            client,
            config: self.config,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone, Debug)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
}

impl ReqwestRest {
    pub fn new(exchange_name: String) -> Result<Self, ExchangeError> {
        RestClientBuilder::new(RestClientConfig::new(exchange_name)).build()
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Handle the response and extract the body text
    #[instrument(skip(self, response), fields(exchange = %self.config.exchange_name, status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<String, ExchangeError> {
        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            ExchangeError::NetworkError(format!("Failed to read response body: {}", e))
        })?;

        trace!("Response body: {}", response_text);

        if status.is_success() {
            Ok(response_text)
        } else {
            error!(status = status.as_u16(), "Request rejected by transport");
            Err(ExchangeError::ApiError {
                code: status.as_u16(),
                message: response_text,
            })
        }
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, request), fields(exchange = %self.config.exchange_name, method = %request.method))]
    async fn execute(&self, request: PreparedRequest) -> Result<String, ExchangeError> {
        let mut builder = self.client.request(request.method, &request.url);

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, "Request failed");
            ExchangeError::NetworkError(format!("Request failed: {}", e))
        })?;

        self.handle_response(response).await
    }
}
