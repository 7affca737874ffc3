use crate::core::errors::ExchangeError;
use crate::core::kernel::QueryParams;
use crate::exchanges::hitbtc::validation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A validated, uppercased 6-character currency pair such as `BTCUSD`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(code: &str) -> Result<Self, ExchangeError> {
        validation::validate_symbol(code).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&Value> for Symbol {
    type Error = ExchangeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        validation::validate_symbol_value(value).map(Self)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

/// Field that public trade queries filter and sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeFilter {
    #[serde(rename = "trade_id")]
    TradeId,
    #[serde(rename = "ts")]
    Timestamp,
}

impl TradeFilter {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TradeId => "trade_id",
            Self::Timestamp => "ts",
        }
    }
}

impl fmt::Display for TradeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeFilter {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trade_id" => Ok(Self::TradeId),
            "ts" => Ok(Self::Timestamp),
            other => Err(ExchangeError::InvalidArgument(format!(
                "'by' must be 'trade_id' or 'ts', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// Parameters for the public trade history endpoint.
///
/// `from` is a trade id or a millisecond timestamp depending on `by`.
/// `max_results` is capped at 1000 by the exchange. Formatting switches such
/// as `format_item` or `format_price` go in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradesQuery {
    pub from: u64,
    pub till: Option<u64>,
    pub by: TradeFilter,
    pub sort: Option<SortOrder>,
    pub start_index: u64,
    pub max_results: u32,
    pub extra: QueryParams,
}

impl TradesQuery {
    pub fn new(by: TradeFilter, from: u64, max_results: u32) -> Self {
        Self {
            from,
            till: None,
            by,
            sort: None,
            start_index: 0,
            max_results,
            extra: QueryParams::new(),
        }
    }

    #[must_use]
    pub const fn till(mut self, till: u64) -> Self {
        self.till = Some(till);
        self
    }

    #[must_use]
    pub const fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub const fn start_index(mut self, start_index: u64) -> Self {
        self.start_index = start_index;
        self
    }

    #[must_use]
    pub fn option(mut self, key: &str, value: impl ToString) -> Self {
        self.extra = self.extra.with(key, value);
        self
    }

    pub fn to_params(&self) -> QueryParams {
        self.extra
            .clone()
            .with("from", self.from)
            .with_opt("till", self.till)
            .with("by", self.by)
            .with_opt("sort", self.sort)
            .with("start_index", self.start_index)
            .with("max_results", self.max_results)
    }
}
