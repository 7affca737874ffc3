use crate::core::errors::ExchangeError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// An immutable-by-default set of request parameters.
///
/// Keys are kept sorted, so the encoded form is identical every time the
/// same set is encoded. That matters because the encoded string is part of
/// the signed message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this set with `key` set to `value`
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.entries.insert(key.into(), value.to_string());
        self
    }

    /// Set `key` only when a value is present
    #[must_use]
    pub fn with_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Merge another set into this one; entries of `other` win on conflict
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
        self
    }

    /// Build a parameter set from a JSON object of scalars.
    ///
    /// Nested objects, arrays and nulls have no query representation and fail
    /// with `EncodingError`. This is the only place that error is raised on the
    /// way out: connector operations take typed `QueryParams`, whose values are
    /// already strings.
    pub fn from_json(value: &Value) -> Result<Self, ExchangeError> {
        let object = value.as_object().ok_or_else(|| {
            ExchangeError::EncodingError(format!("Expected a JSON object, got {}", value))
        })?;

        let mut params = Self::new();
        for (key, v) in object {
            let scalar = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(ExchangeError::EncodingError(format!(
                        "Parameter '{}' is not a scalar: {}",
                        key, other
                    )))
                }
            };
            params.entries.insert(key.clone(), scalar);
        }
        Ok(params)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Percent-encode into `k=v&k2=v2`. An empty set encodes to "".
    pub fn encode(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse a query string produced by [`QueryParams::encode`] (or any
    /// `application/x-www-form-urlencoded` string without `+` for spaces).
    pub fn decode(query: &str) -> Result<Self, ExchangeError> {
        let mut params = Self::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let key = urlencoding::decode(k)
                .map_err(|e| ExchangeError::EncodingError(format!("Invalid key '{}': {}", k, e)))?;
            let value = urlencoding::decode(v).map_err(|e| {
                ExchangeError::EncodingError(format!("Invalid value for '{}': {}", key, e))
            })?;
            params.entries.insert(key.into_owned(), value.into_owned());
        }
        Ok(params)
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |params, (k, v)| params.with(k, v))
    }
}
