use crate::core::errors::ExchangeError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Codec trait for turning a raw response body into a caller-facing value
///
/// Exchanges differ in how they wrap payloads; the codec owns that knowledge
/// so the transport never has to.
pub trait ResponseCodec: Send + Sync {
    type Output;

    fn decode(&self, text: &str) -> Result<Self::Output, ExchangeError>;
}

/// Decodes a body into a [`Normalized`] tree as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl ResponseCodec for JsonCodec {
    type Output = Normalized;

    fn decode(&self, text: &str) -> Result<Normalized, ExchangeError> {
        Normalized::parse(text)
    }
}

/// Decodes a `{ "result": ..., "error": ... }` envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeCodec;

impl ResponseCodec for EnvelopeCodec {
    type Output = Envelope;

    fn decode(&self, text: &str) -> Result<Envelope, ExchangeError> {
        Envelope::from_normalized(Normalized::parse(text)?)
    }
}

/// An owned JSON document with tolerant, never-panicking access.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized(Value);

impl Normalized {
    /// Parse JSON text. Malformed input is a decode error.
    pub fn parse(text: &str) -> Result<Self, ExchangeError> {
        Ok(Self(serde_json::from_str(text)?))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn root(&self) -> Node<'_> {
        Node(&self.0)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Look up a top-level field; see [`Node::field`].
    pub fn field(&self, key: &str) -> Field<'_> {
        self.root().field(key)
    }

    pub fn get(&self, key: &str) -> Option<Node<'_>> {
        self.root().get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.root().contains(key)
    }

    /// Deserialize into a typed structure
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ExchangeError> {
        serde_json::from_value(self.0.clone()).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to deserialize JSON: {}", e))
        })
    }
}

impl fmt::Display for Normalized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Borrowed view into a [`Normalized`] tree.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(&'a Value);

/// Outcome of a tolerant field lookup.
///
/// An absent field hands back the container that was searched instead of
/// failing, so callers can keep navigating or check [`Field::is_present`].
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    Present(Node<'a>),
    Absent(Node<'a>),
}

impl<'a> Field<'a> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The found field, or the container when absent
    pub fn node(self) -> Node<'a> {
        match self {
            Self::Present(node) | Self::Absent(node) => node,
        }
    }

    pub fn present(self) -> Option<Node<'a>> {
        match self {
            Self::Present(node) => Some(node),
            Self::Absent(_) => None,
        }
    }
}

impl<'a> Node<'a> {
    pub fn value(&self) -> &'a Value {
        self.0
    }

    /// Identity comparison: both views point at the same JSON node.
    pub fn is_same(&self, other: &Node<'_>) -> bool {
        std::ptr::eq(self.0, other.0)
    }

    pub fn get(&self, key: &str) -> Option<Node<'a>> {
        self.0.get(key).map(Node)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.as_object().is_some_and(|o| o.contains_key(key))
    }

    pub fn field(&self, key: &str) -> Field<'a> {
        self.get(key).map_or(Field::Absent(*self), Field::Present)
    }

    /// Walk a sequence of keys; `None` as soon as one is missing
    pub fn path(&self, keys: &[&str]) -> Option<Node<'a>> {
        keys.iter().try_fold(*self, |node, key| node.get(key))
    }

    pub fn at(&self, index: usize) -> Option<Node<'a>> {
        self.0.get(index).map(Node)
    }

    pub fn items(&self) -> Vec<Node<'a>> {
        self.0
            .as_array()
            .map(|items| items.iter().map(Node).collect())
            .unwrap_or_default()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.0.as_str()
    }

    /// Integers may arrive as JSON numbers or as numeric strings
    pub fn as_u64(&self) -> Option<u64> {
        match self.0 {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Prices and amounts may arrive as JSON numbers or as numeric strings
    pub fn as_f64(&self) -> Option<f64> {
        match self.0 {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn to_normalized(&self) -> Normalized {
        Normalized(self.0.clone())
    }
}

/// A business-level rejection reported inside a well-formed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRejection {
    pub message: String,
}

impl fmt::Display for ExchangeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result/error split of an authenticated response.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success(Normalized),
    Rejected(ExchangeRejection),
}

impl Envelope {
    /// Classify a decoded response.
    ///
    /// A non-empty `error` wins. Otherwise the `result` member is the
    /// payload; a response without one is passed through whole.
    pub fn from_normalized(doc: Normalized) -> Result<Self, ExchangeError> {
        if let Some(message) = doc.get("error").and_then(error_message) {
            return Ok(Self::Rejected(ExchangeRejection { message }));
        }

        match doc.into_value() {
            Value::Object(mut map) => Ok(Self::Success(match map.remove("result") {
                Some(result) => Normalized(result),
                None => Normalized(Value::Object(map)),
            })),
            other => Ok(Self::Success(Normalized(other))),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn success(&self) -> Option<&Normalized> {
        match self {
            Self::Success(doc) => Some(doc),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&ExchangeRejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::Success(_) => None,
        }
    }

    pub fn into_result(self) -> Result<Normalized, ExchangeRejection> {
        match self {
            Self::Success(doc) => Ok(doc),
            Self::Rejected(rejection) => Err(rejection),
        }
    }
}

fn error_message(node: Node<'_>) -> Option<String> {
    match node.value() {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(map) if map.is_empty() => None,
        Value::Object(map) => Some(
            map.get("message")
                .and_then(Value::as_str)
                .map_or_else(|| node.value().to_string(), str::to_string),
        ),
        Value::Array(items) if items.is_empty() => None,
        other => Some(other.to_string()),
    }
}
