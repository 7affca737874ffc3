use crate::core::errors::ExchangeError;
use crate::core::kernel::QueryParams;
use crate::exchanges::hitbtc::types::TradeFilter;
use serde_json::Value;

pub const SYMBOL_LENGTH: usize = 6;

/// Check a currency-pair code and return it uppercased.
pub fn validate_symbol(input: &str) -> Result<String, ExchangeError> {
    if input.chars().count() != SYMBOL_LENGTH {
        return Err(ExchangeError::InvalidSymbol(format!(
            "'{}' must be exactly {} characters",
            input, SYMBOL_LENGTH
        )));
    }
    Ok(input.to_ascii_uppercase())
}

/// Same as [`validate_symbol`] for dynamically typed input; anything but a
/// JSON string is rejected.
pub fn validate_symbol_value(value: &Value) -> Result<String, ExchangeError> {
    match value {
        Value::String(s) => validate_symbol(s),
        other => Err(ExchangeError::InvalidSymbol(format!(
            "expected a string, got {}",
            other
        ))),
    }
}

pub fn validate_trade_filter(by: &str) -> Result<TradeFilter, ExchangeError> {
    by.parse()
}

/// Public trade queries must name a valid `by` filter. Everything else is
/// left for the exchange to judge.
pub fn validate_trades_params(params: &QueryParams) -> Result<(), ExchangeError> {
    let by = params.get("by").ok_or_else(|| {
        ExchangeError::InvalidArgument("trades query requires a 'by' filter".to_string())
    })?;
    validate_trade_filter(by).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_symbol_is_uppercased() {
        assert_eq!(validate_symbol("btcusd").unwrap(), "BTCUSD");
        assert_eq!(validate_symbol("EthBtc").unwrap(), "ETHBTC");
    }

    #[test]
    fn test_symbol_length_is_enforced() {
        for bad in ["", "BTC", "BTCUSDT", "BTC-USD-"] {
            let err = validate_symbol(bad).unwrap_err();
            assert!(matches!(err, ExchangeError::InvalidSymbol(_)), "{}", bad);
        }
    }

    #[test]
    fn test_symbol_value_must_be_string() {
        assert_eq!(validate_symbol_value(&json!("ltcbtc")).unwrap(), "LTCBTC");
        for bad in [json!(123_456), json!(null), json!(["BTCUSD"])] {
            assert!(matches!(
                validate_symbol_value(&bad),
                Err(ExchangeError::InvalidSymbol(_))
            ));
        }
    }

    #[test]
    fn test_trade_filter() {
        assert_eq!(validate_trade_filter("trade_id").unwrap(), TradeFilter::TradeId);
        assert_eq!(validate_trade_filter("ts").unwrap(), TradeFilter::Timestamp);
        assert!(matches!(
            validate_trade_filter("bogus"),
            Err(ExchangeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_trades_params() {
        assert!(validate_trades_params(&QueryParams::new().with("by", "ts")).is_ok());
        assert!(validate_trades_params(&QueryParams::new().with("by", "bogus")).is_err());
        assert!(matches!(
            validate_trades_params(&QueryParams::new().with("from", 0)),
            Err(ExchangeError::InvalidArgument(_))
        ));
    }
}
