use async_trait::async_trait;
use hitbtc::core::config::ExchangeConfig;
use hitbtc::core::errors::ExchangeError;
use hitbtc::core::kernel::{PreparedRequest, QueryParams, RestClient};
use hitbtc::core::traits::{AccountInfo, MarketDataSource, OrderPlacer};
use hitbtc::exchanges::hitbtc::{
    build_connector_with_client, generate_signature, HitbtcConnector, SortOrder, Symbol,
    TradeFilter, TradesQuery, SIGNATURE_HEADER,
};
use reqwest::Method;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const API_KEY: &str = "test_key";
const SECRET: &str = "test_secret";

#[derive(Clone)]
enum Canned {
    Body(&'static str),
    Status(u16, &'static str),
}

/// In-memory transport that records every request and replays canned replies
#[derive(Clone, Default)]
struct RecordingRest {
    sent: Arc<Mutex<Vec<PreparedRequest>>>,
    replies: Arc<Mutex<VecDeque<Canned>>>,
}

impl RecordingRest {
    fn replying(replies: &[Canned]) -> Self {
        Self {
            sent: Arc::default(),
            replies: Arc::new(Mutex::new(replies.iter().cloned().collect())),
        }
    }

    fn sent(&self) -> Vec<PreparedRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestClient for RecordingRest {
    async fn execute(&self, request: PreparedRequest) -> Result<String, ExchangeError> {
        self.sent.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Canned::Body(body)) => Ok(body.to_string()),
            Some(Canned::Status(code, body)) => Err(ExchangeError::ApiError {
                code,
                message: body.to_string(),
            }),
            None => Err(ExchangeError::NetworkError("no canned reply".to_string())),
        }
    }
}

fn connector(rest: &RecordingRest) -> HitbtcConnector<RecordingRest> {
    let config = ExchangeConfig::new(API_KEY.to_string(), SECRET.to_string());
    build_connector_with_client(config, rest.clone()).unwrap()
}

fn public_connector(rest: &RecordingRest) -> HitbtcConnector<RecordingRest> {
    build_connector_with_client(ExchangeConfig::read_only(), rest.clone()).unwrap()
}

/// Path plus query of a private URL, i.e. the part that gets signed
fn signed_path(url: &str) -> &str {
    url.strip_prefix("https://api.hitbtc.com").unwrap()
}

#[cfg(test)]
mod market_data {
    use super::*;

    #[tokio::test]
    async fn test_server_time() {
        let rest = RecordingRest::replying(&[Canned::Body(r#"{"timestamp": 1700000000123}"#)]);
        let time = public_connector(&rest).server_time().await.unwrap();

        assert_eq!(time, 1_700_000_000_123);
        let sent = rest.sent();
        assert_eq!(sent[0].method, Method::GET);
        assert_eq!(sent[0].url, "http://api.hitbtc.com/api/1/public/time");
    }

    #[tokio::test]
    async fn test_server_time_missing_field() {
        let rest = RecordingRest::replying(&[Canned::Body(r"{}")]);
        let err = public_connector(&rest).server_time().await.unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_ticker_uppercases_symbol() {
        let rest = RecordingRest::replying(&[Canned::Body(r#"{"last": "35000.10"}"#)]);
        let ticker = public_connector(&rest).ticker("btcusd").await.unwrap();

        assert_eq!(ticker.get("last").and_then(|n| n.as_f64()), Some(35000.10));
        assert_eq!(
            rest.sent()[0].url,
            "http://api.hitbtc.com/api/1/public/BTCUSD/ticker"
        );
    }

    #[tokio::test]
    async fn test_invalid_symbol_never_reaches_transport() {
        let rest = RecordingRest::replying(&[]);
        let err = public_connector(&rest).ticker("BTC").await.unwrap_err();

        assert!(matches!(err, ExchangeError::InvalidSymbol(_)));
        assert!(rest.sent().is_empty());
    }

    #[tokio::test]
    async fn test_order_book_passes_options_through() {
        let rest = RecordingRest::replying(&[Canned::Body(r#"{"asks": [], "bids": []}"#)]);
        let params = QueryParams::new()
            .with("format_price", "number")
            .with("format_amount_unit", "lot");
        let book = public_connector(&rest)
            .order_book("ethbtc", &params)
            .await
            .unwrap();

        assert!(book.contains("asks"));
        assert!(!book.field("spread").is_present());
        assert_eq!(
            rest.sent()[0].url,
            "http://api.hitbtc.com/api/1/public/ETHBTC/orderbook?format_amount_unit=lot&format_price=number"
        );
    }

    #[tokio::test]
    async fn test_trades_rejects_unknown_filter() {
        let rest = RecordingRest::replying(&[]);
        let params = QueryParams::new().with("by", "bogus").with("from", 0);
        let err = public_connector(&rest)
            .trades("BTCUSD", &params)
            .await
            .unwrap_err();

        assert!(matches!(err, ExchangeError::InvalidArgument(_)));
        assert!(rest.sent().is_empty());
    }

    #[tokio::test]
    async fn test_trades_query() {
        let rest = RecordingRest::replying(&[Canned::Body(r#"{"trades": [[1, "100.0", "0.5", 1700000000000]]}"#)]);
        let query = TradesQuery::new(TradeFilter::TradeId, 42, 100).sort(SortOrder::Desc);
        let trades = public_connector(&rest)
            .market
            .trades_query("btcusd", &query)
            .await
            .unwrap();

        assert_eq!(trades.get("trades").unwrap().items().len(), 1);
        assert_eq!(
            rest.sent()[0].url,
            "http://api.hitbtc.com/api/1/public/BTCUSD/trades?by=trade_id&from=42&max_results=100&sort=desc&start_index=0"
        );
    }

    #[tokio::test]
    async fn test_symbol_filtering() {
        let body = r#"{"symbols": [
            {"symbol": "BTCUSD", "step": "0.01"},
            {"symbol": "ETHBTC", "step": "0.000001"},
            {"symbol": "LTCBTC", "step": "0.00001"}
        ]}"#;
        let rest = RecordingRest::replying(&[Canned::Body(body), Canned::Body(body), Canned::Body(body)]);
        let hitbtc = public_connector(&rest);

        assert_eq!(hitbtc.symbols().await.unwrap().len(), 3);

        let wanted = [Symbol::new("ethbtc").unwrap(), Symbol::new("ltcbtc").unwrap()];
        let filtered = hitbtc.market.symbols_filtered(&wanted).await.unwrap();
        assert_eq!(filtered.len(), 2);

        let single = hitbtc.market.symbol("btcusd").await.unwrap().unwrap();
        assert_eq!(single.get("step").and_then(|n| n.as_str()), Some("0.01"));
    }
}

#[cfg(test)]
mod trading {
    use super::*;

    #[tokio::test]
    async fn test_balance_is_signed_get() {
        let rest = RecordingRest::replying(&[Canned::Body(
            r#"{"result": {"balance": [{"currency_code": "BTC", "cash": 1.5}]}, "error": ""}"#,
        )]);
        let envelope = connector(&rest).balance().await.unwrap();

        let balance = envelope.into_result().unwrap();
        let first = balance.get("balance").unwrap().at(0).unwrap();
        assert_eq!(first.get("cash").and_then(|n| n.as_f64()), Some(1.5));

        let request = &rest.sent()[0];
        assert_eq!(request.method, Method::GET);
        assert!(request.body.is_none());

        let path = signed_path(&request.url);
        assert!(path.starts_with("/api/1/trading/balance?apikey=test_key&nonce="));
        assert_eq!(
            request.header(SIGNATURE_HEADER),
            Some(generate_signature(SECRET.as_bytes(), path, "").unwrap().as_str())
        );
    }

    #[tokio::test]
    async fn test_create_order_is_signed_post() {
        let rest = RecordingRest::replying(&[Canned::Body(
            r#"{"result": {"ExecutionReport": {"orderStatus": "new"}}, "error": ""}"#,
        )]);
        let params = QueryParams::new()
            .with("clientOrderId", "abc 123")
            .with("symbol", "BTCUSD")
            .with("side", "buy")
            .with("quantity", 1)
            .with("type", "market");
        let envelope = connector(&rest).create_order(&params).await.unwrap();
        assert!(!envelope.is_rejected());

        let request = &rest.sent()[0];
        let body = request.body.as_deref().unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            body,
            "clientOrderId=abc%20123&quantity=1&side=buy&symbol=BTCUSD&type=market"
        );

        let path = signed_path(&request.url);
        assert!(path.starts_with("/api/1/trading/new_order?apikey=test_key&nonce="));
        assert!(!path.contains("symbol"));
        assert_eq!(
            request.header(SIGNATURE_HEADER),
            Some(generate_signature(SECRET.as_bytes(), path, body).unwrap().as_str())
        );
    }

    #[tokio::test]
    async fn test_rejection_is_a_value() {
        let rest = RecordingRest::replying(&[Canned::Body(
            r#"{"result": {}, "error": "Insufficient funds"}"#,
        )]);
        let envelope = connector(&rest)
            .create_order(&QueryParams::new().with("symbol", "BTCUSD"))
            .await
            .unwrap();

        assert!(envelope.is_rejected());
        assert_eq!(envelope.rejection().unwrap().message, "Insufficient funds");
        assert!(envelope.success().is_none());
    }

    #[tokio::test]
    async fn test_cancel_order_params_in_query() {
        let rest = RecordingRest::replying(&[Canned::Body(r#"{"result": {}, "error": ""}"#)]);
        connector(&rest)
            .cancel_order(&QueryParams::new().with("clientOrderId", "o-1"))
            .await
            .unwrap();

        let url = &rest.sent()[0].url;
        assert!(url.starts_with("https://api.hitbtc.com/api/1/trading/cancel_order?apikey=test_key&clientOrderId=o-1&nonce="));
    }

    #[tokio::test]
    async fn test_private_paths() {
        let ok = Canned::Body(r#"{"result": {}, "error": ""}"#);
        let rest = RecordingRest::replying(&[ok.clone(), ok.clone(), ok]);
        let hitbtc = connector(&rest);

        hitbtc.active_orders(&QueryParams::new()).await.unwrap();
        hitbtc.recent_orders(&QueryParams::new()).await.unwrap();
        hitbtc.trade_history(&QueryParams::new().with("by", "ts")).await.unwrap();

        let paths: Vec<String> = rest
            .sent()
            .iter()
            .map(|r| signed_path(&r.url).split('?').next().unwrap().to_string())
            .collect();
        assert_eq!(
            paths,
            [
                "/api/1/trading/orders/active",
                "/api/1/trading/orders/recent",
                "/api/1/trading/trades"
            ]
        );
    }

    #[tokio::test]
    async fn test_nonces_increase_between_calls() {
        let ok = Canned::Body(r#"{"result": {}, "error": ""}"#);
        let rest = RecordingRest::replying(&[ok.clone(), ok]);
        let hitbtc = connector(&rest);

        hitbtc.balance().await.unwrap();
        hitbtc.active_orders(&QueryParams::new()).await.unwrap();

        let nonces: Vec<u64> = rest
            .sent()
            .iter()
            .map(|r| {
                let query = r.url.split_once('?').unwrap().1;
                QueryParams::decode(query).unwrap().get("nonce").unwrap().parse().unwrap()
            })
            .collect();
        assert!(nonces[0] < nonces[1]);
    }

    #[tokio::test]
    async fn test_concurrent_calls_use_distinct_nonces() {
        let ok = Canned::Body(r#"{"result": {}, "error": ""}"#);
        let rest = RecordingRest::replying(&vec![ok; 20]);
        let hitbtc = Arc::new(connector(&rest));

        let calls = (0..20).map(|_| {
            let hitbtc = Arc::clone(&hitbtc);
            tokio::spawn(async move { hitbtc.balance().await })
        });
        for result in futures::future::join_all(calls).await {
            assert!(result.unwrap().is_ok());
        }

        let mut nonces: Vec<String> = rest
            .sent()
            .iter()
            .map(|r| {
                let query = r.url.split_once('?').unwrap().1;
                QueryParams::decode(query).unwrap().get("nonce").unwrap().to_string()
            })
            .collect();
        nonces.sort();
        nonces.dedup();
        assert_eq!(nonces.len(), 20);
    }

    #[tokio::test]
    async fn test_private_call_without_credentials() {
        let rest = RecordingRest::replying(&[]);
        let err = public_connector(&rest).balance().await.unwrap_err();

        assert!(matches!(err, ExchangeError::AuthenticationRequired));
        assert!(rest.sent().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let rest = RecordingRest::replying(&[Canned::Status(503, "maintenance")]);
        let err = connector(&rest).balance().await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(rest.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_response_is_decode_error() {
        let rest = RecordingRest::replying(&[Canned::Body("<html>oops</html>")]);
        let err = connector(&rest).balance().await.unwrap_err();
        assert!(err.is_decode());
    }
}
