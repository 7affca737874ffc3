use anyhow::Context;
use hitbtc::core::config::ExchangeConfig;
use hitbtc::core::traits::MarketDataSource;
use hitbtc::exchanges::hitbtc::build_connector;
use hitbtc::{AccountInfo, Envelope};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Falls back to public data only when HITBTC_API_KEY / HITBTC_SECRET_KEY are unset
    let config = ExchangeConfig::from_env("HITBTC").unwrap_or_else(|_| ExchangeConfig::read_only());
    let authenticated = config.has_credentials();
    let hitbtc = build_connector(config).context("failed to build connector")?;

    let time = hitbtc.server_time().await.context("server time")?;
    println!("Server time: {}", time);

    let ticker = hitbtc.ticker("BTCUSD").await.context("ticker")?;
    println!(
        "BTCUSD last: {}",
        ticker
            .get("last")
            .and_then(|n| n.as_str())
            .unwrap_or("n/a")
    );

    if authenticated {
        match hitbtc.balance().await.context("balance")? {
            Envelope::Success(balance) => println!("Balance: {}", balance),
            Envelope::Rejected(rejection) => println!("Balance rejected: {}", rejection),
        }
    }

    Ok(())
}
