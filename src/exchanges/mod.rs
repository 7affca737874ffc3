pub mod hitbtc;
