pub mod account;
pub mod config;
pub mod error;
pub mod market_data;
pub mod telemetry;
