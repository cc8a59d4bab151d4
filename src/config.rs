//! Runtime settings.
//!
//! Layered with the `config` crate: built-in testnet defaults, then an optional
//! TOML file, then `SPINBOOK_*` environment variables.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "spinbook.toml";
pub const ENV_PREFIX: &str = "SPINBOOK";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub network_id: String,
    /// JSON-RPC endpoint, e.g. "https://rpc.testnet.near.org".
    pub node_url: String,
    /// Contract exposing the `markets` and `view_market` views.
    pub contract_id: String,
    /// Account whose balance is shown. Optional: market data needs no account.
    #[serde(default)]
    pub account_id: Option<String>,
    pub finality: String,
    pub request_timeout_ms: u64,
    pub log_filter: String,
}

impl Settings {
    /// Load settings. `path` wins over `SPINBOOK_CONFIG`, which wins over
    /// `spinbook.toml`; a missing file is not an error.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let path = path
            .map(str::to_string)
            .or_else(|| std::env::var(format!("{ENV_PREFIX}_CONFIG")).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        Config::builder()
            .set_default("network_id", "testnet")?
            .set_default("node_url", "https://rpc.testnet.near.org")?
            .set_default("contract_id", "app_2.spin_swap.testnet")?
            .set_default("finality", "final")?
            .set_default("request_timeout_ms", 10_000_i64)?
            .set_default("log_filter", "info,spinbook_rs=debug")?
            .add_source(File::with_name(&path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
