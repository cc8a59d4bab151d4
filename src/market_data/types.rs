use serde::{Deserialize, Serialize};

// On-chain asset identity + display precision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub ticker: String,
    pub decimal: u32,
    pub address: String,
}

// One tradable pair as listed by the `markets` view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketDescriptor {
    pub id: u64,
    pub base: AssetInfo,
    pub quote: AssetInfo,
    pub fee: serde_json::Number, // units defined by the contract; may be fractional
}

impl MarketDescriptor {
    /// Selector label, e.g. "NEAR/USDC".
    pub fn label(&self) -> String {
        format!("{}/{}", self.base.ticker, self.quote.ticker)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketOption {
    pub label: String,
    pub value: u64,
}

impl From<&MarketDescriptor> for MarketOption {
    fn from(market: &MarketDescriptor) -> Self {
        Self { label: market.label(), value: market.id }
    }
}

// Resting order exactly as the contract returns it.
// Strings may be exponential, e.g. "1.5e-7"; never parse them into floats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOrder {
    pub price: String,
    pub quantity: String,
}

// Same shape as RawOrder, both fields in plain decimal notation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalisedOrder {
    pub price: String,
    pub quantity: String,
}

/// Ask and bid sides in ledger order. Nothing here sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook<O = RawOrder> {
    pub ask_orders: Vec<O>,
    pub bid_orders: Vec<O>,
}

impl<O> OrderBook<O> {
    pub fn is_empty(&self) -> bool {
        self.ask_orders.is_empty() && self.bid_orders.is_empty()
    }
}
