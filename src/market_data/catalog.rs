// Market catalog: the contract's `markets` view

use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument};

use crate::error::MarketDataResult;
use crate::market_data::adapters::{decode_view, LedgerView};
use crate::market_data::types::MarketDescriptor;

pub const MARKETS_METHOD: &str = "markets";

pub struct MarketCatalog {
    view: Arc<dyn LedgerView>,
    contract_id: String,
}

impl MarketCatalog {
    pub fn new(view: Arc<dyn LedgerView>, contract_id: impl Into<String>) -> Self {
        Self { view, contract_id: contract_id.into() }
    }

    /// Fetch every market the contract lists, in contract order.
    ///
    /// One query per call, no retry. An empty list is a valid answer.
    #[instrument(skip(self), fields(contract = %self.contract_id))]
    pub async fn list_markets(&self) -> MarketDataResult<Vec<MarketDescriptor>> {
        let value = self.view.call_view(&self.contract_id, MARKETS_METHOD, &json!({})).await?;
        let markets: Vec<MarketDescriptor> = decode_view(MARKETS_METHOD, value)?;
        info!(count = markets.len(), "Fetched market catalog");
        Ok(markets)
    }
}
