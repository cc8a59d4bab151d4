// Order book fetcher: the contract's `view_market` view, plus normalisation

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::error::MarketDataResult;
use crate::market_data::adapters::{decode_view, LedgerView};
use crate::market_data::normaliser::normalise_book;
use crate::market_data::types::{NormalisedOrder, OrderBook, RawOrder};

pub const VIEW_MARKET_METHOD: &str = "view_market";

pub struct OrderBookFetcher {
    view: Arc<dyn LedgerView>,
    contract_id: String,
}

impl OrderBookFetcher {
    pub fn new(view: Arc<dyn LedgerView>, contract_id: impl Into<String>) -> Self {
        Self { view, contract_id: contract_id.into() }
    }

    /// Fetch the book for `market_id` exactly as the contract returns it.
    ///
    /// The id is not checked locally; an unknown id comes back as the
    /// contract's own error. Nothing is cached.
    #[instrument(skip(self), fields(contract = %self.contract_id))]
    pub async fn fetch_order_book(&self, market_id: u64) -> MarketDataResult<OrderBook<RawOrder>> {
        let args = json!({ "market_id": market_id });
        let value = self.view.call_view(&self.contract_id, VIEW_MARKET_METHOD, &args).await?;
        let book: OrderBook<RawOrder> = decode_view(VIEW_MARKET_METHOD, value)?;
        debug!(asks = book.ask_orders.len(), bids = book.bid_orders.len(), "Fetched order book");
        Ok(book)
    }

    /// Fetch and normalise. Any bad numeral fails the whole call.
    pub async fn fetch_normalised(&self, market_id: u64) -> MarketDataResult<OrderBook<NormalisedOrder>> {
        let raw = self.fetch_order_book(market_id).await?;
        normalise_book(&raw).map_err(|e| {
            metrics::counter!("spinbook_format_errors_total").increment(1);
            warn!(market_id, error = %e, "Order book contains an invalid numeral");
            e.into()
        })
    }
}
