// Router orchestrates catalog + fetcher for one viewing session
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::error::MarketDataResult;
use crate::market_data::adapters::LedgerView;
use crate::market_data::catalog::MarketCatalog;
use crate::market_data::fetcher::OrderBookFetcher;
use crate::market_data::types::{MarketDescriptor, MarketOption, NormalisedOrder, OrderBook};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSnapshot {
    pub market_id: u64,
    pub book: OrderBook<NormalisedOrder>,
}

/// Outcome of a selection. A newer selection made while this one was in
/// flight wins; the older result is reported as superseded and carries no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Current(MarketSnapshot),
    Superseded { market_id: u64 },
}

#[derive(Debug)]
pub struct SessionStart {
    pub markets: Vec<MarketDescriptor>,
    pub options: Vec<MarketOption>,
    /// Book of the first listed market; `None` when the catalog is empty.
    pub initial: Option<Selection>,
}

pub struct MarketRouter {
    catalog: MarketCatalog,
    fetcher: OrderBookFetcher,
    // bumped on every selection; a fetch is current only if it holds the latest value
    generation: AtomicU64,
}

impl MarketRouter {
    pub fn new(view: Arc<dyn LedgerView>, contract_id: &str) -> Self {
        Self {
            catalog: MarketCatalog::new(view.clone(), contract_id),
            fetcher: OrderBookFetcher::new(view, contract_id),
            generation: AtomicU64::new(0),
        }
    }

    /// List markets and load the first one.
    ///
    /// With no markets the fetcher is never called.
    #[instrument(skip(self))]
    pub async fn start(&self) -> MarketDataResult<SessionStart> {
        let markets = self.catalog.list_markets().await?;
        let options: Vec<MarketOption> = markets.iter().map(MarketOption::from).collect();

        let initial = match options.first() {
            Some(first) => Some(self.select(first.value).await?),
            None => {
                info!("Catalog is empty, no market to select");
                None
            }
        };

        Ok(SessionStart { markets, options, initial })
    }

    /// Fetch and normalise the book for a newly selected market.
    ///
    /// Errors from a selection that has since been superseded are dropped too.
    #[instrument(skip(self))]
    pub async fn select(&self, market_id: u64) -> MarketDataResult<Selection> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.fetcher.fetch_normalised(market_id).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(market_id, ticket, "Selection superseded, discarding result");
            return Ok(Selection::Superseded { market_id });
        }

        let book = result?;
        info!(market_id, asks = book.ask_orders.len(), bids = book.bid_orders.len(), "Market selected");
        Ok(Selection::Current(MarketSnapshot { market_id, book }))
    }
}
