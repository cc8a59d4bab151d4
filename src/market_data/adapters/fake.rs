// In-memory LedgerView returning canned contract responses

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::Notify;

use super::LedgerView;
use crate::account::AccountState;
use crate::error::QueryError;

#[derive(Default)]
pub(crate) struct CannedView {
    markets: Option<Value>,
    books: HashMap<u64, Value>,
    accounts: HashMap<String, AccountState>,
    // market id whose view_market call waits on `release` after signalling `entered`
    gated: Option<u64>,
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl CannedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markets(mut self, markets: Value) -> Self {
        self.markets = Some(markets);
        self
    }

    pub fn with_book(mut self, market_id: u64, book: Value) -> Self {
        self.books.insert(market_id, book);
        self
    }

    pub fn with_account(mut self, state: AccountState) -> Self {
        self.accounts.insert(state.account_id.clone(), state);
        self
    }

    pub fn gate(mut self, market_id: u64) -> Self {
        self.gated = Some(market_id);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> usize {
        self.calls().iter().filter(|(m, _)| m == method).count()
    }
}

#[async_trait::async_trait]
impl LedgerView for CannedView {
    async fn call_view(&self, _contract_id: &str, method_name: &str, args: &Value) -> Result<Value, QueryError> {
        self.calls.lock().unwrap().push((method_name.to_string(), args.clone()));

        match method_name {
            "markets" => self
                .markets
                .clone()
                .ok_or_else(|| QueryError::Execution("markets unavailable".into())),
            "view_market" => {
                let id = args
                    .get("market_id")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| QueryError::Execution("missing market_id".into()))?;
                if self.gated == Some(id) {
                    self.entered.notify_one();
                    self.release.notified().await;
                }
                self.books
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| QueryError::Execution(format!("Smart contract panicked: market {id} not found")))
            }
            other => Err(QueryError::Rpc { name: "MethodNotFound".into(), message: other.to_string() }),
        }
    }

    async fn view_account(&self, account_id: &str) -> Result<AccountState, QueryError> {
        self.accounts.get(account_id).cloned().ok_or_else(|| QueryError::Rpc {
            name: "UNKNOWN_ACCOUNT".into(),
            message: account_id.to_string(),
        })
    }
}
