// Shared trait for read-only ledger access

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::account::AccountState;
use crate::error::{DecodeError, QueryError};

/// Read-only query capability against the ledger.
///
/// Implementations never sign or submit transactions. Catalog and fetcher only
/// see this trait, so tests can hand them a canned source instead of a node.
#[async_trait::async_trait]
pub trait LedgerView: Send + Sync {
    /// Call a view method on `contract_id` and return its JSON result.
    async fn call_view(
        &self,
        contract_id: &str,
        method_name: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, QueryError>;

    /// Balance and storage state of an account.
    async fn view_account(&self, account_id: &str) -> Result<AccountState, QueryError>;
}

/// Deserialize a view result into the expected shape.
pub fn decode_view<T: DeserializeOwned>(method: &str, value: serde_json::Value) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|source| {
        warn!(method, error = %source, "View result does not match expected schema");
        DecodeError { method: method.to_string(), source }
    })
}

// Make the NEAR adapter visible
pub mod near;
pub mod near_types;

#[cfg(test)]
pub(crate) mod fake;
