// NEAR JSON-RPC adapter: read-only `query` calls, nothing is ever signed

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::near_types::{CallResult, QueryParams, RpcError, RpcRequest, RpcResponse, ViewAccountResult};
use super::LedgerView;
use crate::account::AccountState;
use crate::config::Settings;
use crate::error::QueryError;

pub struct NearRpcClient {
    client: Client,
    pub node_url: String, // e.g. "https://rpc.testnet.near.org"
    pub finality: String, // "final" or "optimistic"
}

impl NearRpcClient {
    pub fn new(node_url: impl Into<String>, finality: impl Into<String>, timeout: Duration) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QueryError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, node_url: node_url.into(), finality: finality.into() })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, QueryError> {
        Self::new(&settings.node_url, &settings.finality, settings.request_timeout())
    }

    // POST one `query` request and unwrap the JSON-RPC envelope
    async fn query<T: DeserializeOwned>(&self, params: QueryParams<'_>) -> Result<T, QueryError> {
        let response = self
            .client
            .post(&self.node_url)
            .json(&RpcRequest::query(params))
            .send()
            .await
            .map_err(|e| QueryError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Http { status: status.as_u16(), body });
        }

        let envelope: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| QueryError::MalformedResponse(format!("invalid JSON-RPC envelope: {e}")))?;

        unwrap_envelope(envelope)
    }
}

pub(crate) fn unwrap_envelope<T>(envelope: RpcResponse<T>) -> Result<T, QueryError> {
    match (envelope.result, envelope.error) {
        (_, Some(error)) => Err(rpc_error(error)),
        (Some(result), None) => Ok(result),
        (None, None) => Err(QueryError::MalformedResponse("envelope has neither result nor error".into())),
    }
}

fn rpc_error(error: RpcError) -> QueryError {
    let detail = match &error.data {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => error.message.clone().unwrap_or_default(),
    };

    match error.cause {
        Some(cause) if cause.name == "CONTRACT_EXECUTION_ERROR" => QueryError::Execution(detail),
        Some(cause) => QueryError::Rpc { name: cause.name, message: detail },
        None => QueryError::Rpc { name: error.name.unwrap_or_else(|| "UNKNOWN".into()), message: detail },
    }
}

/// Turn a `call_function` result into the JSON value the contract returned.
pub(crate) fn decode_call_result(call: CallResult) -> Result<serde_json::Value, QueryError> {
    if let Some(error) = call.error {
        return Err(QueryError::Execution(error));
    }
    for log in &call.logs {
        debug!(log = %log, "Contract log");
    }
    let bytes = call
        .result
        .ok_or_else(|| QueryError::MalformedResponse("call_function result has no bytes".into()))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| QueryError::MalformedResponse(format!("contract returned non-JSON bytes: {e}")))
}

pub(crate) fn parse_account(account_id: &str, view: ViewAccountResult) -> Result<AccountState, QueryError> {
    let yocto = |field: &str, s: &str| {
        s.parse::<u128>()
            .map_err(|e| QueryError::MalformedResponse(format!("{account_id}: bad {field} {s:?}: {e}")))
    };
    Ok(AccountState {
        account_id: account_id.to_string(),
        amount: yocto("amount", &view.amount)?,
        locked: yocto("locked", &view.locked)?,
        storage_usage: view.storage_usage,
    })
}

#[async_trait::async_trait]
impl LedgerView for NearRpcClient {
    #[instrument(skip(self, args), fields(node = %self.node_url))]
    async fn call_view(
        &self,
        contract_id: &str,
        method_name: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, QueryError> {
        metrics::counter!("spinbook_view_queries_total", "method" => method_name.to_string()).increment(1);

        let args_json = serde_json::to_vec(args)
            .map_err(|e| QueryError::Transport(format!("cannot encode args: {e}")))?;
        let params = QueryParams::CallFunction {
            finality: &self.finality,
            account_id: contract_id,
            method_name,
            args_base64: STANDARD.encode(args_json),
        };

        let result = self
            .query::<CallResult>(params)
            .await
            .and_then(|call| {
                debug!(block_height = ?call.block_height, "View call answered");
                decode_call_result(call)
            });

        if let Err(e) = &result {
            metrics::counter!("spinbook_view_query_failures_total", "method" => method_name.to_string()).increment(1);
            warn!(error = %e, "View call failed");
        }
        result
    }

    #[instrument(skip(self), fields(node = %self.node_url))]
    async fn view_account(&self, account_id: &str) -> Result<AccountState, QueryError> {
        metrics::counter!("spinbook_view_queries_total", "method" => "view_account").increment(1);

        let params = QueryParams::ViewAccount { finality: &self.finality, account_id };
        let view = self.query::<ViewAccountResult>(params).await.map_err(|e| {
            metrics::counter!("spinbook_view_query_failures_total", "method" => "view_account").increment(1);
            warn!(error = %e, "view_account failed");
            e
        })?;
        parse_account(account_id, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_function_request_serialization() {
        let request = RpcRequest::query(QueryParams::CallFunction {
            finality: "final",
            account_id: "app_2.spin_swap.testnet",
            method_name: "view_market",
            args_base64: STANDARD.encode(br#"{"market_id":1}"#),
        });
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": "dontcare",
                "method": "query",
                "params": {
                    "request_type": "call_function",
                    "finality": "final",
                    "account_id": "app_2.spin_swap.testnet",
                    "method_name": "view_market",
                    "args_base64": "eyJtYXJrZXRfaWQiOjF9"
                }
            })
        );
    }

    #[test]
    fn test_view_account_request_serialization() {
        let request = RpcRequest::query(QueryParams::ViewAccount { finality: "optimistic", account_id: "alice.testnet" });
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"jsonrpc":"2.0","id":"dontcare","method":"query","params":{"request_type":"view_account","finality":"optimistic","account_id":"alice.testnet"}}"#
        );
    }

    #[test]
    fn test_call_result_bytes_decoded() {
        let bytes = serde_json::to_vec(&json!({"ask_orders": [], "bid_orders": []})).unwrap();
        let envelope: RpcResponse<CallResult> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "dontcare",
            "result": { "result": bytes, "logs": [], "block_height": 17, "block_hash": "abc" }
        }))
        .unwrap();

        let value = decode_call_result(unwrap_envelope(envelope).unwrap()).unwrap();
        assert_eq!(value, json!({"ask_orders": [], "bid_orders": []}));
    }

    #[test]
    fn test_contract_panic_is_execution_error() {
        let envelope: RpcResponse<CallResult> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "dontcare",
            "error": {
                "name": "HANDLER_ERROR",
                "cause": { "name": "CONTRACT_EXECUTION_ERROR", "info": {} },
                "code": -32000,
                "message": "Server error",
                "data": "Smart contract panicked: market not found"
            }
        }))
        .unwrap();

        match unwrap_envelope(envelope) {
            Err(QueryError::Execution(msg)) => assert!(msg.contains("market not found")),
            other => panic!("expected execution error, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_inline_error() {
        let call = CallResult {
            result: None,
            logs: vec![],
            block_height: None,
            error: Some("wasm execution failed with error: MethodNotFound".into()),
        };
        assert!(matches!(decode_call_result(call), Err(QueryError::Execution(_))));
    }

    #[test]
    fn test_unknown_account_is_rpc_error() {
        let envelope: RpcResponse<ViewAccountResult> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "dontcare",
            "error": { "name": "HANDLER_ERROR", "cause": { "name": "UNKNOWN_ACCOUNT" }, "message": "Server error" }
        }))
        .unwrap();

        match unwrap_envelope(envelope) {
            Err(QueryError::Rpc { name, message }) => {
                assert_eq!(name, "UNKNOWN_ACCOUNT");
                assert_eq!(message, "Server error");
            }
            other => panic!("expected rpc error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_bytes_are_malformed() {
        let call = CallResult { result: Some(b"not json".to_vec()), logs: vec![], block_height: None, error: None };
        assert!(matches!(decode_call_result(call), Err(QueryError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_account_balances() {
        let view = ViewAccountResult {
            amount: "1000000000000000000000000".into(),
            locked: "0".into(),
            storage_usage: 182,
            block_height: Some(1),
        };
        let state = parse_account("alice.testnet", view).unwrap();
        assert_eq!(state.amount, 1_000_000_000_000_000_000_000_000);
        assert_eq!(state.storage_usage, 182);

        let bad = ViewAccountResult { amount: "1e24".into(), locked: "0".into(), storage_usage: 0, block_height: None };
        assert!(matches!(parse_account("alice.testnet", bad), Err(QueryError::MalformedResponse(_))));
    }
}
