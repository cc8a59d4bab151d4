// Source: https://docs.near.org/api/rpc/contracts (query -> call_function / view_account)
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: &'static str,
    pub method: &'static str,
    pub params: QueryParams<'a>,
}

impl<'a> RpcRequest<'a> {
    pub fn query(params: QueryParams<'a>) -> Self {
        Self { jsonrpc: "2.0", id: "dontcare", method: "query", params }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "request_type", rename_all = "snake_case")]
pub enum QueryParams<'a> {
    CallFunction {
        finality: &'a str,
        account_id: &'a str,
        method_name: &'a str,
        args_base64: String,
    },
    ViewAccount {
        finality: &'a str,
        account_id: &'a str,
    },
}

// JSON-RPC envelope: exactly one of result / error is set
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cause: Option<RpcErrorCause>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorCause {
    pub name: String,
    #[serde(default)]
    pub info: Option<serde_json::Value>,
}

// result of request_type = call_function
#[derive(Debug, Deserialize)]
pub struct CallResult {
    #[serde(default)]
    pub result: Option<Vec<u8>>, // raw bytes of the JSON returned by the contract
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub block_height: Option<u64>,
    // older nodes report contract panics here instead of in `error`
    #[serde(default)]
    pub error: Option<String>,
}

// result of request_type = view_account; balances are yoctoNEAR strings
#[derive(Debug, Deserialize)]
pub struct ViewAccountResult {
    pub amount: String,
    pub locked: String,
    pub storage_usage: u64,
    #[serde(default)]
    pub block_height: Option<u64>,
}
