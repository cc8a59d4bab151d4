//! Error types for market data retrieval and normalisation.

use thiserror::Error;

/// Failure of a read-only call against the ledger.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("RPC error {name}: {message}")]
    Rpc { name: String, message: String },

    #[error("contract execution failed: {0}")]
    Execution(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Response payload did not match the expected schema.
#[derive(Debug, Error)]
#[error("cannot decode `{method}` response: {source}")]
pub struct DecodeError {
    pub method: String,
    #[source]
    pub source: serde_json::Error,
}

/// A price or quantity string that is not a decimal numeral.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid numeral: {0:?}")]
    InvalidNumeral(String),

    #[error("exponent out of range in {0:?}")]
    ExponentOutOfRange(String),
}

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type MarketDataResult<T> = Result<T, MarketDataError>;
