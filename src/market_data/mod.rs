// Market data module entrypoint
pub mod adapters;   // ledger query capability (e.g. NEAR JSON-RPC)
pub mod types;      // market descriptors + order books
pub mod normaliser; // converts exponential strings -> plain decimals
pub mod catalog;    // `markets` view
pub mod fetcher;    // `view_market` view
pub mod router;     // orchestrates catalog + selection for a session
