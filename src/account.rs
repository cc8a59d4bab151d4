//! Account balance summary for the signed-in account.
//!
//! Balances are handled as integer yoctoNEAR (10^-24 NEAR) end to end and only
//! turned into text for display.

use tracing::{info, instrument};

use crate::error::QueryError;
use crate::market_data::adapters::LedgerView;

/// Decimal places between NEAR and yoctoNEAR.
pub const NEAR_NOMINATION_EXP: usize = 24;

/// Storage staking cost in yoctoNEAR per byte (10^19, i.e. 1 NEAR per 100 kB).
pub const STORAGE_AMOUNT_PER_BYTE: u128 = 10_000_000_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountState {
    pub account_id: String,
    pub amount: u128,
    pub locked: u128,
    pub storage_usage: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountBalance {
    pub total: u128,
    pub state_staked: u128,
    pub staked: u128,
    pub available: u128,
}

impl AccountState {
    /// Spendable balance: everything not held by validator stake or storage staking.
    pub fn balance(&self) -> AccountBalance {
        let total = self.amount.saturating_add(self.locked);
        let state_staked = (self.storage_usage as u128).saturating_mul(STORAGE_AMOUNT_PER_BYTE);
        let staked = self.locked;
        let available = total.saturating_sub(staked.max(state_staked));
        AccountBalance { total, state_staked, staked, available }
    }
}

#[instrument(skip(view))]
pub async fn fetch_account(view: &dyn LedgerView, account_id: &str) -> Result<AccountState, QueryError> {
    let state = view.view_account(account_id).await?;
    info!(storage_usage = state.storage_usage, "Fetched account state");
    Ok(state)
}

/// Render yoctoNEAR as NEAR: thousands separators, trailing fraction zeros trimmed.
///
/// `1_234_500_000_000_000_000_000_000_000` renders as `"1,234.5"`.
pub fn format_near_amount(yocto: u128) -> String {
    let digits = yocto.to_string();
    let split = digits.len().saturating_sub(NEAR_NOMINATION_EXP);
    let (whole, fraction) = digits.split_at(split);
    let whole = if whole.is_empty() { "0" } else { whole };
    let fraction = format!("{fraction:0>width$}", width = NEAR_NOMINATION_EXP);
    let fraction = fraction.trim_end_matches('0');

    let mut out = with_commas(whole);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn with_commas(whole: &str) -> String {
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
