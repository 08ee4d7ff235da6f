//! Blockchain Explorer page: simulated on-chain transactions.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::DashboardState;
use crate::error::{DashboardError, DashboardResult};
use crate::handlers::{PageView, load};
use crate::models::chain::{ChainTransaction, ChainTxStatus};
use crate::models::record::Entity;
use crate::models::view::ViewQuery;
use crate::services::view_pipeline;

pub const SEARCH_FIELDS: [&str; 4] = ["hash", "batchId", "from", "to"];
pub const TRANSACTIONS_PER_PAGE: i32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerStats {
    pub total_transactions: usize,
    pub total_value: Decimal,
    pub total_gas_used: Decimal,
    pub success_rate: Decimal,
}

pub fn query() -> ViewQuery {
    ViewQuery::new(TRANSACTIONS_PER_PAGE).searching(SEARCH_FIELDS)
}

/// `0x1234...abcd` style shortening; short values are returned unchanged.
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

pub async fn load_transactions(
    state: &DashboardState,
    query: &ViewQuery,
) -> DashboardResult<PageView<ChainTransaction, ExplorerStats>> {
    let request_id = Uuid::new_v4();
    query.validate()?;

    let loaded = load::<ChainTransaction>(state, "transactions").await;
    let filtered = view_pipeline::filter(&loaded.records, query);
    let stats = ExplorerStats {
        total_transactions: filtered.count(),
        total_value: filtered.sum("value")?,
        total_gas_used: filtered.sum("gasUsed")?,
        success_rate: filtered.rate(|tx| tx.status == ChainTxStatus::Success),
    };
    let view = filtered.paginate(query.page, query.page_size)?;

    info!(
        %request_id,
        search = %query.search_text,
        matched = stats.total_transactions,
        page = view.current_page,
        total_pages = view.total_pages,
        "Loaded explorer page"
    );

    Ok(PageView {
        view,
        stats,
        banner: loaded.banner,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub transaction: ChainTransaction,
    /// `gas_used * gas_price`
    pub fee_gwei: u64,
    pub short_from: String,
    pub short_to: String,
}

pub async fn transaction_details(state: &DashboardState, hash: &str) -> DashboardResult<TransactionDetails> {
    let loaded = load::<ChainTransaction>(state, "transactions").await;
    let transaction = loaded
        .records
        .into_iter()
        .find(|tx| tx.hash.eq_ignore_ascii_case(hash))
        .ok_or_else(|| DashboardError::NotFound {
            kind: ChainTransaction::KIND,
            id: hash.to_string(),
        })?;

    Ok(TransactionDetails {
        fee_gwei: transaction.fee_gwei(),
        short_from: format_address(&transaction.from),
        short_to: format_address(&transaction.to),
        transaction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        assert_eq!(
            format_address("0x742d35Cc6634C0532925a3b8D4C9db96590c6C87"),
            "0x742d...6C87"
        );
        assert_eq!(format_address("0x1234"), "0x1234");
    }
}
