//! Accounts and transaction history

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::result::Result;
use crate::domain::{
    Account, AccountsResponse, Transaction, TransactionHistory, TransactionQuery,
    TransactionQueryPatch,
};
use crate::ports::Endpoint;

use super::api::{ApiClient, SessionMode, NO_PARAMS};

/// Commerce endpoint operations; these need a user session
pub struct CommerceService {
    api: Arc<ApiClient>,
}

impl CommerceService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let response: AccountsResponse = self
            .api
            .call(Endpoint::Commerce, "retrieveAccounts", NO_PARAMS, SessionMode::Attach)
            .await?;
        Ok(response.accounts)
    }

    /// Full history page (counts plus transactions) for the merged filter
    pub async fn transaction_history(&self, patch: &TransactionQueryPatch) -> Result<TransactionHistory> {
        self.transaction_history_at(patch, Utc::now()).await
    }

    /// Same as `transaction_history`, with the default window relative to `now`
    pub async fn transaction_history_at(
        &self,
        patch: &TransactionQueryPatch,
        now: DateTime<Utc>,
    ) -> Result<TransactionHistory> {
        let query = TransactionQuery::default_at(now).merge(patch);
        self.api
            .call(
                Endpoint::Commerce,
                "retrieveTransactionHistoryWithinDateRange",
                Some(&query),
                SessionMode::Attach,
            )
            .await
    }

    /// Most recent transactions, in backend order
    pub async fn list_recent_transactions(&self, patch: &TransactionQueryPatch) -> Result<Vec<Transaction>> {
        Ok(self.transaction_history(patch).await?.transactions)
    }
}

/// One-line "Name: balance | Name: balance" summary
///
/// Balances print without trailing zeros (`12.0` becomes `12`).
pub fn balance_summary(accounts: &[Account]) -> String {
    accounts
        .iter()
        .map(|a| format!("{}: {}", a.account_display_name, a.balance.normalize()))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str, balance: f64) -> Account {
        serde_json::from_value(serde_json::json!({
            "id": name,
            "institutionId": "inst-1",
            "paymentSystemId": "ps-1",
            "userId": "user-1",
            "accountDisplayName": name,
            "balance": balance
        }))
        .unwrap()
    }

    #[test]
    fn test_balance_summary() {
        let accounts = vec![account("Dining Dollars", 152.75), account("Meal Swipes", 12.0)];
        assert_eq!(balance_summary(&accounts), "Dining Dollars: 152.75 | Meal Swipes: 12");
        assert_eq!(balance_summary(&[]), "");
    }

    #[test]
    fn test_balance_summary_drops_trailing_zeros_from_strings() {
        let mut accounts = vec![account("Dining Dollars", 0.0)];
        accounts[0].balance = "20.500".parse().unwrap();
        assert_eq!(balance_summary(&accounts), "Dining Dollars: 20.5");
    }
}
