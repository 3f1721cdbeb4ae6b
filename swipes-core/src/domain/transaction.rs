//! Transaction domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::{deserialize_amount, deserialize_optional_amount};

/// A single card transaction
///
/// Dates are kept as the backend's ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    #[serde(default)]
    pub transaction_sequence: i64,
    #[serde(default)]
    pub transaction_type: i64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub resulting_balance: Option<Decimal>,
    #[serde(default)]
    pub posted_date: Option<String>,
    pub actual_date: String,
    #[serde(default)]
    pub patron_id: Option<String>,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub tender_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub patron_full_name: Option<String>,
    #[serde(default)]
    pub account_type: i64,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub payment_system_type: i64,
}

/// `commerce.retrieveTransactionHistoryWithinDateRange` payload
///
/// Transactions keep the backend's order (most recent first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistory {
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub return_capped: bool,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}
