//! Account domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::amount::deserialize_amount;

/// One payment instrument (meal plan, declining balance, stored card...)
/// tied to the authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub institution_id: String,
    pub payment_system_id: String,
    pub user_id: String,
    pub account_display_name: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub balance: Decimal,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub payment_system_type: i64,
    #[serde(default)]
    pub account_tender: Option<String>,
    #[serde(default)]
    pub is_account_tender_active: bool,
    #[serde(default)]
    pub account_type: i64,
    #[serde(default)]
    pub deposit_accepted: bool,

    // Stored-card fields, null for campus accounts
    #[serde(default)]
    pub last_four: Option<JsonValue>,
    #[serde(default)]
    pub name_on_media: Option<JsonValue>,
    #[serde(default)]
    pub expiration_month: Option<JsonValue>,
    #[serde(default)]
    pub expiration_year: Option<JsonValue>,
    #[serde(default)]
    pub billing_address_id: Option<JsonValue>,
}

/// `commerce.retrieveAccounts` payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccountsResponse {
    pub accounts: Vec<Account>,
}
