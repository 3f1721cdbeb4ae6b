//! Transaction history filter
//!
//! `TransactionQuery` is the full request filter sent to
//! `retrieveTransactionHistoryWithinDateRange`. Callers pass a
//! `TransactionQueryPatch`; each field they set replaces the matching
//! default, everything else keeps its default. Only `queryCriteria` nests.
//!
//! Patch fields are `Option<Option<T>>`: the outer `None` means "not set",
//! `Some(None)` means "explicitly null".

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Default number of most recent transactions to return
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Default look-back window (six 30-day months)
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30 * 6;

/// Payment system filter meaning "all payment systems"
pub const ALL_PAYMENT_SYSTEMS: i64 = 0;

/// Full transaction history filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    pub payment_system_type: Option<i64>,
    pub query_criteria: QueryCriteria,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCriteria {
    pub max_return_most_recent: Option<u32>,
    pub newest_date: Option<String>,
    pub oldest_date: Option<String>,
    pub account_id: Option<String>,
}

impl TransactionQuery {
    /// Default filter relative to `now`: all payment systems, 10 results,
    /// from six months ago with no upper bound.
    pub fn default_at(now: DateTime<Utc>) -> Self {
        Self {
            payment_system_type: Some(ALL_PAYMENT_SYSTEMS),
            query_criteria: QueryCriteria {
                max_return_most_recent: Some(DEFAULT_MAX_RESULTS),
                newest_date: None,
                oldest_date: Some(format_backend_date(now - Duration::days(DEFAULT_LOOKBACK_DAYS))),
                account_id: None,
            },
        }
    }

    /// Apply a patch field by field
    pub fn merge(mut self, patch: &TransactionQueryPatch) -> Self {
        if let Some(value) = patch.payment_system_type {
            self.payment_system_type = value;
        }
        if let Some(criteria) = &patch.query_criteria {
            self.query_criteria = self.query_criteria.merge(criteria);
        }
        self
    }
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self::default_at(Utc::now())
    }
}

impl QueryCriteria {
    fn merge(mut self, patch: &QueryCriteriaPatch) -> Self {
        if let Some(value) = patch.max_return_most_recent {
            self.max_return_most_recent = value;
        }
        if let Some(value) = &patch.newest_date {
            self.newest_date = value.clone();
        }
        if let Some(value) = &patch.oldest_date {
            self.oldest_date = value.clone();
        }
        if let Some(value) = &patch.account_id {
            self.account_id = value.clone();
        }
        self
    }
}

/// Partial transaction filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQueryPatch {
    pub payment_system_type: Option<Option<i64>>,
    pub query_criteria: Option<QueryCriteriaPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCriteriaPatch {
    pub max_return_most_recent: Option<Option<u32>>,
    pub newest_date: Option<Option<String>>,
    pub oldest_date: Option<Option<String>>,
    pub account_id: Option<Option<String>>,
}

impl TransactionQueryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payment_system_type(mut self, value: Option<i64>) -> Self {
        self.payment_system_type = Some(value);
        self
    }

    pub fn max_results(mut self, value: Option<u32>) -> Self {
        self.criteria_mut().max_return_most_recent = Some(value);
        self
    }

    pub fn newest_date(mut self, value: Option<DateTime<Utc>>) -> Self {
        self.criteria_mut().newest_date = Some(value.map(format_backend_date));
        self
    }

    pub fn oldest_date(mut self, value: Option<DateTime<Utc>>) -> Self {
        self.criteria_mut().oldest_date = Some(value.map(format_backend_date));
        self
    }

    pub fn account_id(mut self, value: Option<String>) -> Self {
        self.criteria_mut().account_id = Some(value);
        self
    }

    fn criteria_mut(&mut self) -> &mut QueryCriteriaPatch {
        self.query_criteria.get_or_insert_with(QueryCriteriaPatch::default)
    }
}

/// ISO-8601 with milliseconds and a `Z` suffix, e.g. `2024-03-01T12:00:00.000Z`
pub fn format_backend_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
