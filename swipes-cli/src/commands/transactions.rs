//! Transactions command - recent card activity

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use swipes_core::TransactionQueryPatch;

use super::{get_context, require_user_session};
use crate::output;

/// Command-line filter; unset fields keep the default query
pub struct Filter {
    pub max: Option<u32>,
    pub account_id: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub payment_system_type: Option<i64>,
}

impl Filter {
    fn into_patch(self) -> Result<TransactionQueryPatch> {
        let mut patch = TransactionQueryPatch::new();

        if let Some(max) = self.max {
            if max == 0 {
                anyhow::bail!("--max must be at least 1");
            }
            patch = patch.max_results(Some(max));
        }
        if let Some(account_id) = self.account_id {
            patch = patch.account_id(Some(account_id));
        }
        if let Some(since) = self.since {
            patch = patch.oldest_date(Some(day_bound(&since, NaiveTime::MIN)?));
        }
        if let Some(until) = self.until {
            let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
            patch = patch.newest_date(Some(day_bound(&until, end_of_day)?));
        }
        if let Some(kind) = self.payment_system_type {
            patch = patch.payment_system_type(Some(kind));
        }

        Ok(patch)
    }
}

fn day_bound(date: &str, time: NaiveTime) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;
    Ok(day.and_time(time).and_utc())
}

pub async fn run(filter: Filter, json: bool) -> Result<()> {
    let patch = filter.into_patch()?;

    let ctx = get_context()?;
    require_user_session(&ctx).await?;

    let history = output::with_spinner(
        "Loading transactions...",
        ctx.commerce.transaction_history(&patch),
    )
    .await;

    if json {
        return output::emit_json(history);
    }
    let history = history?;

    if history.transactions.is_empty() {
        output::info("No transactions in this range.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Date", "Location", "Account", "Amount", "Balance"]);
    for tx in &history.transactions {
        table.add_row(vec![
            output::format_backend_date(&tx.actual_date),
            tx.location_name.clone(),
            tx.account_name.clone(),
            output::format_amount(tx.amount),
            tx.resulting_balance.map(output::format_amount).unwrap_or_default(),
        ]);
    }
    println!("{}", table);

    if history.return_capped {
        output::warning(&format!(
            "Showing {} of {} transactions. Use --max to see more.",
            history.transactions.len(),
            history.total_count
        ));
    }

    Ok(())
}
