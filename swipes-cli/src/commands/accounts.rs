//! Accounts command - list accounts and balances

use anyhow::Result;

use super::{get_context, require_user_session};
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    require_user_session(&ctx).await?;

    let accounts = output::with_spinner("Loading accounts...", ctx.commerce.list_accounts()).await;

    if json {
        return output::emit_json(accounts);
    }
    let accounts = accounts?;

    if accounts.is_empty() {
        output::warning("No accounts found.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Account", "Balance", "Deposits", "Active", "ID"]);
    for account in &accounts {
        table.add_row(vec![
            account.account_display_name.clone(),
            output::format_amount(account.balance),
            if account.deposit_accepted { "yes" } else { "no" }.to_string(),
            if account.is_active { "yes" } else { "no" }.to_string(),
            account.id.clone(),
        ]);
    }
    println!("{}", table);

    Ok(())
}
