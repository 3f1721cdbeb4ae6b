//! Status command - session state and balance overview

use anyhow::Result;
use colored::Colorize;
use swipes_core::services::SessionState;

use super::get_context;
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = output::with_spinner("Checking session...", ctx.status.get_status()).await;

    if json {
        return output::emit_json(status);
    }
    let status = status?;

    println!("{}", "Session Status".bold());
    println!();

    match status.session {
        SessionState::None => {
            output::warning("Not authenticated. Run 'swipes login' to log in.");
            return Ok(());
        }
        SessionState::Temporary => {
            output::warning("Only a temporary session is active. Run 'swipes login' to finish logging in.");
            return Ok(());
        }
        SessionState::User => output::success("Logged in."),
    }
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["Account", "Balance"]);
    for account in &status.accounts {
        table.add_row(vec![account.name.clone(), output::format_amount(account.balance)]);
    }
    println!("{}", table);

    if let Some(summary) = status.summary.filter(|s| !s.is_empty()) {
        println!();
        println!("{}", summary.dimmed());
    }

    Ok(())
}
