//! Logout command - forget the stored session

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn run() -> Result<()> {
    let ctx = get_context()?;

    if ctx.sessions.session_token_does_not_exist().await? {
        output::info("No active session.");
        return Ok(());
    }

    ctx.sessions.clear_active_session().await?;
    output::success("Logged out.");
    Ok(())
}
