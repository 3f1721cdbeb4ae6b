//! CLI command implementations

pub mod accounts;
pub mod institutions;
pub mod login;
pub mod logout;
pub mod profile;
pub mod status;
pub mod transactions;

use anyhow::{Context, Result};
use swipes_core::SwipesContext;

/// Get or create the swipes context
pub fn get_context() -> Result<SwipesContext> {
    let data_dir = swipes_core::config::data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    tracing::debug!(data_dir = %data_dir.display(), "using data directory");
    SwipesContext::new(&data_dir).context("Failed to initialize swipes context")
}

/// Bail unless a user session is active
///
/// Commands that read accounts or transactions would only get
/// `INVALID_SESSION` back with a temporary session.
pub async fn require_user_session(ctx: &SwipesContext) -> Result<()> {
    if ctx.sessions.session_token_does_not_exist().await?
        || ctx.sessions.session_token_is_temporary().await?
    {
        anyhow::bail!("Not authenticated. Run 'swipes login' first.");
    }
    Ok(())
}
