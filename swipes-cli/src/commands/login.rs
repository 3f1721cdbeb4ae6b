//! Login command - browser handoff to the institution login page
//!
//! The GET login page runs in the user's browser. Once it finishes, the
//! browser lands on a URL carrying `sessionId`, which the user pastes back
//! here (or pipes in on stdin).

use std::io::{self, BufRead};
use std::process::Command;

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Input, Select};
use swipes_core::services::{find_institution, session_id_from_validator_url};
use swipes_core::{Institution, SwipesContext};

use super::get_context;
use crate::output;

pub async fn run(institution: Option<String>, url: Option<String>, open: bool) -> Result<()> {
    let ctx = get_context()?;

    if let Some(url) = url {
        return finish(&ctx, &url).await;
    }

    let is_temporary = output::with_spinner("Starting session...", ctx.sessions.init()).await?;
    if !is_temporary {
        output::info("Already logged in. Run 'swipes logout' first to switch accounts.");
        return Ok(());
    }

    let institutions =
        output::with_spinner("Loading institutions...", ctx.institutions.list_institutions()).await?;
    let chosen = choose_institution(&institutions, institution.as_deref())?;

    let login_url = ctx.sessions.auth_url(&chosen.short_name)?;

    println!();
    println!("{} {}", "Log in to".bold(), chosen.name.bold());
    println!();
    println!("  1. Open this page and log in:");
    println!("     {}", login_url.cyan());
    println!("  2. Copy the URL your browser ends up on (it contains sessionId=...)");
    println!();

    if open {
        if let Err(e) = open_in_browser(&login_url) {
            output::warning(&format!("Could not open a browser: {:#}", e));
        }
    }

    let redirect_url = read_redirect_url()?;
    finish(&ctx, &redirect_url).await
}

async fn finish(ctx: &SwipesContext, redirect_url: &str) -> Result<()> {
    ctx.sessions
        .complete_login(redirect_url)
        .await
        .context("Login failed")?;
    output::success("Logged in.");
    Ok(())
}

fn choose_institution<'a>(
    institutions: &'a [Institution],
    query: Option<&str>,
) -> Result<&'a Institution> {
    if institutions.is_empty() {
        anyhow::bail!("The GET service returned no institutions");
    }

    if let Some(query) = query {
        return find_institution(institutions, query).with_context(|| {
            format!("No institution matches '{}'. Run 'swipes institutions' to list them.", query)
        });
    }

    if atty::isnt(atty::Stream::Stdin) {
        anyhow::bail!("No institution given. Use --institution when stdin is not a terminal.");
    }

    let names: Vec<String> = institutions
        .iter()
        .map(|i| format!("{} ({})", i.name, i.short_name))
        .collect();
    let index = Select::new()
        .with_prompt("Institution")
        .items(&names)
        .default(0)
        .interact()?;

    Ok(&institutions[index])
}

fn read_redirect_url() -> Result<String> {
    if atty::isnt(atty::Stream::Stdin) {
        // First non-empty line from a pipe
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read redirect URL from stdin")?;
            if !line.trim().is_empty() {
                return Ok(line.trim().to_string());
            }
        }
        anyhow::bail!("No redirect URL on stdin");
    }

    let url: String = Input::new()
        .with_prompt("Redirect URL")
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            match session_id_from_validator_url(input) {
                Ok(Some(_)) => Ok(()),
                Ok(None) => Err("URL has no sessionId parameter".to_string()),
                Err(e) => Err(e.to_string()),
            }
        })
        .interact_text()?;
    Ok(url)
}

fn open_in_browser(url: &str) -> Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(url);
        c
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };

    let status = command.status().context("Failed to launch browser")?;
    if !status.success() {
        anyhow::bail!("Browser launcher exited with {}", status);
    }
    Ok(())
}
