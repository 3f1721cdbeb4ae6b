//! Institutions command - list institutions available for login

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    // Institution lookup needs at least a temporary session
    ctx.sessions.init().await?;
    let institutions =
        output::with_spinner("Loading institutions...", ctx.institutions.list_institutions()).await;

    if json {
        return output::emit_json(institutions);
    }
    let institutions = institutions?;

    if institutions.is_empty() {
        output::warning("No institutions returned.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Name", "Short name", "Guest login"]);
    for institution in &institutions {
        let guest = if institution.guest_login_not_required != 0 {
            "not required"
        } else if institution.guest_login != 0 {
            "yes"
        } else {
            "no"
        };
        table.add_row(vec![institution.name.as_str(), institution.short_name.as_str(), guest]);
    }
    println!("{}", table);

    Ok(())
}
