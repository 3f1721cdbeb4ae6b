//! Profile command - show the logged-in user

use anyhow::Result;

use super::{get_context, require_user_session};
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    require_user_session(&ctx).await?;

    let profile = output::with_spinner("Loading profile...", ctx.users.retrieve_user_profile()).await;

    if json {
        return output::emit_json(profile);
    }
    let profile = profile?;

    let mut table = output::create_table();
    table.add_row(vec!["Name".to_string(), profile.display_name()]);
    table.add_row(vec!["User name".to_string(), profile.user_name.clone()]);
    if let Some(email) = &profile.email {
        table.add_row(vec!["Email".to_string(), email.clone()]);
    }
    if let Some(phone) = &profile.phone {
        table.add_row(vec!["Phone".to_string(), phone.clone()]);
    }
    table.add_row(vec![
        "Cashless card".to_string(),
        if profile.has_cashless_card { "yes" } else { "no" }.to_string(),
    ]);
    println!("{}", table);

    Ok(())
}
