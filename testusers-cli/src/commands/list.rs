//! List command - show the app's test users

use anyhow::Result;
use colored::Colorize;
use testusers_core::TestUser;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let users = ctx.get_test_users()?.collect::<Result<Vec<TestUser>, _>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!("{}", "No test users for this app. Use 'tu create' to add one.".yellow());
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Access token", "Login URL"]);
    for user in &users {
        table.add_row(vec![
            user.id.as_str(),
            output::yes_no(user.has_access_token()),
            user.login_url.as_deref().unwrap_or("-"),
        ]);
    }

    println!("{}", table);
    println!("{} test user(s)", users.len());
    Ok(())
}
