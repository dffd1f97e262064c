//! Purge command - delete every test user of the app

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use testusers_core::TestUser;

use super::get_context;

pub fn run(force: bool) -> Result<()> {
    let ctx = get_context()?;
    let users = ctx.get_test_users()?.collect::<Result<Vec<TestUser>, _>>()?;

    if users.is_empty() {
        println!("{}", "No test users to delete".dimmed());
        return Ok(());
    }

    if !force {
        println!(
            "\n{}",
            format!(
                "This will permanently delete all {} test user(s) of app {}.",
                users.len(),
                ctx.credentials.app_id
            )
            .yellow()
        );
        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let progress = ProgressBar::new(users.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")?.progress_chars("=> "),
    );

    let mut kept = Vec::new();
    for user in &users {
        progress.set_message(user.id.clone());
        if !ctx.remove_test_user(user)? {
            kept.push(user.id.clone());
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let removed = users.len() - kept.len();
    println!("{} Removed {} test user(s)", "✓".green(), removed);
    if !kept.is_empty() {
        anyhow::bail!("Not removed: {}", kept.join(", "));
    }
    Ok(())
}
