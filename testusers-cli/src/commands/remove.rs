//! Remove command - delete test users

use std::io::BufRead;

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use testusers_core::TestUser;

use super::get_context;

pub fn run(ids: Vec<String>, force: bool) -> Result<()> {
    // Read ids from stdin when piped, e.g. `tu list --json | jq -r '.[].id' | tu remove -f`
    let ids: Vec<String> = if ids.is_empty() && atty::isnt(atty::Stream::Stdin) {
        std::io::stdin()
            .lock()
            .lines()
            .map_while(|line| line.ok())
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    } else {
        ids
    };

    if ids.is_empty() {
        anyhow::bail!("No test user ids given");
    }

    let ctx = get_context()?;

    if !force {
        println!(
            "\n{}",
            format!("This will permanently delete {} test user(s).", ids.len()).yellow()
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

    let mut failed = 0;
    for id in &ids {
        if ctx.remove_test_user(&TestUser::new(id.as_str()))? {
            println!("{} Removed {}", "✓".green(), id);
        } else {
            failed += 1;
            println!("{} {} was not removed", "✗".red(), id);
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} test user(s) were not removed", failed, ids.len());
    }
    Ok(())
}
