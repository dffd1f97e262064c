//! Friend command - connect two test users

use anyhow::{Context, Result};
use colored::Colorize;

use super::{find_user, get_context};

pub fn run(first: &str, second: &str) -> Result<()> {
    let ctx = get_context()?;

    let first_user = find_user(&ctx, first)?;
    let second_user = find_user(&ctx, second)?;

    ctx.make_friend_connection(&first_user, &second_user)
        .with_context(|| format!("Failed to connect {} and {}", first, second))?;

    println!("{} {} and {} are now friends", "✓".green(), first, second);
    Ok(())
}
