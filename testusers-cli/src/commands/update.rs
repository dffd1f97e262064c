//! Update command - rename a test user or change its password

use anyhow::Result;
use colored::Colorize;
use testusers_core::{TestUser, UpdateTestUser};

use super::get_context;

pub fn run(id: &str, name: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;
    let changes = UpdateTestUser { name, password };

    if !ctx.update_test_user(&TestUser::new(id), &changes)? {
        anyhow::bail!("Test user {} was not updated", id);
    }

    println!("{} Test user {} updated", "✓".green(), id);
    Ok(())
}
