//! Disassociate command - detach a test user from the app

use anyhow::Result;
use colored::Colorize;
use testusers_core::TestUser;

use super::get_context;

pub fn run(id: &str) -> Result<()> {
    let ctx = get_context()?;

    if ctx.disassociate_test_user(&TestUser::new(id))? {
        println!(
            "{} Test user {} detached from app {}",
            "✓".green(),
            id,
            ctx.credentials.app_id
        );
        println!("{}", "The account itself still exists.".dimmed());
        Ok(())
    } else {
        anyhow::bail!("Test user {} was not disassociated", id)
    }
}
