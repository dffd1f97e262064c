//! Create command - provision a new test user

use anyhow::Result;
use testusers_core::{CreateTestUserRequest, Installation};

use super::get_context;
use crate::output;

pub fn run(
    installed: bool,
    not_installed: bool,
    permissions: Vec<String>,
    name: Option<String>,
    locale: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;

    let installation = if not_installed {
        Installation::NotInstalled
    } else if installed || !permissions.is_empty() {
        Installation::Installed { permissions }
    } else {
        Installation::PlatformDefault
    };
    let request = CreateTestUserRequest {
        installation,
        name,
        locale,
    };

    let user = ctx.create_test_user(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    output::success(&format!("Created test user {}", user.id));
    println!("{}", output::user_table(&user));
    if user.password.is_some() {
        output::warning("The email and password are only shown once. Save them now if you need them.");
    }
    Ok(())
}
