//! Token command - print a test user's access token

use anyhow::Result;

use super::{find_user, get_context};
use crate::output;

pub fn run(id: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = find_user(&ctx, id)?;

    let Some(token) = ctx.to_access_token(&user) else {
        anyhow::bail!(
            "Test user {} has no access token; it was created without the app installed",
            id
        );
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&token)?);
        return Ok(());
    }

    println!("{}", token.token);
    if token.has_fabricated_expiry() {
        output::warning("Expiry unknown: the platform does not report it for test users.");
    }
    Ok(())
}
