//! CLI command implementations

pub mod create;
pub mod disassociate;
pub mod friend;
pub mod list;
pub mod purge;
pub mod remove;
pub mod setup;
pub mod token;
pub mod update;

use std::path::PathBuf;

use anyhow::{Context, Result};
use testusers_core::{TestUser, TestUsersContext};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `testusers_core=debug`
const LOG_ENV: &str = "TESTUSERS_LOG";

/// Install the stderr log subscriber
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Get the testusers directory from environment or default
pub fn get_testusers_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TESTUSERS_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".testusers")
    }
}

/// Build the context from the testusers directory
pub fn get_context() -> Result<TestUsersContext> {
    let dir = get_testusers_dir();
    TestUsersContext::new(&dir).context("Failed to initialize testusers context")
}

/// Look a test user up by id, failing if the app has no such user
pub fn find_user(ctx: &TestUsersContext, id: &str) -> Result<TestUser> {
    ctx.find_test_user(id)?
        .with_context(|| format!("Test user '{}' not found for app {}", id, ctx.credentials.app_id))
}
