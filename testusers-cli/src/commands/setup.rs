//! Setup command - store app credentials

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};
use testusers_core::config::Config;

use super::get_testusers_dir;

pub fn run(
    app_id: Option<String>,
    app_secret: Option<String>,
    app_token: Option<String>,
    graph_url: Option<String>,
    api_version: Option<String>,
) -> Result<()> {
    let dir = get_testusers_dir();
    std::fs::create_dir_all(&dir)?;
    let mut config = Config::load(&dir)?;

    let app_id = match app_id.or_else(|| config.app_id.clone()) {
        Some(id) => id,
        None => Input::new().with_prompt("App id").interact_text()?,
    };
    config.app_id = Some(app_id);

    if app_token.is_some() {
        config.app_access_token = app_token;
    }
    match app_secret {
        Some(secret) => config.app_secret = Some(secret),
        None if config.app_secret.is_none() && config.app_access_token.is_none() => {
            let secret: String = Password::new().with_prompt("App secret").interact()?;
            config.app_secret = Some(secret);
        }
        None => {}
    }
    if let Some(url) = graph_url {
        config.graph_url = url;
    }
    if api_version.is_some() {
        config.api_version = api_version;
    }

    config.credentials()?.app_token()?;
    config.save(&dir)?;

    println!("{} Settings saved to {:?}", "Success!".green(), dir.join("settings.json"));
    println!("Run 'tu create --installed' to create your first test user.");
    Ok(())
}
