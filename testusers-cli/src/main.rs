//! testusers CLI - manage social-graph test users from the terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{create, disassociate, friend, list, purge, remove, setup, token, update};

/// tu - create, list, befriend and delete test users
#[derive(Parser)]
#[command(name = "tu", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store app credentials and Graph API settings
    Setup {
        /// Application id
        #[arg(long)]
        app_id: Option<String>,
        /// Application secret
        #[arg(long)]
        app_secret: Option<String>,
        /// Explicit app access token (instead of id|secret)
        #[arg(long)]
        app_token: Option<String>,
        /// Graph API base URL
        #[arg(long)]
        graph_url: Option<String>,
        /// Graph API version, e.g. v19.0
        #[arg(long)]
        api_version: Option<String>,
    },

    /// Create a new test user
    Create {
        /// Install the app for the new user
        #[arg(long)]
        installed: bool,
        /// Create the user without the app installed
        #[arg(long, conflicts_with_all = ["installed", "permissions"])]
        not_installed: bool,
        /// Comma-separated permissions to grant (implies --installed)
        #[arg(long, value_delimiter = ',')]
        permissions: Vec<String>,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Locale, e.g. en_US
        #[arg(long)]
        locale: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the app's test users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete test users (ids from arguments or stdin)
    Remove {
        /// Test user ids
        ids: Vec<String>,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Detach a test user from the app without deleting the account
    Disassociate {
        /// Test user id
        id: String,
    },

    /// Change a test user's name or password
    Update {
        /// Test user id
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New password
        #[arg(long)]
        password: Option<String>,
    },

    /// Make two test users friends
    Friend {
        /// User sending the friend request
        first: String,
        /// User accepting the friend request
        second: String,
    },

    /// Print an access token for a test user
    Token {
        /// Test user id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete every test user of the app
    Purge {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> ExitCode {
    commands::init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Setup { app_id, app_secret, app_token, graph_url, api_version } => {
            setup::run(app_id, app_secret, app_token, graph_url, api_version)
        }
        Commands::Create { installed, not_installed, permissions, name, locale, json } => {
            create::run(installed, not_installed, permissions, name, locale, json)
        }
        Commands::List { json } => list::run(json),
        Commands::Remove { ids, force } => remove::run(ids, force),
        Commands::Disassociate { id } => disassociate::run(&id),
        Commands::Update { id, name, password } => update::run(&id, name, password),
        Commands::Friend { first, second } => friend::run(&first, &second),
        Commands::Token { id, json } => token::run(&id, json),
        Commands::Purge { force } => purge::run(force),
    }
}
