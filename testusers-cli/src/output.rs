//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use testusers_core::TestUser;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Yes/no marker for table cells
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Key/value table describing one test user
pub fn user_table(user: &TestUser) -> Table {
    let mut table = create_table();
    table.add_row(vec!["ID", user.id.as_str()]);
    table.add_row(vec!["Access token", yes_no(user.has_access_token())]);
    if let Some(url) = &user.login_url {
        table.add_row(vec!["Login URL", url.as_str()]);
    }
    if let Some(email) = &user.email {
        table.add_row(vec!["Email", email.as_str()]);
    }
    if let Some(password) = &user.password {
        table.add_row(vec!["Password", password.as_str()]);
    }
    table
}
