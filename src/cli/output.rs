//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::api::records::Record;
use crate::auth::User;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn roles_cell(user: &User) -> Cell {
    let roles = if user.roles.is_empty() {
        "-".to_string()
    } else {
        user.roles.join(", ")
    };
    if user.is_admin {
        Cell::new(roles).fg(Color::Yellow)
    } else {
        Cell::new(roles)
    }
}

/// Print a table of users
pub fn print_user_table(users: &[User]) {
    if users.is_empty() {
        info("No users found");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Email").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Roles").fg(Color::Cyan),
        ]);

    for user in users {
        table.add_row(vec![
            Cell::new(&user.id),
            Cell::new(&user.email),
            Cell::new(&user.fullname),
            roles_cell(user),
        ]);
    }

    println!("{table}");
}

/// Print the signed-in user
pub fn print_user_detail(user: &User) {
    println!("{}", "Signed in".bold().underline());
    println!();
    println!("  {} {}", "ID:".bold(), user.id);
    println!("  {} {}", "Email:".bold(), user.email);
    println!("  {} {}", "Name:".bold(), user.fullname);
    println!("  {} {}", "Roles:".bold(), user.roles.join(", "));
    if user.is_admin {
        println!("  {} {}", "Admin:".bold(), "yes".yellow());
    }
}

/// Print a table of equipment records
pub fn print_record_table(records: &[Record]) {
    if records.is_empty() {
        info("No equipment found. Add some with 'admindash equipment add <json>'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Data").fg(Color::Cyan),
            Cell::new("Updated").fg(Color::Cyan),
        ]);

    for record in records {
        let data = serde_json::Value::Object(record.data.clone()).to_string();
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(data),
            Cell::new(record.updated_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    println!("{table}");
}

/// Print a single record
pub fn print_record_detail(record: &Record) {
    println!("{}", "Equipment".bold().underline());
    println!();
    println!("  {} {}", "ID:".bold(), record.id);
    println!(
        "  {} {}",
        "Created:".bold(),
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  {} {}",
        "Updated:".bold(),
        record.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
    for (key, value) in &record.data {
        println!("    {} {}", format!("{}:", key).bold(), value);
    }
}
