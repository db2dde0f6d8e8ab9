//! CLI interface for admindash

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "admindash")]
#[command(version)]
#[command(about = "Admin dashboard API server and client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new admindash.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print a bcrypt hash for a [[users]] entry
    HashPassword {
        /// Password to hash (prompted for when omitted)
        #[arg(long, env = "ADMINDASH_PASSWORD")]
        password: Option<String>,
    },

    /// Sign in and store the token
    Login {
        #[arg(short, long)]
        email: String,

        /// Password (prompted for when omitted)
        #[arg(long, env = "ADMINDASH_PASSWORD")]
        password: Option<String>,
    },

    /// Create an account and sign in with it
    Register {
        #[arg(short, long)]
        fullname: String,

        #[arg(short, long)]
        email: String,

        /// Password (prompted for, with confirmation, when omitted)
        #[arg(long, env = "ADMINDASH_PASSWORD")]
        password: Option<String>,
    },

    /// Show the signed-in user
    Me,

    /// Forget the stored token
    Logout,

    /// Manage equipment records
    Equipment {
        #[command(subcommand)]
        action: EquipmentAction,
    },

    /// Administer user accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
pub enum EquipmentAction {
    /// List all records
    List {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one record
    Show { id: String },

    /// Create a record from a JSON object
    Add {
        /// e.g. '{"name":"Drone","kind":"air"}'
        data: String,
    },

    /// Replace a record's data with a JSON object
    Update { id: String, data: String },

    /// Delete a record
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// List all users (admin only)
    List {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Delete a user (admin only)
    Remove { id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
