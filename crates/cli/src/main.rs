//! Staff Portal CLI - store management tools.
//!
//! # Usage
//!
//! ```bash
//! # Write the seed data (refuses to overwrite without --force)
//! portal-cli store seed
//!
//! # Upgrade the stored document to the current schema
//! portal-cli store migrate
//!
//! # Print the stored document
//! portal-cli store export --pretty > backup.json
//!
//! # Create a verified account
//! portal-cli account create -e admin@example.com -f Jane -l Doe -p secret1 -r admin
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_STORAGE` - must be `file` (the default)
//! - `PORTAL_DATA_DIR` - directory holding the store (default `./data`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "portal-cli")]
#[command(author, version, about = "Staff Portal CLI tools")]
struct Cli {
    /// Data directory, overriding `PORTAL_DATA_DIR`
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the persisted store document
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Write the seed data
    Seed {
        /// Replace an existing store
        #[arg(long)]
        force: bool,
    },
    /// Upgrade the stored document to the current schema version
    Migrate,
    /// Print the stored document as JSON
    Export {
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create a new verified account
    Create {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// First name
        #[arg(short, long)]
        first_name: String,

        /// Last name
        #[arg(short, long)]
        last_name: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Account role (`user`, `admin`)
        #[arg(short, long, default_value = "user")]
        role: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let storage = commands::open(cli.data_dir)?;

    match cli.command {
        Commands::Store { action } => match action {
            StoreAction::Seed { force } => commands::store::seed(storage.as_ref(), force)?,
            StoreAction::Migrate => commands::store::migrate(storage.as_ref())?,
            StoreAction::Export { pretty } => {
                let json = commands::store::export(storage.as_ref(), pretty)?;
                commands::write_stdout(&json)?;
            }
        },
        Commands::Account { action } => match action {
            AccountAction::Create {
                email,
                first_name,
                last_name,
                password,
                role,
            } => {
                commands::account::create(
                    storage.as_ref(),
                    &commands::account::NewAccount {
                        email: &email,
                        first_name: &first_name,
                        last_name: &last_name,
                        password: &password,
                        role: &role,
                    },
                )?;
            }
        },
    }
    Ok(())
}
