//! Tienda CLI - Database migrations and catalog maintenance.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! tienda-cli migrate
//!
//! # Load products from a YAML file
//! tienda-cli seed crates/cli/seed/products.yaml
//!
//! # Replace the whole catalog
//! tienda-cli seed crates/cli/seed/products.yaml --clear
//!
//! # Delete empty carts older than two days
//! tienda-cli carts prune --older-than-hours 48
//! ```
//!
//! # Environment Variables
//!
//! - `TIENDA_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tienda-cli")]
#[command(author, version, about = "Tienda CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert products from a YAML file
    Seed {
        /// Path to the YAML seed file
        file: PathBuf,

        /// Delete every existing product first
        #[arg(long)]
        clear: bool,
    },
    /// Maintain carts
    Carts {
        #[command(subcommand)]
        action: CartsAction,
    },
}

#[derive(Subcommand)]
enum CartsAction {
    /// Delete empty carts older than a cutoff
    Prune {
        /// Minimum cart age in hours
        #[arg(long, default_value_t = 24)]
        older_than_hours: u32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file, clear } => commands::seed::products(&file, clear).await?,
        Commands::Carts { action } => match action {
            CartsAction::Prune { older_than_hours } => {
                commands::carts::prune(older_than_hours).await?;
            }
        },
    }
    Ok(())
}
