//! Inkmap CLI - database migrations and directory maintenance.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! inkmap-cli migrate
//!
//! # Give every shop without a slug one
//! inkmap-cli shops backfill-slugs
//!
//! # Show the slug a shop name would get
//! inkmap-cli slug "Ray's Tattoo Co."
//! ```
//!
//! # Environment Variables
//!
//! - `INKMAP_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `INKMAP_SERVICE_KEY` - Service credential used as the database password

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "inkmap-cli")]
#[command(author, version, about = "Inkmap operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Maintain shops
    Shops {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Print the slug a shop name would get
    Slug {
        /// Shop name
        name: String,
    },
}

#[derive(Subcommand)]
enum ShopAction {
    /// Assign slugs to shops that have none
    BackfillSlugs,
}

#[tokio::main]
async fn main() {
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
        Commands::Shops { action } => match action {
            ShopAction::BackfillSlugs => commands::shops::backfill_slugs().await?,
        },
        Commands::Slug { name } => commands::shops::preview_slug(&name),
    }
    Ok(())
}
