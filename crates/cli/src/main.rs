//! Golden Crumb CLI - database tools and a terminal storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Create or upgrade the database schema
//! gc-cli migrate
//!
//! # Fill empty content tables with the default bakery content
//! gc-cli seed
//!
//! # Build a cart and check out against a running API
//! gc-cli cart add croissant
//! gc-cli cart show
//! gc-cli checkout --name "Ada" --phone "+1 (555) 123-4567" --pickup-time 2026-10-20T09:30
//!
//! # Send a contact message, list orders
//! gc-cli contact --name Ada --email ada@example.com --message "Do you bake rye on Sundays?"
//! gc-cli orders
//! ```
//!
//! # Environment Variables
//!
//! - `BAKERY_DATABASE_URL` - `SQLite` database for `migrate` and `seed`
//! - `BAKERY_API_URL` - Storefront API base URL (default: `http://localhost:4000`)
//! - `BAKERY_CART_DIR` - Directory holding the cart file (default: `.`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

mod api;
mod cart_store;
mod commands;

use api::ApiClient;
use cart_store::CartStore;

#[derive(Parser)]
#[command(name = "gc-cli")]
#[command(author, version, about = "Golden Crumb CLI tools")]
struct Cli {
    /// Storefront API base URL
    #[arg(long, env = "BAKERY_API_URL", default_value = "http://localhost:4000", global = true)]
    api_url: Url,

    /// Directory holding the persisted cart
    #[arg(long, env = "BAKERY_CART_DIR", default_value = ".", global = true)]
    cart_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Migrate, then seed empty content tables with default content
    Seed,
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Validate the cart and submit it as a pickup order
    Checkout {
        /// Pickup name
        #[arg(long)]
        name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Pickup date and time, e.g. 2026-10-20T09:30
        #[arg(long)]
        pickup_time: String,
    },
    /// Send a message to the bakery
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,
    },
    /// List submitted orders, newest first
    Orders,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one of an item
    Add {
        /// Catalog item id, e.g. croissant
        id: String,
    },
    /// Remove one of an item
    Remove {
        /// Catalog item id
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Show the cart priced against the current catalog
    Show,
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = CartStore::new(&cli.cart_dir);
    let api = ApiClient::new(cli.api_url);

    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(&store, &id)?,
            CartAction::Remove { id } => commands::cart::remove(&store, &id)?,
            CartAction::Clear => commands::cart::clear(&store)?,
            CartAction::Show => commands::cart::show(&store, &api).await?,
        },
        Commands::Checkout {
            name,
            phone,
            pickup_time,
        } => {
            let form = golden_crumb_core::checkout::CheckoutForm {
                name,
                phone,
                pickup_time,
            };
            commands::checkout::run(&store, &api, &form).await?;
        }
        Commands::Contact {
            name,
            email,
            message,
        } => {
            let form = golden_crumb_core::contact::ContactForm {
                name,
                email,
                message,
            };
            commands::contact::run(&api, &form).await?;
        }
        Commands::Orders => commands::orders::run(&api).await?,
    }
    Ok(())
}
