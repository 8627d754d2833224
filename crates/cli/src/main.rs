//! Local Market CLI - Quotes, price breakdowns and catalog fetches.
//!
//! # Usage
//!
//! ```bash
//! # Quote a custom product from a definition and a selection script
//! lm-cli quote --definition bowl.json --selections picks.yaml
//!
//! # Same, then commit into an in-memory cart
//! lm-cli quote --definition bowl.json --selections picks.yaml --addon-offers addons.json --commit
//!
//! # Price breakdown of an ad-hoc product
//! lm-cli price --base 49.90 --promo 39.90 --installments 3 --interest-free
//!
//! # Fetch from the catalog API (reads MARKET_API_* variables)
//! lm-cli fetch custom-product 12
//! lm-cli fetch addons 4
//! ```
//!
//! # Commands
//!
//! - `quote` - Run a custom-product session from files
//! - `price` - Show how a product's price is displayed
//! - `fetch` - Fetch products, add-ons and definitions from the catalog API

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "lm-cli")]
#[command(author, version, about = "Local Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a custom-product session from a definition and a selection script
    Quote {
        /// Custom-product definition (JSON)
        #[arg(short, long)]
        definition: PathBuf,

        /// Selection script (YAML)
        #[arg(short, long)]
        selections: PathBuf,

        /// Add-on offers (JSON array)
        #[arg(short, long)]
        addon_offers: Option<PathBuf>,

        /// Commit the result into an in-memory cart
        #[arg(long)]
        commit: bool,
    },
    /// Show the price breakdown of an ad-hoc product
    Price {
        /// Regular price
        #[arg(long)]
        base: Decimal,

        /// Promotional price
        #[arg(long)]
        promo: Option<Decimal>,

        /// Number of installments
        #[arg(long)]
        installments: Option<u32>,

        /// Installments carry no interest
        #[arg(long)]
        interest_free: bool,

        /// Cash payment discount, in percent
        #[arg(long)]
        cash_discount: Option<Decimal>,
    },
    /// Fetch from the catalog API
    Fetch {
        #[command(subcommand)]
        target: FetchTarget,
    },
}

#[derive(Subcommand)]
enum FetchTarget {
    /// Fetch a custom-product definition
    CustomProduct {
        /// Custom product ID
        id: i32,
    },
    /// Fetch a catalog product
    Product {
        /// Product ID
        id: i32,
    },
    /// Fetch the products of a category
    Category {
        /// Category ID
        id: i32,
    },
    /// Fetch the add-ons offered for a category
    Addons {
        /// Category ID
        category: i32,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "local_market=info,lm_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Quote {
            definition,
            selections,
            addon_offers,
            commit,
        } => {
            commands::quote::run(&definition, &selections, addon_offers.as_deref(), commit)
                .await?;
        }
        Commands::Price {
            base,
            promo,
            installments,
            interest_free,
            cash_discount,
        } => commands::price::show(&commands::price::PriceArgs {
            base,
            promo,
            installments,
            interest_free,
            cash_discount,
        }),
        Commands::Fetch { target } => match target {
            FetchTarget::CustomProduct { id } => commands::fetch::custom_product(id).await?,
            FetchTarget::Product { id } => commands::fetch::product(id).await?,
            FetchTarget::Category { id } => commands::fetch::category(id).await?,
            FetchTarget::Addons { category } => commands::fetch::addons(category).await?,
        },
    }
    Ok(())
}
