//! Sura CLI - Shop owner tools for the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the most recent orders
//! sura-cli orders list --limit 10
//!
//! # List customer accounts
//! sura-cli customers list
//!
//! # Show what the catalog scanner sees
//! sura-cli catalog list
//! ```
//!
//! Reads the same `SURA_*` environment variables as the storefront, so
//! running it from the deploy directory just works.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sura-cli")]
#[command(author, version, about = "Sura shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect placed orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Inspect customer accounts
    Customers {
        #[command(subcommand)]
        action: CustomersAction,
    },
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, newest first
    List {
        /// Maximum number of orders to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum CustomersAction {
    /// List customer accounts
    List,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products as the storefront scanner sees them
    List {
        /// Scan this directory instead of `SURA_CATALOG_DIR`
        #[arg(short, long)]
        root: Option<std::path::PathBuf>,
    },
}

#[tokio::main]
async fn main() {
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
    match cli.command {
        Commands::Orders { action } => match action {
            OrdersAction::List { limit } => commands::orders::list(limit).await?,
        },
        Commands::Customers { action } => match action {
            CustomersAction::List => commands::customers::list().await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List { root } => commands::catalog::list(root)?,
        },
    }
    Ok(())
}
