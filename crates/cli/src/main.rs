//! Wardrobe CLI - the storefront from a terminal.
//!
//! Runs the same store, persistence and mocked services as the API server.
//! Cart, session and theme live in the same local storage file, so state
//! carries over between invocations (and to the server, when they share a
//! data directory).
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! wd-cli products list --category women --sort price-low-high
//! wd-cli products show 12
//!
//! # Cart
//! wd-cli cart add 12 --quantity 2
//! wd-cli cart summary --promo DISCOUNT20
//!
//! # Checkout with a YAML form
//! wd-cli checkout --form order.yaml
//!
//! # Account and theme
//! wd-cli login -e shopper@example.com -p secret
//! wd-cli theme toggle
//! ```
//!
//! Configuration comes from the same environment variables as the server
//! (`STOREFRONT_DATA_DIR`, `CATALOG_BASE_URL`, `AUTH_DELAY_MS`, ...).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use wardrobe_core::ProductId;
use wardrobe_storefront::config::StorefrontConfig;
use wardrobe_storefront::routes::products::ListingQuery;
use wardrobe_storefront::state::AppState;

mod commands;

use commands::{CliError, Context, Output};

#[derive(Parser)]
#[command(name = "wd-cli")]
#[command(author, version, about = "Wardrobe storefront CLI")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsCommand,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// Place an order for the current cart
    Checkout {
        /// YAML file with the checkout form fields
        #[arg(short, long)]
        form: PathBuf,

        /// Promo code to apply
        #[arg(long)]
        promo: Option<String>,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Light/dark theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },
}

#[derive(Subcommand)]
enum ProductsCommand {
    /// List products matching the filters
    List {
        /// Category token (`women`, `men-accessories`, `trending`, ...)
        #[arg(short, long)]
        category: Option<String>,

        #[arg(long)]
        min_price: Option<Decimal>,

        #[arg(long)]
        max_price: Option<Decimal>,

        /// Search name, description, and brand
        #[arg(short, long)]
        query: Option<String>,

        /// `default`, `price-low-high`, `price-high-low`, `name-a-z`, `name-z-a`
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// Show a product and related products
    Show { id: ProductId },
}

#[derive(Subcommand)]
enum CartCommand {
    /// Show cart lines and totals
    Show,
    /// Add units of a product
    Add {
        id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove one unit of a product
    Remove { id: ProductId },
    /// Remove a product's whole line
    RemoveLine { id: ProductId },
    /// Empty the cart
    Clear,
    /// Show totals, optionally with a promo code
    Summary {
        #[arg(long)]
        promo: Option<String>,
    },
}

#[derive(Subcommand)]
enum ThemeCommand {
    /// Switch between light and dark
    Toggle,
    /// Show the current theme
    Show,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wd_cli=info,wardrobe_storefront=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = StorefrontConfig::from_env()?;
    let ctx = Context {
        state: AppState::new(config)?,
        out: Output::new(cli.json),
    };

    match cli.command {
        Commands::Products { action } => match action {
            ProductsCommand::List {
                category,
                min_price,
                max_price,
                query,
                sort,
            } => {
                let query = ListingQuery {
                    category,
                    min_price,
                    max_price,
                    q: query,
                    sort,
                    refresh: false,
                };
                commands::products::list(&ctx, query).await?;
            }
            ProductsCommand::Show { id } => commands::products::show(&ctx, id).await?,
        },
        Commands::Cart { action } => match action {
            CartCommand::Show => commands::cart::show(&ctx).await?,
            CartCommand::Add { id, quantity } => commands::cart::add(&ctx, id, quantity).await?,
            CartCommand::Remove { id } => commands::cart::remove(&ctx, id).await?,
            CartCommand::RemoveLine { id } => commands::cart::remove_line(&ctx, id).await?,
            CartCommand::Clear => commands::cart::clear(&ctx).await?,
            CartCommand::Summary { promo } => {
                commands::cart::summary(&ctx, promo.as_deref()).await?;
            }
        },
        Commands::Checkout { form, promo } => {
            commands::checkout::place_order(&ctx, &form, promo.as_deref()).await?;
        }
        Commands::Login { email, password } => {
            commands::account::login(&ctx, email, password).await?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::account::register(&ctx, name, email, password).await?,
        Commands::Logout => commands::account::logout(&ctx).await?,
        Commands::Theme { action } => match action {
            ThemeCommand::Toggle => commands::theme::toggle(&ctx).await?,
            ThemeCommand::Show => commands::theme::show(&ctx).await?,
        },
    }
    Ok(())
}
