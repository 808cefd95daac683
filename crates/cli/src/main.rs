//! Clothes store CLI - Cart and wishlist from the terminal.
//!
//! Drives the same stores and views as the storefront pages against a local
//! JSON storage file.
//!
//! # Usage
//!
//! ```bash
//! # Add a product in size M, red
//! store-cli cart add --id p1 --name "Linen Shirt" --price 85 --size M --color Red
//!
//! # Change a line's quantity
//! store-cli cart qty --id p1 --size M --color Red 3
//!
//! # Show the cart summary, or the rendered rows
//! store-cli cart show
//! store-cli cart show --html
//!
//! # Save or unsave a product
//! store-cli wishlist toggle --id d1 --name "Silk Dress" --price 120
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_STORAGE_PATH` - Storage file (overridden by `--storage`)
//! - `STORE_CURRENCY` - Display currency code
//! - `STORE_DELIVERY_FEE` / `STORE_FREE_DELIVERY_THRESHOLD` - Delivery pricing
//! - `SENTRY_DSN` - Error tracking

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clothes_store_storefront::StoreConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{CartAction, WishlistAction};

#[derive(Parser)]
#[command(name = "store-cli")]
#[command(author, version, about = "Clothes store cart and wishlist")]
struct Cli {
    /// Storage file to read and write
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StoreConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "clothes_store_storefront=info,clothes_store_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Sentry must be initialized before the tracing subscriber
    let config = StoreConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }

    let result: Result<(), Box<dyn std::error::Error>> = run(cli.command, &config);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(command: Commands, config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Cart { action } => commands::cart::run(action, config)?,
        Commands::Wishlist { action } => commands::wishlist::run(action, config)?,
    }
    Ok(())
}
