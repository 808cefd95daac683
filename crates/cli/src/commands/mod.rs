//! Cart and wishlist commands.
//!
//! Each command opens the storage file, runs one page action against an
//! in-memory page and prints what the page would show.

use std::rc::Rc;

use clap::{Args, Subcommand};
use clothes_store_core::{LineKey, Product, ProductId, Variant};
use clothes_store_storefront::{JsonFileStore, MemoryPage, StoreConfig, StorefrontPage};

pub mod cart;
pub mod wishlist;

#[derive(Subcommand)]
pub enum CartAction {
    /// Add a product in a chosen size and color
    Add {
        #[command(flatten)]
        product: ProductArgs,

        /// Size to add
        #[arg(long)]
        size: Option<String>,

        /// Color to add
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a line
    Remove {
        #[command(flatten)]
        line: LineArgs,
    },
    /// Set a line's quantity (values below 1 become 1)
    Qty {
        #[command(flatten)]
        line: LineArgs,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        qty: i64,
    },
    /// Remove every line
    Clear,
    /// Print the cart
    Show {
        /// Print the rendered rows instead of a summary
        #[arg(long)]
        html: bool,
    },
}

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Save the product, or unsave it if already saved
    Toggle {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Unsave a product
    Remove {
        /// Product ID
        #[arg(long)]
        id: String,
    },
    /// Print the wishlist
    Show {
        /// Print the rendered grid instead of a list
        #[arg(long)]
        html: bool,
    },
}

/// Product fields as they appear on a product card.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID
    #[arg(long)]
    pub id: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unit price (e.g., 19.99)
    #[arg(long)]
    pub price: String,

    /// Image URL
    #[arg(long, default_value = "")]
    pub image: String,
}

impl ProductArgs {
    fn product(&self) -> Result<Product, clothes_store_core::ProductError> {
        Product::parse(&self.id, &self.name, &self.price, &self.image)
    }
}

/// Identifies one cart line.
#[derive(Args)]
pub struct LineArgs {
    /// Product ID
    #[arg(long)]
    pub id: String,

    /// Line size
    #[arg(long)]
    pub size: Option<String>,

    /// Line color
    #[arg(long)]
    pub color: Option<String>,
}

impl LineArgs {
    fn key(&self) -> LineKey {
        LineKey::new(
            ProductId::new(self.id.as_str()),
            Variant::new(self.size.as_deref(), self.color.as_deref()),
        )
    }
}

/// Open a page over the configured storage file with every region present.
fn open(config: &StoreConfig) -> StorefrontPage<MemoryPage> {
    tracing::debug!(path = %config.storage_path.display(), "Opening storage");
    let storage = Rc::new(JsonFileStore::new(config.storage_path.clone()));
    StorefrontPage::new(MemoryPage::full(), storage, config)
}

/// Print the toast, if the last action raised one.
#[allow(clippy::print_stdout)]
fn print_toast(page: &StorefrontPage<MemoryPage>) {
    if let Some(toast) = page.toast().current() {
        println!("{}", toast.message);
    }
}
