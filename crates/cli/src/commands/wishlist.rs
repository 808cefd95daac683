//! Wishlist commands.

use clothes_store_core::ProductId;
use clothes_store_storefront::page::ids;
use clothes_store_storefront::views::WishlistView;
use clothes_store_storefront::{MemoryPage, StoreConfig, StoreError, StorefrontPage};

use super::{WishlistAction, open, print_toast};

/// Run a wishlist command.
///
/// # Errors
///
/// Returns an error if the product fields are invalid or the storage file
/// cannot be written.
pub fn run(action: WishlistAction, config: &StoreConfig) -> Result<(), StoreError> {
    let page = open(config);

    match action {
        WishlistAction::Toggle { product } => {
            let product = product.product()?;
            page.toggle_wishlist(&product).inspect_err(StoreError::capture)?;
            print_toast(&page);
        }
        WishlistAction::Remove { id } => {
            let id = ProductId::new(id);
            if !page.wishlist().has(&id) {
                tracing::warn!(%id, "Product is not in the wishlist");
            }
            page.wishlist_remove(&id).inspect_err(StoreError::capture)?;
            show(&page, false);
        }
        WishlistAction::Show { html } => {
            page.init()?;
            show(&page, html);
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn show(page: &StorefrontPage<MemoryPage>, html: bool) {
    if html {
        println!("{}", page.page().html(ids::WISHLIST_ITEMS));
        return;
    }

    match WishlistView::build(&page.wishlist().get_all(), page.pricing()) {
        WishlistView::Empty => println!("Your wishlist is empty"),
        WishlistView::Grid(cards) => {
            for card in &cards {
                println!("{:<24} {:>10}  {}", card.name, card.price, card.product_url);
            }
        }
    }
}
