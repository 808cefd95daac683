//! Cart commands.

use clothes_store_storefront::page::ids;
use clothes_store_storefront::views::{CartView, DeliveryCharge};
use clothes_store_storefront::{
    MemoryPage, Outcome, StoreConfig, StoreError, StorefrontPage, VariantSelection,
};

use super::{CartAction, open, print_toast};

/// Run a cart command.
///
/// # Errors
///
/// Returns an error if the product fields are invalid or the storage file
/// cannot be written.
pub fn run(action: CartAction, config: &StoreConfig) -> Result<(), StoreError> {
    let page = open(config);

    match action {
        CartAction::Add {
            product,
            size,
            color,
        } => {
            let product = product.product()?;
            let selection = VariantSelection::new(size, color);
            let outcome = page
                .product_add_to_cart(&product, &selection)
                .inspect_err(StoreError::capture)?;
            print_toast(&page);
            if outcome == Outcome::VariantRequired {
                tracing::warn!(id = %product.id, "Cart add skipped: size and color required");
            }
        }
        CartAction::Remove { line } => {
            page.cart_remove(&line.key()).inspect_err(StoreError::capture)?;
            show(&page, false);
        }
        CartAction::Qty { line, qty } => {
            let key = line.key();
            let outcome = page
                .cart_set_quantity(&key, qty)
                .inspect_err(StoreError::capture)?;
            if outcome == Outcome::Unchanged {
                tracing::warn!(line = %key, "No such cart line");
            }
            show(&page, false);
        }
        CartAction::Clear => {
            page.cart_clear().inspect_err(StoreError::capture)?;
            tracing::info!("Cart cleared");
        }
        CartAction::Show { html } => {
            page.init()?;
            show(&page, html);
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn show(page: &StorefrontPage<MemoryPage>, html: bool) {
    if html {
        println!("{}", page.page().html(ids::CART_ITEMS));
        return;
    }

    let view = CartView::build(&page.cart().get_all(), page.pricing());
    let CartView::Populated {
        rows,
        summary,
        labels,
    } = view
    else {
        println!("Your cart is empty");
        return;
    };

    for row in &rows {
        println!(
            "{:<24} {:<16} {:>3} x {:>10} = {:>10}",
            row.name, row.variant_label, row.qty, row.unit_price, row.line_total
        );
    }
    println!();
    println!("Items:    {}", labels.count_label);
    println!("Subtotal: {}", labels.subtotal);
    match summary.delivery {
        DeliveryCharge::Waived => println!("Delivery: {} (over threshold)", labels.delivery),
        DeliveryCharge::Fee(_) => println!("Delivery: {}", labels.delivery),
    }
    println!("Total:    {} {}", labels.total, page.pricing().currency.code());
}
