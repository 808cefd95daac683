//! Wishlist view.

use askama::Template;
use clothes_store_core::WishlistItem;

use super::{Pricing, product_url};
use crate::error::Result;
use crate::icons::IconRenderer;
use crate::page::{Display, Page, ids};

/// One rendered wishlist card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistCardView {
    pub id: String,
    pub product_url: String,
    pub name: String,
    pub image: String,
    pub price: String,
}

impl WishlistCardView {
    fn new(item: &WishlistItem, pricing: &Pricing) -> Self {
        Self {
            id: item.id.to_string(),
            product_url: product_url(item.id.as_str()),
            name: item.name.clone(),
            image: item.image.clone(),
            price: pricing.money(item.price),
        }
    }
}

/// The wishlist page, either empty or a grid of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistView {
    Empty,
    Grid(Vec<WishlistCardView>),
}

impl WishlistView {
    /// Build the view for a wishlist snapshot.
    #[must_use]
    pub fn build(items: &[WishlistItem], pricing: &Pricing) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Grid(
                items
                    .iter()
                    .map(|item| WishlistCardView::new(item, pricing))
                    .collect(),
            )
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Wishlist grid fragment.
#[derive(Template)]
#[template(path = "wishlist/grid.html")]
pub struct WishlistGridTemplate<'a> {
    pub cards: &'a [WishlistCardView],
}

/// Write `view` into the wishlist region of `page`.
///
/// # Errors
///
/// Returns an error if the grid template fails to render.
pub fn render(page: &mut impl Page, view: &WishlistView, icons: &dyn IconRenderer) -> Result<()> {
    match view {
        WishlistView::Empty => {
            page.set_html(ids::WISHLIST_ITEMS, "");
            page.set_display(ids::WISHLIST_ITEMS, Display::None);
            page.set_display(ids::WISHLIST_EMPTY, Display::Block);
        }
        WishlistView::Grid(cards) => {
            let html = WishlistGridTemplate { cards }.render()?;
            page.set_html(ids::WISHLIST_ITEMS, &icons.create_icons(&html));
            page.set_display(ids::WISHLIST_ITEMS, Display::Grid);
            page.set_display(ids::WISHLIST_EMPTY, Display::None);
        }
    }
    Ok(())
}
