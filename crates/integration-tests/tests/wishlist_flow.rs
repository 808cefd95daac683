//! Wishlist actions through the page, persisted to a storage file.

#![allow(clippy::unwrap_used)]

use clothes_store_core::ProductId;
use clothes_store_integration_tests::{TestContext, product};
use clothes_store_storefront::Outcome;
use clothes_store_storefront::page::{Display, ids};

#[test]
fn test_toggle_is_self_inverse_across_reloads() {
    let ctx = TestContext::new();
    let dress = product("d1", "Silk Dress", "120");

    ctx.open_page(&[]).toggle_wishlist(&dress).unwrap();
    assert!(ctx.open_page(&[]).wishlist().has(&ProductId::new("d1")));

    ctx.open_page(&[]).toggle_wishlist(&dress).unwrap();
    assert!(ctx.open_page(&[]).wishlist().get_all().is_empty());
}

#[test]
fn test_wishlist_page_renders_saved_items() {
    let ctx = TestContext::new();
    {
        let page = ctx.open_page(&[]);
        page.toggle_wishlist(&product("d1", "Silk Dress", "120")).unwrap();
        page.toggle_wishlist(&product("d2", "Wool Coat", "240.5")).unwrap();
    }

    let page = ctx.open_page(ids::WISHLIST_PAGE);
    page.init().unwrap();

    let p = page.page();
    assert_eq!(p.display(ids::WISHLIST_ITEMS), Some(Display::Grid));
    assert!(!p.is_visible(ids::WISHLIST_EMPTY));

    let html = p.html(ids::WISHLIST_ITEMS);
    assert!(html.contains("Silk Dress"));
    assert!(html.contains("$240.50"));
    assert!(html.contains("/product/d2"));
}

#[test]
fn test_wishlist_add_to_cart_asks_for_variant() {
    let ctx = TestContext::new();
    let page = ctx.open_page(ids::WISHLIST_PAGE);
    page.toggle_wishlist(&product("d1", "Silk Dress", "120")).unwrap();

    let outcome = page.wishlist_add_to_cart(&ProductId::new("d1"));
    assert_eq!(outcome, Outcome::VariantRequired);
    assert!(page.cart().get_all().is_empty());
    assert_eq!(
        page.toast().current().unwrap().message,
        "Select size and color on the product page"
    );
}

#[test]
fn test_remove_last_item_shows_empty_state() {
    let ctx = TestContext::new();
    let page = ctx.open_page(ids::WISHLIST_PAGE);
    page.toggle_wishlist(&product("d1", "Silk Dress", "120")).unwrap();

    page.wishlist_remove(&ProductId::new("d1")).unwrap();

    let p = page.page();
    assert_eq!(p.display(ids::WISHLIST_EMPTY), Some(Display::Block));
    assert_eq!(p.display(ids::WISHLIST_ITEMS), Some(Display::None));
    assert_eq!(p.html(ids::WISHLIST_ITEMS), "");
}
