//! Cart actions through the page, persisted to a storage file.

#![allow(clippy::unwrap_used)]

use clothes_store_core::{LineKey, ProductId, Variant};
use clothes_store_integration_tests::{TestContext, product};
use clothes_store_storefront::page::{Display, ids};
use clothes_store_storefront::{Outcome, VariantSelection};
use rust_decimal::Decimal;

fn selection(size: &str, color: &str) -> VariantSelection {
    VariantSelection::new(Some(size), Some(color))
}

#[test]
fn test_delivery_fee_then_free_delivery() {
    let ctx = TestContext::new();
    let page = ctx.open_page(ids::CART_PAGE);
    page.init().unwrap();

    page.product_add_to_cart(&product("a", "Shirt", "50"), &selection("M", "Red"))
        .unwrap();
    let trousers = product("b", "Trousers", "60");
    page.product_add_to_cart(&trousers, &selection("L", "Black")).unwrap();
    page.product_add_to_cart(&trousers, &selection("L", "Black")).unwrap();

    {
        let p = page.page();
        assert_eq!(p.text(ids::CART_SUBTOTAL), "$170.00");
        assert_eq!(p.text(ids::CART_DELIVERY), "$20.00");
        assert_eq!(p.text(ids::CART_TOTAL), "$190.00");
        assert_eq!(p.text(ids::CART_COUNT_LABEL), "3 item(s)");
    }

    page.product_add_to_cart(&product("c", "Belt", "40"), &selection("S", "Brown"))
        .unwrap();

    let p = page.page();
    assert_eq!(p.text(ids::CART_SUBTOTAL), "$210.00");
    assert_eq!(p.text(ids::CART_DELIVERY), "Free");
    assert_eq!(p.text(ids::CART_TOTAL), "$210.00");
}

#[test]
fn test_cart_survives_page_reload() {
    let ctx = TestContext::new();
    let shirt = product("p1", "Linen Shirt", "85");

    {
        let page = ctx.open_page(&[]);
        page.product_add_to_cart(&shirt, &selection("M", "White")).unwrap();
        page.product_add_to_cart(&shirt, &selection("M", "White")).unwrap();
        page.product_add_to_cart(&shirt, &selection("L", "White")).unwrap();
    }

    let page = ctx.open_page(ids::CART_PAGE);
    page.init().unwrap();

    let lines = page.cart().get_all();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].quantity(), 2);
    assert_eq!(lines[1].size.as_deref(), Some("L"));
    assert_eq!(page.cart().count(), 3);
    assert_eq!(page.cart().total(), Decimal::new(255, 0));

    let p = page.page();
    assert_eq!(p.text(ids::CART_BADGE), "3");
    assert_eq!(p.display(ids::CART_BADGE), Some(Display::Flex));
    assert!(p.html(ids::CART_ITEMS).contains("Linen Shirt"));
}

#[test]
fn test_row_controls_persist() {
    let ctx = TestContext::new();
    let key = LineKey::new(ProductId::new("p1"), Variant::sized("M", "Red"));

    let page = ctx.open_page(ids::CART_PAGE);
    page.product_add_to_cart(&product("p1", "Tee", "10"), &selection("M", "Red"))
        .unwrap();
    assert_eq!(page.cart_increment(&key).unwrap(), Outcome::Updated);
    assert_eq!(page.cart_increment(&key).unwrap(), Outcome::Updated);
    assert_eq!(page.cart_decrement(&key).unwrap(), Outcome::Updated);

    let reloaded = ctx.open_page(ids::CART_PAGE);
    assert_eq!(reloaded.cart().count(), 2);

    reloaded.cart_set_quantity(&key, 0).unwrap();
    assert_eq!(reloaded.cart().count(), 1);
    assert_eq!(reloaded.cart_decrement(&key).unwrap(), Outcome::Unchanged);

    reloaded.cart_remove(&key).unwrap();
    assert!(ctx.open_page(&[]).cart().get_all().is_empty());
    assert!(reloaded.page().is_visible(ids::CART_EMPTY));
}

#[test]
fn test_card_add_never_writes() {
    let ctx = TestContext::new();
    let page = ctx.open_page(ids::CART_PAGE);

    let outcome = page.card_add_to_cart(&product("p1", "Tee", "10"));
    assert_eq!(outcome, Outcome::VariantRequired);

    let outcome = page
        .product_add_to_cart(&product("p1", "Tee", "10"), &VariantSelection::default())
        .unwrap();
    assert_eq!(outcome, Outcome::VariantRequired);

    assert!(!ctx.storage_path().exists());
}

#[test]
fn test_clear_removes_cart_key_only() {
    let ctx = TestContext::new();
    let page = ctx.open_page(ids::CART_PAGE);
    page.product_add_to_cart(&product("p1", "Tee", "10"), &selection("M", "Red"))
        .unwrap();
    page.toggle_wishlist(&product("d1", "Dress", "99")).unwrap();

    page.cart_clear().unwrap();

    let raw: serde_json::Value = serde_json::from_str(&ctx.read_raw()).unwrap();
    assert!(raw.get("clothes_store_cart").is_none());
    assert!(raw.get("clothes_store_wishlist").is_some());
    assert_eq!(page.page().display(ids::CART_BADGE), Some(Display::None));
}
