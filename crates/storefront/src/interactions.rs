//! Page wiring for cart and wishlist controls.
//!
//! [`StorefrontPage`] is the adapter between page events and the stores. It
//! owns the page, both stores, the toast and the icon pass, and re-renders
//! the affected region after every change:
//!
//! | Control | Action |
//! |---------|--------|
//! | Product card "add to cart" | [`StorefrontPage::card_add_to_cart`] |
//! | Product card / product page heart | [`StorefrontPage::toggle_wishlist`] |
//! | Product page "add to cart" | [`StorefrontPage::product_add_to_cart`] |
//! | Wishlist card "add to cart" / "remove" | [`StorefrontPage::wishlist_add_to_cart`], [`StorefrontPage::wishlist_remove`] |
//! | Cart row "−" / "+" / "×" | [`StorefrontPage::cart_decrement`], [`StorefrontPage::cart_increment`], [`StorefrontPage::cart_remove`] |

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use clothes_store_core::{LineKey, Product, ProductError, ProductId, Variant};
use tracing::{debug, instrument};

use crate::config::StoreConfig;
use crate::error::{Result, add_breadcrumb};
use crate::icons::{IconRenderer, LucideIcons};
use crate::notify::{Notifier, Toast};
use crate::page::{Badge, Page, ids};
use crate::storage::KeyValueStore;
use crate::stores::{CartStore, WishlistStore};
use crate::views::{self, CartView, Pricing, WishlistView};

/// Shown when "add to cart" is used where no variant can be chosen.
pub const SELECT_ON_PRODUCT_PAGE: &str = "Select size and color on the product page";

/// Shown when the product page is missing a size or color.
pub const SELECT_SIZE_AND_COLOR: &str = "Select size and color";

/// Product data attribute names.
pub mod attributes {
    pub const PRODUCT_ID: &str = "data-product-id";
    pub const PRODUCT_NAME: &str = "data-product-name";
    pub const PRODUCT_PRICE: &str = "data-product-price";
    pub const PRODUCT_IMAGE: &str = "data-product-image";
}

/// Read a product from an element's data attributes.
///
/// # Errors
///
/// Returns an error if the id or name is missing, or the price is missing,
/// unparseable or negative.
pub fn product_from_attributes(attrs: &HashMap<String, String>) -> Result<Product> {
    let get = |name: &str| attrs.get(name).map_or("", String::as_str);
    let price = get(attributes::PRODUCT_PRICE);
    if price.trim().is_empty() {
        return Err(ProductError::InvalidPrice(String::new()).into());
    }

    Ok(Product::parse(
        get(attributes::PRODUCT_ID),
        get(attributes::PRODUCT_NAME),
        price,
        get(attributes::PRODUCT_IMAGE),
    )?)
}

/// The checked `size` and `color` inputs on a product page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSelection {
    pub size: Option<String>,
    pub color: Option<String>,
}

impl VariantSelection {
    #[must_use]
    pub fn new(size: Option<impl Into<String>>, color: Option<impl Into<String>>) -> Self {
        Self {
            size: size.map(Into::into),
            color: color.map(Into::into),
        }
    }

    /// The chosen variant, if both size and color are set.
    #[must_use]
    pub fn complete(&self) -> Option<Variant> {
        let variant = Variant::new(self.size.clone(), self.color.clone());
        variant.is_complete().then_some(variant)
    }
}

/// What a page action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A store changed and its view was refreshed.
    Updated,
    /// The user has to pick a size and color first; nothing changed.
    VariantRequired,
    /// The action had nothing to do.
    Unchanged,
}

/// Cart and wishlist controller for one page.
pub struct StorefrontPage<P: Page> {
    page: Rc<RefCell<P>>,
    cart: CartStore,
    wishlist: WishlistStore,
    toast: Rc<Toast<P>>,
    icons: Box<dyn IconRenderer>,
    pricing: Pricing,
}

impl<P: Page + 'static> StorefrontPage<P> {
    /// Wire `page` to the stores in `storage`.
    #[must_use]
    pub fn new(page: P, storage: Rc<dyn KeyValueStore>, config: &StoreConfig) -> Self {
        let page = Rc::new(RefCell::new(page));
        let toast = Rc::new(Toast::new(Rc::clone(&page), config.toast_duration));
        let badge = Rc::new(Badge::new(Rc::clone(&page)));

        let cart = CartStore::new(Rc::clone(&storage), toast.clone()).with_indicator(badge);
        let wishlist = WishlistStore::new(storage, toast.clone());

        Self {
            page,
            cart,
            wishlist,
            toast,
            icons: Box::new(LucideIcons),
            pricing: Pricing::from(config),
        }
    }

    /// Use a different icon pass.
    #[must_use]
    pub fn with_icons(mut self, icons: impl IconRenderer + 'static) -> Self {
        self.icons = Box::new(icons);
        self
    }

    /// Initial paint: badge, then whichever list regions the page has.
    ///
    /// # Errors
    ///
    /// Returns an error if a region fails to render.
    pub fn init(&self) -> Result<()> {
        self.cart.refresh_indicator();

        let (has_cart, has_wishlist) = {
            let page = self.page.borrow();
            (
                page.has_element(ids::CART_ITEMS),
                page.has_element(ids::WISHLIST_ITEMS),
            )
        };

        if has_cart {
            self.render_cart()?;
        }
        if has_wishlist {
            self.render_wishlist()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn page(&self) -> Ref<'_, P> {
        self.page.borrow()
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    #[must_use]
    pub fn toast(&self) -> &Toast<P> {
        &self.toast
    }

    #[must_use]
    pub const fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    // =========================================================================
    // Product cards and product page
    // =========================================================================

    /// "Add to cart" on a product card. Cards offer no variant choice, so the
    /// user is sent to the product page.
    pub fn card_add_to_cart(&self, product: &Product) -> Outcome {
        add_breadcrumb(
            "cart",
            "Add to cart from card",
            Some(&[("product_id", product.id.as_str())]),
        );
        self.toast.notify(SELECT_ON_PRODUCT_PAGE);
        Outcome::VariantRequired
    }

    /// "Add to cart" on the product page with the current size/color choice.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved or re-rendered.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub fn product_add_to_cart(
        &self,
        product: &Product,
        selection: &VariantSelection,
    ) -> Result<Outcome> {
        let Some(variant) = selection.complete() else {
            debug!("Size or color missing");
            self.toast.notify(SELECT_SIZE_AND_COLOR);
            return Ok(Outcome::VariantRequired);
        };

        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product.id.as_str())]),
        );
        self.cart.add(product, variant)?;
        self.render_cart_if_present()?;
        Ok(Outcome::Updated)
    }

    /// Heart button on a product card or the product page.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be saved or re-rendered.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub fn toggle_wishlist(&self, product: &Product) -> Result<Outcome> {
        add_breadcrumb(
            "wishlist",
            "Toggled wishlist",
            Some(&[("product_id", product.id.as_str())]),
        );
        self.wishlist.toggle(product)?;
        self.render_wishlist_if_present()?;
        Ok(Outcome::Updated)
    }

    // =========================================================================
    // Wishlist page
    // =========================================================================

    /// "Add to cart" on a wishlist card. Wishlist items carry no variant, so
    /// this also sends the user to the product page.
    pub fn wishlist_add_to_cart(&self, id: &ProductId) -> Outcome {
        add_breadcrumb(
            "wishlist",
            "Add to cart from wishlist",
            Some(&[("product_id", id.as_str())]),
        );
        self.toast.notify(SELECT_ON_PRODUCT_PAGE);
        Outcome::VariantRequired
    }

    /// "Remove" on a wishlist card.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be saved or re-rendered.
    pub fn wishlist_remove(&self, id: &ProductId) -> Result<Outcome> {
        add_breadcrumb(
            "wishlist",
            "Removed from wishlist",
            Some(&[("product_id", id.as_str())]),
        );
        self.wishlist.remove(id)?;
        self.render_wishlist()?;
        Ok(Outcome::Updated)
    }

    // =========================================================================
    // Cart page
    // =========================================================================

    /// "−" on a cart row. Does nothing once the quantity is 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved or re-rendered.
    pub fn cart_decrement(&self, key: &LineKey) -> Result<Outcome> {
        let Some(qty) = self.line_quantity(key) else {
            return Ok(Outcome::Unchanged);
        };
        if qty <= 1 {
            return Ok(Outcome::Unchanged);
        }

        self.cart.update_qty(key, i64::from(qty) - 1)?;
        self.render_cart()?;
        Ok(Outcome::Updated)
    }

    /// "+" on a cart row.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved or re-rendered.
    pub fn cart_increment(&self, key: &LineKey) -> Result<Outcome> {
        let Some(qty) = self.line_quantity(key) else {
            return Ok(Outcome::Unchanged);
        };

        self.cart.update_qty(key, i64::from(qty) + 1)?;
        self.render_cart()?;
        Ok(Outcome::Updated)
    }

    /// "×" on a cart row.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved or re-rendered.
    pub fn cart_remove(&self, key: &LineKey) -> Result<Outcome> {
        let key_str = key.to_string();
        add_breadcrumb("cart", "Removed from cart", Some(&[("line", key_str.as_str())]));
        self.cart.remove(key)?;
        self.render_cart()?;
        Ok(Outcome::Updated)
    }

    /// Set a cart row to an explicit quantity (floored at 1).
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved or re-rendered.
    pub fn cart_set_quantity(&self, key: &LineKey, qty: i64) -> Result<Outcome> {
        if self.line_quantity(key).is_none() {
            return Ok(Outcome::Unchanged);
        }
        self.cart.update_qty(key, qty)?;
        self.render_cart()?;
        Ok(Outcome::Updated)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be removed or the view re-rendered.
    pub fn cart_clear(&self) -> Result<Outcome> {
        add_breadcrumb("cart", "Cleared cart", None);
        self.cart.clear()?;
        self.render_cart()?;
        Ok(Outcome::Updated)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Rebuild the cart region from the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows template fails to render.
    pub fn render_cart(&self) -> Result<()> {
        let view = CartView::build(&self.cart.get_all(), &self.pricing);
        views::cart::render(&mut *self.page.borrow_mut(), &view, self.icons.as_ref())
    }

    /// Rebuild the wishlist region from the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid template fails to render.
    pub fn render_wishlist(&self) -> Result<()> {
        let view = WishlistView::build(&self.wishlist.get_all(), &self.pricing);
        views::wishlist::render(&mut *self.page.borrow_mut(), &view, self.icons.as_ref())
    }

    fn render_cart_if_present(&self) -> Result<()> {
        if self.page.borrow().has_element(ids::CART_ITEMS) {
            self.render_cart()?;
        }
        Ok(())
    }

    fn render_wishlist_if_present(&self) -> Result<()> {
        if self.page.borrow().has_element(ids::WISHLIST_ITEMS) {
            self.render_wishlist()?;
        }
        Ok(())
    }

    fn line_quantity(&self, key: &LineKey) -> Option<u32> {
        self.cart
            .get_all()
            .iter()
            .find(|line| line.matches(key))
            .map(clothes_store_core::LineItem::quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::page::{Display, MemoryPage};
    use crate::storage::{MemoryStore, keys};

    fn page_with(ids: &[&str]) -> (Rc<MemoryStore>, StorefrontPage<MemoryPage>) {
        let storage = Rc::new(MemoryStore::new());
        let page = StorefrontPage::new(
            MemoryPage::with_elements(ids),
            storage.clone(),
            &StoreConfig::default(),
        );
        (storage, page)
    }

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Item {id}"), Decimal::new(price, 0), "/img.jpg").unwrap()
    }

    fn medium_red() -> VariantSelection {
        VariantSelection::new(Some("M"), Some("Red"))
    }

    fn key(id: &str) -> LineKey {
        LineKey::new(ProductId::new(id), Variant::sized("M", "Red"))
    }

    #[test]
    fn test_product_from_attributes() {
        let attrs: HashMap<String, String> = [
            (attributes::PRODUCT_ID, "p1"),
            (attributes::PRODUCT_NAME, "Tee"),
            (attributes::PRODUCT_PRICE, "19.99"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        let product = product_from_attributes(&attrs).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price, Decimal::new(1999, 2));
        assert_eq!(product.image, "");
    }

    #[test]
    fn test_product_from_attributes_requires_price() {
        let attrs: HashMap<String, String> = [(attributes::PRODUCT_ID, "p1"), (attributes::PRODUCT_NAME, "Tee")]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        assert!(product_from_attributes(&attrs).is_err());
    }

    #[test]
    fn test_selection_requires_both() {
        assert!(VariantSelection::default().complete().is_none());
        assert!(VariantSelection::new(Some("M"), None::<String>).complete().is_none());
        assert!(VariantSelection::new(Some("M"), Some("")).complete().is_none());
        assert_eq!(medium_red().complete(), Some(Variant::sized("M", "Red")));
    }

    #[test]
    fn test_init_renders_present_regions() {
        let (_storage, page) = page_with(ids::CART_PAGE);
        page.init().unwrap();

        let p = page.page();
        assert!(p.is_visible(ids::CART_EMPTY));
        assert!(!p.is_visible(ids::CART_ITEMS));
        assert_eq!(p.display(ids::CART_BADGE), Some(Display::None));
    }

    #[test]
    fn test_card_add_to_cart_requires_variant() {
        let (storage, page) = page_with(ids::CART_PAGE);
        let outcome = page.card_add_to_cart(&product("p1", 10));

        assert_eq!(outcome, Outcome::VariantRequired);
        assert!(storage.get_item(keys::CART).unwrap().is_none());
        assert_eq!(page.toast().current().unwrap().message, SELECT_ON_PRODUCT_PAGE);
    }

    #[test]
    fn test_product_add_without_selection_leaves_cart() {
        let (_storage, page) = page_with(ids::CART_PAGE);
        let selection = VariantSelection::new(Some("M"), None::<String>);

        let outcome = page.product_add_to_cart(&product("p1", 10), &selection).unwrap();
        assert_eq!(outcome, Outcome::VariantRequired);
        assert!(page.cart().get_all().is_empty());
        assert_eq!(page.toast().current().unwrap().message, SELECT_SIZE_AND_COLOR);
    }

    #[test]
    fn test_product_add_updates_badge_toast_and_view() {
        let (_storage, page) = page_with(ids::CART_PAGE);
        page.init().unwrap();

        page.product_add_to_cart(&product("p1", 10), &medium_red()).unwrap();
        page.product_add_to_cart(&product("p1", 10), &medium_red()).unwrap();

        let p = page.page();
        assert_eq!(p.text(ids::CART_BADGE), "2");
        assert_eq!(p.display(ids::CART_BADGE), Some(Display::Flex));
        assert_eq!(p.text(ids::STORE_TOAST), "Item p1 added to cart");
        assert!(p.is_visible(ids::CART_ITEMS));
        assert_eq!(p.text(ids::CART_COUNT_LABEL), "2 item(s)");
        assert_eq!(p.text(ids::CART_TOTAL), "$40.00");
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let (_storage, page) = page_with(ids::CART_PAGE);
        page.product_add_to_cart(&product("p1", 10), &medium_red()).unwrap();
        page.product_add_to_cart(&product("p1", 10), &medium_red()).unwrap();

        assert_eq!(page.cart_decrement(&key("p1")).unwrap(), Outcome::Updated);
        assert_eq!(page.cart().count(), 1);

        assert_eq!(page.cart_decrement(&key("p1")).unwrap(), Outcome::Unchanged);
        assert_eq!(page.cart().count(), 1);
    }

    #[test]
    fn test_increment_and_remove() {
        let (_storage, page) = page_with(ids::CART_PAGE);
        page.product_add_to_cart(&product("p1", 10), &medium_red()).unwrap();

        page.cart_increment(&key("p1")).unwrap();
        assert_eq!(page.cart().count(), 2);
        assert_eq!(page.page().text(ids::CART_SUBTOTAL), "$20.00");

        page.cart_remove(&key("p1")).unwrap();
        assert!(page.cart().get_all().is_empty());
        assert!(page.page().is_visible(ids::CART_EMPTY));
        assert_eq!(page.page().display(ids::CART_BADGE), Some(Display::None));
    }

    #[test]
    fn test_controls_on_missing_line_do_nothing() {
        let (_storage, page) = page_with(ids::CART_PAGE);
        assert_eq!(page.cart_increment(&key("ghost")).unwrap(), Outcome::Unchanged);
        assert_eq!(page.cart_decrement(&key("ghost")).unwrap(), Outcome::Unchanged);
        assert_eq!(page.cart_set_quantity(&key("ghost"), 5).unwrap(), Outcome::Unchanged);
    }

    #[test]
    fn test_wishlist_flow() {
        let (_storage, page) = page_with(ids::WISHLIST_PAGE);
        page.init().unwrap();
        assert!(page.page().is_visible(ids::WISHLIST_EMPTY));

        page.toggle_wishlist(&product("d1", 30)).unwrap();
        assert_eq!(page.page().display(ids::WISHLIST_ITEMS), Some(Display::Grid));
        assert_eq!(page.toast().current().unwrap().message, "Item d1 added to wishlist");

        assert_eq!(
            page.wishlist_add_to_cart(&ProductId::new("d1")),
            Outcome::VariantRequired
        );
        assert!(page.cart().get_all().is_empty());

        page.wishlist_remove(&ProductId::new("d1")).unwrap();
        assert!(page.page().is_visible(ids::WISHLIST_EMPTY));
        assert!(!page.page().is_visible(ids::WISHLIST_ITEMS));
    }

    #[test]
    fn test_custom_icon_pass() {
        let (_storage, page) = page_with(ids::CART_PAGE);
        let page = page.with_icons(crate::icons::PlaceholderIcons);
        page.product_add_to_cart(&product("p1", 10), &medium_red()).unwrap();

        let p = page.page();
        assert!(p.html(ids::CART_ITEMS).contains(r#"data-lucide="x""#));
        assert!(!p.html(ids::CART_ITEMS).contains("<svg"));
    }

    #[test]
    fn test_toast_element_created_once_on_plain_page() {
        let (_storage, page) = page_with(&[]);
        assert!(!page.page().has_element(ids::STORE_TOAST));

        page.toggle_wishlist(&product("d1", 30)).unwrap();
        page.toggle_wishlist(&product("d1", 30)).unwrap();

        assert_eq!(page.page().text(ids::STORE_TOAST), "Item d1 removed from wishlist");
        assert!(page.wishlist().get_all().is_empty());
    }
}
