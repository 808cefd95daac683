//! The page the render layer writes into.
//!
//! The storefront never builds page structure itself. It writes text, HTML
//! fragments and visibility into elements that the page already declares
//! under well-known ids. Writes to ids the page does not have are ignored,
//! so the same controller works on the cart page, the wishlist page and
//! plain product pages.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::stores::CountIndicator;

/// Well-known element ids.
pub mod ids {
    pub const CART_ITEMS: &str = "cart-items";
    pub const CART_EMPTY: &str = "cart-empty";
    pub const CART_SUMMARY: &str = "cart-summary";
    pub const CART_SUBTOTAL: &str = "cart-subtotal";
    pub const CART_DELIVERY: &str = "cart-delivery";
    pub const CART_TOTAL: &str = "cart-total";
    pub const CART_COUNT_LABEL: &str = "cart-count-label";
    pub const CART_BADGE: &str = "cart-badge";
    pub const WISHLIST_ITEMS: &str = "wishlist-items";
    pub const WISHLIST_EMPTY: &str = "wishlist-empty";
    pub const STORE_TOAST: &str = "store-toast";

    /// Every element of a cart page.
    pub const CART_PAGE: &[&str] = &[
        CART_ITEMS,
        CART_EMPTY,
        CART_SUMMARY,
        CART_SUBTOTAL,
        CART_DELIVERY,
        CART_TOTAL,
        CART_COUNT_LABEL,
        CART_BADGE,
    ];

    /// Every element of a wishlist page.
    pub const WISHLIST_PAGE: &[&str] = &[WISHLIST_ITEMS, WISHLIST_EMPTY, CART_BADGE];
}

/// CSS `display` values the render layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    Flex,
    Grid,
}

impl Display {
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Block => "block",
            Self::Flex => "flex",
            Self::Grid => "grid",
        }
    }
}

/// Element access for the render layer.
pub trait Page {
    /// Returns true if the page declares an element with this id.
    fn has_element(&self, id: &str) -> bool;

    /// Appends a new, empty element with this id to the page body.
    fn create_element(&mut self, id: &str);

    /// Replaces the text content of an element.
    fn set_text(&mut self, id: &str, text: &str);

    /// Replaces the inner HTML of an element.
    fn set_html(&mut self, id: &str, html: &str);

    /// Sets the CSS `display` of an element.
    fn set_display(&mut self, id: &str, display: Display);

    /// Adds or removes a class on an element.
    fn toggle_class(&mut self, id: &str, class: &str, on: bool);
}

/// State of one element in a [`MemoryPage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    pub html: String,
    pub display: Option<Display>,
    pub classes: BTreeSet<String>,
}

/// A [`Page`] held in memory.
///
/// Used by the CLI to capture rendered output and by tests to inspect it.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    elements: BTreeMap<String, Element>,
}

impl MemoryPage {
    /// A page with no elements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A page declaring the given element ids.
    #[must_use]
    pub fn with_elements(ids: &[&str]) -> Self {
        let elements = ids
            .iter()
            .map(|id| ((*id).to_owned(), Element::default()))
            .collect();
        Self { elements }
    }

    /// A page with both the cart and the wishlist regions.
    #[must_use]
    pub fn full() -> Self {
        let mut all = ids::CART_PAGE.to_vec();
        all.extend_from_slice(ids::WISHLIST_PAGE);
        Self::with_elements(&all)
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Text content of an element, or `""` if the element is missing.
    #[must_use]
    pub fn text(&self, id: &str) -> &str {
        self.elements.get(id).map_or("", |e| e.text.as_str())
    }

    /// Inner HTML of an element, or `""` if the element is missing.
    #[must_use]
    pub fn html(&self, id: &str) -> &str {
        self.elements.get(id).map_or("", |e| e.html.as_str())
    }

    #[must_use]
    pub fn display(&self, id: &str) -> Option<Display> {
        self.elements.get(id).and_then(|e| e.display)
    }

    /// Returns true if the element exists and is not hidden.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|e| e.display != Some(Display::None))
    }

    #[must_use]
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|e| e.classes.contains(class))
    }
}

impl Page for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn create_element(&mut self, id: &str) {
        self.elements.entry(id.to_owned()).or_default();
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            text.clone_into(&mut element.text);
            element.html.clear();
        }
    }

    fn set_html(&mut self, id: &str, html: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            html.clone_into(&mut element.html);
            element.text.clear();
        }
    }

    fn set_display(&mut self, id: &str, display: Display) {
        if let Some(element) = self.elements.get_mut(id) {
            element.display = Some(display);
        }
    }

    fn toggle_class(&mut self, id: &str, class: &str, on: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            if on {
                element.classes.insert(class.to_owned());
            } else {
                element.classes.remove(class);
            }
        }
    }
}

/// The cart count badge in the page header.
///
/// Shows the count and is displayed only while the cart is not empty.
#[derive(Debug)]
pub struct Badge<P: Page> {
    page: Rc<RefCell<P>>,
}

impl<P: Page> Badge<P> {
    #[must_use]
    pub const fn new(page: Rc<RefCell<P>>) -> Self {
        Self { page }
    }
}

impl<P: Page> CountIndicator for Badge<P> {
    fn refresh(&self, count: u32) {
        let mut page = self.page.borrow_mut();
        if !page.has_element(ids::CART_BADGE) {
            return;
        }
        page.set_text(ids::CART_BADGE, &count.to_string());
        let display = if count > 0 { Display::Flex } else { Display::None };
        page.set_display(ids::CART_BADGE, display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_to_missing_elements_are_ignored() {
        let mut page = MemoryPage::with_elements(&[ids::CART_ITEMS]);
        page.set_text(ids::CART_TOTAL, "$10.00");
        assert!(!page.has_element(ids::CART_TOTAL));
        assert_eq!(page.text(ids::CART_TOTAL), "");
    }

    #[test]
    fn test_text_and_html_replace_each_other() {
        let mut page = MemoryPage::with_elements(&[ids::CART_ITEMS]);
        page.set_html(ids::CART_ITEMS, "<div></div>");
        page.set_text(ids::CART_ITEMS, "plain");
        assert_eq!(page.html(ids::CART_ITEMS), "");
        assert_eq!(page.text(ids::CART_ITEMS), "plain");
    }

    #[test]
    fn test_badge_hidden_when_empty() {
        let page = Rc::new(RefCell::new(MemoryPage::with_elements(&[ids::CART_BADGE])));
        let badge = Badge::new(Rc::clone(&page));

        badge.refresh(3);
        assert_eq!(page.borrow().text(ids::CART_BADGE), "3");
        assert_eq!(page.borrow().display(ids::CART_BADGE), Some(Display::Flex));

        badge.refresh(0);
        assert_eq!(page.borrow().text(ids::CART_BADGE), "0");
        assert_eq!(page.borrow().display(ids::CART_BADGE), Some(Display::None));
    }
}
