//! Cart view.

use askama::Template;
use clothes_store_core::LineItem;
use rust_decimal::Decimal;

use super::{Pricing, product_url};
use crate::config::DeliveryPolicy;
use crate::error::Result;
use crate::icons::IconRenderer;
use crate::page::{Display, Page, ids};

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    pub id: String,
    /// Line identity in `id|size|color` form, for the row's controls.
    pub key: String,
    pub product_url: String,
    pub name: String,
    pub image: String,
    pub variant_label: String,
    pub unit_price: String,
    pub qty: u32,
    pub line_total: String,
    /// False when the quantity is 1 and "−" does nothing.
    pub can_decrement: bool,
}

impl CartRowView {
    fn new(line: &LineItem, pricing: &Pricing) -> Self {
        Self {
            id: line.id.to_string(),
            key: line.key().to_string(),
            product_url: product_url(line.id.as_str()),
            name: line.name.clone(),
            image: line.image.clone(),
            variant_label: line.variant().label(),
            unit_price: pricing.money(line.price),
            qty: line.quantity(),
            line_total: pricing.money(line.line_total()),
            can_decrement: line.quantity() > 1,
        }
    }
}

/// Delivery cost of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryCharge {
    /// A fee is charged (zero for an empty subtotal).
    Fee(Decimal),
    /// The subtotal is above the free-delivery threshold.
    Waived,
}

/// Order figures for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub subtotal: Decimal,
    pub delivery: DeliveryCharge,
    pub total: Decimal,
    pub count: u32,
}

impl CartSummary {
    /// Compute subtotal, delivery and grand total for `lines`.
    #[must_use]
    pub fn compute(lines: &[LineItem], policy: &DeliveryPolicy) -> Self {
        let subtotal = crate::stores::total_of(lines);
        let count = lines
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity()));

        let delivery = if subtotal > policy.free_threshold {
            DeliveryCharge::Waived
        } else if subtotal > Decimal::ZERO {
            DeliveryCharge::Fee(policy.fee)
        } else {
            DeliveryCharge::Fee(Decimal::ZERO)
        };

        let total = match delivery {
            DeliveryCharge::Fee(fee) => subtotal.saturating_add(fee),
            DeliveryCharge::Waived => subtotal,
        };

        Self {
            subtotal,
            delivery,
            total,
            count,
        }
    }
}

/// Display strings for the cart summary panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummaryView {
    pub subtotal: String,
    pub delivery: String,
    pub total: String,
    pub count_label: String,
}

impl CartSummaryView {
    fn new(summary: &CartSummary, pricing: &Pricing) -> Self {
        Self {
            subtotal: pricing.money(summary.subtotal),
            delivery: match summary.delivery {
                DeliveryCharge::Fee(fee) => pricing.money(fee),
                DeliveryCharge::Waived => "Free".to_string(),
            },
            total: pricing.money(summary.total),
            count_label: format!("{} item(s)", summary.count),
        }
    }
}

/// The cart page, either empty or populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartView {
    Empty,
    Populated {
        rows: Vec<CartRowView>,
        summary: CartSummary,
        labels: CartSummaryView,
    },
}

impl CartView {
    /// Build the view for a cart snapshot.
    #[must_use]
    pub fn build(lines: &[LineItem], pricing: &Pricing) -> Self {
        if lines.is_empty() {
            return Self::Empty;
        }

        let summary = CartSummary::compute(lines, &pricing.delivery);
        Self::Populated {
            rows: lines.iter().map(|line| CartRowView::new(line, pricing)).collect(),
            labels: CartSummaryView::new(&summary, pricing),
            summary,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Cart rows fragment.
#[derive(Template)]
#[template(path = "cart/items.html")]
pub struct CartItemsTemplate<'a> {
    pub rows: &'a [CartRowView],
}

/// Write `view` into the cart region of `page`.
///
/// # Errors
///
/// Returns an error if the rows template fails to render.
pub fn render(page: &mut impl Page, view: &CartView, icons: &dyn IconRenderer) -> Result<()> {
    match view {
        CartView::Empty => {
            page.set_html(ids::CART_ITEMS, "");
            page.set_display(ids::CART_ITEMS, Display::None);
            page.set_display(ids::CART_SUMMARY, Display::None);
            page.set_display(ids::CART_EMPTY, Display::Flex);
        }
        CartView::Populated { rows, labels, .. } => {
            let html = CartItemsTemplate { rows }.render()?;
            page.set_html(ids::CART_ITEMS, &icons.create_icons(&html));
            page.set_display(ids::CART_ITEMS, Display::Block);
            page.set_display(ids::CART_SUMMARY, Display::Block);
            page.set_display(ids::CART_EMPTY, Display::None);

            page.set_text(ids::CART_SUBTOTAL, &labels.subtotal);
            page.set_text(ids::CART_DELIVERY, &labels.delivery);
            page.set_text(ids::CART_TOTAL, &labels.total);
            page.set_text(ids::CART_COUNT_LABEL, &labels.count_label);
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clothes_store_core::{Product, Variant};

    use super::*;
    use crate::icons::{LucideIcons, PlaceholderIcons};
    use crate::page::MemoryPage;

    fn line(id: &str, price: i64, qty: i64, variant: Variant) -> LineItem {
        let product = Product::new(id, format!("Item {id}"), Decimal::new(price, 0), "/img.jpg").unwrap();
        let mut line = LineItem::new(&product, variant);
        line.set_quantity(qty);
        line
    }

    fn populated(view: &CartView) -> (&[CartRowView], &CartSummary, &CartSummaryView) {
        match view {
            CartView::Populated {
                rows,
                summary,
                labels,
            } => (rows.as_slice(), summary, labels),
            CartView::Empty => panic!("expected populated cart"),
        }
    }

    #[test]
    fn test_empty_cart_builds_empty_view() {
        assert_eq!(CartView::build(&[], &Pricing::default()), CartView::Empty);
    }

    #[test]
    fn test_delivery_charged_below_threshold() {
        let lines = [
            line("a", 50, 1, Variant::default()),
            line("b", 60, 2, Variant::default()),
        ];
        let view = CartView::build(&lines, &Pricing::default());
        let (rows, summary, labels) = populated(&view);

        assert_eq!(rows.len(), 2);
        assert_eq!(summary.subtotal, Decimal::new(170, 0));
        assert_eq!(summary.delivery, DeliveryCharge::Fee(Decimal::new(20, 0)));
        assert_eq!(summary.total, Decimal::new(190, 0));
        assert_eq!(labels.subtotal, "$170.00");
        assert_eq!(labels.delivery, "$20.00");
        assert_eq!(labels.total, "$190.00");
        assert_eq!(labels.count_label, "3 item(s)");
    }

    #[test]
    fn test_summary_saturates_instead_of_overflowing() {
        let mut huge = line("a", 1, 2, Variant::default());
        huge.price = Decimal::MAX;
        let lines = [huge, line("b", 60, 1, Variant::default())];

        let summary = CartSummary::compute(&lines, &DeliveryPolicy::default());
        assert_eq!(summary.subtotal, Decimal::MAX);
        assert_eq!(summary.total, Decimal::MAX);
        assert_eq!(summary.delivery, DeliveryCharge::Waived);
    }

    #[test]
    fn test_delivery_free_above_threshold() {
        let lines = [
            line("a", 50, 1, Variant::default()),
            line("b", 60, 2, Variant::default()),
            line("c", 40, 1, Variant::default()),
        ];
        let view = CartView::build(&lines, &Pricing::default());
        let (_, summary, labels) = populated(&view);

        assert_eq!(summary.subtotal, Decimal::new(210, 0));
        assert_eq!(summary.delivery, DeliveryCharge::Waived);
        assert_eq!(summary.total, Decimal::new(210, 0));
        assert_eq!(labels.delivery, "Free");
        assert_eq!(labels.total, "$210.00");
    }

    #[test]
    fn test_delivery_charged_at_exact_threshold() {
        let lines = [line("a", 200, 1, Variant::default())];
        let summary = CartSummary::compute(&lines, &DeliveryPolicy::default());
        assert_eq!(summary.delivery, DeliveryCharge::Fee(Decimal::new(20, 0)));
        assert_eq!(summary.total, Decimal::new(220, 0));
    }

    #[test]
    fn test_zero_subtotal_has_no_fee() {
        let lines = [line("gift", 0, 2, Variant::default())];
        let summary = CartSummary::compute(&lines, &DeliveryPolicy::default());
        assert_eq!(summary.delivery, DeliveryCharge::Fee(Decimal::ZERO));
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_row_fields() {
        let lines = [line("p1", 25, 3, Variant::sized("M", "Red"))];
        let view = CartView::build(&lines, &Pricing::default());
        let (rows, _, _) = populated(&view);
        let row = &rows[0];

        assert_eq!(row.key, "p1|M|Red");
        assert_eq!(row.product_url, "/product/p1");
        assert_eq!(row.variant_label, "M / Red");
        assert_eq!(row.unit_price, "$25.00");
        assert_eq!(row.line_total, "$75.00");
        assert!(row.can_decrement);
    }

    #[test]
    fn test_row_standard_variant_cannot_decrement_at_one() {
        let lines = [line("p1", 25, 1, Variant::default())];
        let view = CartView::build(&lines, &Pricing::default());
        let (rows, _, _) = populated(&view);
        assert_eq!(rows[0].variant_label, "Standard");
        assert!(!rows[0].can_decrement);
    }

    #[test]
    fn test_render_branches_are_exclusive() {
        let mut page = MemoryPage::with_elements(ids::CART_PAGE);
        let lines = [line("p1", 25, 1, Variant::sized("M", "Red"))];

        render(&mut page, &CartView::build(&lines, &Pricing::default()), &LucideIcons).unwrap();
        assert!(page.is_visible(ids::CART_ITEMS));
        assert!(page.is_visible(ids::CART_SUMMARY));
        assert!(!page.is_visible(ids::CART_EMPTY));
        assert!(page.html(ids::CART_ITEMS).contains("Item p1"));
        assert_eq!(page.text(ids::CART_TOTAL), "$45.00");

        render(&mut page, &CartView::Empty, &LucideIcons).unwrap();
        assert!(!page.is_visible(ids::CART_ITEMS));
        assert!(!page.is_visible(ids::CART_SUMMARY));
        assert!(page.is_visible(ids::CART_EMPTY));
        assert_eq!(page.html(ids::CART_ITEMS), "");
    }

    #[test]
    fn test_render_runs_icon_pass() {
        let mut page = MemoryPage::with_elements(ids::CART_PAGE);
        let view = CartView::build(&[line("p1", 5, 1, Variant::default())], &Pricing::default());

        render(&mut page, &view, &PlaceholderIcons).unwrap();
        assert!(page.html(ids::CART_ITEMS).contains(r#"data-lucide="x""#));

        render(&mut page, &view, &LucideIcons).unwrap();
        assert!(page.html(ids::CART_ITEMS).contains("lucide-x"));
        assert!(!page.html(ids::CART_ITEMS).contains("data-lucide"));
    }

    #[test]
    fn test_render_escapes_names() {
        let product = Product::new("p1", "<b>Bold</b> Tee", Decimal::ONE, "").unwrap();
        let lines = [LineItem::new(&product, Variant::default())];
        let mut page = MemoryPage::with_elements(ids::CART_PAGE);

        render(&mut page, &CartView::build(&lines, &Pricing::default()), &LucideIcons).unwrap();
        assert!(!page.html(ids::CART_ITEMS).contains("<b>Bold</b>"));
        assert!(page.html(ids::CART_ITEMS).contains("Bold"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut page = MemoryPage::with_elements(ids::CART_PAGE);
        let view = CartView::build(&[line("p1", 5, 2, Variant::default())], &Pricing::default());

        render(&mut page, &view, &LucideIcons).unwrap();
        let first = page.html(ids::CART_ITEMS).to_owned();
        render(&mut page, &view, &LucideIcons).unwrap();
        assert_eq!(page.html(ids::CART_ITEMS), first);
    }
}
