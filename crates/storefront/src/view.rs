//! Derived view handed back to the presentation layer after every action.

use serde::Serialize;
use studio_core::{
    Cart, CategoryFilter, CurrencyCode, LineItem, Price, Product, ProductId, Quantity, Size,
};

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub size: Size,
    pub quantity: Quantity,
    pub image_url: String,
    pub price: Price,
    pub price_display: String,
    pub line_total: Price,
    pub line_total_display: String,
}

impl CartLineView {
    fn new(line: &LineItem, currency: CurrencyCode) -> Self {
        let line_total = line.line_total();
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            size: line.size,
            quantity: line.quantity,
            image_url: line.image_url.clone(),
            price: line.price,
            price_display: line.price.display(currency),
            line_total,
            line_total_display: line_total.display(currency),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    /// Distinct lines, shown on the bag badge.
    pub item_count: usize,
    pub total: Price,
    pub total_display: String,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        let total = cart.total();
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView::new(line, currency))
                .collect(),
            item_count: cart.item_count(),
            total,
            total_display: total.display(currency),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Everything the page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorefrontView {
    /// Catalog products passing the current category and search filter.
    pub products: Vec<Product>,
    /// Category tab labels.
    pub categories: Vec<String>,
    pub active_category: CategoryFilter,
    pub search_query: String,
    pub cart: CartView,
    /// Product open in the quick-view modal.
    pub selected_product: Option<Product>,
    pub selected_size: Size,
    /// Cart drawer open.
    pub cart_open: bool,
    /// "Added to Bag" toast showing.
    pub toast_visible: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use studio_core::{CartAction, Catalog};

    use super::*;

    #[test]
    fn test_cart_view_totals_and_display() {
        let catalog = Catalog::studio();
        let coat = catalog.get(ProductId::new(1)).unwrap().clone();
        let cart = Cart::new()
            .reduce(&CartAction::Add {
                product: coat.clone(),
                size: Size::M,
            })
            .reduce(&CartAction::Add {
                product: coat,
                size: Size::M,
            });

        let view = CartView::new(&cart, catalog.currency());
        assert_eq!(view.item_count, 1);
        assert_eq!(view.total, Price::from_minor(24_998));
        assert_eq!(view.total_display, "₹249.98");
        assert_eq!(view.lines[0].price_display, "₹124.99");
        assert_eq!(view.lines[0].line_total_display, "₹249.98");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::new(&Cart::new(), CurrencyCode::INR);
        assert!(view.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.total, Price::ZERO);
        assert_eq!(view.total_display, "₹0.00");
    }
}
