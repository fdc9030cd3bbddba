//! Cart state machine.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s, unique by [`LineKey`].
//! It only changes through [`Cart::reduce`], a pure transition driven by a
//! [`CartAction`]. Every transition is total: unknown lines are ignored and
//! out-of-range quantities are clamped.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId, Quantity, Size};

/// Errors raised when building a [`Cart`] from raw lines.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Two lines share the same product and size.
    #[error("duplicate cart line for product {product_id} size {size}")]
    DuplicateLine {
        /// Product of the duplicated line.
        product_id: ProductId,
        /// Size of the duplicated line.
        size: Size,
    },
}

/// Identity of a cart line: two lines are the same entry iff both fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Size,
}

impl LineKey {
    /// Create a line key.
    #[must_use]
    pub const fn new(product_id: ProductId, size: Size) -> Self {
        Self { product_id, size }
    }
}

/// One distinct (product, size) entry in the cart.
///
/// Name, price and image are copied from the product when the line is
/// created and are never re-read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(rename = "img")]
    pub image_url: String,
    pub size: Size,
    #[serde(rename = "qty")]
    pub quantity: Quantity,
}

impl LineItem {
    /// Start a new line with a single unit of `product`.
    #[must_use]
    pub fn from_product(product: &Product, size: Size) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            size,
            quantity: Quantity::ONE,
        }
    }

    /// Identity key of this line.
    #[must_use]
    pub const fn key(&self) -> LineKey {
        LineKey::new(self.product_id, self.size)
    }

    /// Snapshot price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// An action dispatched against the cart.
///
/// Tags match the storefront's dispatch names. Any unrecognized tag
/// deserializes to [`CartAction::Unknown`], which leaves the cart untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CartAction {
    /// Add one unit of `product` in `size`.
    #[serde(rename = "ADD_TO_CART")]
    Add { product: Product, size: Size },
    /// Delete the line for (`product_id`, `size`).
    #[serde(rename = "REMOVE_ITEM")]
    Remove { product_id: ProductId, size: Size },
    /// Set the quantity of an existing line, clamped to at least 1.
    #[serde(rename = "UPDATE_QTY")]
    UpdateQuantity {
        product_id: ProductId,
        size: Size,
        quantity: i64,
    },
    /// Empty the cart.
    #[serde(rename = "CLEAR_CART")]
    Clear,
    /// An action this version does not know about.
    #[serde(other)]
    Unknown,
}

impl CartAction {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "ADD_TO_CART",
            Self::Remove { .. } => "REMOVE_ITEM",
            Self::UpdateQuantity { .. } => "UPDATE_QTY",
            Self::Clear => "CLEAR_CART",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Ordered cart lines, unique by [`LineKey`].
///
/// Serializes as a plain JSON array of lines. Deserialization rejects
/// duplicate keys and zero quantities.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Look up a line by key.
    #[must_use]
    pub fn get(&self, key: LineKey) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.key() == key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (what the bag badge shows).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Sum of price times quantity across all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    /// Apply `action` and return the next cart.
    #[must_use]
    pub fn reduce(mut self, action: &CartAction) -> Self {
        match action {
            CartAction::Add { product, size } => self.add(product, *size),
            CartAction::Remove { product_id, size } => {
                let key = LineKey::new(*product_id, *size);
                self.lines.retain(|line| line.key() != key);
            }
            CartAction::UpdateQuantity {
                product_id,
                size,
                quantity,
            } => {
                let key = LineKey::new(*product_id, *size);
                if let Some(line) = self.line_mut(key) {
                    line.quantity = Quantity::clamped(*quantity);
                }
            }
            CartAction::Clear => self.lines.clear(),
            CartAction::Unknown => {}
        }
        self
    }

    fn add(&mut self, product: &Product, size: Size) {
        match self.line_mut(LineKey::new(product.id, size)) {
            Some(line) => line.quantity = line.quantity.incremented(),
            None => self.lines.push(LineItem::from_product(product, size)),
        }
    }

    fn line_mut(&mut self, key: LineKey) -> Option<&mut LineItem> {
        self.lines.iter_mut().find(|line| line.key() == key)
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<LineItem>) -> Result<Self, Self::Error> {
        for (index, line) in lines.iter().enumerate() {
            if lines.iter().skip(index + 1).any(|other| other.key() == line.key()) {
                return Err(CartError::DuplicateLine {
                    product_id: line.product_id,
                    size: line.size,
                });
            }
        }
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn trench_coat() -> Product {
        Product::new(
            ProductId::new(1),
            "Trench Coat",
            Price::from_minor(12_499),
            "Outerwear",
            "coat.jpg",
            "Premium gabardine construction.",
        )
    }

    fn hoodie() -> Product {
        Product::new(
            ProductId::new(3),
            "Oversized Hoodie",
            Price::from_minor(3_499),
            "Basics",
            "hoodie.jpg",
            "Heavyweight organic cotton.",
        )
    }

    fn add(product: &Product, size: Size) -> CartAction {
        CartAction::Add {
            product: product.clone(),
            size,
        }
    }

    fn update(product_id: i32, size: Size, quantity: i64) -> CartAction {
        CartAction::UpdateQuantity {
            product_id: ProductId::new(product_id),
            size,
            quantity,
        }
    }

    fn remove(product_id: i32, size: Size) -> CartAction {
        CartAction::Remove {
            product_id: ProductId::new(product_id),
            size,
        }
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::new();
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_add_appends_new_line() {
        let cart = Cart::new().reduce(&add(&trench_coat(), Size::M));
        assert_eq!(cart.item_count(), 1);
        let line = &cart.lines()[0];
        assert_eq!(line.key(), LineKey::new(ProductId::new(1), Size::M));
        assert_eq!(line.quantity, Quantity::ONE);
        assert_eq!(line.name, "Trench Coat");
        assert_eq!(line.image_url, "coat.jpg");
    }

    #[test]
    fn test_add_same_key_increments() {
        let coat = trench_coat();
        let cart = Cart::new()
            .reduce(&add(&coat, Size::M))
            .reduce(&add(&coat, Size::M));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.lines()[0].quantity.get(), 2);
    }

    #[test]
    fn test_add_different_size_is_separate_line() {
        let coat = trench_coat();
        let cart = Cart::new()
            .reduce(&add(&coat, Size::M))
            .reduce(&add(&coat, Size::L));
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.lines()[1].size, Size::L);
    }

    #[test]
    fn test_add_is_order_independent_for_same_key() {
        let coat = trench_coat();
        let hoodie = hoodie();

        let interleaved = Cart::new()
            .reduce(&add(&coat, Size::M))
            .reduce(&add(&hoodie, Size::S))
            .reduce(&add(&coat, Size::M));
        let grouped = Cart::new()
            .reduce(&add(&coat, Size::M))
            .reduce(&add(&coat, Size::M))
            .reduce(&add(&hoodie, Size::S));

        assert_eq!(interleaved, grouped);
        let key = LineKey::new(coat.id, Size::M);
        assert_eq!(interleaved.get(key).unwrap().quantity.get(), 2);
    }

    #[test]
    fn test_add_preserves_existing_order() {
        let coat = trench_coat();
        let hoodie = hoodie();
        let cart = Cart::new()
            .reduce(&add(&coat, Size::M))
            .reduce(&add(&hoodie, Size::S))
            .reduce(&add(&coat, Size::M));
        let ids: Vec<i32> = cart.lines().iter().map(|l| l.product_id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_add_snapshots_price() {
        let mut coat = trench_coat();
        let cart = Cart::new().reduce(&add(&coat, Size::M));

        coat.price = Price::from_minor(99_999);
        let cart = cart.reduce(&add(&coat, Size::M));

        assert_eq!(cart.lines()[0].price, Price::from_minor(12_499));
        assert_eq!(cart.total(), Price::from_minor(24_998));
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let cart = Cart::new()
            .reduce(&add(&trench_coat(), Size::M))
            .reduce(&update(1, Size::M, 5));
        assert_eq!(cart.lines()[0].quantity.get(), 5);
    }

    #[test]
    fn test_update_quantity_clamps_to_one() {
        for requested in [0, -1, -100, i64::MIN] {
            let cart = Cart::new()
                .reduce(&add(&trench_coat(), Size::M))
                .reduce(&update(1, Size::M, requested));
            assert_eq!(cart.lines()[0].quantity, Quantity::ONE);
            assert_eq!(cart.item_count(), 1);
        }
    }

    #[test]
    fn test_update_quantity_absent_key_is_noop() {
        let cart = Cart::new().reduce(&add(&trench_coat(), Size::M));
        let next = cart.clone().reduce(&update(1, Size::L, 4));
        assert_eq!(next, cart);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let cart = Cart::new()
            .reduce(&add(&trench_coat(), Size::M))
            .reduce(&add(&hoodie(), Size::S));
        let once = cart.reduce(&remove(1, Size::M));
        let twice = once.clone().reduce(&remove(1, Size::M));
        assert_eq!(once, twice);
        assert_eq!(once.item_count(), 1);
        assert_eq!(once.lines()[0].product_id, ProductId::new(3));
    }

    #[test]
    fn test_clear() {
        let cart = Cart::new()
            .reduce(&add(&trench_coat(), Size::M))
            .reduce(&CartAction::Clear);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_action_is_noop() {
        let cart = Cart::new().reduce(&add(&trench_coat(), Size::M));
        assert_eq!(cart.clone().reduce(&CartAction::Unknown), cart);
    }

    #[test]
    fn test_scenario_add_add_clamp_remove() {
        let coat = trench_coat();

        let cart = Cart::new().reduce(&add(&coat, Size::M));
        assert_eq!(cart.total(), Price::from_minor(12_499));

        let cart = cart.reduce(&add(&coat, Size::M));
        assert_eq!(cart.lines()[0].quantity.get(), 2);
        assert_eq!(cart.total(), Price::from_minor(24_998));

        let cart = cart.reduce(&update(1, Size::M, 0));
        assert_eq!(cart.lines()[0].quantity.get(), 1);
        assert_eq!(cart.total(), Price::from_minor(12_499));

        let cart = cart.reduce(&remove(1, Size::M));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_item_count_counts_lines_not_units() {
        let coat = trench_coat();
        let cart = Cart::new()
            .reduce(&add(&coat, Size::M))
            .reduce(&update(1, Size::M, 7))
            .reduce(&add(&hoodie(), Size::L));
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 8);
        assert_eq!(cart.total(), Price::from_minor(12_499 * 7 + 3_499));
    }

    #[test]
    fn test_action_wire_format() {
        let json = r#"{"type":"UPDATE_QTY","product_id":1,"size":"M","quantity":-2}"#;
        let action: CartAction = serde_json::from_str(json).unwrap();
        assert_eq!(action, update(1, Size::M, -2));

        let clear: CartAction = serde_json::from_str(r#"{"type":"CLEAR_CART"}"#).unwrap();
        assert_eq!(clear, CartAction::Clear);
    }

    #[test]
    fn test_unrecognized_action_tag_parses_as_unknown() {
        let action: CartAction =
            serde_json::from_str(r#"{"type":"APPLY_COUPON","code":"SPRING"}"#).unwrap();
        assert_eq!(action, CartAction::Unknown);
    }

    #[test]
    fn test_cart_serializes_as_array() {
        let cart = Cart::new().reduce(&add(&trench_coat(), Size::M));
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["qty"], 1);
        assert_eq!(json[0]["size"], "M");
        assert_eq!(json[0]["img"], "coat.jpg");
    }

    #[test]
    fn test_deserialize_rejects_duplicate_keys() {
        let json = r#"[
            {"id":1,"name":"Trench Coat","price":12499,"img":"coat.jpg","size":"M","qty":1},
            {"id":1,"name":"Trench Coat","price":12499,"img":"coat.jpg","size":"M","qty":2}
        ]"#;
        let err = serde_json::from_str::<Cart>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate cart line"));
    }

    #[test]
    fn test_try_from_allows_same_product_in_different_sizes() {
        let coat = trench_coat();
        let lines = vec![
            LineItem::from_product(&coat, Size::S),
            LineItem::from_product(&coat, Size::L),
        ];
        let cart = Cart::try_from(lines).unwrap();
        assert_eq!(cart.item_count(), 2);
    }
}
