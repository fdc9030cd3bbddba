//! UI events accepted by [`Storefront::handle`](crate::session::Storefront::handle).
//!
//! The serialized form is a JSON object tagged by `event`:
//!
//! ```json
//! {"event": "add_to_cart", "product_id": 1, "size": "M"}
//! {"event": "set_category", "name": "Pants"}
//! ```
//!
//! Tags this version does not recognize parse as [`UiEvent::Unknown`].

use serde::{Deserialize, Serialize};
use studio_core::{ProductId, Size};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    AddToCart {
        product_id: ProductId,
        #[serde(default)]
        size: Size,
    },
    RemoveFromCart {
        product_id: ProductId,
        size: Size,
    },
    UpdateQuantity {
        product_id: ProductId,
        size: Size,
        quantity: i64,
    },
    /// Drawer "+" button.
    Increment {
        product_id: ProductId,
        size: Size,
    },
    /// Drawer "-" button.
    Decrement {
        product_id: ProductId,
        size: Size,
    },
    ClearCart,
    SetCategory {
        name: String,
    },
    SetSearchQuery {
        text: String,
    },
    SetSelectedProduct {
        #[serde(default)]
        product_id: Option<ProductId>,
    },
    SelectSize {
        size: Size,
    },
    /// Quick-view "Add" button.
    AddSelectedToCart,
    OpenCart,
    CloseCart,
    DismissToast,
    Checkout,
    /// Re-render without changing anything.
    Render,
    #[serde(other)]
    Unknown,
}
