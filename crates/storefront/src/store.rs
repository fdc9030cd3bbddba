//! Cart store: the mutable holder around the pure cart reducer.
//!
//! The store hydrates from a [`CartStorage`] port on construction, applies
//! every [`CartAction`] through [`Cart::reduce`], persists the result, and
//! publishes it to observers over a `tokio::sync::watch` channel.

use studio_core::{Cart, CartAction};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::storage::CartStorage;

/// Owns the current cart and keeps durable storage in step with it.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    cart: Cart,
    observers: watch::Sender<Cart>,
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store seeded from `storage`.
    ///
    /// Unreadable or malformed stored state yields an empty cart.
    pub fn hydrate(storage: S) -> Self {
        let cart = storage.load();
        let (observers, _) = watch::channel(cart.clone());
        Self {
            storage,
            cart,
            observers,
        }
    }

    /// Current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Storage port this store persists to.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Receive every cart this store settles on, starting with the current one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.observers.subscribe()
    }

    /// Apply `action`, persist, and notify observers.
    ///
    /// Actions that leave the cart unchanged are neither persisted nor
    /// published. A failed save is logged; the in-memory cart still advances.
    #[instrument(skip_all, fields(action = action.name()))]
    pub fn dispatch(&mut self, action: &CartAction) -> &Cart {
        let next = self.cart.clone().reduce(action);
        if next == self.cart {
            debug!("Cart unchanged");
            return &self.cart;
        }

        self.cart = next;
        if let Err(e) = self.storage.save(&self.cart) {
            warn!(error = %e, "Failed to persist cart");
        }
        self.observers.send_replace(self.cart.clone());

        debug!(
            lines = self.cart.item_count(),
            total = self.cart.total().minor_units(),
            "Cart updated"
        );
        &self.cart
    }
}
