//! Storefront session: the action surface the presentation layer calls.
//!
//! [`Storefront`] ties the static [`Catalog`], the [`CartStore`], the
//! transient UI state (category tab, search box, quick view, cart drawer) and
//! the [`Toast`] together. Every action is synchronous and returns the
//! freshly derived [`StorefrontView`].

use std::sync::Arc;
use std::time::Duration;

use studio_core::{Cart, CartAction, Catalog, CategoryFilter, LineKey, ProductId, Size};
use tracing::{info, instrument, warn};

use crate::error::{Result, StorefrontError};
use crate::events::UiEvent;
use crate::storage::CartStorage;
use crate::store::CartStore;
use crate::toast::{DEFAULT_TOAST_DURATION, Toast};
use crate::view::{CartView, StorefrontView};

/// Transient page state with no business rules of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub active_category: CategoryFilter,
    pub search_query: String,
    /// Product open in the quick-view modal.
    pub selected_product: Option<ProductId>,
    /// Size chosen in the quick-view picker.
    pub selected_size: Size,
    /// Cart drawer open.
    pub cart_open: bool,
}

/// One shopper's storefront session.
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: Arc<Catalog>,
    store: CartStore<S>,
    ui: UiState,
    toast: Toast,
}

impl<S: CartStorage> Storefront<S> {
    /// Open a session, hydrating the cart from `storage`.
    pub fn new(catalog: Arc<Catalog>, storage: S) -> Self {
        Self::with_toast_duration(catalog, storage, DEFAULT_TOAST_DURATION)
    }

    /// Open a session with a custom toast duration.
    pub fn with_toast_duration(catalog: Arc<Catalog>, storage: S, toast: Duration) -> Self {
        let store = CartStore::hydrate(storage);
        info!(
            products = catalog.products().len(),
            cart_lines = store.cart().item_count(),
            "Storefront session opened"
        );
        Self {
            catalog,
            store,
            ui: UiState::default(),
            toast: Toast::new(toast),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        self.store.cart()
    }

    /// Underlying cart store, e.g. to subscribe to cart changes.
    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Derive the current view.
    #[must_use]
    pub fn view(&self) -> StorefrontView {
        let currency = self.catalog.currency();
        StorefrontView {
            products: self
                .catalog
                .filter(&self.ui.active_category, &self.ui.search_query)
                .into_iter()
                .cloned()
                .collect(),
            categories: self.catalog.categories(),
            active_category: self.ui.active_category.clone(),
            search_query: self.ui.search_query.clone(),
            cart: CartView::new(self.store.cart(), currency),
            selected_product: self
                .ui
                .selected_product
                .and_then(|id| self.catalog.get(id))
                .cloned(),
            selected_size: self.ui.selected_size,
            cart_open: self.ui.cart_open,
            toast_visible: self.toast.is_visible(),
        }
    }

    /// Add one unit of a catalog product and show the toast.
    ///
    /// Unknown product IDs are ignored.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, product_id: ProductId, size: Size) -> StorefrontView {
        let Some(product) = self.catalog.get(product_id).cloned() else {
            warn!("Ignoring add for product not in catalog");
            return self.view();
        };
        self.store.dispatch(&CartAction::Add { product, size });
        self.toast.show();
        self.view()
    }

    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, product_id: ProductId, size: Size) -> StorefrontView {
        self.store.dispatch(&CartAction::Remove { product_id, size });
        self.view()
    }

    /// Set a line's quantity; values below 1 clamp to 1.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        size: Size,
        quantity: i64,
    ) -> StorefrontView {
        self.store.dispatch(&CartAction::UpdateQuantity {
            product_id,
            size,
            quantity,
        });
        self.view()
    }

    pub fn increment(&mut self, product_id: ProductId, size: Size) -> StorefrontView {
        self.step_quantity(product_id, size, 1)
    }

    /// Never drops a line below one unit; use [`Self::remove_from_cart`].
    pub fn decrement(&mut self, product_id: ProductId, size: Size) -> StorefrontView {
        self.step_quantity(product_id, size, -1)
    }

    fn step_quantity(&mut self, product_id: ProductId, size: Size, delta: i64) -> StorefrontView {
        let current = self
            .store
            .cart()
            .get(LineKey::new(product_id, size))
            .map(|line| i64::from(line.quantity.get()));
        match current {
            Some(quantity) => self.update_quantity(product_id, size, quantity.saturating_add(delta)),
            None => self.view(),
        }
    }

    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> StorefrontView {
        self.store.dispatch(&CartAction::Clear);
        self.view()
    }

    /// Switch category tab; `"All"` shows every category.
    pub fn set_category(&mut self, name: &str) -> StorefrontView {
        self.ui.active_category = CategoryFilter::from(name);
        self.view()
    }

    pub fn set_search_query(&mut self, text: &str) -> StorefrontView {
        text.clone_into(&mut self.ui.search_query);
        self.view()
    }

    /// Open (or with `None`, close) the quick-view modal.
    ///
    /// Unknown product IDs are ignored.
    pub fn set_selected_product(&mut self, product_id: Option<ProductId>) -> StorefrontView {
        match product_id {
            Some(id) if self.catalog.get(id).is_none() => {
                warn!(product_id = %id, "Ignoring selection of product not in catalog");
            }
            selection => self.ui.selected_product = selection,
        }
        self.view()
    }

    pub fn select_size(&mut self, size: Size) -> StorefrontView {
        self.ui.selected_size = size;
        self.view()
    }

    /// Add the quick-view product in the chosen size, then close the modal.
    pub fn add_selected_to_cart(&mut self) -> StorefrontView {
        let Some(product_id) = self.ui.selected_product.take() else {
            return self.view();
        };
        self.add_to_cart(product_id, self.ui.selected_size)
    }

    pub fn open_cart(&mut self) -> StorefrontView {
        self.ui.cart_open = true;
        self.view()
    }

    pub fn close_cart(&mut self) -> StorefrontView {
        self.ui.cart_open = false;
        self.view()
    }

    pub fn dismiss_toast(&mut self) -> StorefrontView {
        self.toast.dismiss();
        self.view()
    }

    /// Checkout has no payment backend; the cart is left as is.
    ///
    /// # Errors
    ///
    /// Always returns `StorefrontError::CheckoutUnavailable`.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<StorefrontView> {
        info!(
            lines = self.store.cart().item_count(),
            total = self.store.cart().total().minor_units(),
            "Checkout requested"
        );
        Err(StorefrontError::CheckoutUnavailable)
    }

    /// Apply a [`UiEvent`].
    ///
    /// # Errors
    ///
    /// Only [`UiEvent::Checkout`] fails, see [`Self::checkout`].
    pub fn handle(&mut self, event: UiEvent) -> Result<StorefrontView> {
        let view = match event {
            UiEvent::AddToCart { product_id, size } => self.add_to_cart(product_id, size),
            UiEvent::RemoveFromCart { product_id, size } => self.remove_from_cart(product_id, size),
            UiEvent::UpdateQuantity {
                product_id,
                size,
                quantity,
            } => self.update_quantity(product_id, size, quantity),
            UiEvent::Increment { product_id, size } => self.increment(product_id, size),
            UiEvent::Decrement { product_id, size } => self.decrement(product_id, size),
            UiEvent::ClearCart => self.clear_cart(),
            UiEvent::SetCategory { name } => self.set_category(&name),
            UiEvent::SetSearchQuery { text } => self.set_search_query(&text),
            UiEvent::SetSelectedProduct { product_id } => self.set_selected_product(product_id),
            UiEvent::SelectSize { size } => self.select_size(size),
            UiEvent::AddSelectedToCart => self.add_selected_to_cart(),
            UiEvent::OpenCart => self.open_cart(),
            UiEvent::CloseCart => self.close_cart(),
            UiEvent::DismissToast => self.dismiss_toast(),
            UiEvent::Checkout => return self.checkout(),
            UiEvent::Render => self.view(),
            UiEvent::Unknown => {
                warn!("Ignoring unknown UI event");
                self.view()
            }
        };
        Ok(view)
    }
}
