//! Studio Core - Shared types library.
//!
//! This crate provides the domain types used by the studio storefront:
//! - `storefront` - Cart store, storage adapters, and the session facade
//! - `integration-tests` - Cross-crate scenarios
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! timers, no storage access. This keeps the cart state machine and the
//! catalog filter deterministic and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, sizes, quantities, and products
//! - [`cart`] - Cart lines and the `(cart, action) -> cart` reducer
//! - [`catalog`] - Static catalog and the category/search filter

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartAction, CartError, LineItem, LineKey};
pub use catalog::{ALL_CATEGORIES, Catalog, CategoryFilter};
pub use types::*;
