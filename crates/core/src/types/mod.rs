//! Core types for the studio storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod quantity;
pub mod size;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use quantity::{Quantity, QuantityError};
pub use size::{Size, SizeError};
