//! Studio Storefront library.
//!
//! This crate provides the storefront session as a library, allowing it to
//! be driven by any presentation layer and tested without one.
//!
//! # Modules
//!
//! - [`session`] - `Storefront`, the action surface and derived view
//! - [`store`] - `CartStore`, the state holder around the cart reducer
//! - [`storage`] - Storage port, record codec, memory and file adapters
//! - [`toast`] - One-shot "Added to Bag" timer
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod store;
pub mod toast;
pub mod view;

pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use events::UiEvent;
pub use session::{Storefront, UiState};
pub use storage::{CartStorage, FileRecordStore, MemoryRecordStore, RecordCartStorage};
pub use store::CartStore;
pub use view::{CartLineView, CartView, StorefrontView};
