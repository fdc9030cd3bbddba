//! Integration tests for the studio storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p studio-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Carts surviving restarts through file storage
//! - `storefront_session` - End-to-end shopper flows through `UiEvent`s
//!
//! The helpers below build sessions over a temporary storage directory.

use std::path::Path;
use std::sync::Arc;

use studio_core::Catalog;
use studio_storefront::{FileRecordStore, RecordCartStorage, Storefront};

/// Storefront backed by files in a directory.
pub type FileStorefront = Storefront<RecordCartStorage<FileRecordStore>>;

/// Cart storage over `dir` using the default record key.
#[must_use]
pub fn file_storage(dir: &Path) -> RecordCartStorage<FileRecordStore> {
    RecordCartStorage::new(FileRecordStore::new(dir))
}

/// Open a session over `dir` with the built-in catalog.
#[must_use]
pub fn open_session(dir: &Path) -> FileStorefront {
    Storefront::new(Arc::new(Catalog::studio()), file_storage(dir))
}
