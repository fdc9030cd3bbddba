//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product in the static catalog.
///
/// Products are immutable for the lifetime of the process. Field names on
/// the wire match the storefront's original payload (`cat`, `img`, `desc`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in minor currency units.
    pub price: Price,
    #[serde(rename = "cat")]
    pub category: String,
    #[serde(rename = "img")]
    pub image_url: String,
    #[serde(rename = "desc", default)]
    pub description: String,
}

impl Product {
    /// Create a product.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        category: impl Into<String>,
        image_url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
            image_url: image_url.into(),
            description: description.into(),
        }
    }
}
