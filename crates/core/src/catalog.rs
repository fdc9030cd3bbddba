//! Static product catalog and the storefront's category/search filter.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, Product, ProductId};

/// Label of the category tab that shows every product.
pub const ALL_CATEGORIES: &str = "All";

/// Which category tab is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// A single named category (exact match).
    Only(String),
}

impl CategoryFilter {
    /// Whether `product` belongs to this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
        }
    }

    /// Tab label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(name: &str) -> Self {
        if name == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(name.to_owned())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(name: String) -> Self {
        if name == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(name)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => ALL_CATEGORIES.to_owned(),
            CategoryFilter::Only(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Products visible under `category` whose name contains `query`.
///
/// Name matching is case-insensitive and an empty query matches everything.
/// Source order is preserved.
#[must_use]
pub fn filter<'a>(
    products: &'a [Product],
    category: &CategoryFilter,
    query: &str,
) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| category.matches(product))
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .collect()
}

/// The immutable product collection the storefront sells from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    currency: CurrencyCode,
}

impl Catalog {
    /// Create a catalog priced in `currency`.
    #[must_use]
    pub const fn new(products: Vec<Product>, currency: CurrencyCode) -> Self {
        Self { products, currency }
    }

    /// The built-in menswear collection.
    #[must_use]
    pub fn studio() -> Self {
        let products = vec![
            Product::new(
                ProductId::new(1),
                "Trench Coat",
                Price::from_minor(12_499),
                "Outerwear",
                "https://images.unsplash.com/photo-1591047139829-d91aecb6caea?w=800",
                "Premium gabardine construction.",
            ),
            Product::new(
                ProductId::new(2),
                "Selvedge Denim",
                Price::from_minor(4_999),
                "Pants",
                "https://images.unsplash.com/photo-1725387072845-7431bbc453bc?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.1.0&ixid=M3wxMjA3fDB8MHxzZWFyY2h8M3x8U2VsdmVkZ2UlMjBEZW5pbXxlbnwwfHwwfHx8MA%3D%3D",
                "Japanese raw denim.",
            ),
            Product::new(
                ProductId::new(3),
                "Oversized Hoodie",
                Price::from_minor(3_499),
                "Basics",
                "https://images.unsplash.com/photo-1556821840-3a63f95609a7?w=800",
                "Heavyweight organic cotton.",
            ),
            Product::new(
                ProductId::new(4),
                "Linen Shirt",
                Price::from_minor(2_799),
                "Shirts",
                "https://images.unsplash.com/photo-1596755094514-f87e34085b2c?w=800",
                "Ethically sourced linen.",
            ),
        ];
        Self::new(products, CurrencyCode::INR)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Currency every price in this catalog is expressed in.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Category tab labels: "All" followed by each category in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut tabs = vec![ALL_CATEGORIES.to_owned()];
        for product in &self.products {
            if !tabs.contains(&product.category) {
                tabs.push(product.category.clone());
            }
        }
        tabs
    }

    /// See [`filter`].
    #[must_use]
    pub fn filter(&self, category: &CategoryFilter, query: &str) -> Vec<&Product> {
        filter(&self.products, category, query)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::studio()
    }
}
