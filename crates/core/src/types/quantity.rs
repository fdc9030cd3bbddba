//! Line item quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Quantity`] from a raw value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is below the minimum of one.
    #[error("quantity must be at least 1")]
    Zero,
}

/// Number of units on a cart line.
///
/// ## Constraints
///
/// - Always at least 1. Values below 1 are clamped by [`Quantity::clamped`]
///   and rejected by deserialization.
/// - Arithmetic saturates at `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Clamp an arbitrary requested quantity into the valid range.
    ///
    /// ```
    /// use studio_core::Quantity;
    ///
    /// assert_eq!(Quantity::clamped(0).get(), 1);
    /// assert_eq!(Quantity::clamped(-3).get(), 1);
    /// assert_eq!(Quantity::clamped(5).get(), 5);
    /// ```
    #[must_use]
    pub fn clamped(requested: i64) -> Self {
        let bounded = requested.clamp(1, i64::from(u32::MAX));
        Self(u32::try_from(bounded).unwrap_or(u32::MAX))
    }

    /// The raw count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more unit, saturating.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            Err(QuantityError::Zero)
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
