//! Serialized form of the cart record.
//!
//! The record is a JSON array of line items using the storefront's original
//! field names (`id`, `name`, `price`, `img`, `size`, `qty`). Extra fields
//! written by older clients (`cat`, `desc`) are ignored on read.

use studio_core::Cart;
use thiserror::Error;

/// Errors decoding a stored cart record.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The record is not a valid cart (bad JSON, zero quantity, duplicate line).
    #[error("malformed cart record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Encode a cart as its storage record.
#[must_use]
pub fn encode(cart: &Cart) -> String {
    // A cart is a Vec of plain structs with string keys; serialization cannot fail.
    serde_json::to_string(cart).unwrap_or_else(|_| String::from("[]"))
}

/// Decode a storage record.
///
/// An empty or whitespace-only record is an empty cart.
///
/// # Errors
///
/// Returns `CodecError::Malformed` if the record is not a valid cart.
pub fn decode(record: &str) -> Result<Cart, CodecError> {
    if record.trim().is_empty() {
        return Ok(Cart::new());
    }
    Ok(serde_json::from_str(record)?)
}
