//! Engine error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the engine.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory engine error.
///
/// Errors local to one record (an unknown product in a batch, an uncounted SKU
/// in a physical count) are recovered into audit/discrepancy output by the
/// operations that hit them; only malformed boundary input fails a whole call.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryError {
    /// A referenced product identifier is absent from the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Applying the transaction would drive a quantity below zero.
    #[error("negative stock violation for {product_id}: quantity {quantity} with delta {delta}")]
    NegativeStockViolation {
        product_id: ProductId,
        quantity: i64,
        delta: i64,
    },

    /// A physical count references a product absent from system records.
    #[error("unregistered product in physical count: {0}")]
    UnregisteredProduct(ProductId),

    /// Total zone capacity cannot hold every product.
    #[error("insufficient zone capacity: {products} products for {capacity} slots")]
    InsufficientCapacity { products: usize, capacity: usize },

    /// A variance computed against a zero baseline (explicit flagged value,
    /// never a silent NaN or infinity).
    #[error("variance undefined: {0}")]
    DivisionUndefined(String),

    /// Malformed input at the call boundary (fatal to the whole call).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl InventoryError {
    pub fn division_undefined(msg: impl Into<String>) -> Self {
        Self::DivisionUndefined(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
