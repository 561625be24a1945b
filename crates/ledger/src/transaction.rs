use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{InventoryError, InventoryResult, ProductId};

/// Closed set of stock movement kinds.
///
/// Purchase, sale and return carry a positive magnitude; adjustment carries an
/// explicit signed delta (the reconciler emits negative adjustments for
/// shortages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum StockMovement {
    Purchase { quantity: u64 },
    Sale { quantity: u64 },
    Return { quantity: u64 },
    Adjustment { delta: i64 },
}

impl StockMovement {
    /// Signed effect of this movement on a product quantity.
    pub fn effect(&self) -> i64 {
        match *self {
            StockMovement::Purchase { quantity } | StockMovement::Return { quantity } => {
                quantity as i64
            }
            StockMovement::Sale { quantity } => -(quantity as i64),
            StockMovement::Adjustment { delta } => delta,
        }
    }

    /// Boundary validation: a zero-magnitude movement is malformed input and
    /// fatal to the whole batch, per the propagation policy.
    pub fn validate(&self) -> InventoryResult<()> {
        match *self {
            StockMovement::Purchase { quantity }
            | StockMovement::Sale { quantity }
            | StockMovement::Return { quantity } => {
                if quantity == 0 {
                    return Err(InventoryError::validation(
                        "movement quantity must be positive",
                    ));
                }
                if quantity > i64::MAX as u64 {
                    return Err(InventoryError::validation(
                        "movement quantity exceeds representable stock",
                    ));
                }
            }
            StockMovement::Adjustment { delta } => {
                if delta == 0 {
                    return Err(InventoryError::validation(
                        "adjustment delta cannot be zero",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// One stock-affecting event. Immutable once recorded; owned by the audit log
/// after processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub movement: StockMovement,
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        product_id: impl Into<ProductId>,
        movement: StockMovement,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            movement,
            occurred_at,
        }
    }
}
