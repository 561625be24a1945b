use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::ProductId;

/// A physical count snapshot: what the counters actually found, and when.
///
/// Correction transactions are timestamped with `counted_at`, so callers
/// supply the reconciliation instant explicitly and the whole run stays pure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalCount {
    pub counted_at: DateTime<Utc>,
    quantities: BTreeMap<ProductId, i64>,
}

impl PhysicalCount {
    pub fn new(counted_at: DateTime<Utc>) -> Self {
        Self {
            counted_at,
            quantities: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, product_id: impl Into<ProductId>, quantity: i64) {
        self.quantities.insert(product_id.into(), quantity);
    }

    pub fn get(&self, product_id: &ProductId) -> Option<i64> {
        self.quantities.get(product_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, i64)> {
        self.quantities.iter().map(|(id, q)| (id, *q))
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}
