use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use stockbook_catalog::Catalog;
use stockbook_core::{InventoryError, InventoryResult, ProductId};
use stockbook_ledger::{StockMovement, Transaction};

use crate::count::PhysicalCount;

/// Discrepancy classification for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Overage,
    Shortage,
    Match,
}

/// Signed variance percentage, or an explicit flag when the system baseline
/// is zero and no percentage is defined. Never NaN, never infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "variance", content = "pct")]
pub enum Variance {
    Percent(f64),
    Undefined,
}

impl Variance {
    /// The numeric percentage, or `DivisionUndefined` for the zero-baseline
    /// flag. Callers that need a number must handle the flag explicitly; it
    /// never decays to NaN or infinity.
    pub fn as_percent(&self) -> InventoryResult<f64> {
        match *self {
            Variance::Percent(pct) => Ok(pct),
            Variance::Undefined => Err(InventoryError::division_undefined(
                "variance against a zero system baseline",
            )),
        }
    }
}

/// One product's system-vs-physical comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscrepancyRecord {
    pub product_id: ProductId,
    pub system_quantity: i64,
    pub physical_quantity: i64,
    pub variance: Variance,
    pub classification: Classification,
    /// Present in the physical count but absent from system records.
    pub unregistered: bool,
}

impl DiscrepancyRecord {
    /// The anomaly this record flags, if any: `UnregisteredProduct` for
    /// counted-but-untracked stock.
    pub fn anomaly(&self) -> Option<InventoryError> {
        self.unregistered
            .then(|| InventoryError::UnregisteredProduct(self.product_id.clone()))
    }
}

/// Result of one reconciliation run. Always complete: every non-matching or
/// flagged product is enumerated, never dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Non-matching products (matches are counted, not listed).
    pub discrepancies: Vec<DiscrepancyRecord>,
    /// One signed adjustment per non-matching product, timestamped at the
    /// count instant, ready to feed back into the transaction processor.
    pub corrections: Vec<Transaction>,
    /// sum(|physical - system|) / sum(system) x 100 across all products.
    pub overall_variance: Variance,
    /// Products whose physical count equals the system quantity.
    pub matched: usize,
}

fn variance_for(system: i64, physical: i64) -> Variance {
    if system == 0 {
        if physical == 0 {
            Variance::Percent(0.0)
        } else {
            // Zero baseline: flagged explicitly rather than divided.
            Variance::Undefined
        }
    } else {
        Variance::Percent((physical - system) as f64 / system as f64 * 100.0)
    }
}

/// Compare system records against a physical count.
///
/// Walks the union of both inputs: a product the counters never saw is
/// treated as counted at zero, and a counted product absent from the catalog
/// is a shortage-class anomaly flagged `unregistered` with system quantity 0.
///
/// Returns `Err` only for malformed boundary input (negative physical
/// quantities).
pub fn reconcile_inventory(
    catalog: &Catalog,
    count: &PhysicalCount,
) -> InventoryResult<Reconciliation> {
    for (product_id, quantity) in count.iter() {
        if quantity < 0 {
            return Err(InventoryError::validation(format!(
                "negative physical quantity for {product_id}"
            )));
        }
    }

    let ids: BTreeSet<&ProductId> = catalog.ids().chain(count.iter().map(|(id, _)| id)).collect();

    let mut discrepancies = Vec::new();
    let mut corrections = Vec::new();
    let mut matched = 0usize;
    let mut total_system: i64 = 0;
    let mut total_abs_diff: i64 = 0;

    for id in ids {
        let registered = catalog.get(id);
        let system = registered.map_or(0, |p| p.quantity);
        let physical = count.get(id).unwrap_or(0);
        total_system += system;
        total_abs_diff += (physical - system).abs();

        if physical == system {
            matched += 1;
            continue;
        }

        let unregistered = registered.is_none();
        let classification = if unregistered {
            // Spec policy: counted-but-unregistered products are
            // shortage-class anomalies (system records are missing stock it
            // should be tracking), not overages.
            warn!(product_id = %id, physical, "physical count references unregistered product");
            Classification::Shortage
        } else if physical > system {
            Classification::Overage
        } else {
            Classification::Shortage
        };

        discrepancies.push(DiscrepancyRecord {
            product_id: id.clone(),
            system_quantity: system,
            physical_quantity: physical,
            variance: variance_for(system, physical),
            classification,
            unregistered,
        });

        corrections.push(Transaction::new(
            id.clone(),
            StockMovement::Adjustment {
                delta: physical - system,
            },
            count.counted_at,
        ));
    }

    let overall_variance = if total_system == 0 {
        if total_abs_diff == 0 {
            Variance::Percent(0.0)
        } else {
            Variance::Undefined
        }
    } else {
        Variance::Percent(total_abs_diff as f64 / total_system as f64 * 100.0)
    };

    debug!(
        discrepancies = discrepancies.len(),
        matched,
        ?overall_variance,
        "reconciliation complete"
    );

    Ok(Reconciliation {
        discrepancies,
        corrections,
        overall_variance,
        matched,
    })
}
