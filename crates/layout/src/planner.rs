use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockbook_catalog::{Catalog, SalesHistory, Zone};
use stockbook_core::{InventoryError, InventoryResult, ProductId, ZoneId};

/// One product's placement with its distance score
/// (turnover rate x zone accessibility rank).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAssignment {
    pub zone_id: ZoneId,
    pub distance_score: f64,
}

/// Complete zone assignment for a catalog, derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub assignments: BTreeMap<ProductId, ZoneAssignment>,
    /// Sum of all distance scores; the quantity the greedy pass minimizes.
    pub total_distance_score: f64,
}

/// Assign products to zones, minimizing distance-weighted turnover cost.
///
/// Turnover rate = units sold in the `period_days` window ending at `as_of`,
/// divided by `period_days`. Products are taken in descending turnover order
/// (ties broken by ascending product id), zones in ascending accessibility
/// rank (ties by ascending zone id), and each product goes to the most
/// accessible zone with a free slot. Deterministic for identical inputs.
///
/// Fails with `InsufficientCapacity` when the zones cannot hold every
/// product; no partial mapping is returned.
pub fn optimize_layout(
    catalog: &Catalog,
    sales: &SalesHistory,
    zones: &[Zone],
    period_days: u32,
    as_of: NaiveDate,
) -> InventoryResult<LayoutPlan> {
    if period_days == 0 {
        return Err(InventoryError::validation(
            "turnover reference period must be at least one day",
        ));
    }

    let capacity: usize = zones.iter().map(|z| z.capacity).sum();
    if capacity < catalog.len() {
        return Err(InventoryError::InsufficientCapacity {
            products: catalog.len(),
            capacity,
        });
    }

    let mut ranked: Vec<(&ProductId, f64)> = catalog
        .ids()
        .map(|id| {
            let turnover =
                sales.units_in_window(id, as_of, period_days) as f64 / f64::from(period_days);
            (id, turnover)
        })
        .collect();
    ranked.sort_by(|(a_id, a_rate), (b_id, b_rate)| {
        b_rate.total_cmp(a_rate).then_with(|| a_id.cmp(b_id))
    });

    let mut ordered_zones: Vec<&Zone> = zones.iter().collect();
    ordered_zones.sort_by(|a, b| {
        a.accessibility_rank
            .cmp(&b.accessibility_rank)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut assignments = BTreeMap::new();
    let mut total_distance_score = 0.0;
    let mut slots = ordered_zones.iter().flat_map(|zone| {
        std::iter::repeat_with(move || zone).take(zone.capacity)
    });

    for (product_id, turnover) in ranked {
        // Capacity was checked up front, so a slot always exists.
        let zone = slots
            .next()
            .ok_or_else(|| InventoryError::InsufficientCapacity {
                products: catalog.len(),
                capacity,
            })?;
        let distance_score = turnover * f64::from(zone.accessibility_rank);
        total_distance_score += distance_score;
        assignments.insert(
            product_id.clone(),
            ZoneAssignment {
                zone_id: zone.id.clone(),
                distance_score,
            },
        );
    }

    Ok(LayoutPlan {
        assignments,
        total_distance_score,
    })
}
