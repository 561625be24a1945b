//! Atomic batch application over a working-copy snapshot.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use stockbook_catalog::Catalog;
use stockbook_core::{BatchId, InventoryError, InventoryResult};

use crate::transaction::Transaction;

/// Outcome of one transaction within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "UPPERCASE")]
pub enum TxOutcome {
    Applied { resulting_quantity: i64 },
    Rejected { reason: InventoryError },
}

impl TxOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TxOutcome::Applied { .. })
    }
}

/// One audit-log line: the transaction as submitted plus its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub transaction: Transaction,
    #[serde(flatten)]
    pub outcome: TxOutcome,
}

/// Ordered audit log for one processed batch (entry order = input order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    pub batch_id: BatchId,
    pub entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn applied(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_applied()).count()
    }

    pub fn rejected(&self) -> usize {
        self.entries.len() - self.applied()
    }
}

/// Apply an ordered batch of transactions to a catalog snapshot.
///
/// The input snapshot is never mutated: the batch runs against a working copy
/// and the new snapshot is returned only after every transaction has been
/// evaluated, so no reader observes an intermediate state. Transactions that
/// reference an unknown product or would drive a quantity negative are
/// rejected individually and recorded in the audit log; the rest of the batch
/// still applies.
///
/// `batch_id` labels the resulting audit log; callers mint it (typically
/// `BatchId::new()`) and pass it in, keeping the function pure — identical
/// inputs produce identical snapshots *and* identical audit logs.
///
/// Returns `Err` only for malformed boundary input (zero-magnitude
/// movements); record-level failures never abort the batch.
pub fn apply_batch(
    catalog: &Catalog,
    batch: &[Transaction],
    batch_id: BatchId,
) -> InventoryResult<(Catalog, AuditLog)> {
    for tx in batch {
        tx.movement.validate()?;
    }

    let mut working = catalog.clone();
    let mut entries = Vec::with_capacity(batch.len());

    for tx in batch {
        let outcome = match working.get_mut(&tx.product_id) {
            None => {
                warn!(batch_id = %batch_id, product_id = %tx.product_id, "unknown product in batch");
                TxOutcome::Rejected {
                    reason: InventoryError::UnknownProduct(tx.product_id.clone()),
                }
            }
            Some(product) => {
                let delta = tx.movement.effect();
                match product.quantity.checked_add(delta) {
                    Some(next) if next >= 0 => {
                        product.quantity = next;
                        TxOutcome::Applied {
                            resulting_quantity: next,
                        }
                    }
                    _ => {
                        debug!(
                            batch_id = %batch_id,
                            product_id = %tx.product_id,
                            quantity = product.quantity,
                            delta,
                            "movement would drive stock negative"
                        );
                        TxOutcome::Rejected {
                            reason: InventoryError::NegativeStockViolation {
                                product_id: tx.product_id.clone(),
                                quantity: product.quantity,
                                delta,
                            },
                        }
                    }
                }
            }
        };

        entries.push(AuditEntry {
            transaction: tx.clone(),
            outcome,
        });
    }

    let log = AuditLog { batch_id, entries };
    debug!(
        batch_id = %batch_id,
        applied = log.applied(),
        rejected = log.rejected(),
        "batch evaluated, publishing snapshot"
    );
    Ok((working, log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::StockMovement;
    use chrono::{TimeZone, Utc};
    use stockbook_catalog::Product;
    use stockbook_core::ProductId;

    fn ts(secs: i64) -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_730_000_000 + secs, 0).unwrap()
    }

    fn catalog_with_sku001(quantity: i64) -> Catalog {
        [Product::new("SKU001", "Product A")
            .with_quantity(quantity)
            .with_reorder_point(50)
            .with_lead_time_days(7)]
        .into_iter()
        .collect()
    }

    #[test]
    fn sale_then_purchase_applies_in_input_order() {
        let catalog = catalog_with_sku001(150);
        let batch = vec![
            Transaction::new("SKU001", StockMovement::Sale { quantity: 10 }, ts(0)),
            Transaction::new("SKU001", StockMovement::Purchase { quantity: 100 }, ts(1)),
        ];

        let (next, log) = apply_batch(&catalog, &batch, BatchId::new()).unwrap();

        assert_eq!(next.get(&ProductId::new("SKU001")).unwrap().quantity, 240);
        assert_eq!(log.entries.len(), 2);
        assert_eq!(
            log.entries[0].outcome,
            TxOutcome::Applied {
                resulting_quantity: 140
            }
        );
        assert_eq!(
            log.entries[1].outcome,
            TxOutcome::Applied {
                resulting_quantity: 240
            }
        );
    }

    #[test]
    fn oversell_is_rejected_and_stock_unchanged() {
        let catalog = catalog_with_sku001(5);
        let batch = vec![Transaction::new(
            "SKU001",
            StockMovement::Sale { quantity: 10 },
            ts(0),
        )];

        let (next, log) = apply_batch(&catalog, &batch, BatchId::new()).unwrap();

        assert_eq!(next.get(&ProductId::new("SKU001")).unwrap().quantity, 5);
        match &log.entries[0].outcome {
            TxOutcome::Rejected {
                reason: InventoryError::NegativeStockViolation { quantity, delta, .. },
            } => {
                assert_eq!(*quantity, 5);
                assert_eq!(*delta, -10);
            }
            other => panic!("expected NegativeStockViolation, got {other:?}"),
        }
    }

    #[test]
    fn unknown_product_rejects_one_transaction_not_the_batch() {
        let catalog = catalog_with_sku001(100);
        let batch = vec![
            Transaction::new("SKU404", StockMovement::Purchase { quantity: 1 }, ts(0)),
            Transaction::new("SKU001", StockMovement::Sale { quantity: 20 }, ts(1)),
        ];

        let (next, log) = apply_batch(&catalog, &batch, BatchId::new()).unwrap();

        assert_eq!(next.get(&ProductId::new("SKU001")).unwrap().quantity, 80);
        assert_eq!(log.applied(), 1);
        assert_eq!(log.rejected(), 1);
        assert_eq!(
            log.entries[0].outcome,
            TxOutcome::Rejected {
                reason: InventoryError::UnknownProduct(ProductId::new("SKU404"))
            }
        );
    }

    #[test]
    fn rejected_transaction_does_not_leak_into_later_balances() {
        // A rejected oversell must leave the working copy untouched for the
        // transactions that follow it.
        let catalog = catalog_with_sku001(5);
        let batch = vec![
            Transaction::new("SKU001", StockMovement::Sale { quantity: 10 }, ts(0)),
            Transaction::new("SKU001", StockMovement::Purchase { quantity: 7 }, ts(1)),
        ];

        let (next, log) = apply_batch(&catalog, &batch, BatchId::new()).unwrap();

        assert_eq!(next.get(&ProductId::new("SKU001")).unwrap().quantity, 12);
        assert!(!log.entries[0].outcome.is_applied());
        assert_eq!(
            log.entries[1].outcome,
            TxOutcome::Applied {
                resulting_quantity: 12
            }
        );
    }

    #[test]
    fn signed_adjustments_apply_in_both_directions() {
        let catalog = catalog_with_sku001(50);
        let batch = vec![
            Transaction::new("SKU001", StockMovement::Adjustment { delta: -20 }, ts(0)),
            Transaction::new("SKU001", StockMovement::Adjustment { delta: 3 }, ts(1)),
        ];

        let (next, log) = apply_batch(&catalog, &batch, BatchId::new()).unwrap();
        assert_eq!(next.get(&ProductId::new("SKU001")).unwrap().quantity, 33);
        assert_eq!(log.applied(), 2);
    }

    #[test]
    fn zero_magnitude_movement_is_fatal_to_the_call() {
        let catalog = catalog_with_sku001(50);
        let batch = vec![
            Transaction::new("SKU001", StockMovement::Sale { quantity: 0 }, ts(0)),
            Transaction::new("SKU001", StockMovement::Purchase { quantity: 5 }, ts(1)),
        ];

        let err = apply_batch(&catalog, &batch, BatchId::new()).unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
    }

    #[test]
    fn input_snapshot_is_never_mutated() {
        let catalog = catalog_with_sku001(150);
        let before = catalog.clone();
        let batch = vec![Transaction::new(
            "SKU001",
            StockMovement::Sale { quantity: 150 },
            ts(0),
        )];

        let _ = apply_batch(&catalog, &batch, BatchId::new()).unwrap();
        assert_eq!(catalog, before);
    }

    #[test]
    fn identical_inputs_produce_identical_snapshot_and_audit_log() {
        let catalog = catalog_with_sku001(150);
        let batch = vec![
            Transaction::new("SKU001", StockMovement::Sale { quantity: 10 }, ts(0)),
            Transaction::new("SKU404", StockMovement::Purchase { quantity: 1 }, ts(1)),
        ];
        let batch_id = BatchId::new();

        let (first_catalog, first_log) = apply_batch(&catalog, &batch, batch_id).unwrap();
        let (second_catalog, second_log) = apply_batch(&catalog, &batch, batch_id).unwrap();

        assert_eq!(first_catalog, second_catalog);
        assert_eq!(first_log, second_log);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_movement() -> impl Strategy<Value = StockMovement> {
            prop_oneof![
                (1u64..500).prop_map(|quantity| StockMovement::Purchase { quantity }),
                (1u64..500).prop_map(|quantity| StockMovement::Sale { quantity }),
                (1u64..500).prop_map(|quantity| StockMovement::Return { quantity }),
                (-500i64..500)
                    .prop_filter("non-zero", |d| *d != 0)
                    .prop_map(|delta| StockMovement::Adjustment { delta }),
            ]
        }

        fn arb_batch() -> impl Strategy<Value = Vec<Transaction>> {
            prop::collection::vec(
                (prop_oneof![Just("SKU001"), Just("SKU002"), Just("SKU404")], arb_movement()),
                0..40,
            )
            .prop_map(|moves| {
                moves
                    .into_iter()
                    .map(|(sku, movement)| Transaction::new(sku, movement, ts(0)))
                    .collect()
            })
        }

        fn arb_catalog() -> impl Strategy<Value = Catalog> {
            (0i64..1000, 0i64..1000).prop_map(|(a, b)| {
                [
                    Product::new("SKU001", "Product A").with_quantity(a),
                    Product::new("SKU002", "Product B").with_quantity(b),
                ]
                .into_iter()
                .collect()
            })
        }

        proptest! {
            /// Every published snapshot keeps all quantities non-negative.
            #[test]
            fn quantities_stay_non_negative(catalog in arb_catalog(), batch in arb_batch()) {
                let (next, _) = apply_batch(&catalog, &batch, BatchId::new()).unwrap();
                for product in next.products() {
                    prop_assert!(product.quantity >= 0);
                }
            }

            /// The input snapshot is immutable regardless of the batch.
            #[test]
            fn input_catalog_unchanged(catalog in arb_catalog(), batch in arb_batch()) {
                let before = catalog.clone();
                let _ = apply_batch(&catalog, &batch, BatchId::new()).unwrap();
                prop_assert_eq!(catalog, before);
            }

            /// Replaying the applied entries alone reproduces the snapshot:
            /// the audit log is a faithful account of what changed.
            #[test]
            fn applied_entries_replay_to_same_snapshot(catalog in arb_catalog(), batch in arb_batch()) {
                let (next, log) = apply_batch(&catalog, &batch, BatchId::new()).unwrap();
                let applied: Vec<Transaction> = log
                    .entries
                    .iter()
                    .filter(|e| e.outcome.is_applied())
                    .map(|e| e.transaction.clone())
                    .collect();
                let (replayed, replay_log) = apply_batch(&catalog, &applied, BatchId::new()).unwrap();
                prop_assert_eq!(replay_log.rejected(), 0);
                prop_assert_eq!(replayed, next);
            }
        }
    }
}
