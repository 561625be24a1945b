//! `stockbook-reconcile` — physical count reconciliation.
//!
//! Compares a catalog snapshot against a physical count, emits discrepancy
//! records with explicit (never NaN) variance values, and produces corrective
//! adjustment transactions for the transaction processor.

pub mod count;
pub mod report;

pub use count::PhysicalCount;
pub use report::{reconcile_inventory, Classification, DiscrepancyRecord, Reconciliation, Variance};
