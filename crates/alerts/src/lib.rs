//! `stockbook-alerts` — reorder urgency classification.
//!
//! A read-only consumer of a catalog snapshot plus sales history: classifies
//! each product at or below its reorder point by how soon it will stock out.

pub mod engine;

pub use engine::{stock_alerts, Alert, AlertThresholds, Severity};
