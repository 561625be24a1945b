//! `stockbook-ledger` — the transaction processor.
//!
//! [`apply_batch`] evolves a [`stockbook_catalog::Catalog`] snapshot by an
//! ordered batch of stock movements and returns the new snapshot plus an
//! audit log. Failures local to one transaction (unknown product, would-be
//! negative stock) reject that transaction only; the rest of the batch still
//! applies.

pub mod processor;
pub mod transaction;

pub use processor::{apply_batch, AuditEntry, AuditLog, TxOutcome};
pub use transaction::{StockMovement, Transaction};
