//! `stockbook-core` — shared foundation for the inventory engine.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers and the engine-wide error taxonomy.

pub mod error;
pub mod id;

pub use error::{InventoryError, InventoryResult};
pub use id::{BatchId, ProductId, ZoneId};
