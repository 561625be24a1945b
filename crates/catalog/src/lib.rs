//! `stockbook-catalog` — the authoritative in-memory inventory data model.
//!
//! A [`Catalog`] is an immutable snapshot: the transaction processor clones it,
//! applies a batch to the working copy, and publishes the result. Readers
//! (alerts, forecasting, layout planning) share one snapshot freely.

pub mod product;
pub mod sales;
pub mod zone;

pub use product::{Catalog, Product};
pub use sales::{SalesHistory, SalesRecord, SALES_WINDOW_DAYS};
pub use zone::Zone;
