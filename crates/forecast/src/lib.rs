//! `stockbook-forecast` — restock timing prediction.
//!
//! Fixed moving-average model over the shared 30-day sales window: safety
//! stock covers expected consumption during the replenishment lead time, and
//! the restock date is when stock is predicted to fall to that level.

pub mod restock;

pub use restock::{forecast_restock_date, RestockForecast};
