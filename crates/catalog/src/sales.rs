//! Per-product sales history and the shared moving-average sales rate.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use stockbook_core::ProductId;

/// Length of the trailing window used for average daily sales, shared by the
/// alert engine, the forecaster and the layout optimizer's default turnover
/// period. Days with no recorded entry count as zero sales; the window length
/// is fixed regardless of how sparse the history is.
pub const SALES_WINDOW_DAYS: u32 = 30;

/// One day's recorded sales for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub units: u64,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, units: u64) -> Self {
        Self { date, units }
    }
}

/// Append-only sales history, supplied externally and never mutated by the
/// engine. Entries per product are kept in date order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalesHistory {
    entries: BTreeMap<ProductId, Vec<SalesRecord>>,
}

impl SalesHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, product_id: impl Into<ProductId>, entry: SalesRecord) {
        let records = self.entries.entry(product_id.into()).or_default();
        let at = records.partition_point(|r| r.date <= entry.date);
        records.insert(at, entry);
    }

    pub fn records(&self, product_id: &ProductId) -> &[SalesRecord] {
        self.entries
            .get(product_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total units sold in the `window_days`-long window ending at `as_of`
    /// (inclusive).
    pub fn units_in_window(&self, product_id: &ProductId, as_of: NaiveDate, window_days: u32) -> u64 {
        let cutoff = as_of.checked_sub_days(Days::new(u64::from(window_days)));
        self.records(product_id)
            .iter()
            .filter(|r| r.date <= as_of && cutoff.is_none_or(|c| r.date >= c))
            .map(|r| r.units)
            .sum()
    }

    /// Average daily sales over the fixed trailing [`SALES_WINDOW_DAYS`]
    /// window. Missing days count as zero: the divisor is always the full
    /// window length.
    pub fn average_daily_sales(&self, product_id: &ProductId, as_of: NaiveDate) -> f64 {
        let sold = self.units_in_window(product_id, as_of, SALES_WINDOW_DAYS);
        sold as f64 / f64::from(SALES_WINDOW_DAYS)
    }
}

impl FromIterator<(ProductId, SalesRecord)> for SalesHistory {
    fn from_iter<T: IntoIterator<Item = (ProductId, SalesRecord)>>(iter: T) -> Self {
        let mut history = SalesHistory::new();
        for (id, entry) in iter {
            history.record(id, entry);
        }
        history
    }
}
