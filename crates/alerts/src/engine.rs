use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockbook_catalog::{Catalog, Product, SalesHistory};
use stockbook_core::ProductId;

/// Alert severity; declaration order doubles as output priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// Recognized alert thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Stockout horizon (days) at or below which an alert is critical.
    pub critical_days: f64,
    /// Stockout horizon (days) at or below which an alert is a warning.
    pub warning_days: f64,
    /// Fallback reorder point for products that carry none (reorder point 0).
    pub default_reorder_point: Option<i64>,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical_days: 3.0,
            warning_days: 7.0,
            default_reorder_point: None,
        }
    }
}

/// A derived reorder alert. Recomputed on demand, never persisted as
/// authoritative state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub reorder_point: i64,
    pub severity: Severity,
    /// `None` when the sales rate is zero/undefined ("unknown").
    pub days_until_stockout: Option<f64>,
    pub avg_daily_sales: f64,
}

fn effective_reorder_point(product: &Product, thresholds: &AlertThresholds) -> i64 {
    if product.reorder_point == 0 {
        thresholds.default_reorder_point.unwrap_or(0)
    } else {
        product.reorder_point
    }
}

fn classify(
    product: &Product,
    reorder_point: i64,
    days_until_stockout: Option<f64>,
    thresholds: &AlertThresholds,
) -> Option<Severity> {
    if product.quantity <= 0 {
        return Some(Severity::Critical);
    }
    if product.quantity > reorder_point {
        return None;
    }
    match days_until_stockout {
        Some(days) if days <= thresholds.critical_days => Some(Severity::Critical),
        Some(days) if days <= thresholds.warning_days => Some(Severity::Warning),
        _ => Some(Severity::Info),
    }
}

/// Classify every product at or below its reorder point, ordered by severity,
/// then ascending days-until-stockout (unknown last), then product id.
pub fn stock_alerts(
    catalog: &Catalog,
    thresholds: &AlertThresholds,
    sales: &SalesHistory,
    as_of: NaiveDate,
) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = catalog
        .products()
        .filter_map(|product| {
            let reorder_point = effective_reorder_point(product, thresholds);
            let avg_daily_sales = sales.average_daily_sales(&product.id, as_of);
            let days_until_stockout = (avg_daily_sales > 0.0)
                .then(|| (product.quantity.max(0) as f64 / avg_daily_sales).max(0.0));

            let severity = classify(product, reorder_point, days_until_stockout, thresholds)?;
            Some(Alert {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                quantity: product.quantity,
                reorder_point,
                severity,
                days_until_stockout,
                avg_daily_sales,
            })
        })
        .collect();

    alerts.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| cmp_days(a.days_until_stockout, b.days_until_stockout))
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    alerts
}

fn cmp_days(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
