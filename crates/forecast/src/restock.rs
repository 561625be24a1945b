use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use stockbook_catalog::{Catalog, SalesHistory};
use stockbook_core::{InventoryError, InventoryResult, ProductId};

/// Outcome of a restock forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "forecast", content = "date")]
pub enum RestockForecast {
    /// Stock is already at or under the safety-stock level (or the sales rate
    /// is zero while stock sits at or under the reorder point).
    RestockNow,
    /// Predicted date at which stock reaches the safety-stock level.
    Date(NaiveDate),
    /// No recorded demand and stock above the reorder point: no finite
    /// restock horizon exists.
    NoDemand,
}

/// Predict when `product_id` must be restocked.
///
/// Average daily sales is the trailing 30-day window sum divided by the full
/// window length; safety stock is that rate times the product's lead time.
/// The returned date is `as_of` plus the whole-day floor of the days until
/// stock reaches safety level.
pub fn forecast_restock_date(
    product_id: &ProductId,
    catalog: &Catalog,
    sales: &SalesHistory,
    as_of: NaiveDate,
) -> InventoryResult<RestockForecast> {
    let product = catalog
        .get(product_id)
        .ok_or_else(|| InventoryError::UnknownProduct(product_id.clone()))?;

    let avg_daily_sales = sales.average_daily_sales(product_id, as_of);
    if avg_daily_sales <= 0.0 {
        return Ok(if product.quantity <= product.reorder_point {
            RestockForecast::RestockNow
        } else {
            RestockForecast::NoDemand
        });
    }

    let safety_stock = avg_daily_sales * f64::from(product.lead_time_days);
    let quantity = product.quantity as f64;
    if quantity <= safety_stock {
        return Ok(RestockForecast::RestockNow);
    }

    // Whole days until stock falls to the safety level, floored at zero.
    let days = ((quantity - safety_stock) / avg_daily_sales).floor().max(0.0) as u64;
    let date = as_of
        .checked_add_days(Days::new(days))
        .ok_or_else(|| InventoryError::validation("forecast horizon out of range"))?;
    Ok(RestockForecast::Date(date))
}
