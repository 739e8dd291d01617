// src/dtos/report.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::report::{BestSellingProduct, SalesReport};

/// `GET /report` query string, parsed by hand for clearer 400 messages.
#[derive(Debug, Default, Deserialize)]
pub struct ReportRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BestSellingProductResponse {
    pub product_id: i64,
    pub name: String,
    pub qty_sold: i64,
}

impl From<BestSellingProduct> for BestSellingProductResponse {
    fn from(best: BestSellingProduct) -> Self {
        Self {
            product_id: best.product_id,
            name: best.name,
            qty_sold: best.qty_sold,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_revenue: i64,
    pub total_transactions: i64,
    /// Serialized as `null` when nothing sold in the window.
    pub best_selling_product: Option<BestSellingProductResponse>,
}

impl From<SalesReport> for ReportResponse {
    fn from(report: SalesReport) -> Self {
        Self {
            start_date: report.window.start,
            end_date: report.window.end,
            total_revenue: report.total_revenue,
            total_transactions: report.total_transactions,
            best_selling_product: report.best_selling_product.map(Into::into),
        }
    }
}
