use chrono::NaiveDate;
use sqlx::FromRow;

/// Inclusive calendar-date window, evaluated against UTC timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn single_day(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BestSellingProduct {
    pub product_id: i64,
    pub name: String,
    pub qty_sold: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    pub window: DateWindow,
    pub total_revenue: i64,
    pub total_transactions: i64,
    pub best_selling_product: Option<BestSellingProduct>,
}
