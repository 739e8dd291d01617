use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::instrument;

use crate::error::{AppError, AppResult};
use crate::models::report::{DateWindow, SalesReport};
use crate::repositories::TransactionRepository;

#[derive(Clone)]
pub struct ReportService {
    transactions: Arc<dyn TransactionRepository>,
}

impl ReportService {
    pub fn new(transactions: Arc<dyn TransactionRepository>) -> Self {
        Self { transactions }
    }

    /// Report for the current UTC calendar day.
    pub async fn today(&self) -> AppResult<SalesReport> {
        self.for_window(DateWindow::single_day(Utc::now().date_naive()))
            .await
    }

    pub async fn for_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<SalesReport> {
        if start > end {
            return Err(AppError::validation(
                "start_date must not be after end_date",
            ));
        }
        self.for_window(DateWindow { start, end }).await
    }

    #[instrument(skip(self))]
    async fn for_window(&self, window: DateWindow) -> AppResult<SalesReport> {
        let total_revenue = self.transactions.revenue(window).await?;
        let total_transactions = self.transactions.transaction_count(window).await?;
        let best_selling_product = self.transactions.best_selling_product(window).await?;

        Ok(SalesReport {
            window,
            total_revenue,
            total_transactions,
            best_selling_product,
        })
    }
}
