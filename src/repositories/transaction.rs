use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use super::TransactionRepository;
use crate::error::{AppError, AppResult};
use crate::models::report::{BestSellingProduct, DateWindow};
use crate::models::transaction::{
    NewTransaction, Transaction, TransactionDetail, TransactionHeader,
};

const DETAIL_COLUMNS: &str = "id, transaction_id, product_id, product_name, quantity, subtotal";

/// Matches rows whose UTC calendar date falls in `[$1, $2]`.
const IN_WINDOW: &str = "(created_at AT TIME ZONE 'UTC')::date BETWEEN $1 AND $2";

#[derive(Debug, Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        PgTransactionRepository { pool }
    }

    async fn details_for(&self, ids: &[i64]) -> AppResult<HashMap<i64, Vec<TransactionDetail>>> {
        let rows = sqlx::query_as::<_, TransactionDetail>(&format!(
            "SELECT {DETAIL_COLUMNS} FROM transaction_details
             WHERE transaction_id = ANY($1)
             ORDER BY id"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<TransactionDetail>> = HashMap::new();
        for detail in rows {
            grouped.entry(detail.transaction_id).or_default().push(detail);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn create_checkout(&self, draft: &NewTransaction) -> AppResult<Transaction> {
        let mut tx = self.pool.begin().await?;

        // Conditional decrement: the stock check and the write happen in one
        // statement, so two concurrent checkouts cannot both take the last unit.
        for line in &draft.details {
            let result = sqlx::query(
                "UPDATE products
                 SET stock = stock - $1, updated_at = NOW()
                 WHERE id = $2 AND active AND stock >= $1",
            )
            .bind(line.quantity)
            .bind(line.product_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                let current: Option<(i32, bool)> =
                    sqlx::query_as("SELECT stock, active FROM products WHERE id = $1")
                        .bind(line.product_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                tx.rollback().await?;

                warn!(
                    product_id = line.product_id,
                    "Stock decrement lost a race, checkout rolled back"
                );
                return Err(match current {
                    None => AppError::not_found(format!(
                        "product with id {} not found",
                        line.product_id
                    )),
                    Some((_, false)) => AppError::invalid_state(format!(
                        "product {} is not active",
                        line.product_name
                    )),
                    Some((stock, true)) => {
                        AppError::insufficient_stock(&line.product_name, stock, line.quantity)
                    }
                });
            }
        }

        let header = sqlx::query_as::<_, TransactionHeader>(
            "INSERT INTO transactions (total_amount)
             VALUES ($1)
             RETURNING id, total_amount, created_at",
        )
        .bind(draft.total_amount)
        .fetch_one(&mut *tx)
        .await?;

        let mut details = Vec::with_capacity(draft.details.len());
        for line in &draft.details {
            let detail = sqlx::query_as::<_, TransactionDetail>(&format!(
                "INSERT INTO transaction_details
                     (transaction_id, product_id, product_name, quantity, subtotal)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING {DETAIL_COLUMNS}"
            ))
            .bind(header.id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.quantity)
            .bind(line.subtotal)
            .fetch_one(&mut *tx)
            .await?;
            details.push(detail);
        }

        tx.commit().await?;

        debug!(
            id = header.id,
            total_amount = header.total_amount,
            lines = details.len(),
            "Checkout committed"
        );
        Ok(Transaction::from_parts(header, details))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Transaction>> {
        let header = sqlx::query_as::<_, TransactionHeader>(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let details = sqlx::query_as::<_, TransactionDetail>(&format!(
            "SELECT {DETAIL_COLUMNS} FROM transaction_details
             WHERE transaction_id = $1
             ORDER BY id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Transaction::from_parts(header, details)))
    }

    async fn find_all(&self) -> AppResult<Vec<Transaction>> {
        let headers = sqlx::query_as::<_, TransactionHeader>(
            "SELECT id, total_amount, created_at FROM transactions
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = headers.iter().map(|h| h.id).collect();
        let mut details = self.details_for(&ids).await?;

        Ok(headers
            .into_iter()
            .map(|header| {
                let lines = details.remove(&header.id).unwrap_or_default();
                Transaction::from_parts(header, lines)
            })
            .collect())
    }

    async fn revenue(&self, window: DateWindow) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COALESCE(SUM(total_amount), 0)::BIGINT FROM transactions WHERE {IN_WINDOW}"
        ))
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn transaction_count(&self, window: DateWindow) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM transactions WHERE {IN_WINDOW}"
        ))
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn best_selling_product(
        &self,
        window: DateWindow,
    ) -> AppResult<Option<BestSellingProduct>> {
        let best = sqlx::query_as::<_, BestSellingProduct>(
            "SELECT td.product_id,
                    p.name,
                    SUM(td.quantity)::BIGINT AS qty_sold
             FROM transaction_details td
             JOIN transactions t ON td.transaction_id = t.id
             JOIN products p ON td.product_id = p.id
             WHERE (t.created_at AT TIME ZONE 'UTC')::date BETWEEN $1 AND $2
             GROUP BY td.product_id, p.name
             ORDER BY qty_sold DESC, td.product_id ASC
             LIMIT 1",
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_optional(&self.pool)
        .await?;

        Ok(best)
    }
}
