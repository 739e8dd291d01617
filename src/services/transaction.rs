//! Checkout: turning a cart into a recorded transaction.
//!
//! Validation and pricing run first without touching stock. Only a fully
//! priced draft reaches [`TransactionRepository::create_checkout`], which
//! applies the stock decrements and inserts the records in one unit.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::dtos::transaction::CheckoutItemRequest;
use crate::error::{AppError, AppResult};
use crate::models::transaction::{NewTransaction, NewTransactionDetail, Transaction};
use crate::repositories::{ProductRepository, TransactionRepository};

#[derive(Clone)]
pub struct TransactionService {
    repository: Arc<dyn TransactionRepository>,
    products: Arc<dyn ProductRepository>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            repository,
            products,
        }
    }

    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn checkout(&self, items: &[CheckoutItemRequest]) -> AppResult<Transaction> {
        let draft = self.price_cart(items).await?;
        let transaction = self.repository.create_checkout(&draft).await?;

        info!(
            id = transaction.id,
            total_amount = transaction.total_amount,
            "Transaction created"
        );
        Ok(transaction)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Transaction> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("transaction with id {id} not found")))
    }

    pub async fn get_all(&self) -> AppResult<Vec<Transaction>> {
        self.repository.find_all().await
    }

    /// Validates every line in input order and snapshots its price and name.
    /// Quantities for a product listed more than once are checked cumulatively.
    async fn price_cart(&self, items: &[CheckoutItemRequest]) -> AppResult<NewTransaction> {
        if items.is_empty() {
            return Err(AppError::validation("checkout items cannot be empty"));
        }

        let mut reserved: HashMap<i64, i32> = HashMap::new();
        let mut details = Vec::with_capacity(items.len());
        let mut total_amount: i64 = 0;

        for item in items {
            if item.quantity <= 0 {
                return Err(AppError::validation(format!(
                    "quantity for product {} must be greater than 0",
                    item.product_id
                )));
            }

            let product = self
                .products
                .find_by_id(item.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!("product with id {} not found", item.product_id))
                })?;

            if !product.active {
                return Err(AppError::invalid_state(format!(
                    "product {} is not active",
                    product.name
                )));
            }

            let already = reserved.entry(product.id).or_default();
            let wanted = already.saturating_add(item.quantity);
            if wanted > product.stock {
                return Err(AppError::insufficient_stock(
                    &product.name,
                    product.stock - *already,
                    item.quantity,
                ));
            }
            *already = wanted;

            let subtotal = line_subtotal(product.price, item.quantity)?;
            total_amount = total_amount
                .checked_add(subtotal)
                .ok_or_else(|| AppError::validation("transaction total is too large"))?;

            details.push(NewTransactionDetail {
                product_id: product.id,
                product_name: product.name,
                quantity: item.quantity,
                subtotal,
            });
        }

        Ok(NewTransaction {
            total_amount,
            details,
        })
    }
}

/// `price x quantity` in whole currency units; fractions are dropped, not rounded.
pub fn line_subtotal(price: Decimal, quantity: i32) -> AppResult<i64> {
    price
        .checked_mul(Decimal::from(quantity))
        .and_then(|amount| amount.trunc().to_i64())
        .ok_or_else(|| AppError::validation("line subtotal is too large"))
}
