// src/dtos/transaction.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "checkout items cannot be empty"), nested)]
    pub items: Vec<CheckoutItemRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutItemRequest {
    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub product_id: i64,
    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub details: Vec<TransactionDetailResponse>,
}

#[derive(Debug, Serialize)]
pub struct TransactionDetailResponse {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub subtotal: i64,
}

impl From<crate::models::transaction::TransactionDetail> for TransactionDetailResponse {
    fn from(detail: crate::models::transaction::TransactionDetail) -> Self {
        Self {
            id: detail.id,
            transaction_id: detail.transaction_id,
            product_id: detail.product_id,
            product_name: detail.product_name,
            quantity: detail.quantity,
            subtotal: detail.subtotal,
        }
    }
}

impl From<crate::models::transaction::Transaction> for TransactionResponse {
    fn from(transaction: crate::models::transaction::Transaction) -> Self {
        Self {
            id: transaction.id,
            total_amount: transaction.total_amount,
            created_at: transaction.created_at,
            details: transaction
                .details
                .into_iter()
                .map(TransactionDetailResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cart_fails_validation() {
        let req = CheckoutRequest { items: vec![] };
        assert!(req.validate().is_err());
    }

    #[test]
    fn non_positive_quantity_fails_nested_validation() {
        let req = CheckoutRequest {
            items: vec![CheckoutItemRequest { product_id: 1, quantity: 0 }],
        };
        assert!(req.validate().is_err());
    }
}
