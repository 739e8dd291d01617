use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Header row of the `transactions` table.
#[derive(Debug, Clone, FromRow)]
pub struct TransactionHeader {
    pub id: i64,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub subtotal: i64,
}

/// A recorded sale with its line items, in insertion order.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i64,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub details: Vec<TransactionDetail>,
}

impl Transaction {
    pub fn from_parts(header: TransactionHeader, details: Vec<TransactionDetail>) -> Self {
        Self {
            id: header.id,
            total_amount: header.total_amount,
            created_at: header.created_at,
            details,
        }
    }
}

/// A priced checkout line that has passed validation but is not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransactionDetail {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub subtotal: i64,
}

/// Everything the store needs to record a checkout in one atomic unit:
/// the stock decrements are derived from `details`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub total_amount: i64,
    pub details: Vec<NewTransactionDetail>,
}
