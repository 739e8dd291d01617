// src/dtos/product.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Prices are stored as `NUMERIC(12, 2)`: two decimal places, at most ten
/// integer digits.
const MAX_PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: i64 = 10_000_000_000;

fn positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if !price.is_sign_positive() || price.is_zero() {
        return Err(
            ValidationError::new("positive").with_message("must be greater than 0".into())
        );
    }
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(
            ValidationError::new("scale").with_message("must have at most 2 decimal places".into())
        );
    }
    if *price >= Decimal::from(PRICE_LIMIT) {
        return Err(
            ValidationError::new("max").with_message("must be less than 10000000000".into())
        );
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 3, max = 100, message = "must be between 3 and 100 characters"))]
    pub name: String,
    #[validate(custom(function = "positive_price"))]
    pub price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub stock: i32,
    pub active: Option<bool>,
    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub category_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 3, max = 100, message = "must be between 3 and 100 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "positive_price"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub stock: Option<i32>,
    pub active: Option<bool>,
    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub category_id: Option<i64>,
}

/// `GET /products` query string. Values are kept as raw strings so a bad
/// number produces our own 400 message instead of the extractor's.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub active: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub active: bool,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Convert from Model to Response DTO
impl From<crate::models::product::Product> for ProductResponse {
    fn from(product: crate::models::product::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            stock: product.stock,
            active: product.active,
            category_id: product.category_id,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
