// src/state.rs
use std::sync::Arc;

use sqlx::PgPool;

use crate::repositories::{
    CategoryRepository, PgCategoryRepository, PgProductRepository, PgTransactionRepository,
    ProductRepository, TransactionRepository,
};
use crate::services::{CategoryService, ProductService, ReportService, TransactionService};

#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryService,
    pub products: ProductService,
    pub transactions: TransactionService,
    pub reports: ReportService,
}

impl AppState {
    pub fn new(db_pool: PgPool) -> Self {
        Self::from_repositories(
            Arc::new(PgCategoryRepository::new(db_pool.clone())),
            Arc::new(PgProductRepository::new(db_pool.clone())),
            Arc::new(PgTransactionRepository::new(db_pool)),
        )
    }

    pub fn from_repositories(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        transactions: Arc<dyn TransactionRepository>,
    ) -> Self {
        Self {
            categories: CategoryService::new(categories.clone()),
            products: ProductService::new(products.clone(), categories),
            transactions: TransactionService::new(transactions.clone(), products),
            reports: ReportService::new(transactions),
        }
    }
}
