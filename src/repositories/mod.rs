//! Storage seams. Each trait has one PostgreSQL implementation; services
//! hold them as `Arc<dyn ...>` so tests can swap in [`memory::MemoryStore`].

pub mod category;
#[cfg(test)]
pub mod memory;
pub mod product;
pub mod transaction;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    category::{Category, NewCategory},
    product::{NewProduct, Product, ProductFilter},
    report::{BestSellingProduct, DateWindow},
    transaction::{NewTransaction, Transaction},
};

pub use category::PgCategoryRepository;
pub use product::PgProductRepository;
pub use transaction::PgTransactionRepository;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Category>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>>;

    async fn create(&self, category: &NewCategory) -> AppResult<Category>;

    /// Writes every column of `category` and refreshes `updated_at`.
    /// Returns `None` when the row no longer exists.
    async fn update(&self, category: &Category) -> AppResult<Option<Category>>;

    /// Returns `false` when no row matched.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>>;

    async fn find_by_category_id(&self, category_id: i64) -> AppResult<Vec<Product>>;

    async fn find_by_filters(&self, filter: &ProductFilter) -> AppResult<Vec<Product>>;

    async fn create(&self, product: &NewProduct) -> AppResult<Product>;

    async fn update(&self, product: &Product) -> AppResult<Option<Product>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Decrements stock for every detail and inserts the header plus details
    /// as one all-or-nothing unit. A decrement that finds too little stock
    /// (or an inactive product) aborts the whole unit.
    async fn create_checkout(&self, draft: &NewTransaction) -> AppResult<Transaction>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Transaction>>;

    /// Newest first.
    async fn find_all(&self) -> AppResult<Vec<Transaction>>;

    async fn revenue(&self, window: DateWindow) -> AppResult<i64>;

    async fn transaction_count(&self, window: DateWindow) -> AppResult<i64>;

    /// Highest summed quantity wins; ties go to the lowest product id.
    async fn best_selling_product(&self, window: DateWindow)
        -> AppResult<Option<BestSellingProduct>>;
}
