//! In-memory stand-in for the PostgreSQL repositories, used by unit tests.
//!
//! Every table sits behind one mutex, so a checkout holds the lock for its
//! whole unit of work and either applies completely or not at all.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{CategoryRepository, ProductRepository, TransactionRepository};
use crate::error::{AppError, AppResult};
use crate::models::{
    category::{Category, NewCategory},
    product::{NewProduct, Product, ProductFilter},
    report::{BestSellingProduct, DateWindow},
    transaction::{NewTransaction, Transaction, TransactionDetail},
};

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    products: BTreeMap<i64, Product>,
    transactions: BTreeMap<i64, Transaction>,
    next_id: i64,
    next_detail_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn in_window(&self, window: DateWindow) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .values()
            .filter(move |t| {
                let day = t.created_at.date_naive();
                window.start <= day && day <= window.end
            })
    }
}

fn matches_filter(filter: &ProductFilter, product: &Product) -> bool {
    let name_ok = filter.name.as_ref().map_or(true, |needle| {
        product.name.to_lowercase().contains(&needle.to_lowercase())
    });
    let active_ok = filter.active.map_or(true, |active| product.active == active);
    name_ok && active_ok
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    /// Moves a recorded transaction to another point in time.
    pub fn backdate(&self, transaction_id: i64, created_at: DateTime<Utc>) {
        if let Some(t) = self.lock().transactions.get_mut(&transaction_id) {
            t.created_at = created_at;
        }
    }

    pub fn stock_of(&self, product_id: i64) -> Option<i32> {
        self.lock().products.get(&product_id).map(|p| p.stock)
    }

    pub fn transaction_total(&self) -> usize {
        self.lock().transactions.len()
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        Ok(self.lock().categories.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        Ok(self.lock().categories.get(&id).cloned())
    }

    async fn create(&self, category: &NewCategory) -> AppResult<Category> {
        let mut tables = self.lock();
        let now = Utc::now();
        let created = Category {
            id: tables.next_id(),
            name: category.name.clone(),
            description: category.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.categories.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, category: &Category) -> AppResult<Option<Category>> {
        let mut tables = self.lock();
        let Some(existing) = tables.categories.get_mut(&category.id) else {
            return Ok(None);
        };
        existing.name = category.name.clone();
        existing.description = category.description.clone();
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.lock();
        if tables.products.values().any(|p| p.category_id == Some(id)) {
            return Err(AppError::conflict(
                "operation would violate a reference held by another record",
            ));
        }
        Ok(tables.categories.remove(&id).is_some())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Product>> {
        Ok(self.lock().products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        Ok(self.lock().products.get(&id).cloned())
    }

    async fn find_by_category_id(&self, category_id: i64) -> AppResult<Vec<Product>> {
        Ok(self
            .lock()
            .products
            .values()
            .filter(|p| p.category_id == Some(category_id))
            .cloned()
            .collect())
    }

    async fn find_by_filters(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        Ok(self
            .lock()
            .products
            .values()
            .filter(|p| matches_filter(filter, p))
            .cloned()
            .collect())
    }

    async fn create(&self, product: &NewProduct) -> AppResult<Product> {
        let mut tables = self.lock();
        let now = Utc::now();
        let created = Product {
            id: tables.next_id(),
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            active: product.active,
            category_id: product.category_id,
            created_at: now,
            updated_at: now,
        };
        tables.products.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, product: &Product) -> AppResult<Option<Product>> {
        let mut tables = self.lock();
        let Some(existing) = tables.products.get_mut(&product.id) else {
            return Ok(None);
        };
        *existing = Product {
            created_at: existing.created_at,
            updated_at: Utc::now(),
            ..product.clone()
        };
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.lock();
        let referenced = tables
            .transactions
            .values()
            .flat_map(|t| t.details.iter())
            .any(|d| d.product_id == id);
        if referenced {
            return Err(AppError::conflict(
                "operation would violate a reference held by another record",
            ));
        }
        Ok(tables.products.remove(&id).is_some())
    }
}

#[async_trait]
impl TransactionRepository for MemoryStore {
    async fn create_checkout(&self, draft: &NewTransaction) -> AppResult<Transaction> {
        let mut tables = self.lock();

        // Work on a copy of the stock levels; nothing is written back unless
        // every line succeeds.
        let mut stock: BTreeMap<i64, i32> =
            tables.products.iter().map(|(id, p)| (*id, p.stock)).collect();
        for line in &draft.details {
            let product = tables.products.get(&line.product_id).ok_or_else(|| {
                AppError::not_found(format!("product with id {} not found", line.product_id))
            })?;
            if !product.active {
                return Err(AppError::invalid_state(format!(
                    "product {} is not active",
                    line.product_name
                )));
            }
            let available = stock.entry(line.product_id).or_default();
            if *available < line.quantity {
                return Err(AppError::insufficient_stock(
                    &line.product_name,
                    *available,
                    line.quantity,
                ));
            }
            *available -= line.quantity;
        }

        let now = Utc::now();
        for (id, level) in stock {
            if let Some(product) = tables.products.get_mut(&id) {
                if product.stock != level {
                    product.stock = level;
                    product.updated_at = now;
                }
            }
        }

        let id = tables.next_id();
        let mut details = Vec::with_capacity(draft.details.len());
        for line in &draft.details {
            tables.next_detail_id += 1;
            details.push(TransactionDetail {
                id: tables.next_detail_id,
                transaction_id: id,
                product_id: line.product_id,
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                subtotal: line.subtotal,
            });
        }
        let transaction = Transaction {
            id,
            total_amount: draft.total_amount,
            created_at: now,
            details,
        };
        tables.transactions.insert(id, transaction.clone());
        Ok(transaction)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Transaction>> {
        Ok(self.lock().transactions.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Transaction>> {
        let mut all: Vec<Transaction> = self.lock().transactions.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn revenue(&self, window: DateWindow) -> AppResult<i64> {
        Ok(self.lock().in_window(window).map(|t| t.total_amount).sum())
    }

    async fn transaction_count(&self, window: DateWindow) -> AppResult<i64> {
        Ok(self.lock().in_window(window).count() as i64)
    }

    async fn best_selling_product(
        &self,
        window: DateWindow,
    ) -> AppResult<Option<BestSellingProduct>> {
        let tables = self.lock();
        let mut sold: BTreeMap<i64, i64> = BTreeMap::new();
        for detail in tables.in_window(window).flat_map(|t| t.details.iter()) {
            *sold.entry(detail.product_id).or_default() += i64::from(detail.quantity);
        }

        // BTreeMap iterates in ascending id, so keeping the first maximum
        // gives the lowest id on ties.
        let mut best: Option<(i64, i64)> = None;
        for (product_id, qty) in sold {
            if best.map_or(true, |(_, top)| qty > top) {
                best = Some((product_id, qty));
            }
        }

        Ok(best.and_then(|(product_id, qty_sold)| {
            tables.products.get(&product_id).map(|p| BestSellingProduct {
                product_id,
                name: p.name.clone(),
                qty_sold,
            })
        }))
    }
}
