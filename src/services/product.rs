use std::sync::Arc;

use tracing::{info, instrument};

use crate::dtos::product::{CreateProductRequest, UpdateProductRequest};
use crate::error::{AppError, AppResult};
use crate::models::product::{NewProduct, Product, ProductFilter};
use crate::repositories::{CategoryRepository, ProductRepository};

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            repository,
            categories,
        }
    }

    pub async fn get_all(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        if filter.is_empty() {
            self.repository.find_all().await
        } else {
            self.repository.find_by_filters(filter).await
        }
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_by_category_id(&self, category_id: i64) -> AppResult<Vec<Product>> {
        self.ensure_category(category_id).await?;
        self.repository.find_by_category_id(category_id).await
    }

    #[instrument(skip(self, req), fields(name = %req.name))]
    pub async fn create(&self, req: CreateProductRequest) -> AppResult<Product> {
        if let Some(category_id) = req.category_id {
            self.ensure_category(category_id).await?;
        }

        let product = self
            .repository
            .create(&NewProduct {
                name: req.name,
                price: req.price,
                stock: req.stock,
                active: req.active.unwrap_or(true),
                category_id: req.category_id,
            })
            .await?;

        info!(id = product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self, req))]
    pub async fn update(&self, id: i64, req: UpdateProductRequest) -> AppResult<Product> {
        let mut product = self.get_by_id(id).await?;

        if let Some(category_id) = req.category_id {
            self.ensure_category(category_id).await?;
            product.category_id = Some(category_id);
        }
        if let Some(name) = req.name {
            product.name = name;
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if let Some(stock) = req.stock {
            product.stock = stock;
        }
        if let Some(active) = req.active {
            product.active = active;
        }

        self.repository
            .update(&product)
            .await?
            .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.get_by_id(id).await?;

        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        info!(id, "Product deleted");
        Ok(())
    }

    async fn ensure_category(&self, category_id: i64) -> AppResult<()> {
        match self.categories.find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!(
                "category with id {category_id} not found"
            ))),
        }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("product with id {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::category::CreateCategoryRequest;
    use crate::repositories::memory::MemoryStore;
    use crate::services::CategoryService;
    use rust_decimal_macros::dec;

    fn services() -> (ProductService, CategoryService) {
        let store = Arc::new(MemoryStore::new());
        (
            ProductService::new(store.clone(), store.clone()),
            CategoryService::new(store),
        )
    }

    fn create_req(name: &str, category_id: Option<i64>) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            price: dec!(12500.50),
            stock: 4,
            active: None,
            category_id,
        }
    }

    #[tokio::test]
    async fn create_defaults_to_active_and_keeps_decimal_price() {
        let (products, _) = services();
        let product = products.create(create_req("Roti Bakar", None)).await.unwrap();

        assert!(product.active);
        assert_eq!(product.price, dec!(12500.50));
        assert_eq!(products.get_by_id(product.id).await.unwrap(), product);
    }

    #[tokio::test]
    async fn create_with_unknown_category_is_not_found() {
        let (products, _) = services();
        let err = products.create(create_req("Roti Bakar", Some(99))).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn lists_products_by_category() {
        let (products, categories) = services();
        let food = categories
            .create(CreateCategoryRequest {
                name: "Makanan".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        products.create(create_req("Roti Bakar", Some(food.id))).await.unwrap();
        products.create(create_req("Es Teh", None)).await.unwrap();

        let listed = products.get_by_category_id(food.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Roti Bakar");

        assert!(matches!(
            products.get_by_category_id(food.id + 100).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn filters_by_name_and_active_flag() {
        let (products, _) = services();
        products.create(create_req("Es Teh Manis", None)).await.unwrap();
        let mut hidden = create_req("Es Jeruk", None);
        hidden.active = Some(false);
        products.create(hidden).await.unwrap();

        let filter = ProductFilter {
            name: Some("es".to_string()),
            active: Some(true),
        };
        let listed = products.get_all(&filter).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Es Teh Manis");

        assert_eq!(products.get_all(&ProductFilter::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_touches_only_given_fields() {
        let (products, _) = services();
        let product = products.create(create_req("Roti Bakar", None)).await.unwrap();

        let updated = products
            .update(
                product.id,
                UpdateProductRequest {
                    name: None,
                    price: None,
                    stock: Some(9),
                    active: Some(false),
                    category_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Roti Bakar");
        assert_eq!(updated.price, product.price);
        assert_eq!(updated.stock, 9);
        assert!(!updated.active);
        assert!(updated.updated_at >= product.updated_at);
    }

    #[tokio::test]
    async fn deleting_a_referenced_category_conflicts() {
        let (products, categories) = services();
        let food = categories
            .create(CreateCategoryRequest {
                name: "Makanan".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        products.create(create_req("Roti Bakar", Some(food.id))).await.unwrap();

        assert!(matches!(categories.delete(food.id).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn delete_missing_product_is_not_found() {
        let (products, _) = services();
        assert!(matches!(products.delete(7).await, Err(AppError::NotFound(_))));
    }
}
