use std::sync::Arc;

use tracing::{info, instrument};

use crate::dtos::category::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::error::{AppError, AppResult};
use crate::models::category::{Category, NewCategory};
use crate::repositories::CategoryRepository;

#[derive(Clone)]
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Category>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Category> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self, req), fields(name = %req.name))]
    pub async fn create(&self, req: CreateCategoryRequest) -> AppResult<Category> {
        let category = self
            .repository
            .create(&NewCategory {
                name: req.name,
                description: req.description,
            })
            .await?;

        info!(id = category.id, "Category created");
        Ok(category)
    }

    #[instrument(skip(self, req))]
    pub async fn update(&self, id: i64, req: UpdateCategoryRequest) -> AppResult<Category> {
        let mut category = self.get_by_id(id).await?;

        if let Some(name) = req.name {
            category.name = name;
        }
        if let Some(description) = req.description {
            category.description = description;
        }

        self.repository
            .update(&category)
            .await?
            .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.get_by_id(id).await?;

        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        info!(id, "Category deleted");
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("category with id {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryStore;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(MemoryStore::new()))
    }

    fn create_req(name: &str, description: &str) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn created_category_reads_back_identically() {
        let svc = service();
        let created = svc.create(create_req("Minuman", "Drinks")).await.unwrap();

        let fetched = svc.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.name, "Minuman");
        assert_eq!(fetched.description, "Drinks");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn update_changes_only_given_fields_and_refreshes_timestamp() {
        let svc = service();
        let created = svc.create(create_req("Minuman", "Drinks")).await.unwrap();

        let updated = svc
            .update(
                created.id,
                UpdateCategoryRequest {
                    name: None,
                    description: Some("Cold drinks".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Minuman");
        assert_eq!(updated.description, "Cold drinks");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let svc = service();

        assert!(matches!(svc.get_by_id(42).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            svc.update(42, UpdateCategoryRequest { name: None, description: None }).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(svc.delete(42).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_category() {
        let svc = service();
        let created = svc.create(create_req("Snack", "")).await.unwrap();

        svc.delete(created.id).await.unwrap();
        assert!(svc.get_all().await.unwrap().is_empty());
    }
}
