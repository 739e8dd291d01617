use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::CategoryRepository;
use crate::error::AppResult;
use crate::models::category::{Category, NewCategory};

const CATEGORY_COLUMNS: &str = "id, name, description, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        PgCategoryRepository { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create(&self, category: &NewCategory) -> AppResult<Category> {
        debug!(name = %category.name, "Inserting category");

        let created = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (name, description)
             VALUES ($1, $2)
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&category.name)
        .bind(&category.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, category: &Category) -> AppResult<Option<Category>> {
        let updated = sqlx::query_as::<_, Category>(&format!(
            "UPDATE categories SET
                name = $1,
                description = $2,
                updated_at = NOW()
             WHERE id = $3
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
