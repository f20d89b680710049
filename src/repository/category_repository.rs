use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::ProjectCategory,
    error::{AppError, Result},
    repository::CategoryRepository,
};

#[derive(FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    slug: String,
    description: String,
    icon: String,
    created_at: NaiveDateTime,
}

pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_category(row: CategoryRow) -> Result<ProjectCategory> {
        Ok(ProjectCategory {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            slug: row.slug,
            description: row.description,
            icon: row.icon,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn create(&self, category: ProjectCategory) -> Result<ProjectCategory> {
        sqlx::query(
            r#"
            INSERT INTO project_categories (id, name, slug, description, icon, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(category.id.to_string())
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(&category.icon)
        .bind(category.created_at.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(category)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectCategory>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, description, icon, created_at FROM project_categories WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_category(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProjectCategory>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, description, icon, created_at FROM project_categories WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_category(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<ProjectCategory>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, description, icon, created_at FROM project_categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_category).collect()
    }

    async fn list_slugs(&self) -> Result<Vec<String>> {
        let slugs = sqlx::query_scalar::<_, String>("SELECT slug FROM project_categories")
            .fetch_all(&self.pool)
            .await?;

        Ok(slugs)
    }

    async fn count_projects(&self, category_id: Uuid) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE category_id = ?")
                .bind(category_id.to_string())
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM project_categories WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
