use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::BlogPost,
    error::{AppError, Result},
    repository::BlogRepository,
};

#[derive(FromRow)]
struct BlogPostRow {
    id: String,
    title: String,
    slug: String,
    excerpt: String,
    body: String,
    cover_path: Option<String>,
    is_published: i32,
    published_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const POST_COLUMNS: &str = r#"
    id, title, slug, excerpt, body, cover_path, is_published,
    published_at, created_at, updated_at
"#;

pub struct SqliteBlogRepository {
    pool: SqlitePool,
}

impl SqliteBlogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_post(row: BlogPostRow) -> Result<BlogPost> {
        Ok(BlogPost {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            slug: row.slug,
            excerpt: row.excerpt,
            body: row.body,
            cover_path: row.cover_path,
            is_published: row.is_published != 0,
            published_at: row
                .published_at
                .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl BlogRepository for SqliteBlogRepository {
    async fn create(&self, post: BlogPost) -> Result<BlogPost> {
        sqlx::query(
            r#"
            INSERT INTO blog_posts (
                id, title, slug, excerpt, body, cover_path, is_published,
                published_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(post.id.to_string())
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.body)
        .bind(&post.cover_path)
        .bind(post.is_published as i32)
        .bind(post.published_at.map(|dt| dt.naive_utc()))
        .bind(post.created_at.naive_utc())
        .bind(post.updated_at.naive_utc())
        .execute(&self.pool)
        .await?;

        self.find_by_id(post.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created post".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>> {
        let row = sqlx::query_as::<_, BlogPostRow>(&format!(
            "SELECT {} FROM blog_posts WHERE id = ?",
            POST_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_post(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        let row = sqlx::query_as::<_, BlogPostRow>(&format!(
            "SELECT {} FROM blog_posts WHERE slug = ?",
            POST_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_post(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<BlogPost>> {
        let rows = sqlx::query_as::<_, BlogPostRow>(&format!(
            "SELECT {} FROM blog_posts ORDER BY created_at DESC LIMIT ? OFFSET ?",
            POST_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_post).collect()
    }

    async fn list_published(&self, limit: i64, offset: i64) -> Result<Vec<BlogPost>> {
        let rows = sqlx::query_as::<_, BlogPostRow>(&format!(
            r#"
            SELECT {}
            FROM blog_posts
            WHERE is_published = 1
            ORDER BY published_at DESC
            LIMIT ? OFFSET ?
            "#,
            POST_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_post).collect()
    }

    async fn list_slugs(&self) -> Result<Vec<String>> {
        let slugs = sqlx::query_scalar::<_, String>("SELECT slug FROM blog_posts")
            .fetch_all(&self.pool)
            .await?;

        Ok(slugs)
    }

    async fn update(&self, post: BlogPost) -> Result<BlogPost> {
        sqlx::query(
            r#"
            UPDATE blog_posts
            SET title = ?,
                excerpt = ?,
                body = ?,
                cover_path = ?,
                is_published = ?,
                published_at = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&post.title)
        .bind(&post.excerpt)
        .bind(&post.body)
        .bind(&post.cover_path)
        .bind(post.is_published as i32)
        .bind(post.published_at.map(|dt| dt.naive_utc()))
        .bind(Utc::now().naive_utc())
        .bind(post.id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(post.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated post".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
