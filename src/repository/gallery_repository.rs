use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::GalleryImage,
    error::{AppError, Result},
    repository::GalleryRepository,
};

#[derive(FromRow)]
struct GalleryImageRow {
    id: String,
    image_path: String,
    caption: String,
    taken_at: Option<NaiveDate>,
    display_order: i64,
    created_at: NaiveDateTime,
}

pub struct SqliteGalleryRepository {
    pool: SqlitePool,
}

impl SqliteGalleryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_image(row: GalleryImageRow) -> Result<GalleryImage> {
        Ok(GalleryImage {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            image_path: row.image_path,
            caption: row.caption,
            taken_at: row.taken_at,
            display_order: row.display_order,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl GalleryRepository for SqliteGalleryRepository {
    async fn create(&self, image: GalleryImage) -> Result<GalleryImage> {
        sqlx::query(
            r#"
            INSERT INTO gallery_images (id, image_path, caption, taken_at, display_order, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(image.id.to_string())
        .bind(&image.image_path)
        .bind(&image.caption)
        .bind(image.taken_at)
        .bind(image.display_order)
        .bind(image.created_at.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(image)
    }

    async fn list(&self) -> Result<Vec<GalleryImage>> {
        let rows = sqlx::query_as::<_, GalleryImageRow>(
            r#"
            SELECT id, image_path, caption, taken_at, display_order, created_at
            FROM gallery_images
            ORDER BY display_order ASC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_image).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM gallery_images WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
