use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Project, ProjectImage, ProjectPartner, ProjectStatus, ProjectUpdate},
    error::{AppError, Result},
    repository::ProjectRepository,
};

#[derive(FromRow)]
struct ProjectRow {
    id: String,
    title: String,
    slug: String,
    category_id: Option<String>,
    short_description: String,
    full_description: String,
    image_path: String,
    location: String,
    status: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    beneficiaries: i64,
    budget_cents: Option<i64>,
    funds_raised_cents: i64,
    is_featured: i32,
    is_active: i32,
    display_order: i64,
    views: i64,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(FromRow)]
struct ProjectImageRow {
    id: String,
    project_id: String,
    image_path: String,
    caption: String,
    display_order: i64,
    uploaded_at: NaiveDateTime,
}

#[derive(FromRow)]
struct ProjectUpdateRow {
    id: String,
    project_id: String,
    title: String,
    content: String,
    image_path: Option<String>,
    is_milestone: i32,
    created_at: NaiveDateTime,
}

#[derive(FromRow)]
struct ProjectPartnerRow {
    id: String,
    name: String,
    logo_path: String,
    website: Option<String>,
    description: String,
    is_active: i32,
}

const PROJECT_COLUMNS: &str = r#"
    id, title, slug, category_id, short_description, full_description,
    image_path, location, status, start_date, end_date, beneficiaries,
    budget_cents, funds_raised_cents, is_featured, is_active,
    display_order, views, created_at, updated_at
"#;

// Featured projects first, then the manual ordering, newest last tiebreak.
const PROJECT_ORDERING: &str = "is_featured DESC, display_order ASC, created_at DESC";

pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn parse_uuid(s: &str) -> Result<Uuid> {
        Uuid::parse_str(s).map_err(|e| AppError::Database(e.to_string()))
    }

    fn row_to_project(row: ProjectRow) -> Result<Project> {
        Ok(Project {
            id: Self::parse_uuid(&row.id)?,
            title: row.title,
            slug: row.slug,
            category_id: row.category_id.as_deref().map(Self::parse_uuid).transpose()?,
            short_description: row.short_description,
            full_description: row.full_description,
            image_path: row.image_path,
            location: row.location,
            status: ProjectStatus::parse(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid project status: {}", row.status)))?,
            start_date: row.start_date,
            end_date: row.end_date,
            beneficiaries: row.beneficiaries,
            budget_cents: row.budget_cents,
            funds_raised_cents: row.funds_raised_cents,
            is_featured: row.is_featured != 0,
            is_active: row.is_active != 0,
            display_order: row.display_order,
            views: row.views,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn row_to_image(row: ProjectImageRow) -> Result<ProjectImage> {
        Ok(ProjectImage {
            id: Self::parse_uuid(&row.id)?,
            project_id: Self::parse_uuid(&row.project_id)?,
            image_path: row.image_path,
            caption: row.caption,
            display_order: row.display_order,
            uploaded_at: DateTime::from_naive_utc_and_offset(row.uploaded_at, Utc),
        })
    }

    fn row_to_update(row: ProjectUpdateRow) -> Result<ProjectUpdate> {
        Ok(ProjectUpdate {
            id: Self::parse_uuid(&row.id)?,
            project_id: Self::parse_uuid(&row.project_id)?,
            title: row.title,
            content: row.content,
            image_path: row.image_path,
            is_milestone: row.is_milestone != 0,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }

    fn row_to_partner(row: ProjectPartnerRow) -> Result<ProjectPartner> {
        Ok(ProjectPartner {
            id: Self::parse_uuid(&row.id)?,
            name: row.name,
            logo_path: row.logo_path,
            website: row.website,
            description: row.description,
            is_active: row.is_active != 0,
        })
    }

}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    async fn create(&self, project: Project) -> Result<Project> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, title, slug, category_id, short_description, full_description,
                image_path, location, status, start_date, end_date, beneficiaries,
                budget_cents, funds_raised_cents, is_featured, is_active,
                display_order, views, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(project.id.to_string())
        .bind(&project.title)
        .bind(&project.slug)
        .bind(project.category_id.map(|id| id.to_string()))
        .bind(&project.short_description)
        .bind(&project.full_description)
        .bind(&project.image_path)
        .bind(&project.location)
        .bind(project.status.as_str())
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(project.beneficiaries)
        .bind(project.budget_cents)
        .bind(project.funds_raised_cents)
        .bind(project.is_featured as i32)
        .bind(project.is_active as i32)
        .bind(project.display_order)
        .bind(project.views)
        .bind(project.created_at.naive_utc())
        .bind(project.updated_at.naive_utc())
        .execute(&self.pool)
        .await?;

        self.find_by_id(project.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created project".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {} FROM projects WHERE id = ?",
            PROJECT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_project(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {} FROM projects WHERE slug = ?",
            PROJECT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_project(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {} FROM projects ORDER BY {} LIMIT ? OFFSET ?",
            PROJECT_COLUMNS, PROJECT_ORDERING
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_project).collect()
    }

    async fn list_public(
        &self,
        category_id: Option<Uuid>,
        status: Option<ProjectStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>> {
        let category = category_id.map(|id| id.to_string());
        let status = status.map(|s| s.as_str());

        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            SELECT {}
            FROM projects
            WHERE is_active = 1
              AND (? IS NULL OR category_id = ?)
              AND (? IS NULL OR status = ?)
            ORDER BY {}
            LIMIT ? OFFSET ?
            "#,
            PROJECT_COLUMNS, PROJECT_ORDERING
        ))
        .bind(&category)
        .bind(&category)
        .bind(status)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_project).collect()
    }

    async fn count_public(
        &self,
        category_id: Option<Uuid>,
        status: Option<ProjectStatus>,
    ) -> Result<i64> {
        let category = category_id.map(|id| id.to_string());
        let status = status.map(|s| s.as_str());

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM projects
            WHERE is_active = 1
              AND (? IS NULL OR category_id = ?)
              AND (? IS NULL OR status = ?)
            "#,
        )
        .bind(&category)
        .bind(&category)
        .bind(status)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn list_featured(&self, limit: i64) -> Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            SELECT {}
            FROM projects
            WHERE is_active = 1 AND is_featured = 1
            ORDER BY display_order ASC, created_at DESC
            LIMIT ?
            "#,
            PROJECT_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_project).collect()
    }

    async fn list_related(
        &self,
        category_id: Option<Uuid>,
        exclude_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Project>> {
        let category = category_id.map(|id| id.to_string());

        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            SELECT {}
            FROM projects
            WHERE is_active = 1
              AND id != ?
              AND (? IS NULL OR category_id = ?)
            ORDER BY {}
            LIMIT ?
            "#,
            PROJECT_COLUMNS, PROJECT_ORDERING
        ))
        .bind(exclude_id.to_string())
        .bind(&category)
        .bind(&category)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_project).collect()
    }

    async fn list_slugs(&self) -> Result<Vec<String>> {
        let slugs = sqlx::query_scalar::<_, String>("SELECT slug FROM projects")
            .fetch_all(&self.pool)
            .await?;

        Ok(slugs)
    }

    async fn update(&self, project: Project) -> Result<Project> {
        sqlx::query(
            r#"
            UPDATE projects
            SET title = ?,
                category_id = ?,
                short_description = ?,
                full_description = ?,
                image_path = ?,
                location = ?,
                status = ?,
                start_date = ?,
                end_date = ?,
                beneficiaries = ?,
                budget_cents = ?,
                funds_raised_cents = ?,
                is_featured = ?,
                is_active = ?,
                display_order = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&project.title)
        .bind(project.category_id.map(|id| id.to_string()))
        .bind(&project.short_description)
        .bind(&project.full_description)
        .bind(&project.image_path)
        .bind(&project.location)
        .bind(project.status.as_str())
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(project.beneficiaries)
        .bind(project.budget_cents)
        .bind(project.funds_raised_cents)
        .bind(project.is_featured as i32)
        .bind(project.is_active as i32)
        .bind(project.display_order)
        .bind(Utc::now().naive_utc())
        .bind(project.id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(project.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated project".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn increment_views(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE projects SET views = views + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_featured(&self, ids: &[Uuid], featured: bool) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "UPDATE projects SET is_featured = ?, updated_at = ? WHERE id IN ({})",
            placeholders
        );
        let mut query = sqlx::query(&sql)
            .bind(featured as i32)
            .bind(Utc::now().naive_utc());
        for id in ids {
            query = query.bind(id.to_string());
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn set_status(&self, ids: &[Uuid], status: ProjectStatus) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "UPDATE projects SET status = ?, updated_at = ? WHERE id IN ({})",
            placeholders
        );
        let mut query = sqlx::query(&sql)
            .bind(status.as_str())
            .bind(Utc::now().naive_utc());
        for id in ids {
            query = query.bind(id.to_string());
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn add_image(&self, image: ProjectImage) -> Result<ProjectImage> {
        sqlx::query(
            r#"
            INSERT INTO project_images (id, project_id, image_path, caption, display_order, uploaded_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(image.id.to_string())
        .bind(image.project_id.to_string())
        .bind(&image.image_path)
        .bind(&image.caption)
        .bind(image.display_order)
        .bind(image.uploaded_at.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(image)
    }

    async fn list_images(&self, project_id: Uuid) -> Result<Vec<ProjectImage>> {
        let rows = sqlx::query_as::<_, ProjectImageRow>(
            r#"
            SELECT id, project_id, image_path, caption, display_order, uploaded_at
            FROM project_images
            WHERE project_id = ?
            ORDER BY display_order ASC, uploaded_at DESC
            "#,
        )
        .bind(project_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_image).collect()
    }

    async fn delete_image(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM project_images WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn add_update(&self, update: ProjectUpdate) -> Result<ProjectUpdate> {
        sqlx::query(
            r#"
            INSERT INTO project_updates (id, project_id, title, content, image_path, is_milestone, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(update.id.to_string())
        .bind(update.project_id.to_string())
        .bind(&update.title)
        .bind(&update.content)
        .bind(&update.image_path)
        .bind(update.is_milestone as i32)
        .bind(update.created_at.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(update)
    }

    async fn list_updates(&self, project_id: Uuid) -> Result<Vec<ProjectUpdate>> {
        let rows = sqlx::query_as::<_, ProjectUpdateRow>(
            r#"
            SELECT id, project_id, title, content, image_path, is_milestone, created_at
            FROM project_updates
            WHERE project_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_update).collect()
    }

    async fn create_partner(&self, partner: ProjectPartner) -> Result<ProjectPartner> {
        sqlx::query(
            r#"
            INSERT INTO project_partners (id, name, logo_path, website, description, is_active)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(partner.id.to_string())
        .bind(&partner.name)
        .bind(&partner.logo_path)
        .bind(&partner.website)
        .bind(&partner.description)
        .bind(partner.is_active as i32)
        .execute(&self.pool)
        .await?;

        Ok(partner)
    }

    async fn link_partner(&self, project_id: Uuid, partner_id: Uuid) -> Result<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO project_partner_links (project_id, partner_id) VALUES (?, ?)",
        )
        .bind(project_id.to_string())
        .bind(partner_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_partners_for(&self, project_id: Uuid) -> Result<Vec<ProjectPartner>> {
        let rows = sqlx::query_as::<_, ProjectPartnerRow>(
            r#"
            SELECT p.id, p.name, p.logo_path, p.website, p.description, p.is_active
            FROM project_partners p
            JOIN project_partner_links l ON l.partner_id = p.id
            WHERE l.project_id = ? AND p.is_active = 1
            ORDER BY p.name ASC
            "#,
        )
        .bind(project_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_partner).collect()
    }
}
