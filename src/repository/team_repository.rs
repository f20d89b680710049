use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{PhotoStatus, TeamMember},
    error::{AppError, Result},
    repository::TeamRepository,
};

// Database row struct that matches the SQLite schema
#[derive(FromRow)]
struct TeamMemberRow {
    id: String,
    name: String,
    slug: String,
    role: Option<String>,
    bio: Option<String>,
    date_of_birth: Option<NaiveDate>,
    national_id: Option<String>,
    national_id_verified: i32,
    photo_path: Option<String>,
    photo_status: String,
    display_order: i64,
    is_active: i32,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const SELECT_COLUMNS: &str = r#"
    id, name, slug, role, bio, date_of_birth, national_id,
    national_id_verified, photo_path, photo_status, display_order,
    is_active, created_at, updated_at
"#;

pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_member(row: TeamMemberRow) -> Result<TeamMember> {
        Ok(TeamMember {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            slug: row.slug,
            role: row.role,
            bio: row.bio,
            date_of_birth: row.date_of_birth,
            national_id: row.national_id,
            national_id_verified: row.national_id_verified != 0,
            photo_path: row.photo_path,
            photo_status: Self::parse_photo_status(&row.photo_status)?,
            display_order: row.display_order,
            is_active: row.is_active != 0,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn parse_photo_status(s: &str) -> Result<PhotoStatus> {
        match s {
            "Pending" => Ok(PhotoStatus::Pending),
            "Optimized" => Ok(PhotoStatus::Optimized),
            "Unoptimized" => Ok(PhotoStatus::Unoptimized),
            _ => Err(AppError::Database(format!("Invalid photo status: {}", s))),
        }
    }

    fn photo_status_to_str(status: PhotoStatus) -> &'static str {
        match status {
            PhotoStatus::Pending => "Pending",
            PhotoStatus::Optimized => "Optimized",
            PhotoStatus::Unoptimized => "Unoptimized",
        }
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn create(&self, member: TeamMember) -> Result<TeamMember> {
        sqlx::query(
            r#"
            INSERT INTO team_members (
                id, name, slug, role, bio, date_of_birth, national_id,
                national_id_verified, photo_path, photo_status, display_order,
                is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(member.id.to_string())
        .bind(&member.name)
        .bind(&member.slug)
        .bind(&member.role)
        .bind(&member.bio)
        .bind(member.date_of_birth)
        .bind(&member.national_id)
        .bind(member.national_id_verified as i32)
        .bind(&member.photo_path)
        .bind(Self::photo_status_to_str(member.photo_status))
        .bind(member.display_order)
        .bind(member.is_active as i32)
        .bind(member.created_at.naive_utc())
        .bind(member.updated_at.naive_utc())
        .execute(&self.pool)
        .await?;

        self.find_by_id(member.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created team member".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TeamMember>> {
        let row = sqlx::query_as::<_, TeamMemberRow>(&format!(
            "SELECT {} FROM team_members WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_member(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<TeamMember>> {
        let row = sqlx::query_as::<_, TeamMemberRow>(&format!(
            "SELECT {} FROM team_members WHERE slug = ?",
            SELECT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_member(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<TeamMember>> {
        let rows = sqlx::query_as::<_, TeamMemberRow>(&format!(
            r#"
            SELECT {}
            FROM team_members
            ORDER BY display_order ASC, created_at DESC
            LIMIT ? OFFSET ?
            "#,
            SELECT_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_member).collect()
    }

    async fn list_active(&self) -> Result<Vec<TeamMember>> {
        let rows = sqlx::query_as::<_, TeamMemberRow>(&format!(
            r#"
            SELECT {}
            FROM team_members
            WHERE is_active = 1
            ORDER BY display_order ASC, name ASC
            "#,
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_member).collect()
    }

    async fn list_slugs(&self) -> Result<Vec<String>> {
        let slugs = sqlx::query_scalar::<_, String>("SELECT slug FROM team_members")
            .fetch_all(&self.pool)
            .await?;

        Ok(slugs)
    }

    async fn update(&self, member: TeamMember) -> Result<TeamMember> {
        let now = Utc::now();

        // The slug is assigned once at creation and never rewritten here.
        sqlx::query(
            r#"
            UPDATE team_members
            SET name = ?,
                role = ?,
                bio = ?,
                date_of_birth = ?,
                national_id = ?,
                national_id_verified = ?,
                display_order = ?,
                is_active = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&member.name)
        .bind(&member.role)
        .bind(&member.bio)
        .bind(member.date_of_birth)
        .bind(&member.national_id)
        .bind(member.national_id_verified as i32)
        .bind(member.display_order)
        .bind(member.is_active as i32)
        .bind(now.naive_utc())
        .bind(member.id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(member.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated team member".to_string())
        })
    }

    async fn set_photo(
        &self,
        id: Uuid,
        photo_path: Option<&str>,
        status: PhotoStatus,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE team_members
            SET photo_path = ?, photo_status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(photo_path)
        .bind(Self::photo_status_to_str(status))
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_photo_status(&self, id: Uuid, status: PhotoStatus) -> Result<()> {
        sqlx::query("UPDATE team_members SET photo_status = ? WHERE id = ?")
            .bind(Self::photo_status_to_str(status))
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM team_members WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
