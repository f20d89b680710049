use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{age_on, CreateTeamMemberRequest, PhotoStatus, TeamMember, UpdateTeamMemberRequest},
    error::{AppError, Result},
    media::{optimizer, storage_path, PhotoStore, PhotoUpload},
    repository::TeamRepository,
    service::slug::{first_free_slug, slug_base},
};

/// Minimum length of a national id, when one is present.
const NATIONAL_ID_MIN_LEN: usize = 5;

/// Age at which a national id becomes mandatory.
const NATIONAL_ID_AGE: i32 = 18;

pub struct TeamService {
    repo: Arc<dyn TeamRepository>,
    photos: Arc<dyn PhotoStore>,
}

impl TeamService {
    pub fn new(repo: Arc<dyn TeamRepository>, photos: Arc<dyn PhotoStore>) -> Self {
        Self { repo, photos }
    }

    pub async fn create_member(
        &self,
        request: CreateTeamMemberRequest,
        photo: PhotoUpload,
    ) -> Result<TeamMember> {
        request.validate()?;

        let national_id = normalize_national_id(request.national_id);
        validate_national_id(
            request.date_of_birth,
            national_id.as_deref(),
            Utc::now().date_naive(),
        )?;

        let slug = match request.slug.filter(|s| !s.is_empty()) {
            Some(explicit) => explicit,
            None => {
                let taken: HashSet<String> = self.repo.list_slugs().await?.into_iter().collect();
                first_free_slug(&slug_base(&request.name, "member"), &taken)
            }
        };

        photo.validate()?;
        let photo_path = storage_path("team", &slug, &photo.extension()?);
        self.photos.write(&photo_path, &photo.bytes).await?;

        let now = Utc::now();
        let member = TeamMember {
            id: Uuid::new_v4(),
            name: request.name,
            slug,
            role: request.role,
            bio: request.bio,
            date_of_birth: request.date_of_birth,
            national_id,
            national_id_verified: request.national_id_verified,
            photo_path: Some(photo_path.clone()),
            photo_status: PhotoStatus::Pending,
            display_order: request.display_order,
            is_active: request.is_active,
            created_at: now,
            updated_at: now,
        };

        let member = match self.repo.create(member).await {
            Ok(member) => member,
            Err(err) => {
                // The insert failed (most likely a unique-index race);
                // don't leave the uploaded file orphaned on disk.
                let _ = self.photos.delete(&photo_path).await;
                return Err(err);
            }
        };

        Ok(self.optimize_photo(member).await)
    }

    pub async fn update_member(
        &self,
        id: Uuid,
        request: UpdateTeamMemberRequest,
        new_photo: Option<PhotoUpload>,
    ) -> Result<TeamMember> {
        request.validate()?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Team member not found".to_string()))?;

        let national_id = normalize_national_id(request.national_id);
        validate_national_id(
            request.date_of_birth,
            national_id.as_deref(),
            Utc::now().date_naive(),
        )?;

        let member = TeamMember {
            name: request.name,
            role: request.role,
            bio: request.bio,
            date_of_birth: request.date_of_birth,
            national_id,
            national_id_verified: request.national_id_verified,
            display_order: request.display_order,
            is_active: request.is_active,
            ..existing.clone()
        };

        let mut member = self.repo.update(member).await?;

        if let Some(photo) = new_photo {
            photo.validate()?;
            let new_path = storage_path("team", &member.slug, &photo.extension()?);

            // The previous file goes away as part of the replacement; a
            // file already missing from disk is not an error.
            if let Some(old_path) = &existing.photo_path {
                if old_path != &new_path {
                    self.photos.delete(old_path).await?;
                }
            }

            self.photos.write(&new_path, &photo.bytes).await?;
            self.repo
                .set_photo(member.id, Some(&new_path), PhotoStatus::Pending)
                .await?;

            member.photo_path = Some(new_path);
            member.photo_status = PhotoStatus::Pending;
            member = self.optimize_photo(member).await;
        }

        Ok(member)
    }

    /// Removes the record, then its photo file. The file is only touched
    /// once the row deletion has succeeded, so a failed delete cannot
    /// leave a record pointing at a vanished photo.
    pub async fn delete_member(&self, id: Uuid) -> Result<()> {
        let member = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Team member not found".to_string()))?;

        self.repo.delete(id).await?;

        if let Some(path) = member.photo_path {
            if let Err(err) = self.photos.delete(&path).await {
                tracing::warn!("Failed to remove photo {} for deleted member: {}", path, err);
            }
        }

        Ok(())
    }

    /// Best-effort optimization pass, run after the record is committed.
    /// Failure keeps the original bytes and marks the asset Unoptimized;
    /// it never fails the save.
    async fn optimize_photo(&self, mut member: TeamMember) -> TeamMember {
        let Some(path) = member.photo_path.clone() else {
            return member;
        };

        let status = match self.try_optimize(&path).await {
            Ok(()) => PhotoStatus::Optimized,
            Err(err) => {
                tracing::warn!("Photo optimization failed for {}: {}", path, err);
                PhotoStatus::Unoptimized
            }
        };

        match self.repo.set_photo_status(member.id, status).await {
            Ok(()) => member.photo_status = status,
            Err(err) => {
                tracing::warn!("Failed to record photo status for {}: {}", member.id, err)
            }
        }

        member
    }

    async fn try_optimize(&self, path: &str) -> Result<()> {
        let bytes = self.photos.read(path).await?;
        let ext = path.rsplit('.').next().unwrap_or("jpg");
        let optimized =
            optimizer::optimize(&bytes, ext).map_err(|e| AppError::Internal(e.to_string()))?;
        self.photos.write(path, &optimized).await
    }
}

/// Empty form fields arrive as Some(""); store NULL instead so the
/// unique index only sees real ids.
fn normalize_national_id(national_id: Option<String>) -> Option<String> {
    national_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

/// The age-gated national-id rule. Pure; callers run it before every
/// persist. Members of unknown age only get the length check.
pub fn validate_national_id(
    date_of_birth: Option<NaiveDate>,
    national_id: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    match date_of_birth.map(|dob| age_on(dob, today)) {
        Some(age) if age >= NATIONAL_ID_AGE => match national_id {
            None => Err(AppError::Validation("national_id required".to_string())),
            Some(id) if id.len() < NATIONAL_ID_MIN_LEN => {
                Err(AppError::Validation("national_id too short".to_string()))
            }
            Some(_) => Ok(()),
        },
        Some(_) => match national_id {
            Some(_) => Err(AppError::Validation(
                "national_id not allowed under 18".to_string(),
            )),
            None => Ok(()),
        },
        None => match national_id {
            Some(id) if id.len() < NATIONAL_ID_MIN_LEN => {
                Err(AppError::Validation("national_id too short".to_string()))
            }
            _ => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 6, 15)
    }

    #[test]
    fn adult_without_id_is_rejected() {
        let err = validate_national_id(Some(date(1990, 1, 1)), None, today()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "national_id required"));
    }

    #[test]
    fn adult_with_short_id_is_rejected() {
        let err = validate_national_id(Some(date(1990, 1, 1)), Some("1234"), today()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "national_id too short"));
    }

    #[test]
    fn adult_with_valid_id_passes() {
        assert!(validate_national_id(Some(date(1990, 1, 1)), Some("AB12345"), today()).is_ok());
    }

    #[test]
    fn minor_with_id_is_rejected() {
        let err =
            validate_national_id(Some(date(2010, 1, 1)), Some("AB12345"), today()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "national_id not allowed under 18"));
    }

    #[test]
    fn minor_without_id_passes() {
        assert!(validate_national_id(Some(date(2010, 1, 1)), None, today()).is_ok());
    }

    #[test]
    fn eighteenth_birthday_requires_id() {
        // 17 the day before, 18 on the day itself
        assert!(validate_national_id(Some(date(2007, 6, 15)), Some("X"), date(2025, 6, 14)).is_err());
        assert!(validate_national_id(Some(date(2007, 6, 15)), None, date(2025, 6, 15)).is_err());
        assert!(
            validate_national_id(Some(date(2007, 6, 15)), Some("AB123"), date(2025, 6, 15)).is_ok()
        );
    }

    #[test]
    fn unknown_age_only_checks_length() {
        assert!(validate_national_id(None, None, today()).is_ok());
        assert!(validate_national_id(None, Some("AB123"), today()).is_ok());
        assert!(validate_national_id(None, Some("123"), today()).is_err());
    }

    #[test]
    fn blank_id_normalizes_to_none() {
        assert_eq!(normalize_national_id(Some("  ".to_string())), None);
        assert_eq!(normalize_national_id(Some(String::new())), None);
        assert_eq!(
            normalize_national_id(Some(" AB123 ".to_string())),
            Some("AB123".to_string())
        );
    }
}
