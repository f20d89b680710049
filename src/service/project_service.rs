use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{
        CreateCategoryRequest, CreateProjectRequest, Project, ProjectCategory, ProjectImage,
        ProjectStatus, ProjectUpdate, UpdateProjectRequest,
    },
    error::{AppError, Result},
    media::{storage_path, PhotoStore, PhotoUpload},
    repository::{CategoryRepository, ProjectRepository},
    service::slug::{first_free_slug, slug_base},
};

pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
    categories: Arc<dyn CategoryRepository>,
    photos: Arc<dyn PhotoStore>,
}

impl ProjectService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        categories: Arc<dyn CategoryRepository>,
        photos: Arc<dyn PhotoStore>,
    ) -> Self {
        Self {
            projects,
            categories,
            photos,
        }
    }

    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
        image: PhotoUpload,
    ) -> Result<Project> {
        request.validate()?;

        let slug = match request.slug.filter(|s| !s.is_empty()) {
            Some(explicit) => explicit,
            None => {
                let taken: HashSet<String> =
                    self.projects.list_slugs().await?.into_iter().collect();
                first_free_slug(&slug_base(&request.title, "project"), &taken)
            }
        };

        image.validate()?;
        let image_path = storage_path("projects", &slug, &image.extension()?);
        self.photos.write(&image_path, &image.bytes).await?;

        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            title: request.title,
            slug,
            category_id: request.category_id,
            short_description: request.short_description,
            full_description: request.full_description,
            image_path: image_path.clone(),
            location: request.location,
            status: request.status,
            start_date: request.start_date,
            end_date: request.end_date,
            beneficiaries: request.beneficiaries,
            budget_cents: request.budget_cents,
            funds_raised_cents: request.funds_raised_cents,
            is_featured: request.is_featured,
            is_active: request.is_active,
            display_order: request.display_order,
            views: 0,
            created_at: now,
            updated_at: now,
        };

        match self.projects.create(project).await {
            Ok(project) => Ok(project),
            Err(err) => {
                let _ = self.photos.delete(&image_path).await;
                Err(err)
            }
        }
    }

    pub async fn update_project(
        &self,
        id: Uuid,
        request: UpdateProjectRequest,
        new_image: Option<PhotoUpload>,
    ) -> Result<Project> {
        request.validate()?;

        let existing = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let mut image_path = existing.image_path.clone();
        if let Some(image) = new_image {
            image.validate()?;
            let new_path = storage_path("projects", &existing.slug, &image.extension()?);
            self.photos.delete(&existing.image_path).await?;
            self.photos.write(&new_path, &image.bytes).await?;
            image_path = new_path;
        }

        let project = Project {
            title: request.title,
            category_id: request.category_id,
            short_description: request.short_description,
            full_description: request.full_description,
            image_path,
            location: request.location,
            status: request.status,
            start_date: request.start_date,
            end_date: request.end_date,
            beneficiaries: request.beneficiaries,
            budget_cents: request.budget_cents,
            funds_raised_cents: request.funds_raised_cents,
            is_featured: request.is_featured,
            is_active: request.is_active,
            display_order: request.display_order,
            ..existing
        };

        self.projects.update(project).await
    }

    /// Removes the project row (gallery rows cascade), then its stored
    /// files. File removal failures are logged, never propagated.
    pub async fn delete_project(&self, id: Uuid) -> Result<()> {
        let project = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let gallery = self.projects.list_images(id).await?;

        self.projects.delete(id).await?;

        for path in std::iter::once(project.image_path)
            .chain(gallery.into_iter().map(|img| img.image_path))
        {
            if let Err(err) = self.photos.delete(&path).await {
                tracing::warn!("Failed to remove image {} for deleted project: {}", path, err);
            }
        }

        Ok(())
    }

    pub async fn add_gallery_image(
        &self,
        project_id: Uuid,
        image: PhotoUpload,
        caption: String,
        display_order: i64,
    ) -> Result<ProjectImage> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        image.validate()?;
        let image_path = storage_path("projects/gallery", &project.slug, &image.extension()?);
        self.photos.write(&image_path, &image.bytes).await?;

        self.projects
            .add_image(ProjectImage {
                id: Uuid::new_v4(),
                project_id,
                image_path,
                caption,
                display_order,
                uploaded_at: Utc::now(),
            })
            .await
    }

    pub async fn add_update(
        &self,
        project_id: Uuid,
        title: String,
        content: String,
        is_milestone: bool,
        image: Option<PhotoUpload>,
    ) -> Result<ProjectUpdate> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let image_path = match image {
            Some(image) => {
                image.validate()?;
                let path = storage_path("projects/updates", &project.slug, &image.extension()?);
                self.photos.write(&path, &image.bytes).await?;
                Some(path)
            }
            None => None,
        };

        self.projects
            .add_update(ProjectUpdate {
                id: Uuid::new_v4(),
                project_id,
                title,
                content,
                image_path,
                is_milestone,
                created_at: Utc::now(),
            })
            .await
    }

    pub async fn create_category(&self, request: CreateCategoryRequest) -> Result<ProjectCategory> {
        request.validate()?;

        let taken: HashSet<String> = self.categories.list_slugs().await?.into_iter().collect();
        let slug = first_free_slug(&slug_base(&request.name, "category"), &taken);

        self.categories
            .create(ProjectCategory {
                id: Uuid::new_v4(),
                name: request.name,
                slug,
                description: request.description,
                icon: request.icon,
                created_at: Utc::now(),
            })
            .await
    }

    pub async fn feature_projects(&self, ids: &[Uuid], featured: bool) -> Result<u64> {
        self.projects.set_featured(ids, featured).await
    }

    pub async fn complete_projects(&self, ids: &[Uuid]) -> Result<u64> {
        self.projects.set_status(ids, ProjectStatus::Completed).await
    }
}
