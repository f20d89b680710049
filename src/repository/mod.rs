use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod blog_repository;
pub mod category_repository;
pub mod event_repository;
pub mod gallery_repository;
pub mod project_repository;
pub mod team_repository;

pub use blog_repository::SqliteBlogRepository;
pub use category_repository::SqliteCategoryRepository;
pub use event_repository::SqliteEventRepository;
pub use gallery_repository::SqliteGalleryRepository;
pub use project_repository::SqliteProjectRepository;
pub use team_repository::SqliteTeamRepository;

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create(&self, member: TeamMember) -> Result<TeamMember>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TeamMember>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<TeamMember>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<TeamMember>>;
    async fn list_active(&self) -> Result<Vec<TeamMember>>;
    /// Snapshot of every assigned slug, for collision-free slug selection.
    async fn list_slugs(&self) -> Result<Vec<String>>;
    async fn update(&self, member: TeamMember) -> Result<TeamMember>;
    async fn set_photo(&self, id: Uuid, photo_path: Option<&str>, status: PhotoStatus) -> Result<()>;
    async fn set_photo_status(&self, id: Uuid, status: PhotoStatus) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: Project) -> Result<Project>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Project>>;
    async fn list_public(
        &self,
        category_id: Option<Uuid>,
        status: Option<ProjectStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>>;
    async fn count_public(
        &self,
        category_id: Option<Uuid>,
        status: Option<ProjectStatus>,
    ) -> Result<i64>;
    async fn list_featured(&self, limit: i64) -> Result<Vec<Project>>;
    async fn list_related(
        &self,
        category_id: Option<Uuid>,
        exclude_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Project>>;
    async fn list_slugs(&self) -> Result<Vec<String>>;
    async fn update(&self, project: Project) -> Result<Project>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn increment_views(&self, id: Uuid) -> Result<()>;
    async fn set_featured(&self, ids: &[Uuid], featured: bool) -> Result<u64>;
    async fn set_status(&self, ids: &[Uuid], status: ProjectStatus) -> Result<u64>;

    async fn add_image(&self, image: ProjectImage) -> Result<ProjectImage>;
    async fn list_images(&self, project_id: Uuid) -> Result<Vec<ProjectImage>>;
    async fn delete_image(&self, id: Uuid) -> Result<()>;

    async fn add_update(&self, update: ProjectUpdate) -> Result<ProjectUpdate>;
    async fn list_updates(&self, project_id: Uuid) -> Result<Vec<ProjectUpdate>>;

    async fn create_partner(&self, partner: ProjectPartner) -> Result<ProjectPartner>;
    async fn link_partner(&self, project_id: Uuid, partner_id: Uuid) -> Result<()>;
    async fn list_partners_for(&self, project_id: Uuid) -> Result<Vec<ProjectPartner>>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: ProjectCategory) -> Result<ProjectCategory>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectCategory>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProjectCategory>>;
    async fn list(&self) -> Result<Vec<ProjectCategory>>;
    async fn list_slugs(&self) -> Result<Vec<String>>;
    async fn count_projects(&self, category_id: Uuid) -> Result<i64>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, post: BlogPost) -> Result<BlogPost>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<BlogPost>>;
    async fn list_published(&self, limit: i64, offset: i64) -> Result<Vec<BlogPost>>;
    async fn list_slugs(&self) -> Result<Vec<String>>;
    async fn update(&self, post: BlogPost) -> Result<BlogPost>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: Event) -> Result<Event>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Event>>;
    async fn list_upcoming(&self, limit: i64) -> Result<Vec<Event>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn create(&self, image: GalleryImage) -> Result<GalleryImage>;
    async fn list(&self) -> Result<Vec<GalleryImage>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}
