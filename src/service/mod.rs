pub mod project_service;
pub mod slug;
pub mod team_service;

use std::sync::Arc;

use crate::media::PhotoStore;
use crate::repository::*;

pub use project_service::ProjectService;
pub use team_service::TeamService;

pub struct ServiceContext {
    pub team_repo: Arc<dyn TeamRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub blog_repo: Arc<dyn BlogRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub gallery_repo: Arc<dyn GalleryRepository>,
    pub photo_store: Arc<dyn PhotoStore>,
    pub team_service: Arc<TeamService>,
    pub project_service: Arc<ProjectService>,
}

impl ServiceContext {
    pub fn new(
        team_repo: Arc<dyn TeamRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        blog_repo: Arc<dyn BlogRepository>,
        event_repo: Arc<dyn EventRepository>,
        gallery_repo: Arc<dyn GalleryRepository>,
        photo_store: Arc<dyn PhotoStore>,
    ) -> Self {
        let team_service = Arc::new(TeamService::new(team_repo.clone(), photo_store.clone()));
        let project_service = Arc::new(ProjectService::new(
            project_repo.clone(),
            category_repo.clone(),
            photo_store.clone(),
        ));

        Self {
            team_repo,
            project_repo,
            category_repo,
            blog_repo,
            event_repo,
            gallery_repo,
            photo_store,
            team_service,
            project_service,
        }
    }
}
