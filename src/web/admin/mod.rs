mod categories;
mod posts;
mod projects;
mod team;

use askama::Template;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use crate::{
    error::Result,
    web::{state::AppState, templates::HtmlTemplate},
};

/// Admin surface. Access control is handled by the deployment in front
/// of /admin (reverse-proxy auth); nothing here assumes a user identity.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        // Projects
        .route("/projects", get(projects::project_list))
        .route("/projects/bulk", post(projects::bulk_action))
        .route("/projects/new", get(projects::new_project_page))
        .route("/projects/new", post(projects::create_project))
        .route("/projects/:id", get(projects::edit_project_page))
        .route("/projects/:id", post(projects::update_project))
        .route("/projects/:id/delete", post(projects::delete_project))
        .route("/projects/:id/images", post(projects::add_gallery_image))
        .route("/projects/:id/updates", post(projects::add_update))
        // Categories
        .route("/categories", get(categories::category_list))
        .route("/categories/new", post(categories::create_category))
        .route("/categories/:id/delete", post(categories::delete_category))
        // Team
        .route("/team", get(team::team_list))
        .route("/team/new", get(team::new_member_page))
        .route("/team/new", post(team::create_member))
        .route("/team/:id", get(team::edit_member_page))
        .route("/team/:id", post(team::update_member))
        .route("/team/:id/delete", post(team::delete_member))
        // Blog posts
        .route("/posts", get(posts::post_list))
        .route("/posts/new", get(posts::new_post_page))
        .route("/posts/new", post(posts::create_post))
        .route("/posts/:id", get(posts::edit_post_page))
        .route("/posts/:id", post(posts::update_post))
        .route("/posts/:id/delete", post(posts::delete_post))
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub project_count: usize,
    pub team_count: usize,
    pub post_count: usize,
    pub event_count: usize,
}

pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;

    let project_count = ctx.project_repo.list(1000, 0).await?.len();
    let team_count = ctx.team_repo.list(1000, 0).await?.len();
    let post_count = ctx.blog_repo.list(1000, 0).await?.len();
    let event_count = ctx.event_repo.list(1000, 0).await?.len();

    Ok(HtmlTemplate(DashboardTemplate {
        project_count,
        team_count,
        post_count,
        event_count,
    }))
}
