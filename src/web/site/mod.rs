mod blog;
mod events;
mod gallery;
mod pages;
mod projects;
mod team;

use axum::{routing::get, Router};

use crate::web::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .route("/donate", get(pages::donate))
        .route("/volunteer", get(pages::volunteer))
        .route("/projects", get(projects::project_list))
        .route("/projects/:slug", get(projects::project_detail))
        .route("/team", get(team::team_page))
        .route("/blog", get(blog::blog_list))
        .route("/blog/:slug", get(blog::blog_detail))
        .route("/events", get(events::events_page))
        .route("/gallery", get(gallery::gallery_page))
}
