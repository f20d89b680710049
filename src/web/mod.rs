pub mod admin;
pub mod forms;
pub mod site;
pub mod state;
pub mod templates;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::media::MAX_FILE_SIZE;
use state::AppState;

pub fn create_web_routes(state: AppState) -> Router {
    let media_root = state.settings.media.root.clone();
    let static_dir = state.settings.media.static_dir.clone();

    Router::new()
        .merge(site::routes())
        .nest("/admin", admin::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .nest_service("/media", ServeDir::new(media_root))
        // multipart bodies carry photo uploads; leave headroom over the
        // per-file limit for the rest of the form
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
