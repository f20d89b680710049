use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use betterhome::{
    config::Settings,
    media::FsPhotoStore,
    repository,
    service::ServiceContext,
    web::{self, state::AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "betterhome=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!(
        "Starting BetterHome server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize repositories
    let team_repo = Arc::new(repository::SqliteTeamRepository::new(db_pool.clone()));
    let project_repo = Arc::new(repository::SqliteProjectRepository::new(db_pool.clone()));
    let category_repo = Arc::new(repository::SqliteCategoryRepository::new(db_pool.clone()));
    let blog_repo = Arc::new(repository::SqliteBlogRepository::new(db_pool.clone()));
    let event_repo = Arc::new(repository::SqliteEventRepository::new(db_pool.clone()));
    let gallery_repo = Arc::new(repository::SqliteGalleryRepository::new(db_pool.clone()));

    // Photo storage on the local filesystem, served under /media
    let photo_store = Arc::new(FsPhotoStore::new(settings.media.root.clone()));

    // Create service context
    let service_context = Arc::new(ServiceContext::new(
        team_repo,
        project_repo,
        category_repo,
        blog_repo,
        event_repo,
        gallery_repo,
        photo_store,
    ));

    let settings = Arc::new(settings);
    let app_state = AppState::new(service_context, settings.clone());
    let app = web::create_web_routes(app_state);

    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        settings.server.host, settings.server.port
    ))
    .await?;

    tracing::info!(
        "Server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
