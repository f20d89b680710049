use askama::Template;
use axum::{extract::State, response::IntoResponse};

use crate::{
    error::Result,
    web::{
        state::AppState,
        templates::{media_url, HtmlTemplate},
    },
};

pub struct GalleryCard {
    pub image_url: String,
    pub caption: String,
    pub taken_at: String,
}

#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
    pub images: Vec<GalleryCard>,
}

pub async fn gallery_page(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let images = state
        .service_context
        .gallery_repo
        .list()
        .await?
        .into_iter()
        .map(|img| GalleryCard {
            image_url: media_url(&img.image_path),
            caption: img.caption,
            taken_at: img
                .taken_at
                .map(|d| d.format("%B %Y").to_string())
                .unwrap_or_default(),
        })
        .collect();

    Ok(HtmlTemplate(GalleryTemplate { images }))
}
