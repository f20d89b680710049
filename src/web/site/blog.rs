use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    web::{
        site::pages::PostCard,
        state::AppState,
        templates::{media_url, HtmlTemplate},
    },
};

const POSTS_PER_PAGE: i64 = 10;

#[derive(Template)]
#[template(path = "blog_list.html")]
pub struct BlogListTemplate {
    pub posts: Vec<PostCard>,
    pub current_page: i64,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: i64,
    pub next_page: i64,
}

#[derive(Debug, Deserialize)]
pub struct BlogListQuery {
    pub page: Option<i64>,
}

pub async fn blog_list(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> Result<impl IntoResponse> {
    let current_page = query.page.unwrap_or(1).max(1);
    let offset = (current_page - 1) * POSTS_PER_PAGE;

    // Fetch one extra row to know whether another page exists.
    let mut posts = state
        .service_context
        .blog_repo
        .list_published(POSTS_PER_PAGE + 1, offset)
        .await?;

    let has_next = posts.len() as i64 > POSTS_PER_PAGE;
    posts.truncate(POSTS_PER_PAGE as usize);

    let posts = posts
        .into_iter()
        .map(|p| PostCard {
            title: p.title,
            slug: p.slug,
            excerpt: p.excerpt,
            cover_url: p.cover_path.as_deref().map(media_url).unwrap_or_default(),
            published: p
                .published_at
                .map(|dt| dt.format("%B %e, %Y").to_string())
                .unwrap_or_default(),
        })
        .collect();

    Ok(HtmlTemplate(BlogListTemplate {
        posts,
        current_page,
        has_prev: current_page > 1,
        has_next,
        prev_page: current_page - 1,
        next_page: current_page + 1,
    }))
}

#[derive(Template)]
#[template(path = "blog_detail.html")]
pub struct BlogDetailTemplate {
    pub title: String,
    pub body: String,
    pub cover_url: String,
    pub published: String,
}

pub async fn blog_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let post = state
        .service_context
        .blog_repo
        .find_by_slug(&slug)
        .await?
        .filter(|p| p.is_published)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HtmlTemplate(BlogDetailTemplate {
        title: post.title,
        body: post.body,
        cover_url: post.cover_path.as_deref().map(media_url).unwrap_or_default(),
        published: post
            .published_at
            .map(|dt| dt.format("%B %e, %Y").to_string())
            .unwrap_or_default(),
    }))
}
