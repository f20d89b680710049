use std::collections::HashSet;

use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{BlogPost, CreateBlogPostRequest, UpdateBlogPostRequest},
    error::{AppError, Result},
    media::storage_path,
    service::slug::{first_free_slug, slug_base},
    web::{
        forms::MultipartForm,
        state::AppState,
        templates::{media_url, HtmlTemplate},
    },
};

#[derive(Clone)]
pub struct AdminPostRow {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub is_published: bool,
    pub published: String,
    pub created_at: String,
}

#[derive(Template)]
#[template(path = "admin/posts.html")]
pub struct AdminPostsTemplate {
    pub posts: Vec<AdminPostRow>,
}

pub async fn post_list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let posts = state
        .service_context
        .blog_repo
        .list(1000, 0)
        .await?
        .into_iter()
        .map(|p| AdminPostRow {
            id: p.id.to_string(),
            title: p.title,
            slug: p.slug,
            is_published: p.is_published,
            published: p
                .published_at
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            created_at: p.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    Ok(HtmlTemplate(AdminPostsTemplate { posts }))
}

#[derive(Template)]
#[template(path = "admin/post_form.html")]
pub struct PostFormTemplate {
    pub heading: String,
    pub action: String,
    pub is_edit: bool,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub is_published: bool,
    pub cover_url: String,
}

pub async fn new_post_page() -> impl IntoResponse {
    HtmlTemplate(PostFormTemplate {
        heading: "New Post".to_string(),
        action: "/admin/posts/new".to_string(),
        is_edit: false,
        title: String::new(),
        excerpt: String::new(),
        body: String::new(),
        is_published: false,
        cover_url: String::new(),
    })
}

pub async fn create_post(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;
    let form = MultipartForm::parse(multipart).await?;

    let request = CreateBlogPostRequest {
        title: form.required_text("title")?,
        slug: form.optional_text("slug"),
        excerpt: form.text("excerpt"),
        body: form.text("body"),
        is_published: form.checkbox("is_published"),
    };
    request.validate()?;

    let slug = match request.slug.filter(|s| !s.is_empty()) {
        Some(explicit) => explicit,
        None => {
            let taken: HashSet<String> = ctx.blog_repo.list_slugs().await?.into_iter().collect();
            first_free_slug(&slug_base(&request.title, "post"), &taken)
        }
    };

    let cover_path = match form.file("cover") {
        Some(cover) => {
            cover.validate()?;
            let path = storage_path("blog", &slug, &cover.extension()?);
            ctx.photo_store.write(&path, &cover.bytes).await?;
            Some(path)
        }
        None => None,
    };

    let now = Utc::now();
    let post = ctx
        .blog_repo
        .create(BlogPost {
            id: Uuid::new_v4(),
            title: request.title,
            slug,
            excerpt: request.excerpt,
            body: request.body,
            cover_path,
            is_published: request.is_published,
            published_at: request.is_published.then_some(now),
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok(Redirect::to(&format!("/admin/posts/{}", post.id)))
}

pub async fn edit_post_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let post = state
        .service_context
        .blog_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HtmlTemplate(PostFormTemplate {
        heading: format!("Edit: {}", post.title),
        action: format!("/admin/posts/{}", post.id),
        is_edit: true,
        title: post.title.clone(),
        excerpt: post.excerpt.clone(),
        body: post.body.clone(),
        is_published: post.is_published,
        cover_url: post.cover_path.as_deref().map(media_url).unwrap_or_default(),
    }))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;
    let form = MultipartForm::parse(multipart).await?;

    let request = UpdateBlogPostRequest {
        title: form.required_text("title")?,
        excerpt: form.text("excerpt"),
        body: form.text("body"),
        is_published: form.checkbox("is_published"),
    };
    request.validate()?;

    let existing = ctx
        .blog_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let mut cover_path = existing.cover_path.clone();
    if let Some(cover) = form.file("cover") {
        cover.validate()?;
        let new_path = storage_path("blog", &existing.slug, &cover.extension()?);
        if let Some(old) = &existing.cover_path {
            ctx.photo_store.delete(old).await?;
        }
        ctx.photo_store.write(&new_path, &cover.bytes).await?;
        cover_path = Some(new_path);
    }

    // Stamp published_at the first time a post goes live.
    let published_at = match (existing.published_at, request.is_published) {
        (Some(at), _) => Some(at),
        (None, true) => Some(Utc::now()),
        (None, false) => None,
    };

    ctx.blog_repo
        .update(BlogPost {
            title: request.title,
            excerpt: request.excerpt,
            body: request.body,
            cover_path,
            is_published: request.is_published,
            published_at,
            ..existing
        })
        .await?;

    Ok(Redirect::to(&format!("/admin/posts/{}", id)))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;

    let post = ctx
        .blog_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    ctx.blog_repo.delete(id).await?;

    if let Some(path) = post.cover_path {
        if let Err(err) = ctx.photo_store.delete(&path).await {
            tracing::warn!("Failed to remove cover {} for deleted post: {}", path, err);
        }
    }

    Ok(Redirect::to("/admin/posts"))
}
