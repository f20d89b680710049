use askama::Template;
use axum::{extract::State, response::IntoResponse};

use crate::{
    error::Result,
    web::{
        site::events::EventItem,
        site::projects::ProjectCard,
        state::AppState,
        templates::{media_url, HtmlTemplate},
    },
};

pub struct PostCard {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub cover_url: String,
    pub published: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub featured_projects: Vec<ProjectCard>,
    pub recent_posts: Vec<PostCard>,
    pub upcoming_events: Vec<EventItem>,
}

pub async fn home(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;

    let featured_projects = ctx
        .project_repo
        .list_featured(3)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let recent_posts = ctx
        .blog_repo
        .list_published(3, 0)
        .await?
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

    let upcoming_events = ctx
        .event_repo
        .list_upcoming(3)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HtmlTemplate(HomeTemplate {
        featured_projects,
        recent_posts,
        upcoming_events,
    }))
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

pub async fn about() -> impl IntoResponse {
    HtmlTemplate(AboutTemplate)
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate;

pub async fn contact() -> impl IntoResponse {
    HtmlTemplate(ContactTemplate)
}

#[derive(Template)]
#[template(path = "donate.html")]
pub struct DonateTemplate;

pub async fn donate() -> impl IntoResponse {
    HtmlTemplate(DonateTemplate)
}

#[derive(Template)]
#[template(path = "volunteer.html")]
pub struct VolunteerTemplate;

pub async fn volunteer() -> impl IntoResponse {
    HtmlTemplate(VolunteerTemplate)
}
