use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    domain::{Project, ProjectStatus},
    error::{AppError, Result},
    web::{
        state::AppState,
        templates::{media_url, HtmlTemplate},
    },
};

const PROJECTS_PER_PAGE: i64 = 9;

#[derive(Clone)]
pub struct ProjectCard {
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub image_url: String,
    pub location: String,
    pub status: String,
    pub funding_percentage: i64,
    pub beneficiaries: i64,
}

impl From<Project> for ProjectCard {
    fn from(project: Project) -> Self {
        let funding_percentage = project.funding_percentage();
        Self {
            title: project.title,
            slug: project.slug,
            short_description: project.short_description,
            image_url: media_url(&project.image_path),
            location: project.location,
            status: project.status.as_str().to_string(),
            funding_percentage,
            beneficiaries: project.beneficiaries,
        }
    }
}

#[derive(Clone)]
pub struct CategoryLink {
    pub name: String,
    pub slug: String,
    pub icon: String,
}

#[derive(Template)]
#[template(path = "projects.html")]
pub struct ProjectListTemplate {
    pub projects: Vec<ProjectCard>,
    pub categories: Vec<CategoryLink>,
    pub selected_category: String,
    pub selected_status: String,
    pub current_page: i64,
    pub total_pages: i64,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: i64,
    pub next_page: i64,
}

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
}

pub async fn project_list(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;

    let selected_category = query.category.unwrap_or_default();
    let selected_status = query.status.unwrap_or_default();

    let category = if selected_category.is_empty() {
        None
    } else {
        ctx.category_repo.find_by_slug(&selected_category).await?
    };
    let category_id = category.map(|c| c.id);
    let status = ProjectStatus::parse(&selected_status);

    let total = ctx.project_repo.count_public(category_id, status).await?;
    let total_pages = ((total + PROJECTS_PER_PAGE - 1) / PROJECTS_PER_PAGE).max(1);
    let current_page = query.page.unwrap_or(1).clamp(1, total_pages);
    let offset = (current_page - 1) * PROJECTS_PER_PAGE;

    let projects = ctx
        .project_repo
        .list_public(category_id, status, PROJECTS_PER_PAGE, offset)
        .await?;

    let categories = ctx
        .category_repo
        .list()
        .await?
        .into_iter()
        .map(|c| CategoryLink {
            name: c.name,
            slug: c.slug,
            icon: c.icon,
        })
        .collect();

    Ok(HtmlTemplate(ProjectListTemplate {
        projects: projects.into_iter().map(Into::into).collect(),
        categories,
        selected_category,
        selected_status,
        current_page,
        total_pages,
        has_prev: current_page > 1,
        has_next: current_page < total_pages,
        prev_page: current_page - 1,
        next_page: current_page + 1,
    }))
}

pub struct GalleryItem {
    pub image_url: String,
    pub caption: String,
}

pub struct UpdateItem {
    pub title: String,
    pub content: String,
    pub date: String,
    pub is_milestone: bool,
    pub image_url: String,
}

pub struct PartnerItem {
    pub name: String,
    pub logo_url: String,
    pub website: String,
}

#[derive(Template)]
#[template(path = "project_detail.html")]
pub struct ProjectDetailTemplate {
    pub title: String,
    pub full_description: String,
    pub image_url: String,
    pub location: String,
    pub status: String,
    pub category_name: String,
    pub start_date: String,
    pub end_date: String,
    pub beneficiaries: i64,
    pub funding_percentage: i64,
    pub budget: String,
    pub funds_raised: String,
    pub views: i64,
    pub gallery: Vec<GalleryItem>,
    pub updates: Vec<UpdateItem>,
    pub partners: Vec<PartnerItem>,
    pub related: Vec<ProjectCard>,
}

fn format_dollars(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, (cents % 100).abs())
}

pub async fn project_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;

    let project = ctx
        .project_repo
        .find_by_slug(&slug)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    ctx.project_repo.increment_views(project.id).await?;

    let category_name = match project.category_id {
        Some(id) => ctx
            .category_repo
            .find_by_id(id)
            .await?
            .map(|c| c.name)
            .unwrap_or_default(),
        None => String::new(),
    };

    let gallery = ctx
        .project_repo
        .list_images(project.id)
        .await?
        .into_iter()
        .map(|img| GalleryItem {
            image_url: media_url(&img.image_path),
            caption: img.caption,
        })
        .collect();

    let updates = ctx
        .project_repo
        .list_updates(project.id)
        .await?
        .into_iter()
        .map(|u| UpdateItem {
            title: u.title,
            content: u.content,
            date: u.created_at.format("%B %e, %Y").to_string(),
            is_milestone: u.is_milestone,
            image_url: u.image_path.as_deref().map(media_url).unwrap_or_default(),
        })
        .collect();

    let partners = ctx
        .project_repo
        .list_partners_for(project.id)
        .await?
        .into_iter()
        .map(|p| PartnerItem {
            name: p.name,
            logo_url: media_url(&p.logo_path),
            website: p.website.unwrap_or_default(),
        })
        .collect();

    let related = ctx
        .project_repo
        .list_related(project.category_id, project.id, 3)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HtmlTemplate(ProjectDetailTemplate {
        title: project.title.clone(),
        full_description: project.full_description.clone(),
        image_url: media_url(&project.image_path),
        location: project.location.clone(),
        status: project.status.as_str().to_string(),
        category_name,
        start_date: project
            .start_date
            .map(|d| d.format("%B %e, %Y").to_string())
            .unwrap_or_default(),
        end_date: project
            .end_date
            .map(|d| d.format("%B %e, %Y").to_string())
            .unwrap_or_default(),
        beneficiaries: project.beneficiaries,
        funding_percentage: project.funding_percentage(),
        budget: project.budget_cents.map(format_dollars).unwrap_or_default(),
        funds_raised: format_dollars(project.funds_raised_cents),
        // the count shown includes the visit being rendered
        views: project.views + 1,
        gallery,
        updates,
        partners,
        related,
    }))
}
