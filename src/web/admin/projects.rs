use askama::Template;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::{CreateProjectRequest, ProjectStatus, UpdateProjectRequest},
    error::{AppError, Result},
    web::{
        forms::MultipartForm,
        state::AppState,
        templates::{media_url, HtmlTemplate},
    },
};

#[derive(Clone)]
pub struct AdminProjectRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub status: String,
    pub location: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub image_url: String,
    pub views: i64,
    pub created_at: String,
}

#[derive(Template)]
#[template(path = "admin/projects.html")]
pub struct AdminProjectsTemplate {
    pub projects: Vec<AdminProjectRow>,
    pub search_query: String,
    pub status_filter: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminProjectsQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

pub async fn project_list(
    State(state): State<AppState>,
    Query(query): Query<AdminProjectsQuery>,
) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;

    let search_query = query.q.unwrap_or_default().to_lowercase();
    let status_filter = query.status.unwrap_or_default();

    let categories = ctx.category_repo.list().await?;
    let category_name = |id: Option<Uuid>| -> String {
        id.and_then(|id| categories.iter().find(|c| c.id == id))
            .map(|c| c.name.clone())
            .unwrap_or_default()
    };

    let projects = ctx
        .project_repo
        .list(1000, 0)
        .await?
        .into_iter()
        .filter(|p| {
            if !search_query.is_empty() {
                let matches = p.title.to_lowercase().contains(&search_query)
                    || p.location.to_lowercase().contains(&search_query)
                    || p.short_description.to_lowercase().contains(&search_query);
                if !matches {
                    return false;
                }
            }
            if !status_filter.is_empty() && p.status.as_str() != status_filter {
                return false;
            }
            true
        })
        .map(|p| AdminProjectRow {
            id: p.id.to_string(),
            title: p.title.clone(),
            category: category_name(p.category_id),
            status: p.status.as_str().to_string(),
            location: p.location.clone(),
            is_featured: p.is_featured,
            is_active: p.is_active,
            image_url: media_url(&p.image_path),
            views: p.views,
            created_at: p.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    Ok(HtmlTemplate(AdminProjectsTemplate {
        projects,
        search_query,
        status_filter,
    }))
}

#[derive(Debug, Deserialize)]
pub struct BulkActionForm {
    pub action: String,
    #[serde(default)]
    pub ids: Vec<Uuid>,
}

pub async fn bulk_action(
    State(state): State<AppState>,
    Form(form): Form<BulkActionForm>,
) -> Result<impl IntoResponse> {
    let service = &state.service_context.project_service;

    let affected = match form.action.as_str() {
        "feature" => service.feature_projects(&form.ids, true).await?,
        "unfeature" => service.feature_projects(&form.ids, false).await?,
        "complete" => service.complete_projects(&form.ids).await?,
        other => {
            return Err(AppError::BadRequest(format!("Unknown bulk action: {}", other)));
        }
    };

    tracing::info!("Bulk action {} applied to {} projects", form.action, affected);

    Ok(Redirect::to("/admin/projects"))
}

#[derive(Clone)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
}

#[derive(Template)]
#[template(path = "admin/project_form.html")]
pub struct ProjectFormTemplate {
    pub heading: String,
    pub action: String,
    pub is_edit: bool,
    pub categories: Vec<CategoryOption>,
    // current values, empty for a new project
    pub title: String,
    pub category_id: String,
    pub short_description: String,
    pub full_description: String,
    pub location: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub beneficiaries: i64,
    pub budget: String,
    pub funds_raised: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub display_order: i64,
    pub image_url: String,
    pub gallery: Vec<AdminGalleryRow>,
    pub updates: Vec<AdminUpdateRow>,
}

#[derive(Clone)]
pub struct AdminGalleryRow {
    pub image_url: String,
    pub caption: String,
}

#[derive(Clone)]
pub struct AdminUpdateRow {
    pub title: String,
    pub date: String,
    pub is_milestone: bool,
}

async fn category_options(state: &AppState) -> Result<Vec<CategoryOption>> {
    Ok(state
        .service_context
        .category_repo
        .list()
        .await?
        .into_iter()
        .map(|c| CategoryOption {
            id: c.id.to_string(),
            name: c.name,
        })
        .collect())
}

pub async fn new_project_page(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(HtmlTemplate(ProjectFormTemplate {
        heading: "New Project".to_string(),
        action: "/admin/projects/new".to_string(),
        is_edit: false,
        categories: category_options(&state).await?,
        title: String::new(),
        category_id: String::new(),
        short_description: String::new(),
        full_description: String::new(),
        location: String::new(),
        status: "Planning".to_string(),
        start_date: String::new(),
        end_date: String::new(),
        beneficiaries: 0,
        budget: String::new(),
        funds_raised: String::new(),
        is_featured: false,
        is_active: true,
        display_order: 0,
        image_url: String::new(),
        gallery: vec![],
        updates: vec![],
    }))
}

fn parse_status(form: &MultipartForm) -> Result<ProjectStatus> {
    let raw = form.text("status");
    ProjectStatus::parse(&raw)
        .ok_or_else(|| AppError::Validation(format!("Invalid project status: {}", raw)))
}

pub async fn create_project(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = MultipartForm::parse(multipart).await?;

    let request = CreateProjectRequest {
        title: form.required_text("title")?,
        slug: form.optional_text("slug"),
        category_id: form.optional_uuid("category_id")?,
        short_description: form.text("short_description"),
        full_description: form.text("full_description"),
        location: form.text("location"),
        status: parse_status(&form)?,
        start_date: form.optional_date("start_date")?,
        end_date: form.optional_date("end_date")?,
        beneficiaries: form.integer("beneficiaries", 0)?,
        budget_cents: form.optional_integer("budget_cents")?,
        funds_raised_cents: form.integer("funds_raised_cents", 0)?,
        is_featured: form.checkbox("is_featured"),
        is_active: form.checkbox("is_active"),
        display_order: form.integer("display_order", 0)?,
    };
    let image = form.required_file("image")?;

    let project = state
        .service_context
        .project_service
        .create_project(request, image)
        .await?;

    Ok(Redirect::to(&format!("/admin/projects/{}", project.id)))
}

pub async fn edit_project_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;

    let project = ctx
        .project_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let gallery = ctx
        .project_repo
        .list_images(id)
        .await?
        .into_iter()
        .map(|img| AdminGalleryRow {
            image_url: media_url(&img.image_path),
            caption: img.caption,
        })
        .collect();

    let updates = ctx
        .project_repo
        .list_updates(id)
        .await?
        .into_iter()
        .map(|u| AdminUpdateRow {
            title: u.title,
            date: u.created_at.format("%Y-%m-%d").to_string(),
            is_milestone: u.is_milestone,
        })
        .collect();

    Ok(HtmlTemplate(ProjectFormTemplate {
        heading: format!("Edit: {}", project.title),
        action: format!("/admin/projects/{}", project.id),
        is_edit: true,
        categories: category_options(&state).await?,
        title: project.title.clone(),
        category_id: project
            .category_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        short_description: project.short_description.clone(),
        full_description: project.full_description.clone(),
        location: project.location.clone(),
        status: project.status.as_str().to_string(),
        start_date: project
            .start_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
        end_date: project.end_date.map(|d| d.to_string()).unwrap_or_default(),
        beneficiaries: project.beneficiaries,
        budget: project
            .budget_cents
            .map(|c| c.to_string())
            .unwrap_or_default(),
        funds_raised: project.funds_raised_cents.to_string(),
        is_featured: project.is_featured,
        is_active: project.is_active,
        display_order: project.display_order,
        image_url: media_url(&project.image_path),
        gallery,
        updates,
    }))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = MultipartForm::parse(multipart).await?;

    let request = UpdateProjectRequest {
        title: form.required_text("title")?,
        category_id: form.optional_uuid("category_id")?,
        short_description: form.text("short_description"),
        full_description: form.text("full_description"),
        location: form.text("location"),
        status: parse_status(&form)?,
        start_date: form.optional_date("start_date")?,
        end_date: form.optional_date("end_date")?,
        beneficiaries: form.integer("beneficiaries", 0)?,
        budget_cents: form.optional_integer("budget_cents")?,
        funds_raised_cents: form.integer("funds_raised_cents", 0)?,
        is_featured: form.checkbox("is_featured"),
        is_active: form.checkbox("is_active"),
        display_order: form.integer("display_order", 0)?,
    };

    state
        .service_context
        .project_service
        .update_project(id, request, form.file("image"))
        .await?;

    Ok(Redirect::to(&format!("/admin/projects/{}", id)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.service_context.project_service.delete_project(id).await?;
    Ok(Redirect::to("/admin/projects"))
}

pub async fn add_gallery_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = MultipartForm::parse(multipart).await?;

    state
        .service_context
        .project_service
        .add_gallery_image(
            id,
            form.required_file("image")?,
            form.text("caption"),
            form.integer("display_order", 0)?,
        )
        .await?;

    Ok(Redirect::to(&format!("/admin/projects/{}", id)))
}

pub async fn add_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = MultipartForm::parse(multipart).await?;

    state
        .service_context
        .project_service
        .add_update(
            id,
            form.required_text("title")?,
            form.text("content"),
            form.checkbox("is_milestone"),
            form.file("image"),
        )
        .await?;

    Ok(Redirect::to(&format!("/admin/projects/{}", id)))
}
