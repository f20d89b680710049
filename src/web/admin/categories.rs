use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::CreateCategoryRequest,
    error::Result,
    web::{state::AppState, templates::HtmlTemplate},
};

#[derive(Clone)]
pub struct AdminCategoryRow {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub project_count: i64,
}

#[derive(Template)]
#[template(path = "admin/categories.html")]
pub struct AdminCategoriesTemplate {
    pub categories: Vec<AdminCategoryRow>,
}

pub async fn category_list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;

    let mut rows = Vec::new();
    for category in ctx.category_repo.list().await? {
        let project_count = ctx.category_repo.count_projects(category.id).await?;
        rows.push(AdminCategoryRow {
            id: category.id.to_string(),
            name: category.name,
            slug: category.slug,
            icon: category.icon,
            project_count,
        });
    }

    Ok(HtmlTemplate(AdminCategoriesTemplate { categories: rows }))
}

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

pub async fn create_category(
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<impl IntoResponse> {
    state
        .service_context
        .project_service
        .create_category(CreateCategoryRequest {
            name: form.name,
            description: form.description,
            icon: form.icon,
        })
        .await?;

    Ok(Redirect::to("/admin/categories"))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.service_context.category_repo.delete(id).await?;
    Ok(Redirect::to("/admin/categories"))
}
