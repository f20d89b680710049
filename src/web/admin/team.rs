use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect},
};
use uuid::Uuid;

use crate::{
    domain::{CreateTeamMemberRequest, PhotoStatus, UpdateTeamMemberRequest},
    error::{AppError, Result},
    web::{
        forms::MultipartForm,
        state::AppState,
        templates::{media_url, HtmlTemplate},
    },
};

#[derive(Clone)]
pub struct AdminTeamRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub age: String,
    pub has_national_id: bool,
    pub verified: bool,
    pub photo_url: String,
    pub photo_status: String,
    pub is_active: bool,
}

#[derive(Template)]
#[template(path = "admin/team.html")]
pub struct AdminTeamTemplate {
    pub members: Vec<AdminTeamRow>,
}

pub async fn team_list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let today = chrono::Utc::now().date_naive();

    let members = state
        .service_context
        .team_repo
        .list(1000, 0)
        .await?
        .into_iter()
        .map(|m| AdminTeamRow {
            id: m.id.to_string(),
            name: m.name.clone(),
            role: m.role.clone().unwrap_or_default(),
            age: m
                .age_on(today)
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".to_string()),
            has_national_id: m.national_id.is_some(),
            verified: m.national_id_verified,
            photo_url: m.photo_path.as_deref().map(media_url).unwrap_or_default(),
            photo_status: format!("{:?}", m.photo_status),
            is_active: m.is_active,
        })
        .collect();

    Ok(HtmlTemplate(AdminTeamTemplate { members }))
}

#[derive(Template)]
#[template(path = "admin/team_form.html")]
pub struct TeamFormTemplate {
    pub heading: String,
    pub action: String,
    pub is_edit: bool,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub date_of_birth: String,
    pub national_id: String,
    pub national_id_verified: bool,
    pub display_order: i64,
    pub is_active: bool,
    pub photo_url: String,
    pub photo_unoptimized: bool,
}

pub async fn new_member_page() -> impl IntoResponse {
    HtmlTemplate(TeamFormTemplate {
        heading: "New Team Member".to_string(),
        action: "/admin/team/new".to_string(),
        is_edit: false,
        name: String::new(),
        role: String::new(),
        bio: String::new(),
        date_of_birth: String::new(),
        national_id: String::new(),
        national_id_verified: false,
        display_order: 0,
        is_active: true,
        photo_url: String::new(),
        photo_unoptimized: false,
    })
}

pub async fn create_member(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = MultipartForm::parse(multipart).await?;

    let request = CreateTeamMemberRequest {
        name: form.required_text("name")?,
        slug: form.optional_text("slug"),
        role: form.optional_text("role"),
        bio: form.optional_text("bio"),
        date_of_birth: form.optional_date("date_of_birth")?,
        national_id: form.optional_text("national_id"),
        national_id_verified: form.checkbox("national_id_verified"),
        display_order: form.integer("display_order", 0)?,
        is_active: form.checkbox("is_active"),
    };
    let photo = form.required_file("photo")?;

    let member = state
        .service_context
        .team_service
        .create_member(request, photo)
        .await?;

    Ok(Redirect::to(&format!("/admin/team/{}", member.id)))
}

pub async fn edit_member_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let member = state
        .service_context
        .team_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Team member not found".to_string()))?;

    Ok(HtmlTemplate(TeamFormTemplate {
        heading: format!("Edit: {}", member.name),
        action: format!("/admin/team/{}", member.id),
        is_edit: true,
        name: member.name.clone(),
        role: member.role.clone().unwrap_or_default(),
        bio: member.bio.clone().unwrap_or_default(),
        date_of_birth: member
            .date_of_birth
            .map(|d| d.to_string())
            .unwrap_or_default(),
        national_id: member.national_id.clone().unwrap_or_default(),
        national_id_verified: member.national_id_verified,
        display_order: member.display_order,
        is_active: member.is_active,
        photo_url: member.photo_path.as_deref().map(media_url).unwrap_or_default(),
        photo_unoptimized: member.photo_status == PhotoStatus::Unoptimized,
    }))
}

pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = MultipartForm::parse(multipart).await?;

    let request = UpdateTeamMemberRequest {
        name: form.required_text("name")?,
        role: form.optional_text("role"),
        bio: form.optional_text("bio"),
        date_of_birth: form.optional_date("date_of_birth")?,
        national_id: form.optional_text("national_id"),
        national_id_verified: form.checkbox("national_id_verified"),
        display_order: form.integer("display_order", 0)?,
        is_active: form.checkbox("is_active"),
    };

    state
        .service_context
        .team_service
        .update_member(id, request, form.file("photo"))
        .await?;

    Ok(Redirect::to(&format!("/admin/team/{}", id)))
}

pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.service_context.team_service.delete_member(id).await?;
    Ok(Redirect::to("/admin/team"))
}
