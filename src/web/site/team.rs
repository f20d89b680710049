use askama::Template;
use axum::{extract::State, response::IntoResponse};

use crate::{
    error::Result,
    web::{
        state::AppState,
        templates::{media_url, HtmlTemplate},
    },
};

pub struct TeamMemberCard {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub photo_url: String,
    pub verified: bool,
}

#[derive(Template)]
#[template(path = "team.html")]
pub struct TeamTemplate {
    pub members: Vec<TeamMemberCard>,
}

pub async fn team_page(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let members = state
        .service_context
        .team_repo
        .list_active()
        .await?
        .into_iter()
        .map(|m| TeamMemberCard {
            name: m.name,
            role: m.role.unwrap_or_default(),
            bio: m.bio.unwrap_or_default(),
            photo_url: m.photo_path.as_deref().map(media_url).unwrap_or_default(),
            verified: m.national_id_verified,
        })
        .collect();

    Ok(HtmlTemplate(TeamTemplate { members }))
}
