use askama::Template;
use axum::{extract::State, response::IntoResponse};

use crate::{
    domain::Event,
    error::Result,
    web::{
        state::AppState,
        templates::{media_url, HtmlTemplate},
    },
};

pub struct EventItem {
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: String,
    pub ends_at: String,
    pub image_url: String,
}

impl From<Event> for EventItem {
    fn from(event: Event) -> Self {
        Self {
            title: event.title,
            description: event.description,
            location: event.location.unwrap_or_default(),
            starts_at: event.starts_at.format("%B %e, %Y at %H:%M").to_string(),
            ends_at: event
                .ends_at
                .map(|dt| dt.format("%B %e, %Y at %H:%M").to_string())
                .unwrap_or_default(),
            image_url: event.image_path.as_deref().map(media_url).unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "events.html")]
pub struct EventsTemplate {
    pub upcoming: Vec<EventItem>,
    pub past: Vec<EventItem>,
}

pub async fn events_page(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;

    let upcoming: Vec<EventItem> = ctx
        .event_repo
        .list_upcoming(20)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    // Past events never overlap the upcoming set (cutoff is starts_at).
    let past = ctx
        .event_repo
        .list(50, 0)
        .await?
        .into_iter()
        .filter(|e| e.starts_at < chrono::Utc::now())
        .map(Into::into)
        .collect();

    Ok(HtmlTemplate(EventsTemplate { upcoming, past }))
}
