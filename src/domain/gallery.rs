use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: Uuid,
    pub image_path: String,
    pub caption: String,
    pub taken_at: Option<NaiveDate>,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
}
