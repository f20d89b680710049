use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCategory {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// CSS icon class shown next to the category (e.g. "bi-book").
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category_id: Option<Uuid>,
    pub short_description: String,
    pub full_description: String,
    pub image_path: String,
    pub location: String,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub beneficiaries: i64,
    pub budget_cents: Option<i64>,
    pub funds_raised_cents: i64,
    pub is_featured: bool,
    pub is_active: bool,
    pub display_order: i64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Percentage of the funding goal reached, capped at 100. Projects
    /// without a budget report 0.
    pub fn funding_percentage(&self) -> i64 {
        match self.budget_cents {
            Some(budget) if budget > 0 => {
                ((self.funds_raised_cents * 100) / budget).min(100)
            }
            _ => 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProjectStatus::Completed
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == ProjectStatus::Ongoing
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum ProjectStatus {
    Planning,
    Ongoing,
    Completed,
    Paused,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::Ongoing => "Ongoing",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Paused => "Paused",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Planning" => Some(ProjectStatus::Planning),
            "Ongoing" => Some(ProjectStatus::Ongoing),
            "Completed" => Some(ProjectStatus::Completed),
            "Paused" => Some(ProjectStatus::Paused),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectImage {
    pub id: Uuid,
    pub project_id: Uuid,
    pub image_path: String,
    pub caption: String,
    pub display_order: i64,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub content: String,
    pub image_path: Option<String>,
    pub is_milestone: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjectPartner {
    pub id: Uuid,
    pub name: String,
    pub logo_path: String,
    #[validate(url)]
    pub website: Option<String>,
    pub description: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub slug: Option<String>,
    pub category_id: Option<Uuid>,
    #[validate(length(max = 250))]
    pub short_description: String,
    pub full_description: String,
    pub location: String,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub beneficiaries: i64,
    pub budget_cents: Option<i64>,
    #[serde(default)]
    pub funds_raised_cents: i64,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub category_id: Option<Uuid>,
    #[validate(length(max = 250))]
    pub short_description: String,
    pub full_description: String,
    pub location: String,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub beneficiaries: i64,
    pub budget_cents: Option<i64>,
    pub funds_raised_cents: i64,
    pub is_featured: bool,
    pub is_active: bool,
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_funding(budget: Option<i64>, raised: i64) -> Project {
        Project {
            id: Uuid::new_v4(),
            title: "Test".to_string(),
            slug: "test".to_string(),
            category_id: None,
            short_description: String::new(),
            full_description: String::new(),
            image_path: "projects/2025/test.jpg".to_string(),
            location: "Nairobi".to_string(),
            status: ProjectStatus::Ongoing,
            start_date: None,
            end_date: None,
            beneficiaries: 0,
            budget_cents: budget,
            funds_raised_cents: raised,
            is_featured: false,
            is_active: true,
            display_order: 0,
            views: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn funding_percentage_partial() {
        let p = project_with_funding(Some(100_000), 25_000);
        assert_eq!(p.funding_percentage(), 25);
    }

    #[test]
    fn funding_percentage_caps_at_100() {
        let p = project_with_funding(Some(100_000), 250_000);
        assert_eq!(p.funding_percentage(), 100);
    }

    #[test]
    fn funding_percentage_without_budget() {
        assert_eq!(project_with_funding(None, 25_000).funding_percentage(), 0);
        assert_eq!(project_with_funding(Some(0), 25_000).funding_percentage(), 0);
    }

    #[test]
    fn status_round_trip() {
        for status in [
            ProjectStatus::Planning,
            ProjectStatus::Ongoing,
            ProjectStatus::Completed,
            ProjectStatus::Paused,
        ] {
            assert_eq!(ProjectStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProjectStatus::parse("Archived"), None);
    }
}
