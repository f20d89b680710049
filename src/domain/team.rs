use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Stored as NULL rather than "" so the unique index only applies to
    /// members that actually have one.
    pub national_id: Option<String>,
    pub national_id_verified: bool,
    pub photo_path: Option<String>,
    pub photo_status: PhotoStatus,
    pub display_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.date_of_birth.map(|dob| age_on(dob, today))
    }
}

/// Outcome of the best-effort photo optimization pass. The record commits
/// regardless; `Unoptimized` marks assets that kept their original bytes
/// so tooling can find them later.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum PhotoStatus {
    Pending,
    Optimized,
    Unoptimized,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTeamMemberRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Optional explicit slug; derived from the name when empty.
    pub slug: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub national_id: Option<String>,
    #[serde(default)]
    pub national_id_verified: bool,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Full-state update; the admin form posts the whole record. The slug is
/// deliberately absent: it is assigned once and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTeamMemberRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub national_id: Option<String>,
    pub national_id_verified: bool,
    pub display_order: i64,
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Calendar-aware age: year difference, minus one when today's month/day
/// precede the birth month/day. An exact birthday counts the full year.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    use chrono::Datelike;
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_day_before_birthday() {
        assert_eq!(age_on(date(2007, 6, 15), date(2025, 6, 14)), 17);
    }

    #[test]
    fn age_on_birthday_rounds_up() {
        assert_eq!(age_on(date(2007, 6, 15), date(2025, 6, 15)), 18);
    }

    #[test]
    fn age_later_in_year() {
        assert_eq!(age_on(date(2007, 6, 15), date(2025, 12, 1)), 18);
    }

    #[test]
    fn age_earlier_month() {
        assert_eq!(age_on(date(2000, 12, 31), date(2025, 1, 1)), 24);
    }
}
