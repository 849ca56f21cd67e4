use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Immutable once recorded. Responses outlive their survey: erasing a
/// survey leaves its responses queryable through the tally.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Response {
    pub id: i32,
    pub survey_id: i32,
    pub respondent_id: String,
    pub chosen_option: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub survey_id: i32,
    pub respondent_id: String,
    pub chosen_option: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OptionCount {
    pub option: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tally {
    pub counts: Vec<OptionCount>,
    pub total: i64,
}
