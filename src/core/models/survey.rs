use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "survey_status", rename_all = "lowercase")]
pub enum SurveyStatus {
    Active,
    Inactive,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "survey_kind", rename_all = "snake_case")]
pub enum SurveyKind {
    MultipleChoice,
}

impl Default for SurveyKind {
    fn default() -> Self {
        SurveyKind::MultipleChoice
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Survey {
    pub id: i32,
    pub owner_id: String,
    pub question: String,
    pub kind: SurveyKind,
    pub options: Vec<String>,
    pub pictures: Vec<String>,
    pub link: Option<String>,
    pub vote_quota: i32,
    pub status: SurveyStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    pub question: String,
    #[serde(default)]
    pub kind: SurveyKind,
    pub options: Vec<String>,
    #[serde(default)]
    pub pictures: Vec<String>,
    pub link: Option<String>,
    pub vote_quota: i32,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub owner_id: String,
    pub question: String,
    pub kind: SurveyKind,
    pub options: Vec<String>,
    pub pictures: Vec<String>,
    pub link: Option<String>,
    pub vote_quota: i32,
}

/// Owner whole-edit of the presentational fields; quota changes go
/// through the reactivation path instead.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub question: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub pictures: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub owner_id_eq: Option<String>,
    pub status_eq: Option<SurveyStatus>,
}
