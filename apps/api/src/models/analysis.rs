use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub role_id: Uuid,
    pub role_title: String,
    pub match_percentage: i16,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// Serialized `matching::feedback::Feedback`.
    pub feedback: Value,
    /// Serialized `Vec<CourseRecord>`.
    pub recommended_courses: Value,
    pub created_at: DateTime<Utc>,
}
