use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Accepted values of `courses.difficulty`.
pub const DIFFICULTY_TIERS: &[&str] = &["beginner", "intermediate", "advanced"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CourseRecord {
    pub id: Uuid,
    pub title: String,
    pub platform: String,
    pub instructor: String,
    pub url: String,
    /// Free-text skill tags, matched by substring.
    pub skills: Vec<String>,
    pub rating: f64,
    pub difficulty: String,
    pub created_at: DateTime<Utc>,
}
