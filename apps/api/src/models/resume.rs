use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::skill::Skill;

/// Lifecycle of an uploaded resume: `processing` until the parser answers,
/// then `parsed` or `failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeStatus {
    Processing,
    Parsed,
    Failed,
}

impl ResumeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeStatus::Processing => "processing",
            ResumeStatus::Parsed => "parsed",
            ResumeStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub s3_key: String,
    pub status: String,
    pub extracted_skills: Vec<String>,
    pub ats_score: Option<f64>,
    pub score_breakdown: Option<Value>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRow {
    pub fn is_parsed(&self) -> bool {
        self.status == ResumeStatus::Parsed.as_str()
    }

    pub fn skills(&self) -> Vec<Skill> {
        Skill::from_strings(&self.extracted_skills)
    }
}
