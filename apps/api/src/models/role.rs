use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::skill::Skill;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl RoleRow {
    pub fn required(&self) -> Vec<Skill> {
        Skill::from_strings(&self.required_skills)
    }

    pub fn preferred(&self) -> Vec<Skill> {
        Skill::from_strings(&self.preferred_skills)
    }
}
