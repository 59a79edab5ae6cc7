//! Feedback: fixed rule table turning a `MatchResult` into advice text.

use serde::{Deserialize, Serialize};

use crate::matching::matcher::MatchResult;
use crate::matching::skill::Skill;

const STRONG_MATCH_THRESHOLD: u8 = 70;
const GOOD_MATCH_THRESHOLD: u8 = 50;
/// Candidates with fewer extracted skills than this are told to broaden.
const SMALL_SKILL_SET: usize = 10;
/// Strengths, improvements and the missing-skill list are capped at this.
const LIST_LIMIT: usize = 5;

const NO_STRENGTHS_PLACEHOLDER: &str = "No matching skills identified yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub overall_assessment: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

pub fn generate_feedback(result: &MatchResult, candidate_skill_count: usize) -> Feedback {
    let strengths = if result.matching_skills.is_empty() {
        vec![NO_STRENGTHS_PLACEHOLDER.to_string()]
    } else {
        first_names(&result.matching_skills)
    };

    Feedback {
        overall_assessment: overall_assessment(result.match_percentage),
        strengths,
        improvements: first_names(&result.missing_skills),
        recommendations: build_recommendations(result, candidate_skill_count),
    }
}

fn overall_assessment(match_percentage: u8) -> String {
    if match_percentage >= STRONG_MATCH_THRESHOLD {
        "Strong match! Your skills align well with the requirements of this role.".to_string()
    } else if match_percentage >= GOOD_MATCH_THRESHOLD {
        "Good match. You have a solid foundation, with a few skills left to develop for this role."
            .to_string()
    } else {
        "Consider developing more of the skills this role asks for to improve your match."
            .to_string()
    }
}

fn build_recommendations(result: &MatchResult, candidate_skill_count: usize) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if !result.missing_skills.is_empty() {
        let listed = first_names(&result.missing_skills).join(", ");
        let overflow = result.missing_skills.len().saturating_sub(LIST_LIMIT);
        let description = if overflow > 0 {
            format!("Focus on learning: {listed} and {overflow} more")
        } else {
            format!("Focus on learning: {listed}")
        };
        recommendations.push(Recommendation {
            title: "Develop Missing Skills".to_string(),
            description,
            priority: Priority::High,
        });
    }

    if result.match_percentage < STRONG_MATCH_THRESHOLD {
        recommendations.push(Recommendation {
            title: "Enhance Your Profile".to_string(),
            description: "Add projects, certifications or work experience that demonstrate the \
                          skills this role requires."
                .to_string(),
            priority: Priority::Medium,
        });
    }

    if candidate_skill_count < SMALL_SKILL_SET {
        recommendations.push(Recommendation {
            title: "Expand Skill Set".to_string(),
            description: "Broaden your skill set with complementary tools and technologies to \
                          stand out to recruiters."
                .to_string(),
            priority: Priority::Low,
        });
    }

    recommendations
}

fn first_names(skills: &[Skill]) -> Vec<String> {
    skills
        .iter()
        .take(LIST_LIMIT)
        .map(|s| s.as_str().to_string())
        .collect()
}
