//! Course Recommender: picks catalog courses whose tags cover missing skills.
//!
//! A tag covers a skill when the lowercased tag contains the lowercased skill
//! as a substring, so a course tagged "ReactJS" covers "React". This also
//! lets "Java" match "JavaScript" courses; accepted.

use serde::{Deserialize, Serialize};

use crate::matching::skill::Skill;
use crate::models::course::CourseRecord;

pub const DEFAULT_COURSE_LIMIT: usize = 6;
pub const COURSES_PER_SKILL: usize = 3;

/// Courses grouped under the missing skill they address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCourses {
    pub skill: Skill,
    pub courses: Vec<CourseRecord>,
}

/// Courses covering any missing skill, best rated first, at most `limit`.
/// Equal ratings keep catalog order.
pub fn recommend_courses(
    catalog: &[CourseRecord],
    missing: &[Skill],
    limit: usize,
) -> Vec<CourseRecord> {
    let needles = needles(missing);
    if needles.is_empty() {
        return Vec::new();
    }

    let picks: Vec<&CourseRecord> = catalog
        .iter()
        .filter(|course| needles.iter().any(|n| covers(course, n)))
        .collect();

    top_rated(picks, limit)
}

/// Up to `per_skill` courses for each missing skill, in missing-skill order.
/// A skill with no covering course is kept with an empty list.
pub fn recommendations_by_skill(
    catalog: &[CourseRecord],
    missing: &[Skill],
    per_skill: usize,
) -> Vec<SkillCourses> {
    missing
        .iter()
        .map(|skill| {
            let needle = skill.folded();
            let courses = if needle.is_empty() {
                Vec::new()
            } else {
                let picks = catalog.iter().filter(|c| covers(c, &needle)).collect();
                top_rated(picks, per_skill)
            };
            SkillCourses {
                skill: skill.clone(),
                courses,
            }
        })
        .collect()
}

/// Folded, non-empty skills. An empty needle would match every tag.
fn needles(missing: &[Skill]) -> Vec<String> {
    missing
        .iter()
        .map(Skill::folded)
        .filter(|s| !s.is_empty())
        .collect()
}

fn covers(course: &CourseRecord, folded_skill: &str) -> bool {
    course
        .skills
        .iter()
        .any(|tag| tag.to_lowercase().contains(folded_skill))
}

fn top_rated(mut picks: Vec<&CourseRecord>, limit: usize) -> Vec<CourseRecord> {
    // sort_by is stable: ties stay in catalog order
    picks.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    picks.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn course(title: &str, tags: &[&str], rating: f64) -> CourseRecord {
        CourseRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            platform: "Coursera".to_string(),
            instructor: "Jane Doe".to_string(),
            url: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
            skills: tags.iter().map(|t| t.to_string()).collect(),
            rating,
            difficulty: "beginner".to_string(),
            created_at: Utc::now(),
        }
    }

    fn titles(courses: &[CourseRecord]) -> Vec<&str> {
        courses.iter().map(|c| c.title.as_str()).collect()
    }

    fn catalog() -> Vec<CourseRecord> {
        vec![
            course("SQL Basics", &["SQL", "Databases"], 4.2),
            course("Node Deep Dive", &["Node.js", "JavaScript"], 4.7),
            course("Docker Mastery", &["docker", "DevOps"], 4.8),
            course("Postgres Internals", &["PostgreSQL"], 4.2),
            course("Painting", &["Watercolor"], 5.0),
            course("Advanced SQL", &["sql"], 4.5),
        ]
    }

    #[test]
    fn test_recommends_by_descending_rating() {
        let missing = vec![Skill::from("Node.js"), Skill::from("SQL"), Skill::from("Docker")];
        let picks = recommend_courses(&catalog(), &missing, DEFAULT_COURSE_LIMIT);

        assert_eq!(
            titles(&picks),
            vec![
                "Docker Mastery",
                "Node Deep Dive",
                "Advanced SQL",
                "SQL Basics",
                "Postgres Internals"
            ]
        );
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = vec![
            course("First", &["Go"], 4.0),
            course("Second", &["golang"], 4.0),
            course("Third", &["Go"], 4.0),
        ];
        let picks = recommend_courses(&catalog, &[Skill::from("go")], 10);
        assert_eq!(titles(&picks), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_limit_truncates() {
        let missing = vec![Skill::from("SQL"), Skill::from("Docker"), Skill::from("Node")];
        assert_eq!(recommend_courses(&catalog(), &missing, 2).len(), 2);
    }

    #[test]
    fn test_substring_tag_match() {
        let catalog = vec![course("React Guide", &["ReactJS"], 4.0)];
        let picks = recommend_courses(&catalog, &[Skill::from("React")], 6);
        assert_eq!(titles(&picks), vec!["React Guide"]);
    }

    #[test]
    fn test_no_missing_skills_recommends_nothing() {
        assert!(recommend_courses(&catalog(), &[], 6).is_empty());
    }

    #[test]
    fn test_empty_skill_matches_nothing() {
        assert!(recommend_courses(&catalog(), &[Skill::from("")], 6).is_empty());
    }

    #[test]
    fn test_by_skill_groups_up_to_three() {
        let catalog = vec![
            course("A", &["Python"], 3.0),
            course("B", &["python3"], 4.9),
            course("C", &["Python"], 4.1),
            course("D", &["CPython"], 4.5),
            course("E", &["Rust"], 5.0),
        ];
        let missing = vec![Skill::from("Python"), Skill::from("Kotlin")];
        let grouped = recommendations_by_skill(&catalog, &missing, COURSES_PER_SKILL);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].skill, Skill::from("Python"));
        assert_eq!(titles(&grouped[0].courses), vec!["B", "D", "C"]);
        assert_eq!(grouped[1].skill, Skill::from("Kotlin"));
        assert!(grouped[1].courses.is_empty());
    }

    #[test]
    fn test_by_skill_is_case_insensitive() {
        let catalog = vec![course("K8s", &["KUBERNETES"], 4.0)];
        let grouped = recommendations_by_skill(&catalog, &[Skill::from("kubernetes")], 3);
        assert_eq!(titles(&grouped[0].courses), vec!["K8s"]);
    }
}
