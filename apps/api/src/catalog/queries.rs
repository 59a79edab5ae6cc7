use sqlx::PgPool;
use uuid::Uuid;

use crate::matching::skill::Skill;
use crate::models::course::CourseRecord;
use crate::models::role::RoleRow;

/// `ILIKE` pattern matching `needle` anywhere, with `%`, `_` and `\` escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub async fn fetch_role(pool: &PgPool, id: Uuid) -> Result<Option<RoleRow>, sqlx::Error> {
    sqlx::query_as::<_, RoleRow>("SELECT * FROM roles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Roles ordered by title; `title_keyword` filters case-insensitively.
pub async fn list_roles(
    pool: &PgPool,
    title_keyword: Option<&str>,
) -> Result<Vec<RoleRow>, sqlx::Error> {
    sqlx::query_as::<_, RoleRow>(
        r#"
        SELECT * FROM roles
        WHERE ($1::text IS NULL OR title ILIKE $1)
        ORDER BY title, id
        "#,
    )
    .bind(title_keyword.map(contains_pattern))
    .fetch_all(pool)
    .await
}

pub async fn fetch_course(pool: &PgPool, id: Uuid) -> Result<Option<CourseRecord>, sqlx::Error> {
    sqlx::query_as::<_, CourseRecord>("SELECT * FROM courses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Courses, best rated first. `skill_keyword` matches as a substring of any tag.
pub async fn list_courses(
    pool: &PgPool,
    skill_keyword: Option<&str>,
    difficulty: Option<&str>,
) -> Result<Vec<CourseRecord>, sqlx::Error> {
    sqlx::query_as::<_, CourseRecord>(
        r#"
        SELECT * FROM courses c
        WHERE ($1::text IS NULL OR EXISTS (
                  SELECT 1 FROM unnest(c.skills) AS tag WHERE tag ILIKE $1))
          AND ($2::text IS NULL OR c.difficulty = $2)
        ORDER BY c.rating DESC, c.created_at, c.id
        "#,
    )
    .bind(skill_keyword.map(contains_pattern))
    .bind(difficulty)
    .fetch_all(pool)
    .await
}

/// Candidate courses for a set of missing skills, in catalog order.
///
/// The SQL filter only narrows the rows; `matching::courses` makes the final
/// selection and ordering.
pub async fn fetch_courses_for_skills(
    pool: &PgPool,
    skills: &[Skill],
) -> Result<Vec<CourseRecord>, sqlx::Error> {
    let patterns: Vec<String> = skills
        .iter()
        .map(Skill::as_str)
        .filter(|s| !s.is_empty())
        .map(contains_pattern)
        .collect();

    if patterns.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, CourseRecord>(
        r#"
        SELECT * FROM courses c
        WHERE EXISTS (
            SELECT 1 FROM unnest(c.skills) AS tag, unnest($1::text[]) AS pattern
            WHERE tag ILIKE pattern)
        ORDER BY c.created_at, c.id
        "#,
    )
    .bind(&patterns)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_wraps_needle() {
        assert_eq!(contains_pattern("React"), "%React%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("100%_\\"), "%100\\%\\_\\\\%");
    }

    #[test]
    fn test_contains_pattern_keeps_symbols() {
        assert_eq!(contains_pattern("C++"), "%C++%");
        assert_eq!(contains_pattern("Node.js"), "%Node.js%");
    }
}
