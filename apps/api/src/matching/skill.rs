use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A free-text skill as extracted from a resume or listed on a role.
///
/// Skills are never canonicalized: "JS" and "JavaScript" are different skills.
/// Equality on `Skill` is exact; matching code compares `folded()` forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skill(String);

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Comparison key: lowercase only, no trimming.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn from_strings(names: &[String]) -> Vec<Skill> {
        names.iter().map(|n| Skill::new(n.as_str())).collect()
    }

    pub fn into_strings(skills: Vec<Skill>) -> Vec<String> {
        skills.into_iter().map(|s| s.0).collect()
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Skill {
    fn from(name: &str) -> Self {
        Skill::new(name)
    }
}

impl From<String> for Skill {
    fn from(name: String) -> Self {
        Skill(name)
    }
}

/// Removes case-insensitive duplicates, keeping the first spelling seen.
pub fn dedup_folded<'a, I>(skills: I) -> Vec<Skill>
where
    I: IntoIterator<Item = &'a Skill>,
{
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .filter(|s| seen.insert(s.folded()))
        .cloned()
        .collect()
}

/// Set of folded forms, for membership tests.
pub fn folded_set(skills: &[Skill]) -> HashSet<String> {
    skills.iter().map(Skill::folded).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folded_lowercases_without_trimming() {
        assert_eq!(Skill::new(" Node.JS ").folded(), " node.js ");
    }

    #[test]
    fn test_dedup_keeps_first_spelling() {
        let skills = vec![
            Skill::from("React"),
            Skill::from("react"),
            Skill::from("SQL"),
            Skill::from("REACT"),
        ];
        let deduped = dedup_folded(&skills);
        assert_eq!(deduped, vec![Skill::from("React"), Skill::from("SQL")]);
    }

    #[test]
    fn test_synonyms_are_not_unified() {
        let set = folded_set(&[Skill::from("JavaScript")]);
        assert!(!set.contains(&Skill::from("JS").folded()));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&vec![Skill::from("Rust")]).unwrap();
        assert_eq!(json, r#"["Rust"]"#);
    }
}
