//! Skill Matcher: compares a candidate's extracted skills with a role's
//! required and preferred skills and produces a weighted match percentage.
//!
//! Matching is exact string equality after lowercasing. No trimming, stemming
//! or synonym resolution.

use serde::{Deserialize, Serialize};

use crate::matching::skill::{dedup_folded, folded_set, Skill};

/// Share of the percentage carried by required skills.
pub const REQUIRED_WEIGHT: f64 = 70.0;
/// Share of the percentage carried by preferred skills.
pub const PREFERRED_WEIGHT: f64 = 30.0;

/// Outcome of comparing one candidate against one role. Never mutated after
/// `compute_match` returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_percentage: u8, // 0 – 100
    pub matching_skills: Vec<Skill>,
    pub missing_skills: Vec<Skill>,
    pub required_matches: usize,
    pub preferred_matches: usize,
}

/// Computes the match between a candidate and a role.
///
/// Algorithm:
/// 1. `all_role_skills` = required ∪ preferred, deduplicated case-insensitively
///    (required first, first spelling kept)
/// 2. A role skill matches when its folded form is among the candidate's
///    folded skills; everything else is missing
/// 3. percentage = round(req_hits/|req| × 70 + pref_hits/max(|pref|,1) × 30),
///    or 0 when the role lists no required skills
pub fn compute_match(candidate: &[Skill], required: &[Skill], preferred: &[Skill]) -> MatchResult {
    let candidate_folded = folded_set(candidate);
    let is_match = |s: &Skill| candidate_folded.contains(&s.folded());

    let required = dedup_folded(required);
    let preferred = dedup_folded(preferred);
    let all_role_skills = dedup_folded(required.iter().chain(preferred.iter()));

    let (matching_skills, missing_skills): (Vec<Skill>, Vec<Skill>) =
        all_role_skills.into_iter().partition(|s| is_match(s));

    let required_matches = required.iter().filter(|s| is_match(s)).count();
    let preferred_matches = preferred.iter().filter(|s| is_match(s)).count();

    MatchResult {
        match_percentage: match_percentage(
            required_matches,
            required.len(),
            preferred_matches,
            preferred.len(),
        ),
        matching_skills,
        missing_skills,
        required_matches,
        preferred_matches,
    }
}

/// Weighted percentage from membership counts alone.
/// A role with no required skills always scores 0, even with preferred hits.
pub fn match_percentage(
    required_matches: usize,
    required_total: usize,
    preferred_matches: usize,
    preferred_total: usize,
) -> u8 {
    if required_total == 0 {
        return 0;
    }

    let required_part = required_matches as f64 / required_total as f64 * REQUIRED_WEIGHT;
    let preferred_part =
        preferred_matches as f64 / preferred_total.max(1) as f64 * PREFERRED_WEIGHT;

    // f64::round is half-away-from-zero, which is half-up for non-negative input
    (required_part + preferred_part).round().clamp(0.0, 100.0) as u8
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
