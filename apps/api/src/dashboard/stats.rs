//! Dashboard aggregation over a user's resumes, with a freshness policy that
//! decides when a previously stored snapshot can be served as-is.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeRow;

/// Display heuristic cap for `courses_recommended`.
const COURSES_RECOMMENDED_CAP: u64 = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_resumes: u64,
    pub resumes_last_7_days: u64,
    pub resumes_last_14_days: u64,
    /// Mean of non-zero ATS scores, one decimal.
    pub average_ats_score: f64,
    /// Mean score of the last 7 days minus the mean of the 7 days before.
    pub ats_score_change: f64,
    pub distinct_skills: u64,
    /// `min(distinct_skills * 2, 25)`; an estimate for display, not a count.
    pub courses_recommended: u64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatsOutcome {
    /// The prior snapshot was fresh and is returned unchanged.
    Cached(Stats),
    /// A new snapshot; callers should persist it.
    Recomputed(Stats),
}

impl StatsOutcome {
    pub fn into_stats(self) -> Stats {
        match self {
            StatsOutcome::Cached(s) | StatsOutcome::Recomputed(s) => s,
        }
    }
}

/// A snapshot is fresh while it is younger than `stale_after`.
pub fn is_fresh(prior: &Stats, stale_after: Duration, now: DateTime<Utc>) -> bool {
    now - prior.last_updated < stale_after
}

pub fn compute_stats(
    resumes: &[ResumeRow],
    prior: Option<&Stats>,
    stale_after: Duration,
    now: DateTime<Utc>,
) -> StatsOutcome {
    match prior {
        Some(prior) if is_fresh(prior, stale_after, now) => StatsOutcome::Cached(prior.clone()),
        _ => StatsOutcome::Recomputed(aggregate(resumes, now)),
    }
}

fn aggregate(resumes: &[ResumeRow], now: DateTime<Utc>) -> Stats {
    let week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);

    let this_week: Vec<&ResumeRow> = resumes.iter().filter(|r| r.created_at > week_ago).collect();
    let last_week: Vec<&ResumeRow> = resumes
        .iter()
        .filter(|r| r.created_at > two_weeks_ago && r.created_at <= week_ago)
        .collect();

    let ats_score_change = match (
        mean_score(this_week.iter().copied()),
        mean_score(last_week.iter().copied()),
    ) {
        (Some(current), Some(previous)) => round1(current - previous),
        _ => 0.0,
    };

    let distinct_skills = resumes
        .iter()
        .flat_map(|r| r.extracted_skills.iter())
        .map(|s| s.to_lowercase())
        .collect::<HashSet<_>>()
        .len() as u64;

    Stats {
        total_resumes: resumes.len() as u64,
        resumes_last_7_days: this_week.len() as u64,
        resumes_last_14_days: (this_week.len() + last_week.len()) as u64,
        average_ats_score: mean_score(resumes.iter()).map(round1).unwrap_or(0.0),
        ats_score_change,
        distinct_skills,
        courses_recommended: (distinct_skills * 2).min(COURSES_RECOMMENDED_CAP),
        last_updated: now,
    }
}

/// Mean of the positive scores. Missing or zero scores are left out rather
/// than pulling the average down; `None` when nothing is scored.
fn mean_score<'a>(resumes: impl Iterator<Item = &'a ResumeRow>) -> Option<f64> {
    let scores: Vec<f64> = resumes
        .filter_map(|r| r.ats_score)
        .filter(|s| *s > 0.0)
        .collect();

    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    pub(crate) fn make_resume(
        created_at: DateTime<Utc>,
        ats_score: Option<f64>,
        skills: &[&str],
    ) -> ResumeRow {
        ResumeRow {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            file_name: "resume.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            s3_key: "resumes/test/resume.pdf".to_string(),
            status: "parsed".to_string(),
            extracted_skills: skills.iter().map(|s| s.to_string()).collect(),
            ats_score,
            score_breakdown: None,
            error_message: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    fn snapshot(last_updated: DateTime<Utc>) -> Stats {
        Stats {
            total_resumes: 4,
            resumes_last_7_days: 1,
            resumes_last_14_days: 2,
            average_ats_score: 71.5,
            ats_score_change: 3.0,
            distinct_skills: 9,
            courses_recommended: 18,
            last_updated,
        }
    }

    #[test]
    fn test_fresh_snapshot_is_returned_unchanged() {
        let prior = snapshot(now() - Duration::minutes(30));
        let resumes = vec![make_resume(now(), Some(90.0), &["Rust"])];

        let outcome = compute_stats(&resumes, Some(&prior), Duration::hours(1), now());
        assert_eq!(outcome, StatsOutcome::Cached(prior));
    }

    #[test]
    fn test_stale_snapshot_is_recomputed_and_timestamp_advances() {
        let prior = snapshot(now() - Duration::hours(2));
        let resumes = vec![make_resume(now() - Duration::days(1), Some(80.0), &["Rust"])];

        let stats = match compute_stats(&resumes, Some(&prior), Duration::hours(1), now()) {
            StatsOutcome::Recomputed(stats) => stats,
            other => panic!("expected recomputation, got {other:?}"),
        };
        assert_eq!(stats.last_updated, now());
        assert!(stats.last_updated > prior.last_updated);
        assert_eq!(stats.total_resumes, 1);
    }

    #[test]
    fn test_exactly_stale_after_is_stale() {
        let prior = snapshot(now() - Duration::hours(1));
        assert!(!is_fresh(&prior, Duration::hours(1), now()));
    }

    #[test]
    fn test_no_prior_always_recomputes() {
        let outcome = compute_stats(&[], None, Duration::hours(1), now());
        assert!(matches!(outcome, StatsOutcome::Recomputed(_)));

        let stats = outcome.into_stats();
        assert_eq!(stats.total_resumes, 0);
        assert_eq!(stats.average_ats_score, 0.0);
        assert_eq!(stats.courses_recommended, 0);
    }

    #[test]
    fn test_rolling_window_counts() {
        let resumes = vec![
            make_resume(now() - Duration::hours(1), None, &[]),
            make_resume(now() - Duration::days(6), None, &[]),
            make_resume(now() - Duration::days(8), None, &[]),
            make_resume(now() - Duration::days(13), None, &[]),
            make_resume(now() - Duration::days(30), None, &[]),
        ];
        let stats = compute_stats(&resumes, None, Duration::hours(1), now()).into_stats();

        assert_eq!(stats.total_resumes, 5);
        assert_eq!(stats.resumes_last_7_days, 2);
        assert_eq!(stats.resumes_last_14_days, 4);
    }

    #[test]
    fn test_average_excludes_missing_and_zero_scores() {
        let resumes = vec![
            make_resume(now(), Some(80.0), &[]),
            make_resume(now(), Some(0.0), &[]),
            make_resume(now(), None, &[]),
            make_resume(now(), Some(65.0), &[]),
        ];
        let stats = compute_stats(&resumes, None, Duration::hours(1), now()).into_stats();
        assert_eq!(stats.average_ats_score, 72.5);
    }

    #[test]
    fn test_week_over_week_change() {
        let resumes = vec![
            make_resume(now() - Duration::days(1), Some(80.0), &[]),
            make_resume(now() - Duration::days(2), Some(90.0), &[]),
            make_resume(now() - Duration::days(9), Some(70.0), &[]),
        ];
        let stats = compute_stats(&resumes, None, Duration::hours(1), now()).into_stats();
        assert_eq!(stats.ats_score_change, 15.0);
    }

    #[test]
    fn test_change_is_zero_without_previous_week_scores() {
        let resumes = vec![make_resume(now() - Duration::days(1), Some(80.0), &[])];
        let stats = compute_stats(&resumes, None, Duration::hours(1), now()).into_stats();
        assert_eq!(stats.ats_score_change, 0.0);
    }

    #[test]
    fn test_distinct_skills_fold_case_and_drive_course_estimate() {
        let resumes = vec![
            make_resume(now(), None, &["Rust", "SQL", "Docker"]),
            make_resume(now(), None, &["rust", "Kafka"]),
        ];
        let stats = compute_stats(&resumes, None, Duration::hours(1), now()).into_stats();
        assert_eq!(stats.distinct_skills, 4);
        assert_eq!(stats.courses_recommended, 8);
    }

    #[test]
    fn test_course_estimate_capped_at_25() {
        let skills: Vec<String> = (0..20).map(|i| format!("skill-{i}")).collect();
        let refs: Vec<&str> = skills.iter().map(String::as_str).collect();
        let resumes = vec![make_resume(now(), None, &refs)];
        let stats = compute_stats(&resumes, None, Duration::hours(1), now()).into_stats();
        assert_eq!(stats.distinct_skills, 20);
        assert_eq!(stats.courses_recommended, 25);
    }
}
