//! Additive fit scoring for assessment recommendations.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::dataset::UseCase;
use crate::derive::{Difficulty, difficulty_level};
use crate::filters::{Goal, Timeline, filter_opportunities, matches_goal_keywords};
use crate::matcher::FrameworkMatcher;

/// Rough organization size, used only for the scoring heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OrgSize {
    Small,
    Medium,
    Large,
}

/// A user's answer set from the assessment wizard. Every field is optional;
/// an empty answer set is valid and scores every case 0 unless a keyword
/// happens to match.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    pub goal: Option<Goal>,
    pub industry: Option<String>,
    pub org_size: Option<OrgSize>,
    pub timeline: Option<Timeline>,
}

/// Score how well a use case fits an answer set. Independent additive
/// bonuses, no early exit:
///
/// - +10 exact industry match
/// - +5 small org and Low difficulty, +5 medium org and Medium difficulty,
///   +3 large org unconditionally
/// - +5 timeline whose allowed labels appear in the raw framework difficulty
///   text (cases with no framework get nothing here)
/// - +8 goal keyword found in the result strings (no "time" fallback)
///
/// Maximum 28; the large-org path caps at 26.
pub fn fit_score(use_case: &UseCase, answers: &Answers, matcher: &FrameworkMatcher<'_>) -> u32 {
    let mut score = 0;

    if answers.industry.as_deref() == Some(use_case.industry.as_str()) {
        score += 10;
    }

    let difficulty = difficulty_level(use_case, matcher);
    match answers.org_size {
        Some(OrgSize::Small) if difficulty == Difficulty::Low => score += 5,
        Some(OrgSize::Medium) if difficulty == Difficulty::Medium => score += 5,
        Some(OrgSize::Large) => score += 3,
        _ => {}
    }

    if let Some(timeline) = answers.timeline
        && let Some(raw) = matcher.raw_difficulty(use_case)
        && timeline
            .allowed_difficulties()
            .iter()
            .any(|level| raw.contains(level))
    {
        score += 5;
    }

    if let Some(goal) = answers.goal
        && matches_goal_keywords(use_case, goal)
    {
        score += 8;
    }

    score
}

/// A scored recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    pub use_case: &'a UseCase,
    pub score: u32,
}

/// The assessment pipeline: filter by the answer set, score the survivors,
/// rank by score descending (stable for ties), truncate to `limit`.
pub fn recommend<'a>(
    cases: &'a [UseCase],
    answers: &Answers,
    matcher: &FrameworkMatcher<'_>,
    limit: usize,
) -> Vec<Recommendation<'a>> {
    let mut recs: Vec<Recommendation<'a>> = filter_opportunities(
        cases,
        answers.goal,
        answers.timeline,
        answers.industry.as_deref(),
        matcher,
    )
    .into_iter()
    .map(|use_case| Recommendation {
        score: fit_score(use_case, answers, matcher),
        use_case,
    })
    .collect();
    recs.sort_by(|a, b| b.score.cmp(&a.score));
    recs.truncate(limit);
    recs
}
