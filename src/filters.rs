//! The filter engine: goal/timeline/industry filtering, sorting, text
//! search, and the related-case finder.
//!
//! Filtering is deliberately loose. Goal matching is keyword containment over
//! free-text result strings, and timeline matching runs against the RAW
//! framework difficulty text so that compound descriptors like "Low to
//! Medium" can satisfy more than one horizon. Do not tighten these into exact
//! matches; the free-text form is load-bearing.

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::dataset::{Sector, UseCase};
use crate::matcher::FrameworkMatcher;

/// The user's stated priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    WorkFaster,
    WorkBetter,
    WorkAtScale,
}

impl Goal {
    /// Keywords looked for in a use case's result strings.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Goal::WorkFaster => &[
                "time",
                "faster",
                "speed",
                "hours",
                "minutes",
                "reduction",
                "automated",
                "quick",
                "saved",
                "week",
                "days",
            ],
            Goal::WorkBetter => &[
                "quality",
                "accuracy",
                "satisfaction",
                "improvement",
                "better",
                "enhanced",
                "outcomes",
            ],
            Goal::WorkAtScale => &[
                "scale",
                "capacity",
                "volume",
                "served",
                "handled",
                "reach",
                "expansion",
                "equivalent to",
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WorkFaster => "work-faster",
            Goal::WorkBetter => "work-better",
            Goal::WorkAtScale => "work-at-scale",
        }
    }
}

/// The user's stated time horizon, mapped to allowed difficulty labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeline {
    QuickWins,
    Balanced,
    Transformative,
}

impl Timeline {
    /// Difficulty labels a matched framework's raw text may contain for a
    /// case to fall inside this horizon.
    pub fn allowed_difficulties(&self) -> &'static [&'static str] {
        match self {
            Timeline::QuickWins => &["Low", "Low to Medium"],
            Timeline::Balanced => &["Medium", "Medium to High"],
            Timeline::Transformative => &["High", "Very High"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeline::QuickWins => "quick-wins",
            Timeline::Balanced => "balanced",
            Timeline::Transformative => "transformative",
        }
    }
}

/// True when any result string contains any of the goal's keywords.
/// Shared with the fit scorer, which uses it without the "time" fallback.
pub fn matches_goal_keywords(use_case: &UseCase, goal: Goal) -> bool {
    use_case.results.iter().any(|result| {
        let result = result.to_lowercase();
        goal.keywords().iter().any(|kw| result.contains(kw))
    })
}

fn matches_goal(use_case: &UseCase, goal: Goal) -> bool {
    // Fallback: a mention of "time" in the challenge or solution passes any
    // goal. Loose for non-speed goals, but existing behavior; flagged for
    // product clarification rather than changed here.
    matches_goal_keywords(use_case, goal)
        || use_case.challenge.to_lowercase().contains("time")
        || use_case.solution.to_lowercase().contains("time")
}

fn matches_timeline(
    use_case: &UseCase,
    timeline: Timeline,
    matcher: &FrameworkMatcher<'_>,
) -> bool {
    // Cases with no matched framework are excluded whenever a timeline is
    // specified.
    match matcher.raw_difficulty(use_case) {
        Some(raw) => timeline
            .allowed_difficulties()
            .iter()
            .any(|level| raw.contains(level)),
        None => false,
    }
}

/// Apply goal, timeline, and industry criteria conjunctively, preserving the
/// original relative order. Absent criteria are no-ops, as is the industry
/// sentinel "All".
pub fn filter_opportunities<'a>(
    cases: &'a [UseCase],
    goal: Option<Goal>,
    timeline: Option<Timeline>,
    industry: Option<&str>,
    matcher: &FrameworkMatcher<'_>,
) -> Vec<&'a UseCase> {
    cases
        .iter()
        .filter(|uc| goal.is_none_or(|g| matches_goal(uc, g)))
        .filter(|uc| timeline.is_none_or(|t| matches_timeline(uc, t, matcher)))
        .filter(|uc| match industry {
            Some(industry) if industry != "All" => uc.industry == industry,
            _ => true,
        })
        .collect()
}

/// Case-insensitive substring search over organization, category, and
/// application. A blank term returns the input unchanged.
pub fn search_cases<'a>(cases: Vec<&'a UseCase>, term: &str) -> Vec<&'a UseCase> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return cases;
    }
    cases
        .into_iter()
        .filter(|uc| {
            uc.organization.to_lowercase().contains(&term)
                || uc.use_case_category.to_lowercase().contains(&term)
                || uc.specific_application.to_lowercase().contains(&term)
        })
        .collect()
}

/// Keep cases whose sector is in `sectors`. An empty selection keeps all.
pub fn filter_by_sectors<'a>(cases: Vec<&'a UseCase>, sectors: &[Sector]) -> Vec<&'a UseCase> {
    if sectors.is_empty() {
        return cases;
    }
    cases
        .into_iter()
        .filter(|uc| sectors.contains(&uc.sector))
        .collect()
}

/// Sort order for explorer views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Difficulty,
    Industry,
    Organization,
    Recent,
    Unsorted,
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unrecognized keys leave the list unsorted rather than failing; the
    /// persisted sort preference is free text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "difficulty" => SortKey::Difficulty,
            "industry" => SortKey::Industry,
            "organization" => SortKey::Organization,
            "recent" => SortKey::Recent,
            _ => SortKey::Unsorted,
        })
    }
}

const DIFFICULTY_ORDER: [&str; 4] = ["Low", "Medium", "High", "Very High"];

/// Position of the first order label contained in the raw difficulty text.
///
/// Known edge cases, kept as-is: text containing none of the labels yields
/// -1 and sorts before everything, and "Very High" hits the "High" probe
/// first, so it shares a position with plain "High".
fn difficulty_position(use_case: &UseCase, matcher: &FrameworkMatcher<'_>) -> i64 {
    match matcher.raw_difficulty(use_case) {
        Some(raw) => DIFFICULTY_ORDER
            .iter()
            .position(|level| raw.contains(level))
            .map(|p| p as i64)
            .unwrap_or(-1),
        None => -1,
    }
}

/// Sort a view of cases by the given key. Sorts are stable, so ties keep
/// their original relative order.
pub fn sort_opportunities<'a>(
    mut cases: Vec<&'a UseCase>,
    key: SortKey,
    matcher: &FrameworkMatcher<'_>,
) -> Vec<&'a UseCase> {
    match key {
        SortKey::Difficulty => {
            cases.sort_by_key(|uc| difficulty_position(uc, matcher));
        }
        SortKey::Industry => {
            cases.sort_by(|a, b| a.industry.cmp(&b.industry));
        }
        SortKey::Organization => {
            cases.sort_by(|a, b| a.organization.cmp(&b.organization));
        }
        SortKey::Recent => {
            cases.sort_by(|a, b| b.last_reviewed.cmp(&a.last_reviewed));
        }
        SortKey::Unsorted => {}
    }
    cases
}

/// Up to `limit` other cases sharing an industry or category with `current`,
/// in original dataset order. No relevance ranking between the two kinds of
/// match.
pub fn related_cases<'a>(
    current: &UseCase,
    all_cases: &'a [UseCase],
    limit: usize,
) -> Vec<&'a UseCase> {
    all_cases
        .iter()
        .filter(|uc| uc.id != current.id)
        .filter(|uc| {
            uc.industry == current.industry || uc.use_case_category == current.use_case_category
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{framework, use_case, use_case_with_results};

    fn no_frameworks() -> Vec<crate::dataset::Framework> {
        Vec::new()
    }

    #[test]
    fn test_no_criteria_is_identity() {
        let cases = vec![
            use_case("a", "Acme", "Retail", "Forecasting"),
            use_case("b", "Bolt", "Logistics", "Routing"),
        ];
        let frameworks = no_frameworks();
        let matcher = FrameworkMatcher::new(&frameworks);
        let filtered = filter_opportunities(&cases, None, None, None, &matcher);
        assert_eq!(filtered.len(), cases.len());
        assert_eq!(filtered[0].id, "a");
        assert_eq!(filtered[1].id, "b");
    }

    #[test]
    fn test_goal_keyword_match_in_results() {
        let klarna = use_case_with_results(
            "klarna",
            "Klarna",
            "Fintech",
            "Customer Service Automation",
            &["Handled 2/3 of inquiries, equivalent to 700 agents"],
        );
        let frameworks = no_frameworks();
        let matcher = FrameworkMatcher::new(&frameworks);
        let cases = vec![klarna];
        let filtered =
            filter_opportunities(&cases, Some(Goal::WorkAtScale), None, None, &matcher);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_goal_time_fallback_in_challenge() {
        let mut uc = use_case_with_results("a", "Acme", "Retail", "Forecasting", &["no match"]);
        uc.challenge = "Analysts spent too much time reconciling reports".to_string();
        let frameworks = no_frameworks();
        let matcher = FrameworkMatcher::new(&frameworks);
        let cases = vec![uc];
        // Passes even for a quality goal via the "time" fallback.
        let filtered = filter_opportunities(&cases, Some(Goal::WorkBetter), None, None, &matcher);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_goal_excludes_nonmatching() {
        let uc = use_case_with_results("a", "Acme", "Retail", "Forecasting", &["no keywords"]);
        let frameworks = no_frameworks();
        let matcher = FrameworkMatcher::new(&frameworks);
        let cases = vec![uc];
        let filtered = filter_opportunities(&cases, Some(Goal::WorkAtScale), None, None, &matcher);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_timeline_matches_compound_difficulty() {
        let uc = use_case("a", "Acme", "Retail", "Forecasting");
        let frameworks = vec![framework("demand forecasting", "Low to Medium", &[])];
        let matcher = FrameworkMatcher::new(&frameworks);
        let cases = vec![uc];
        let quick = filter_opportunities(&cases, None, Some(Timeline::QuickWins), None, &matcher);
        assert_eq!(quick.len(), 1);
        // "Low to Medium" also contains "Medium", so balanced matches too.
        let balanced = filter_opportunities(&cases, None, Some(Timeline::Balanced), None, &matcher);
        assert_eq!(balanced.len(), 1);
    }

    #[test]
    fn test_timeline_excludes_unmatched_case() {
        let uc = use_case("a", "Nobody", "Mining", "Teleportation");
        let frameworks = vec![framework("document processing", "Low", &[])];
        let matcher = FrameworkMatcher::new(&frameworks);
        let cases = vec![uc];
        let filtered = filter_opportunities(&cases, None, Some(Timeline::QuickWins), None, &matcher);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_industry_all_sentinel_is_noop() {
        let cases = vec![
            use_case("a", "Acme", "Retail", "Forecasting"),
            use_case("b", "Bolt", "Logistics", "Routing"),
        ];
        let frameworks = no_frameworks();
        let matcher = FrameworkMatcher::new(&frameworks);
        assert_eq!(
            filter_opportunities(&cases, None, None, Some("All"), &matcher).len(),
            2
        );
        let retail = filter_opportunities(&cases, None, None, Some("Retail"), &matcher);
        assert_eq!(retail.len(), 1);
        assert_eq!(retail[0].id, "a");
    }

    #[test]
    fn test_search_blank_term_is_identity() {
        let cases = vec![use_case("a", "Acme", "Retail", "Forecasting")];
        let refs: Vec<&UseCase> = cases.iter().collect();
        assert_eq!(search_cases(refs.clone(), "   ").len(), 1);
        assert_eq!(search_cases(refs, "acme").len(), 1);
    }

    #[test]
    fn test_search_matches_application() {
        let mut uc = use_case("a", "Acme", "Retail", "Forecasting");
        uc.specific_application = "Store-level demand planning copilot".to_string();
        let cases = vec![uc];
        let refs: Vec<&UseCase> = cases.iter().collect();
        assert_eq!(search_cases(refs.clone(), "copilot").len(), 1);
        assert!(search_cases(refs, "blockchain").is_empty());
    }

    #[test]
    fn test_sort_by_difficulty_unmatched_first() {
        let cases = vec![
            use_case("high", "Acme", "Retail", "Forecasting"),
            use_case("none", "Nobody", "Mining", "Teleportation"),
            use_case("low", "Bolt", "Logistics", "Routing"),
        ];
        let frameworks = vec![
            framework("demand forecasting", "High", &[]),
            framework("route planning, routing", "Low", &[]),
        ];
        let matcher = FrameworkMatcher::new(&frameworks);
        let refs: Vec<&UseCase> = cases.iter().collect();
        let sorted = sort_opportunities(refs, SortKey::Difficulty, &matcher);
        let ids: Vec<&str> = sorted.iter().map(|uc| uc.id.as_str()).collect();
        // Position -1 (no framework) sorts before everything.
        assert_eq!(ids, vec!["none", "low", "high"]);
    }

    #[test]
    fn test_sort_very_high_shares_position_with_high() {
        let cases = vec![
            use_case("vh", "Acme", "Retail", "Forecasting"),
            use_case("h", "Bolt", "Logistics", "Routing"),
        ];
        let frameworks = vec![
            framework("demand forecasting", "Very High", &[]),
            framework("route planning, routing", "High", &[]),
        ];
        let matcher = FrameworkMatcher::new(&frameworks);
        let refs: Vec<&UseCase> = cases.iter().collect();
        let sorted = sort_opportunities(refs, SortKey::Difficulty, &matcher);
        // Equal positions, stable sort: original order preserved.
        let ids: Vec<&str> = sorted.iter().map(|uc| uc.id.as_str()).collect();
        assert_eq!(ids, vec!["vh", "h"]);
    }

    #[test]
    fn test_sort_recent_descending() {
        let mut older = use_case("old", "Acme", "Retail", "Forecasting");
        older.last_reviewed = chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let mut newer = use_case("new", "Bolt", "Logistics", "Routing");
        newer.last_reviewed = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let cases = vec![older, newer];
        let frameworks = no_frameworks();
        let matcher = FrameworkMatcher::new(&frameworks);
        let refs: Vec<&UseCase> = cases.iter().collect();
        let sorted = sort_opportunities(refs, SortKey::Recent, &matcher);
        assert_eq!(sorted[0].id, "new");
    }

    #[test]
    fn test_unrecognized_sort_key_parses_to_unsorted() {
        assert_eq!("fit-and-finish".parse::<SortKey>().unwrap(), SortKey::Unsorted);
        assert_eq!("difficulty".parse::<SortKey>().unwrap(), SortKey::Difficulty);
    }

    #[test]
    fn test_related_excludes_self_and_truncates() {
        let current = use_case("me", "Acme", "Banking", "Fraud Detection");
        let cases = vec![
            use_case("me", "Acme", "Banking", "Fraud Detection"),
            use_case("same-industry", "Bolt", "Banking", "Routing"),
            use_case("same-category", "Cora", "Insurance", "Fraud Detection"),
            use_case("unrelated", "Dyno", "Retail", "Forecasting"),
            use_case("also-banking", "Ember", "Banking", "Lending"),
        ];
        let related = related_cases(&current, &cases, 2);
        let ids: Vec<&str> = related.iter().map(|uc| uc.id.as_str()).collect();
        assert_eq!(ids, vec!["same-industry", "same-category"]);

        let all_related = related_cases(&current, &cases, 10);
        assert_eq!(all_related.len(), 3);
        assert!(all_related.iter().all(|uc| uc.id != "me"));
    }
}
