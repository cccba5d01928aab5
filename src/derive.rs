//! Derived display attributes: difficulty bucket, timeline, investment, ROI.
//!
//! None of these are stored on a use case. They are recomputed from the
//! matched framework every time, with a fixed default when nothing matches.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::UseCase;
use crate::matcher::FrameworkMatcher;

/// Coarse difficulty bucket derived from a framework's free-text difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Low => "Low",
            Difficulty::Medium => "Medium",
            Difficulty::High => "High",
            Difficulty::VeryHigh => "Very High",
        }
    }

    /// Classify free-form difficulty text into a bucket.
    ///
    /// Precedence matters: compound descriptors like "Medium to High" contain
    /// several level words, so "Very High" is checked before "High" before
    /// "Medium". Anything with none of the three words is Low.
    pub fn from_text(text: &str) -> Self {
        if text.contains("Very High") {
            Difficulty::VeryHigh
        } else if text.contains("High") {
            Difficulty::High
        } else if text.contains("Medium") {
            Difficulty::Medium
        } else {
            Difficulty::Low
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Difficulty bucket for a use case: the matched framework's text classified
/// by [`Difficulty::from_text`], or Medium when no framework matches or its
/// difficulty text is empty.
pub fn difficulty_level(use_case: &UseCase, matcher: &FrameworkMatcher<'_>) -> Difficulty {
    match matcher.raw_difficulty(use_case) {
        Some(text) if !text.is_empty() => Difficulty::from_text(text),
        _ => Difficulty::Medium,
    }
}

/// Expected implementation timeline for a use case.
pub fn timeline_estimate(use_case: &UseCase, matcher: &FrameworkMatcher<'_>) -> &'static str {
    match difficulty_level(use_case, matcher) {
        Difficulty::Low => "3-6 months",
        Difficulty::Medium => "6-12 months",
        Difficulty::High => "12-18 months",
        Difficulty::VeryHigh => "18+ months",
    }
}

/// Expected investment level for a use case.
pub fn investment_level(use_case: &UseCase, matcher: &FrameworkMatcher<'_>) -> &'static str {
    match difficulty_level(use_case, matcher) {
        Difficulty::Low => "Low-Medium",
        Difficulty::Medium => "Medium",
        Difficulty::High => "Medium-High",
        Difficulty::VeryHigh => "High",
    }
}

/// Expected window before the investment pays back.
pub fn roi_timeline(use_case: &UseCase, matcher: &FrameworkMatcher<'_>) -> &'static str {
    match difficulty_level(use_case, matcher) {
        Difficulty::Low => "6-12 months",
        Difficulty::Medium => "12-18 months",
        Difficulty::High => "18-24 months",
        Difficulty::VeryHigh => "24-36+ months",
    }
}
