//! Heuristic association of use cases with intervention frameworks.
//!
//! There is no stored foreign key between the two collections. A use case
//! belongs to the first framework, in declaration order, whose typical-use
//! text mentions the case's category or whose example list mentions the
//! case's organization. Multiple frameworks can plausibly match; first wins.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::trace;

use crate::dataset::{Framework, UseCase};

/// Find the framework for a use case by scanning `frameworks` in order.
///
/// A framework matches when its `typical_use_cases` text contains the case's
/// `use_case_category`, or any of its `examples` entries contains the case's
/// `organization` name. All comparisons are lower-cased substring checks.
pub fn match_framework<'a>(
    use_case: &UseCase,
    frameworks: &'a [Framework],
) -> Option<&'a Framework> {
    frameworks.iter().find(|f| is_match(use_case, f))
}

fn is_match(use_case: &UseCase, framework: &Framework) -> bool {
    let category = use_case.use_case_category.to_lowercase();
    let organization = use_case.organization.to_lowercase();
    framework.typical_use_cases.to_lowercase().contains(&category)
        || framework
            .examples
            .iter()
            .any(|ex| ex.to_lowercase().contains(&organization))
}

/// Memoizing wrapper around [`match_framework`], keyed by use-case id.
///
/// The dataset and frameworks are immutable for the process lifetime, so the
/// cache never needs invalidation.
pub struct FrameworkMatcher<'a> {
    frameworks: &'a [Framework],
    cache: Mutex<HashMap<String, Option<usize>>>,
}

impl<'a> FrameworkMatcher<'a> {
    pub fn new(frameworks: &'a [Framework]) -> Self {
        Self {
            frameworks,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the framework for a use case, consulting the memo table first.
    pub fn framework_for(&self, use_case: &UseCase) -> Option<&'a Framework> {
        if let Ok(cache) = self.cache.lock()
            && let Some(&index) = cache.get(&use_case.id)
        {
            trace!(id = %use_case.id, "framework cache hit");
            return index.map(|i| &self.frameworks[i]);
        }

        let index = self.frameworks.iter().position(|f| is_match(use_case, f));
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(use_case.id.clone(), index);
        }
        index.map(|i| &self.frameworks[i])
    }

    /// The raw difficulty text of the matched framework, if any. Callers that
    /// need the compound form ("Low to Medium") use this; callers that need a
    /// bucket go through [`crate::derive::difficulty_level`].
    pub fn raw_difficulty(&self, use_case: &UseCase) -> Option<&'a str> {
        self.framework_for(use_case)
            .map(|f| f.difficulty_level.as_str())
    }
}
