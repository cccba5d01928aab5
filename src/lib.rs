//! atlas-explorer: a browsing, filtering, and scoring front end over a small
//! static dataset of GenAI adoption case studies.
//!
//! The dataset is bundled, loaded once, and immutable. All core operations
//! are pure functions over in-memory slices: framework matching, difficulty
//! derivation, goal/timeline/industry filtering, additive fit scoring, and
//! related-case lookup. The only side effect in the crate is the best-effort
//! persistence of saved items and preferences in [`state`].

pub mod config;
pub mod dataset;
pub mod derive;
pub mod error;
pub mod filters;
pub mod formatters;
pub mod matcher;
pub mod score;
pub mod state;

// Load env from a simple, standardized location resolution.
// This uses dotenvy::dotenv().ok() which loads .env if present and silently ignores if missing.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}
