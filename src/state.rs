//! Persisted client state: saved opportunities, recent searches, and view
//! preferences.
//!
//! State changes go through a pure reducer returning a new value. The
//! file-backed store wraps the reducer with best-effort persistence: a
//! missing or corrupt state file falls back to defaults, and a failed write
//! is logged and swallowed. Storage problems never surface to the user.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const MAX_RECENT_SEARCHES: usize = 5;

/// One recorded assessment search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub goal: String,
    pub timeline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Explorer layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_view")]
    pub view: ViewMode,
    #[serde(default = "default_sort")]
    pub sort: String,
}

fn default_view() -> ViewMode {
    ViewMode::Grid
}

fn default_sort() -> String {
    "difficulty".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            view: default_view(),
            sort: default_sort(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    /// Saved use-case ids. No duplicates; insertion order kept for display.
    pub saved_opportunities: Vec<String>,
    /// Newest first, at most [`MAX_RECENT_SEARCHES`] entries.
    pub recent_searches: Vec<SearchQuery>,
    pub preferences: Preferences,
}

/// A state transition.
#[derive(Debug, Clone)]
pub enum Action {
    SaveOpportunity(String),
    RemoveOpportunity(String),
    AddRecentSearch(SearchQuery),
    SetPreferences {
        view: Option<ViewMode>,
        sort: Option<String>,
    },
}

impl AppState {
    /// Apply an action, returning the next state. Pure; the input state is
    /// untouched.
    pub fn apply(&self, action: Action) -> AppState {
        let mut next = self.clone();
        match action {
            Action::SaveOpportunity(id) => {
                // Idempotent: saving an already-saved id is a no-op.
                if !next.saved_opportunities.contains(&id) {
                    next.saved_opportunities.push(id);
                }
            }
            Action::RemoveOpportunity(id) => {
                next.saved_opportunities.retain(|saved| *saved != id);
            }
            Action::AddRecentSearch(query) => {
                next.recent_searches.insert(0, query);
                next.recent_searches.truncate(MAX_RECENT_SEARCHES);
            }
            Action::SetPreferences { view, sort } => {
                if let Some(view) = view {
                    next.preferences.view = view;
                }
                if let Some(sort) = sort {
                    next.preferences.sort = sort;
                }
            }
        }
        next
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved_opportunities.iter().any(|saved| saved == id)
    }
}

/// File-backed store around [`AppState`].
pub struct StateStore {
    path: PathBuf,
    state: AppState,
}

impl StateStore {
    /// Open the store at `path`, loading existing state if it parses and
    /// falling back to defaults otherwise.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = load_state(&path);
        Self { path, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an action and persist the result. Persistence is best-effort;
    /// a write failure keeps the in-memory state and logs a warning.
    pub fn dispatch(&mut self, action: Action) {
        self.state = self.state.apply(action);
        self.save();
    }

    fn save(&self) {
        if let Err(e) = write_state(&self.path, &self.state) {
            warn!(path = %self.path.display(), error = %e, "failed to persist app state");
        }
    }
}

fn load_state(path: &Path) -> AppState {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => {
            debug!(path = %path.display(), "no saved state, starting with defaults");
            return AppState::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt state file, using defaults");
            AppState::default()
        }
    }
}

fn write_state(path: &Path, state: &AppState) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(state)?;
    std::fs::write(path, raw)
}
