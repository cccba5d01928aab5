use std::path::PathBuf;

use crate::error::{AtlasError, Result};

/// Runtime configuration loaded from environment variables.
///
/// Every knob has a default, so `Config::load()` only fails when a value is
/// present but unusable (e.g. a non-numeric limit).
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional path to an external dataset file; the bundled dataset is used
    /// when unset.
    pub data_path: Option<PathBuf>,
    /// Location of the persisted app state (saved items, recent searches,
    /// preferences).
    pub state_path: PathBuf,
    /// How many related cases to show on a detail view.
    pub related_limit: usize,
    /// How many recommendations the assessment returns.
    pub recommend_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            state_path: default_state_path(),
            related_limit: 3,
            recommend_limit: 3,
        }
    }
}

fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("atlas-explorer")
        .join("state.json")
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("ATLAS_DATA_PATH")
            && !path.trim().is_empty()
        {
            config.data_path = Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("ATLAS_STATE_PATH")
            && !path.trim().is_empty()
        {
            config.state_path = PathBuf::from(path);
        }

        if let Ok(raw) = std::env::var("ATLAS_RELATED_LIMIT") {
            let limit = raw.parse::<usize>().map_err(|_| AtlasError::Config {
                message: format!("ATLAS_RELATED_LIMIT is not a number: {raw}"),
            })?;
            config.related_limit = limit.clamp(1, 20);
        }

        if let Ok(raw) = std::env::var("ATLAS_RECOMMEND_LIMIT") {
            let limit = raw.parse::<usize>().map_err(|_| AtlasError::Config {
                message: format!("ATLAS_RECOMMEND_LIMIT is not a number: {raw}"),
            })?;
            config.recommend_limit = limit.clamp(1, 20);
        }

        Ok(config)
    }
}
